//! HTTP-level integration tests for material categories, materials, and
//! the usage ledger.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json};
use sqlx::PgPool;

async fn create_category(pool: &PgPool, title: &str) -> i64 {
    let app = common::build_test_app(pool.clone());
    let json = body_json(
        post_json(
            app,
            "/api/v1/material-categories",
            serde_json::json!({"title": title, "status": 1}),
        )
        .await,
    )
    .await;
    json["id"].as_i64().unwrap()
}

async fn create_material(pool: &PgPool, title: &str, category_id: i64) -> i64 {
    let app = common::build_test_app(pool.clone());
    let json = body_json(
        post_json(
            app,
            "/api/v1/materials",
            serde_json::json!({
                "title": title,
                "category_id": category_id,
                "content": "snippet",
                "status": 1,
            }),
        )
        .await,
    )
    .await;
    json["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_material_bumps_category_counter(pool: PgPool) {
    let category_id = create_category(&pool, "Snippets").await;
    create_material(&pool, "M1", category_id).await;
    create_material(&pool, "M2", category_id).await;

    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/api/v1/material-categories/{category_id}")).await).await;
    assert_eq!(json["material_count"], 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_category_with_materials_returns_409(pool: PgPool) {
    let category_id = create_category(&pool, "Guarded").await;
    let material_id = create_material(&pool, "M1", category_id).await;

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/material-categories/{category_id}")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Deleting the material frees the category.
    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/materials/{material_id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = delete(app, &format!("/api/v1/material-categories/{category_id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_material_list_carries_category_title(pool: PgPool) {
    let category_id = create_category(&pool, "Snippets").await;
    create_material(&pool, "M1", category_id).await;

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/materials").await).await;
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["category_title"], "Snippets");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_category_scoped_material_list(pool: PgPool) {
    let in_cat = create_category(&pool, "In").await;
    let out_cat = create_category(&pool, "Out").await;
    create_material(&pool, "M1", in_cat).await;
    create_material(&pool, "M2", out_cat).await;

    let app = common::build_test_app(pool);
    let json = body_json(
        get(app, &format!("/api/v1/material-categories/{in_cat}/materials")).await,
    )
    .await;
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "M1");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_record_usage_and_list_ledger(pool: PgPool) {
    let material_id = create_material(&pool, "M1", 0).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/materials/{material_id}/use"),
        serde_json::json!({"item_type": "product", "item_id": 42}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let usage = body_json(response).await;
    assert_eq!(usage["item_type"], "product");
    assert_eq!(usage["item_id"], 42);

    let app = common::build_test_app(pool.clone());
    let material = body_json(get(app, &format!("/api/v1/materials/{material_id}")).await).await;
    assert_eq!(material["use_count"], 1);

    let app = common::build_test_app(pool.clone());
    let ledger = body_json(get(app, &format!("/api/v1/materials/{material_id}/usages")).await).await;
    assert_eq!(ledger.as_array().unwrap().len(), 1);

    // Recording against a missing material is a 404.
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/materials/999999/use",
        serde_json::json!({"item_type": "product", "item_id": 1}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
