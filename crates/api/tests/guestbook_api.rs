//! HTTP-level integration tests for the guestbook form: config-driven
//! column sync, submission validation, listing, and deletion.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, put_json};
use sqlx::PgPool;

/// Save a guestbook config with one extra text field and one number field.
async fn save_config(pool: &PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        "/api/v1/plugins/guestbook",
        serde_json::json!({
            "return_message": "Thanks for your message",
            "fields": [
                {"name": "Company", "field_name": "company", "type": "text",
                 "required": false, "is_system": false},
                {"name": "Age", "field_name": "age", "type": "number",
                 "required": false, "is_system": false},
            ],
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_submit_returns_id_and_return_message(pool: PgPool) {
    save_config(&pool).await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/guestbook",
        serde_json::json!({
            "user_name": "Alice",
            "contact": "alice@example.com",
            "content": "Hello",
            "company": "ACME",
            "age": 30,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert!(json["id"].as_i64().unwrap() > 0);
    assert_eq!(json["return_message"], "Thanks for your message");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_missing_required_field_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/guestbook",
        serde_json::json!({"user_name": "Alice"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_returns_submitted_fields(pool: PgPool) {
    save_config(&pool).await;

    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        "/api/v1/guestbook",
        serde_json::json!({
            "user_name": "Bob",
            "contact": "bob@example.com",
            "content": "Hi",
            "age": 44,
        }),
    )
    .await;

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/guestbook").await).await;
    let messages = json.as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["user_name"], "Bob");
    assert_eq!(messages[0]["age"], 44);
    // Omitted optional column reads back null.
    assert!(messages[0]["company"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_undeclared_keys_are_ignored(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/guestbook",
        serde_json::json!({
            "user_name": "Carol",
            "contact": "carol@example.com",
            "content": "Hey",
            "evil_column": "DROP TABLE",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/guestbook").await).await;
    assert!(json.as_array().unwrap()[0].get("evil_column").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_invalid_field_name_in_config_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        "/api/v1/plugins/guestbook",
        serde_json::json!({
            "return_message": "",
            "fields": [
                {"name": "Bad", "field_name": "x\"; DROP TABLE --", "type": "text",
                 "required": false, "is_system": false},
            ],
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_message(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let created = body_json(
        post_json(
            app,
            "/api/v1/guestbook",
            serde_json::json!({
                "user_name": "Dave",
                "contact": "dave@example.com",
                "content": "Bye",
            }),
        )
        .await,
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/guestbook/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Second delete is a 404.
    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/guestbook/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/guestbook").await).await;
    assert!(json.as_array().unwrap().is_empty());
}
