//! Integration tests for guestbook column sync and dynamic rows, plus the
//! settings store the plugin configs live in.

use serde_json::json;
use sqlx::PgPool;

use sitecraft_core::plugin::guestbook::{
    default_fields, validate_submission, CustomField, CustomFieldType,
};
use sitecraft_db::repositories::{GuestbookRepo, SettingRepo};

fn extra_field(field_name: &str, field_type: CustomFieldType) -> CustomField {
    CustomField {
        name: field_name.to_string(),
        field_name: field_name.to_string(),
        field_type,
        required: false,
        is_system: false,
        content: String::new(),
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn sync_columns_is_idempotent(pool: PgPool) {
    let field = extra_field("company", CustomFieldType::Text);
    let ddls = vec![field.column_ddl().unwrap()];

    GuestbookRepo::sync_columns(&pool, &ddls).await.unwrap();
    // Second run must not fail on the existing column.
    GuestbookRepo::sync_columns(&pool, &ddls).await.unwrap();
}

#[sqlx::test(migrations = "./migrations")]
async fn insert_and_list_round_trip(pool: PgPool) {
    let mut fields = default_fields();
    fields.push(extra_field("company", CustomFieldType::Text));
    fields.push(extra_field("age", CustomFieldType::Number));

    let ddls: Vec<String> = fields
        .iter()
        .map(|f| f.column_ddl().unwrap())
        .collect();
    GuestbookRepo::sync_columns(&pool, &ddls).await.unwrap();

    let submission = json!({
        "user_name": "Alice",
        "contact": "alice@example.com",
        "content": "Hello",
        "company": "ACME",
        "age": 30,
    });
    let validated = validate_submission(&fields, &submission).unwrap();
    let id = GuestbookRepo::insert(&pool, &validated).await.unwrap();
    assert!(id > 0);

    let messages = GuestbookRepo::list(&pool, &fields, 20, 0).await.unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["user_name"], "Alice");
    assert_eq!(messages[0]["age"], 30);
    assert_eq!(messages[0]["id"], id);
}

#[sqlx::test(migrations = "./migrations")]
async fn omitted_optional_column_reads_back_null(pool: PgPool) {
    let mut fields = default_fields();
    fields.push(extra_field("company", CustomFieldType::Text));

    let ddls: Vec<String> = fields
        .iter()
        .map(|f| f.column_ddl().unwrap())
        .collect();
    GuestbookRepo::sync_columns(&pool, &ddls).await.unwrap();

    let submission = json!({
        "user_name": "Bob",
        "contact": "bob@example.com",
        "content": "Hi",
    });
    let validated = validate_submission(&fields, &submission).unwrap();
    GuestbookRepo::insert(&pool, &validated).await.unwrap();

    let messages = GuestbookRepo::list(&pool, &fields, 20, 0).await.unwrap();
    assert!(messages[0]["company"].is_null());
}

#[sqlx::test(migrations = "./migrations")]
async fn soft_delete_hides_message(pool: PgPool) {
    let fields = default_fields();
    let submission = json!({
        "user_name": "Carol",
        "contact": "carol@example.com",
        "content": "Bye",
    });
    let validated = validate_submission(&fields, &submission).unwrap();
    let id = GuestbookRepo::insert(&pool, &validated).await.unwrap();

    assert!(GuestbookRepo::soft_delete(&pool, id).await.unwrap());
    assert!(!GuestbookRepo::soft_delete(&pool, id).await.unwrap());

    let messages = GuestbookRepo::list(&pool, &fields, 20, 0).await.unwrap();
    assert!(messages.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn settings_get_and_upsert(pool: PgPool) {
    assert!(SettingRepo::get(&pool, "push").await.unwrap().is_none());

    SettingRepo::upsert(&pool, "push", &json!({"baidu_api": "http://a"}))
        .await
        .unwrap();
    let stored = SettingRepo::get(&pool, "push").await.unwrap().unwrap();
    assert_eq!(stored["baidu_api"], "http://a");

    // Upsert replaces the whole value.
    SettingRepo::upsert(&pool, "push", &json!({"bing_api": "http://b"}))
        .await
        .unwrap();
    let stored = SettingRepo::get(&pool, "push").await.unwrap().unwrap();
    assert!(stored.get("baidu_api").is_none());
    assert_eq!(stored["bing_api"], "http://b");
}
