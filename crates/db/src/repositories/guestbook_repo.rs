//! Repository for the `guestbook_messages` table.
//!
//! The table's column set follows the guestbook plugin config: saving the
//! config syncs one real column per custom field. Because the schema is
//! dynamic, reads surface rows as JSON objects instead of a fixed struct.
//!
//! Identifier safety: every column name interpolated here has already
//! passed `sitecraft_core::plugin::guestbook::is_valid_field_name` (the
//! API layer renders DDL through `CustomField::column_ddl`), and all
//! values are bound, never interpolated.

use serde_json::{Map, Value};
use sitecraft_core::plugin::guestbook::{CustomField, CustomFieldType, FieldValue, ValidatedField};
use sitecraft_core::types::{DbId, Timestamp};
use sqlx::{PgPool, Row};
use tracing::debug;

/// Provides column sync, insert, list, and soft delete for guestbook
/// messages.
pub struct GuestbookRepo;

impl GuestbookRepo {
    /// Bring the table's columns up to date with the field set.
    ///
    /// `column_ddls` are fragments rendered by `CustomField::column_ddl`.
    /// Idempotent: existing columns are left untouched.
    pub async fn sync_columns(pool: &PgPool, column_ddls: &[String]) -> Result<(), sqlx::Error> {
        for ddl in column_ddls {
            debug!(ddl = %ddl, "Syncing guestbook column");
            let query = format!("ALTER TABLE guestbook_messages ADD COLUMN IF NOT EXISTS {ddl}");
            sqlx::query(&query).execute(pool).await?;
        }
        Ok(())
    }

    /// Insert a validated submission, returning the new row id.
    pub async fn insert(pool: &PgPool, values: &[ValidatedField]) -> Result<DbId, sqlx::Error> {
        if values.is_empty() {
            return sqlx::query_scalar::<_, DbId>(
                "INSERT INTO guestbook_messages DEFAULT VALUES RETURNING id",
            )
            .fetch_one(pool)
            .await;
        }

        let columns: Vec<String> = values
            .iter()
            .map(|v| format!("\"{}\"", v.field_name))
            .collect();
        let placeholders: Vec<String> = (1..=values.len()).map(|i| format!("${i}")).collect();
        let query = format!(
            "INSERT INTO guestbook_messages ({}) VALUES ({}) RETURNING id",
            columns.join(", "),
            placeholders.join(", ")
        );

        let mut insert = sqlx::query_scalar::<_, DbId>(&query);
        for value in values {
            insert = match &value.value {
                FieldValue::Text(s) => insert.bind(s),
                FieldValue::Integer(n) => insert.bind(n),
            };
        }

        insert.fetch_one(pool).await
    }

    /// List live messages, newest first, as JSON objects keyed by
    /// `field_name` plus `id` and `created_at`.
    pub async fn list(
        pool: &PgPool,
        fields: &[CustomField],
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Value>, sqlx::Error> {
        let field_columns: Vec<String> = fields
            .iter()
            .map(|f| format!("\"{}\"", f.field_name))
            .collect();
        let query = format!(
            "SELECT id, created_at, {} FROM guestbook_messages
             WHERE deleted_at IS NULL
             ORDER BY id DESC
             LIMIT $1 OFFSET $2",
            field_columns.join(", ")
        );

        let rows = sqlx::query(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        let mut messages = Vec::with_capacity(rows.len());
        for row in rows {
            let mut object = Map::new();
            object.insert("id".to_string(), row.try_get::<DbId, _>("id")?.into());
            object.insert(
                "created_at".to_string(),
                row.try_get::<Timestamp, _>("created_at")?.to_rfc3339().into(),
            );
            for field in fields {
                let name = field.field_name.as_str();
                let value = match field.field_type {
                    // Number columns are `integer`, so decode as i32.
                    CustomFieldType::Number => row
                        .try_get::<Option<i32>, _>(name)?
                        .map_or(Value::Null, Value::from),
                    _ => row
                        .try_get::<Option<String>, _>(name)?
                        .map_or(Value::Null, Value::from),
                };
                object.insert(name.to_string(), value);
            }
            messages.push(Value::Object(object));
        }

        Ok(messages)
    }

    /// Soft-delete a message by ID. Returns `true` if a row was marked
    /// deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE guestbook_messages SET deleted_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
