//! Repository for the `settings` table (one JSONB row per plugin).

use sqlx::PgPool;

/// Provides typed-agnostic get/upsert for plugin config blocks. Typed
/// (de)serialization happens in the API layer against the core config
/// structs.
pub struct SettingRepo;

impl SettingRepo {
    /// Return the stored JSON value for a plugin, `None` if never saved.
    pub async fn get(
        pool: &PgPool,
        name: &str,
    ) -> Result<Option<serde_json::Value>, sqlx::Error> {
        sqlx::query_scalar::<_, serde_json::Value>("SELECT value FROM settings WHERE name = $1")
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Insert or fully replace the stored JSON value for a plugin.
    pub async fn upsert(
        pool: &PgPool,
        name: &str,
        value: &serde_json::Value,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO settings (name, value) VALUES ($1, $2)
             ON CONFLICT (name) DO UPDATE SET value = $2, updated_at = NOW()",
        )
        .bind(name)
        .bind(value)
        .execute(pool)
        .await?;
        Ok(())
    }
}
