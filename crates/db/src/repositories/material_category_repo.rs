//! Repository for the `material_categories` table.

use sitecraft_core::types::DbId;
use sqlx::PgPool;

use crate::models::material::{CreateMaterialCategory, MaterialCategory, UpdateMaterialCategory};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, material_count, status, created_at, updated_at, deleted_at";

/// Provides CRUD operations for material categories.
///
/// `material_count` is owned by [`crate::repositories::MaterialRepo`],
/// which maintains it whenever materials are created, moved, or deleted.
pub struct MaterialCategoryRepo;

impl MaterialCategoryRepo {
    /// Insert a new material category, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateMaterialCategory,
    ) -> Result<MaterialCategory, sqlx::Error> {
        let query = format!(
            "INSERT INTO material_categories (title, status)
             VALUES ($1, COALESCE($2, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MaterialCategory>(&query)
            .bind(&input.title)
            .bind(input.status)
            .fetch_one(pool)
            .await
    }

    /// Find a material category by its ID. Excludes soft-deleted rows.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MaterialCategory>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM material_categories WHERE id = $1 AND deleted_at IS NULL"
        );
        sqlx::query_as::<_, MaterialCategory>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List live material categories ordered by id ascending.
    pub async fn list(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<MaterialCategory>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM material_categories
             WHERE deleted_at IS NULL
             ORDER BY id ASC
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, MaterialCategory>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a material category. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMaterialCategory,
    ) -> Result<Option<MaterialCategory>, sqlx::Error> {
        let query = format!(
            "UPDATE material_categories SET
                title = COALESCE($2, title),
                status = COALESCE($3, status),
                updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MaterialCategory>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.status)
            .fetch_optional(pool)
            .await
    }

    /// Count live materials still attached to a category. The handler
    /// refuses deletion while this is non-zero.
    pub async fn count_live_materials(pool: &PgPool, id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM materials WHERE category_id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_one(pool)
        .await
    }

    /// Soft-delete a material category. Returns `true` if a row was marked
    /// deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE material_categories SET deleted_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
