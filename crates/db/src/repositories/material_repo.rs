//! Repository for the `materials` table and its usage ledger.
//!
//! Owns the denormalized counters: `material_categories.material_count`
//! moves in the same transaction as the material row, and `use_count`
//! moves with the usage ledger.

use sitecraft_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::material::{
    CreateMaterial, Material, MaterialUsage, RecordUsage, UpdateMaterial,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, category_id, content, status, auto_update, use_count, \
     created_at, updated_at, deleted_at";

/// Same columns qualified for joined list queries.
const QUALIFIED_COLUMNS: &str =
    "m.id, m.title, m.category_id, m.content, m.status, m.auto_update, m.use_count, \
     m.created_at, m.updated_at, m.deleted_at";

/// Provides CRUD operations for materials plus usage tracking.
pub struct MaterialRepo;

impl MaterialRepo {
    /// Insert a new material, bumping its category counter in the same
    /// transaction.
    pub async fn create(pool: &PgPool, input: &CreateMaterial) -> Result<Material, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO materials (title, category_id, content, status, auto_update)
             VALUES ($1, COALESCE($2, 0), COALESCE($3, ''), COALESCE($4, 0), COALESCE($5, 0))
             RETURNING {COLUMNS}"
        );
        let material = sqlx::query_as::<_, Material>(&insert_query)
            .bind(&input.title)
            .bind(input.category_id)
            .bind(&input.content)
            .bind(input.status)
            .bind(input.auto_update)
            .fetch_one(&mut *tx)
            .await?;

        bump_category_count(&mut tx, material.category_id, 1).await?;

        tx.commit().await?;
        Ok(material)
    }

    /// Find a material by its ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Material>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM materials WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Material>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List live materials, newest first, optionally scoped to a category.
    ///
    /// Each row carries the resolved `category_title` for display.
    pub async fn list(
        pool: &PgPool,
        category_id: Option<DbId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Material>, sqlx::Error> {
        let query = format!(
            "SELECT {QUALIFIED_COLUMNS}, mc.title AS category_title
             FROM materials m
             LEFT JOIN material_categories mc
               ON mc.id = m.category_id AND mc.deleted_at IS NULL
             WHERE m.deleted_at IS NULL
               AND ($1::bigint IS NULL OR m.category_id = $1)
             ORDER BY m.id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Material>(&query)
            .bind(category_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a material. Only non-`None` fields are applied; moving the
    /// material between categories adjusts both counters.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMaterial,
    ) -> Result<Option<Material>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let old_category: Option<DbId> = sqlx::query_scalar(
            "SELECT category_id FROM materials WHERE id = $1 AND deleted_at IS NULL FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(old_category) = old_category else {
            tx.rollback().await?;
            return Ok(None);
        };

        let update_query = format!(
            "UPDATE materials SET
                title = COALESCE($2, title),
                category_id = COALESCE($3, category_id),
                content = COALESCE($4, content),
                status = COALESCE($5, status),
                auto_update = COALESCE($6, auto_update),
                updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        let material = sqlx::query_as::<_, Material>(&update_query)
            .bind(id)
            .bind(&input.title)
            .bind(input.category_id)
            .bind(&input.content)
            .bind(input.status)
            .bind(input.auto_update)
            .fetch_one(&mut *tx)
            .await?;

        if material.category_id != old_category {
            bump_category_count(&mut tx, old_category, -1).await?;
            bump_category_count(&mut tx, material.category_id, 1).await?;
        }

        tx.commit().await?;
        Ok(Some(material))
    }

    /// Soft-delete a material, decrementing its category counter.
    /// Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let category_id: Option<DbId> = sqlx::query_scalar(
            "UPDATE materials SET deleted_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING category_id",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(category_id) = category_id else {
            tx.rollback().await?;
            return Ok(false);
        };

        bump_category_count(&mut tx, category_id, -1).await?;

        tx.commit().await?;
        Ok(true)
    }

    /// Record that a material was embedded into an item: appends a ledger
    /// row and bumps `use_count` in the same transaction.
    ///
    /// Returns `None` if no live material with the given `id` exists.
    pub async fn record_usage(
        pool: &PgPool,
        id: DbId,
        input: &RecordUsage,
    ) -> Result<Option<MaterialUsage>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let bumped = sqlx::query(
            "UPDATE materials SET use_count = use_count + 1
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if bumped.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        let usage = sqlx::query_as::<_, MaterialUsage>(
            "INSERT INTO material_usages (material_id, item_type, item_id)
             VALUES ($1, $2, $3)
             RETURNING id, material_id, item_type, item_id, created_at",
        )
        .bind(id)
        .bind(&input.item_type)
        .bind(input.item_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(usage))
    }

    /// List usage-ledger rows for a material, newest first.
    pub async fn list_usages(
        pool: &PgPool,
        id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<MaterialUsage>, sqlx::Error> {
        sqlx::query_as::<_, MaterialUsage>(
            "SELECT id, material_id, item_type, item_id, created_at
             FROM material_usages
             WHERE material_id = $1
             ORDER BY id DESC
             LIMIT $2 OFFSET $3",
        )
        .bind(id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }
}

/// Adjust a category's material counter. Category id `0` means
/// "uncategorized" and has no counter row.
async fn bump_category_count(
    tx: &mut Transaction<'_, Postgres>,
    category_id: DbId,
    delta: i64,
) -> Result<(), sqlx::Error> {
    if category_id == 0 {
        return Ok(());
    }
    sqlx::query(
        "UPDATE material_categories
         SET material_count = GREATEST(material_count + $2, 0)
         WHERE id = $1",
    )
    .bind(category_id)
    .bind(delta)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
