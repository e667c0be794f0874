//! Repository for the `products` table and its `product_data` side table.

use sitecraft_core::types::DbId;
use sqlx::PgPool;

use crate::models::product::{CreateProduct, Product, ProductData, UpdateProduct};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, url_token, keywords, description, category_id, price_cents, \
     stock, views, images, status, created_at, updated_at, deleted_at";

/// Provides CRUD operations for products plus counter helpers.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new product and its content row in one transaction.
    pub async fn create(pool: &PgPool, input: &CreateProduct) -> Result<Product, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO products
                (title, url_token, keywords, description, category_id,
                 price_cents, stock, images, status)
             VALUES ($1, COALESCE($2, ''), COALESCE($3, ''), COALESCE($4, ''),
                     COALESCE($5, 0), COALESCE($6, 0), COALESCE($7, 0),
                     COALESCE($8, '{{}}'), COALESCE($9, 0))
             RETURNING {COLUMNS}"
        );
        let product = sqlx::query_as::<_, Product>(&insert_query)
            .bind(&input.title)
            .bind(&input.url_token)
            .bind(&input.keywords)
            .bind(&input.description)
            .bind(input.category_id)
            .bind(input.price_cents)
            .bind(input.stock)
            .bind(&input.images)
            .bind(input.status)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO product_data (product_id, content) VALUES ($1, COALESCE($2, ''))")
            .bind(product.id)
            .bind(&input.content)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(product)
    }

    /// Find a product by its ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a product by ID, including soft-deleted rows. Used for restore.
    pub async fn find_by_id_include_deleted(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a live product by its URL token.
    pub async fn find_by_url_token(
        pool: &PgPool,
        url_token: &str,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM products WHERE url_token = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Product>(&query)
            .bind(url_token)
            .fetch_optional(pool)
            .await
    }

    /// Fetch the content row for a product.
    pub async fn find_data(pool: &PgPool, id: DbId) -> Result<Option<ProductData>, sqlx::Error> {
        sqlx::query_as::<_, ProductData>(
            "SELECT product_id, content FROM product_data WHERE product_id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// List live products, newest first, optionally scoped to a category.
    pub async fn list(
        pool: &PgPool,
        category_id: Option<DbId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM products
             WHERE deleted_at IS NULL
               AND ($1::bigint IS NULL OR category_id = $1)
             ORDER BY id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(category_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a product. Only non-`None` fields in `input` are applied;
    /// content updates land in `product_data` within the same transaction.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProduct,
    ) -> Result<Option<Product>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let update_query = format!(
            "UPDATE products SET
                title = COALESCE($2, title),
                url_token = COALESCE($3, url_token),
                keywords = COALESCE($4, keywords),
                description = COALESCE($5, description),
                category_id = COALESCE($6, category_id),
                price_cents = COALESCE($7, price_cents),
                stock = COALESCE($8, stock),
                images = COALESCE($9, images),
                status = COALESCE($10, status),
                updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        let product = sqlx::query_as::<_, Product>(&update_query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.url_token)
            .bind(&input.keywords)
            .bind(&input.description)
            .bind(input.category_id)
            .bind(input.price_cents)
            .bind(input.stock)
            .bind(&input.images)
            .bind(input.status)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(product) = product else {
            tx.rollback().await?;
            return Ok(None);
        };

        if let Some(content) = &input.content {
            sqlx::query(
                "INSERT INTO product_data (product_id, content) VALUES ($1, $2)
                 ON CONFLICT (product_id) DO UPDATE SET content = $2",
            )
            .bind(id)
            .bind(content)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(Some(product))
    }

    /// Bump the view counter. Arithmetic happens in SQL so concurrent
    /// bumps never lose updates.
    pub async fn increment_views(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE products SET views = views + 1 WHERE id = $1 AND deleted_at IS NULL")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Soft-delete a product by ID. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE products SET deleted_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Restore a soft-deleted product. Returns `true` if a row was restored.
    pub async fn restore(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE products SET deleted_at = NULL, updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NOT NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count live products.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products WHERE deleted_at IS NULL")
            .fetch_one(pool)
            .await
    }

    /// Live products for sitemap generation: url_token + last update,
    /// oldest first, no pagination.
    pub async fn list_for_sitemap(
        pool: &PgPool,
    ) -> Result<Vec<(String, chrono::DateTime<chrono::Utc>)>, sqlx::Error> {
        sqlx::query_as::<_, (String, chrono::DateTime<chrono::Utc>)>(
            "SELECT url_token, updated_at FROM products
             WHERE deleted_at IS NULL AND status = 1 AND url_token <> ''
             ORDER BY id ASC",
        )
        .fetch_all(pool)
        .await
    }
}
