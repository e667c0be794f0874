//! Product entity model and DTOs.

use serde::{Deserialize, Serialize};
use sitecraft_core::thumb;
use sitecraft_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A product row from the `products` table.
///
/// `logo` and `thumb` are display fields resolved from `images` at read
/// time; they are never stored.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub title: String,
    pub url_token: String,
    pub keywords: String,
    pub description: String,
    pub category_id: DbId,
    pub price_cents: i64,
    pub stock: i64,
    pub views: i64,
    pub images: Vec<String>,
    pub status: i16,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(skip_serializing)]
    pub deleted_at: Option<Timestamp>,
    #[sqlx(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[sqlx(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumb: Option<String>,
}

impl Product {
    /// Fill the `logo`/`thumb` display fields from the image list.
    pub fn resolve_thumb(&mut self, base_url: &str, default_thumb: &str) {
        if let Some(resolved) = thumb::resolve(&self.images, base_url, default_thumb) {
            self.logo = Some(resolved.logo);
            self.thumb = Some(resolved.thumb);
        }
    }
}

/// The long-form content row backing a product.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductData {
    pub product_id: DbId,
    pub content: String,
}

/// DTO for creating a new product.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProduct {
    pub title: String,
    pub url_token: Option<String>,
    pub keywords: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<DbId>,
    pub price_cents: Option<i64>,
    pub stock: Option<i64>,
    pub images: Option<Vec<String>>,
    pub status: Option<i16>,
    /// Long-form content, stored in `product_data`.
    pub content: Option<String>,
}

/// DTO for updating an existing product. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProduct {
    pub title: Option<String>,
    pub url_token: Option<String>,
    pub keywords: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<DbId>,
    pub price_cents: Option<i64>,
    pub stock: Option<i64>,
    pub images: Option<Vec<String>>,
    pub status: Option<i16>,
    pub content: Option<String>,
}
