//! Product category entity model and DTOs.

use serde::{Deserialize, Serialize};
use sitecraft_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A category row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub title: String,
    pub url_token: String,
    pub description: String,
    pub status: i16,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(skip_serializing)]
    pub deleted_at: Option<Timestamp>,
}

/// DTO for creating a new category.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategory {
    pub title: String,
    pub url_token: Option<String>,
    pub description: Option<String>,
    pub status: Option<i16>,
}

/// DTO for updating an existing category. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCategory {
    pub title: Option<String>,
    pub url_token: Option<String>,
    pub description: Option<String>,
    pub status: Option<i16>,
}
