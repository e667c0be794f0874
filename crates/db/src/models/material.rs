//! Material, material category, and usage-ledger models and DTOs.

use serde::{Deserialize, Serialize};
use sitecraft_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A material category row. `material_count` is a denormalized counter
/// maintained by the material repository.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MaterialCategory {
    pub id: DbId,
    pub title: String,
    pub material_count: i64,
    pub status: i16,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(skip_serializing)]
    pub deleted_at: Option<Timestamp>,
}

/// A material row from the `materials` table.
///
/// `category_title` is resolved via a join in list queries and absent
/// elsewhere.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Material {
    pub id: DbId,
    pub title: String,
    pub category_id: DbId,
    pub content: String,
    pub status: i16,
    pub auto_update: i16,
    pub use_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(skip_serializing)]
    pub deleted_at: Option<Timestamp>,
    #[sqlx(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_title: Option<String>,
}

/// A usage-ledger row: where a material is embedded.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MaterialUsage {
    pub id: DbId,
    pub material_id: DbId,
    pub item_type: String,
    pub item_id: DbId,
    pub created_at: Timestamp,
}

/// DTO for creating a new material category.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMaterialCategory {
    pub title: String,
    pub status: Option<i16>,
}

/// DTO for updating a material category.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMaterialCategory {
    pub title: Option<String>,
    pub status: Option<i16>,
}

/// DTO for creating a new material.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMaterial {
    pub title: String,
    pub category_id: Option<DbId>,
    pub content: Option<String>,
    pub status: Option<i16>,
    pub auto_update: Option<i16>,
}

/// DTO for updating a material. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMaterial {
    pub title: Option<String>,
    pub category_id: Option<DbId>,
    pub content: Option<String>,
    pub status: Option<i16>,
    pub auto_update: Option<i16>,
}

/// DTO for recording a material usage.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordUsage {
    pub item_type: String,
    pub item_id: DbId,
}
