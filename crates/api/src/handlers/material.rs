//! Handlers for the `/materials` resource and its usage ledger.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use sitecraft_core::error::CoreError;
use sitecraft_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use sitecraft_core::types::DbId;
use sitecraft_db::models::material::{
    CreateMaterial, Material, MaterialUsage, RecordUsage, UpdateMaterial,
};
use sitecraft_db::repositories::MaterialRepo;

use crate::error::{AppError, AppResult};
use crate::query::{CategoryScopedParams, PaginationParams};
use crate::state::AppState;

/// POST /api/v1/materials
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateMaterial>,
) -> AppResult<(StatusCode, Json<Material>)> {
    let material = MaterialRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(material)))
}

/// GET /api/v1/materials
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<CategoryScopedParams>,
) -> AppResult<Json<Vec<Material>>> {
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(params.offset);
    let materials = MaterialRepo::list(&state.pool, params.category_id, limit, offset).await?;
    Ok(Json(materials))
}

/// GET /api/v1/materials/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Material>> {
    let material = MaterialRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Material",
            id,
        }))?;
    Ok(Json(material))
}

/// PUT /api/v1/materials/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMaterial>,
) -> AppResult<Json<Material>> {
    let material = MaterialRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Material",
            id,
        }))?;
    Ok(Json(material))
}

/// DELETE /api/v1/materials/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = MaterialRepo::soft_delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Material",
            id,
        }))
    }
}

/// POST /api/v1/materials/{id}/use
///
/// Records that the material was embedded into an item and bumps its
/// use counter.
pub async fn record_usage(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<RecordUsage>,
) -> AppResult<(StatusCode, Json<MaterialUsage>)> {
    let usage = MaterialRepo::record_usage(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Material",
            id,
        }))?;
    Ok((StatusCode::CREATED, Json(usage)))
}

/// GET /api/v1/materials/{id}/usages
pub async fn list_usages(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Vec<MaterialUsage>>> {
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(params.offset);
    let usages = MaterialRepo::list_usages(&state.pool, id, limit, offset).await?;
    Ok(Json(usages))
}
