//! Handlers for the `/material-categories` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use sitecraft_core::error::CoreError;
use sitecraft_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use sitecraft_core::types::DbId;
use sitecraft_db::models::material::{
    CreateMaterialCategory, Material, MaterialCategory, UpdateMaterialCategory,
};
use sitecraft_db::repositories::{MaterialCategoryRepo, MaterialRepo};

use crate::error::{AppError, AppResult};
use crate::query::PaginationParams;
use crate::state::AppState;

/// POST /api/v1/material-categories
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateMaterialCategory>,
) -> AppResult<(StatusCode, Json<MaterialCategory>)> {
    let category = MaterialCategoryRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// GET /api/v1/material-categories
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Vec<MaterialCategory>>> {
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(params.offset);
    let categories = MaterialCategoryRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(categories))
}

/// GET /api/v1/material-categories/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MaterialCategory>> {
    let category = MaterialCategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "MaterialCategory",
            id,
        }))?;
    Ok(Json(category))
}

/// PUT /api/v1/material-categories/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMaterialCategory>,
) -> AppResult<Json<MaterialCategory>> {
    let category = MaterialCategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "MaterialCategory",
            id,
        }))?;
    Ok(Json(category))
}

/// DELETE /api/v1/material-categories/{id}
///
/// Refuses deletion while live materials remain in the category.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let remaining = MaterialCategoryRepo::count_live_materials(&state.pool, id).await?;
    if remaining > 0 {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "material category {id} still has {remaining} materials"
        ))));
    }

    let deleted = MaterialCategoryRepo::soft_delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "MaterialCategory",
            id,
        }))
    }
}

/// GET /api/v1/material-categories/{category_id}/materials
pub async fn list_materials(
    State(state): State<AppState>,
    Path(category_id): Path<DbId>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Vec<Material>>> {
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(params.offset);
    let materials = MaterialRepo::list(&state.pool, Some(category_id), limit, offset).await?;
    Ok(Json(materials))
}
