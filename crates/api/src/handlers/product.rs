//! Handlers for the `/products` resource.
//!
//! Detail reads resolve the thumbnail display fields, attach the
//! long-form content, and bump the view counter in the background.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use sitecraft_core::error::CoreError;
use sitecraft_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use sitecraft_core::types::DbId;
use sitecraft_db::models::product::{CreateProduct, Product, UpdateProduct};
use sitecraft_db::repositories::ProductRepo;

use crate::error::{AppError, AppResult};
use crate::plugins::sitemap;
use crate::query::CategoryScopedParams;
use crate::state::AppState;

/// Detail response: the product row plus its long-form content.
#[derive(Debug, Serialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub content: String,
}

/// POST /api/v1/products
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProduct>,
) -> AppResult<(StatusCode, Json<Product>)> {
    let mut product = ProductRepo::create(&state.pool, &input).await?;
    product.resolve_thumb(&state.config.base_url, &state.config.default_thumb);
    sitemap::maybe_auto_build(&state);
    Ok((StatusCode::CREATED, Json(product)))
}

/// GET /api/v1/products
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<CategoryScopedParams>,
) -> AppResult<Json<Vec<Product>>> {
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(params.offset);
    let mut products = ProductRepo::list(&state.pool, params.category_id, limit, offset).await?;
    for product in &mut products {
        product.resolve_thumb(&state.config.base_url, &state.config.default_thumb);
    }
    Ok(Json(products))
}

/// GET /api/v1/products/{id}
///
/// The view counter bumps in a background task so a slow write never
/// delays the read.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProductDetail>> {
    let mut product = ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))?;
    product.resolve_thumb(&state.config.base_url, &state.config.default_thumb);

    let content = ProductRepo::find_data(&state.pool, id)
        .await?
        .map(|data| data.content)
        .unwrap_or_default();

    let pool = state.pool.clone();
    tokio::spawn(async move {
        if let Err(e) = ProductRepo::increment_views(&pool, id).await {
            tracing::warn!(product_id = id, error = %e, "View counter bump failed");
        }
    });

    Ok(Json(ProductDetail { product, content }))
}

/// PUT /api/v1/products/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProduct>,
) -> AppResult<Json<Product>> {
    let mut product = ProductRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))?;
    product.resolve_thumb(&state.config.base_url, &state.config.default_thumb);
    sitemap::maybe_auto_build(&state);
    Ok(Json(product))
}

/// DELETE /api/v1/products/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ProductRepo::soft_delete(&state.pool, id).await?;
    if deleted {
        sitemap::maybe_auto_build(&state);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))
    }
}

/// POST /api/v1/products/{id}/restore
pub async fn restore(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Product>> {
    let restored = ProductRepo::restore(&state.pool, id).await?;
    if !restored {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }));
    }
    let mut product = ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))?;
    product.resolve_thumb(&state.config.base_url, &state.config.default_thumb);
    sitemap::maybe_auto_build(&state);
    Ok(Json(product))
}
