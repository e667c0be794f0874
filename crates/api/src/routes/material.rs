//! Route definitions for materials and material categories.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{material, material_category};
use crate::state::AppState;

/// Routes mounted at `/material-categories`.
///
/// ```text
/// GET    /                               -> list
/// POST   /                               -> create
/// GET    /{id}                           -> get_by_id
/// PUT    /{id}                           -> update
/// DELETE /{id}                           -> delete (409 while materials remain)
/// GET    /{category_id}/materials        -> list_materials
/// ```
pub fn category_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(material_category::list).post(material_category::create),
        )
        .route(
            "/{id}",
            get(material_category::get_by_id)
                .put(material_category::update)
                .delete(material_category::delete),
        )
        .route(
            "/{category_id}/materials",
            get(material_category::list_materials),
        )
}

/// Routes mounted at `/materials`.
///
/// ```text
/// GET    /                 -> list
/// POST   /                 -> create
/// GET    /{id}             -> get_by_id
/// PUT    /{id}             -> update
/// DELETE /{id}             -> delete
/// POST   /{id}/use         -> record_usage
/// GET    /{id}/usages      -> list_usages
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(material::list).post(material::create))
        .route(
            "/{id}",
            get(material::get_by_id)
                .put(material::update)
                .delete(material::delete),
        )
        .route("/{id}/use", post(material::record_usage))
        .route("/{id}/usages", get(material::list_usages))
}
