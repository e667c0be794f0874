//! Route definitions for the public guestbook form.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::guestbook;
use crate::state::AppState;

/// Routes mounted at `/guestbook`.
///
/// ```text
/// GET    /         -> list
/// POST   /         -> submit
/// DELETE /{id}     -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(guestbook::list).post(guestbook::submit))
        .route("/{id}", delete(guestbook::delete))
}
