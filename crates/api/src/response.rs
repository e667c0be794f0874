//! Shared response envelope types for API handlers.
//!
//! Entity endpoints return their JSON directly; operation endpoints
//! (sitemap build, URL push, mail probe) wrap their report in a
//! `{ "data": ... }` envelope via [`DataResponse`].

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: report }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
