//! Route definitions for plugin configs and operations.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::plugin;
use crate::state::AppState;

/// Routes mounted at `/plugins`.
///
/// Operation routes use static segments so they take precedence over the
/// `{name}` config capture.
///
/// ```text
/// GET    /{name}           -> get_config
/// PUT    /{name}           -> update_config
/// POST   /sitemap/build    -> build_sitemap
/// POST   /push/urls        -> push_urls
/// POST   /sendmail/test    -> sendmail_test
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{name}",
            get(plugin::get_config).put(plugin::update_config),
        )
        .route("/sitemap/build", post(plugin::build_sitemap))
        .route("/push/urls", post(plugin::push_urls))
        .route("/sendmail/test", post(plugin::sendmail_test))
}
