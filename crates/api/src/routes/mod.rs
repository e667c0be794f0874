pub mod category;
pub mod guestbook;
pub mod health;
pub mod material;
pub mod plugin;
pub mod product;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /categories                                  list, create
/// /categories/{id}                             get, update, delete
/// /categories/{category_id}/products           category-scoped product list
///
/// /products                                    list, create
/// /products/{id}                               get (bumps views), update, delete
/// /products/{id}/restore                       restore soft-deleted (POST)
///
/// /material-categories                         list, create
/// /material-categories/{id}                    get, update, delete
/// /material-categories/{category_id}/materials category-scoped material list
///
/// /materials                                   list, create
/// /materials/{id}                              get, update, delete
/// /materials/{id}/use                          record usage (POST)
/// /materials/{id}/usages                       usage ledger (GET)
///
/// /plugins/{name}                              get, update typed config
/// /plugins/sitemap/build                       build sitemap now (POST)
/// /plugins/push/urls                           push URL batch (POST)
/// /plugins/sendmail/test                       mail probe (POST)
///
/// /guestbook                                   list, submit (public form)
/// /guestbook/{id}                              delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Product categories (also nests the category-scoped product list).
        .nest("/categories", category::router())
        // Products, including restore and the view-bumping detail read.
        .nest("/products", product::router())
        // Material categories (also nests the category-scoped material list).
        .nest("/material-categories", material::category_router())
        // Materials and their usage ledger.
        .nest("/materials", material::router())
        // Plugin configs and operations.
        .nest("/plugins", plugin::router())
        // Public guestbook form.
        .nest("/guestbook", guestbook::router())
}
