//! Handlers for the `/plugins` surface: typed config get/update plus the
//! plugin operations (sitemap build, URL push, mail probe).

use axum::extract::{Path, State};
use axum::Json;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sitecraft_core::plugin::{
    AnchorConfig, GuestbookConfig, PluginName, PushConfig, SendmailConfig, SitemapConfig,
};
use sitecraft_db::repositories::GuestbookRepo;

use crate::error::{AppError, AppResult};
use crate::plugins::{load_config, mailer::Mailer, push, sitemap, store_config};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/plugins/{name}
///
/// Missing settings rows yield the plugin's defaults.
pub async fn get_config(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let name = PluginName::parse(&name)?;
    let value = match name {
        PluginName::Push => encode(load_config::<PushConfig>(&state.pool, name).await?)?,
        PluginName::Sitemap => encode(load_config::<SitemapConfig>(&state.pool, name).await?)?,
        PluginName::Anchor => encode(load_config::<AnchorConfig>(&state.pool, name).await?)?,
        PluginName::Guestbook => encode(load_config::<GuestbookConfig>(&state.pool, name).await?)?,
        PluginName::Sendmail => encode(load_config::<SendmailConfig>(&state.pool, name).await?)?,
    };
    Ok(Json(value))
}

/// PUT /api/v1/plugins/{name}
///
/// The body must deserialize as the plugin's typed config. Saving the
/// guestbook config also syncs the message table's columns to the field
/// set before the config is stored, so a saved form always has its
/// columns.
pub async fn update_config(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<Json<serde_json::Value>> {
    let name = PluginName::parse(&name)?;
    let stored = match name {
        PluginName::Push => {
            let config: PushConfig = decode(name, body)?;
            store_config(&state.pool, name, &config).await?;
            encode(config)?
        }
        PluginName::Sitemap => {
            let config: SitemapConfig = decode(name, body)?;
            store_config(&state.pool, name, &config).await?;
            encode(config)?
        }
        PluginName::Anchor => {
            let config: AnchorConfig = decode(name, body)?;
            store_config(&state.pool, name, &config).await?;
            encode(config)?
        }
        PluginName::Guestbook => {
            let config: GuestbookConfig = decode(name, body)?;
            let column_ddls = config
                .all_fields()
                .iter()
                .map(|field| field.column_ddl())
                .collect::<Result<Vec<_>, _>>()?;
            GuestbookRepo::sync_columns(&state.pool, &column_ddls).await?;
            store_config(&state.pool, name, &config).await?;
            encode(config)?
        }
        PluginName::Sendmail => {
            let config: SendmailConfig = decode(name, body)?;
            store_config(&state.pool, name, &config).await?;
            encode(config)?
        }
    };
    Ok(Json(stored))
}

/// POST /api/v1/plugins/sitemap/build
pub async fn build_sitemap(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<sitemap::SitemapReport>>> {
    let report = sitemap::build(&state).await?;
    Ok(Json(DataResponse { data: report }))
}

/// Request body for a URL push batch.
#[derive(Debug, Deserialize)]
pub struct PushUrlsRequest {
    pub urls: Vec<String>,
}

/// POST /api/v1/plugins/push/urls
///
/// Best effort: the response carries one outcome per configured
/// endpoint and the request only fails when no endpoint is configured.
pub async fn push_urls(
    State(state): State<AppState>,
    Json(request): Json<PushUrlsRequest>,
) -> AppResult<Json<DataResponse<Vec<push::PushOutcome>>>> {
    if request.urls.is_empty() {
        return Err(AppError::BadRequest("urls must not be empty".to_string()));
    }

    let config: PushConfig = load_config(&state.pool, PluginName::Push).await?;
    if config.endpoints().is_empty() {
        return Err(AppError::BadRequest(
            "push plugin has no endpoints configured".to_string(),
        ));
    }

    let outcomes = push::push_urls(&config, &request.urls).await;
    Ok(Json(DataResponse { data: outcomes }))
}

/// POST /api/v1/plugins/sendmail/test
///
/// Sends a probe message to the configured recipient.
pub async fn sendmail_test(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    let config: SendmailConfig = load_config(&state.pool, PluginName::Sendmail).await?;
    config.ensure_ready()?;

    let recipient = config.recipient.clone();
    Mailer::new(config)
        .send(
            "Sitecraft mail test",
            "This is a test message confirming the outbound mail configuration works.",
        )
        .await
        .map_err(|e| AppError::InternalError(format!("mail probe failed: {e}")))?;

    Ok(Json(DataResponse {
        data: serde_json::json!({ "sent": true, "recipient": recipient }),
    }))
}

/// Serialize a config block for the response body.
fn encode<T: Serialize>(config: T) -> AppResult<serde_json::Value> {
    serde_json::to_value(config)
        .map_err(|e| AppError::InternalError(format!("failed to serialize plugin config: {e}")))
}

/// Deserialize a request body as a plugin's typed config.
fn decode<T: DeserializeOwned>(name: PluginName, body: serde_json::Value) -> AppResult<T> {
    serde_json::from_value(body).map_err(|e| {
        AppError::BadRequest(format!("invalid config for plugin '{}': {e}", name.as_str()))
    })
}
