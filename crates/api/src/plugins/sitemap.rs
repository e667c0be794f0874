//! Sitemap building for the sitemap plugin.
//!
//! Collects live published categories and products, renders the XML via
//! `sitecraft_core::plugin::sitemap`, writes it to the configured path,
//! and stamps `updated_time` in the stored config.

use chrono::Utc;
use serde::Serialize;
use sitecraft_core::plugin::sitemap::SitemapEntry;
use sitecraft_core::plugin::{PluginName, SitemapConfig};
use sitecraft_db::repositories::{CategoryRepo, ProductRepo};

use crate::error::AppResult;
use crate::plugins::{load_config, store_config};
use crate::state::AppState;

/// Result of a sitemap build.
#[derive(Debug, Serialize)]
pub struct SitemapReport {
    /// Number of `<url>` entries written.
    pub entries: usize,
    /// Path the XML landed at.
    pub path: String,
    /// Unix seconds stamped into the plugin config.
    pub updated_time: i64,
}

/// Build the sitemap now and persist the build timestamp.
pub async fn build(state: &AppState) -> AppResult<SitemapReport> {
    let base = state.config.base_url.trim_end_matches('/');

    let mut entries = vec![SitemapEntry {
        loc: format!("{base}/"),
        lastmod: None,
    }];

    for (url_token, updated_at) in CategoryRepo::list_for_sitemap(&state.pool).await? {
        entries.push(SitemapEntry {
            loc: format!("{base}/categories/{url_token}"),
            lastmod: Some(updated_at.format("%Y-%m-%d").to_string()),
        });
    }

    for (url_token, updated_at) in ProductRepo::list_for_sitemap(&state.pool).await? {
        entries.push(SitemapEntry {
            loc: format!("{base}/products/{url_token}"),
            lastmod: Some(updated_at.format("%Y-%m-%d").to_string()),
        });
    }

    let xml = sitecraft_core::plugin::sitemap::render(&entries);
    tokio::fs::write(&state.config.sitemap_path, xml)
        .await
        .map_err(|e| {
            crate::error::AppError::InternalError(format!(
                "failed to write sitemap to {}: {e}",
                state.config.sitemap_path
            ))
        })?;

    let mut config: SitemapConfig = load_config(&state.pool, PluginName::Sitemap).await?;
    config.updated_time = Utc::now().timestamp();
    store_config(&state.pool, PluginName::Sitemap, &config).await?;

    tracing::info!(
        entries = entries.len(),
        path = %state.config.sitemap_path,
        "Sitemap built"
    );

    Ok(SitemapReport {
        entries: entries.len(),
        path: state.config.sitemap_path.clone(),
        updated_time: config.updated_time,
    })
}

/// Rebuild the sitemap in the background if `auto_build` is enabled.
///
/// Fire and forget: content mutations call this and never wait on or
/// fail because of the rebuild.
pub fn maybe_auto_build(state: &AppState) {
    let state = state.clone();
    tokio::spawn(async move {
        let config: SitemapConfig = match load_config(&state.pool, PluginName::Sitemap).await {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "Skipping sitemap auto-build");
                return;
            }
        };
        if !config.auto_build_enabled() {
            return;
        }
        if let Err(e) = build(&state).await {
            tracing::warn!(error = %e, "Sitemap auto-build failed");
        }
    });
}
