//! Search-engine URL pushing for the push plugin.
//!
//! Submits newly published URLs to the configured ping endpoints
//! (Baidu/Bing style: newline-joined URL list POSTed as text). Pushing is
//! best effort; each endpoint reports its own outcome and a failure never
//! aborts the batch.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use sitecraft_core::plugin::PushConfig;

/// Timeout for a single push request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Per-endpoint result of a push batch.
#[derive(Debug, Serialize)]
pub struct PushOutcome {
    /// Endpoint label (`baidu`, `bing`).
    pub target: &'static str,
    pub ok: bool,
    /// Response body on success, error description on failure.
    pub detail: String,
}

/// Push a URL list to every configured endpoint.
///
/// Returns one outcome per configured endpoint, in config order.
pub async fn push_urls(config: &PushConfig, urls: &[String]) -> Vec<PushOutcome> {
    let endpoints = config.endpoints();
    let mut outcomes = Vec::with_capacity(endpoints.len());

    let client = match reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build() {
        Ok(client) => client,
        Err(e) => {
            for (target, _) in endpoints {
                outcomes.push(PushOutcome {
                    target,
                    ok: false,
                    detail: format!("failed to build HTTP client: {e}"),
                });
            }
            return outcomes;
        }
    };

    let body = urls.join("\n");

    for (target, api) in endpoints {
        let result = client
            .post(api)
            .header(CONTENT_TYPE, "text/plain")
            .body(body.clone())
            .send()
            .await;

        let outcome = match result {
            Ok(response) if response.status().is_success() => PushOutcome {
                target,
                ok: true,
                detail: response.text().await.unwrap_or_default(),
            },
            Ok(response) => {
                let status = response.status().as_u16();
                tracing::warn!(target, status, "URL push rejected");
                PushOutcome {
                    target,
                    ok: false,
                    detail: format!("endpoint returned HTTP {status}"),
                }
            }
            Err(e) => {
                tracing::warn!(target, error = %e, "URL push failed");
                PushOutcome {
                    target,
                    ok: false,
                    detail: e.to_string(),
                }
            }
        };
        outcomes.push(outcome);
    }

    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unconfigured_push_yields_no_outcomes() {
        let outcomes = push_urls(&PushConfig::default(), &["http://a".to_string()]).await;
        assert!(outcomes.is_empty());
    }

    #[tokio::test]
    async fn unreachable_endpoint_reports_failure() {
        let config = PushConfig {
            baidu_api: "http://127.0.0.1:1/push".to_string(),
            ..Default::default()
        };
        let outcomes = push_urls(&config, &["http://example.com/p/1".to_string()]).await;
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].target, "baidu");
        assert!(!outcomes[0].ok);
    }
}
