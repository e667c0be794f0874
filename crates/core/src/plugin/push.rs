//! Search-engine link push configuration.

use serde::{Deserialize, Serialize};

/// Configuration for pushing newly published URLs to search engines.
///
/// `js_code` is an HTML/JS snippet served to clients for page embedding;
/// the backend stores it verbatim and never executes it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PushConfig {
    pub baidu_api: String,
    pub bing_api: String,
    pub js_code: String,
}

impl PushConfig {
    /// The configured push endpoints, labelled for per-endpoint reporting.
    ///
    /// Empty endpoints are skipped so a half-configured plugin still works.
    pub fn endpoints(&self) -> Vec<(&'static str, &str)> {
        let mut endpoints = Vec::new();
        if !self.baidu_api.is_empty() {
            endpoints.push(("baidu", self.baidu_api.as_str()));
        }
        if !self.bing_api.is_empty() {
            endpoints.push(("bing", self.bing_api.as_str()));
        }
        endpoints
    }
}
