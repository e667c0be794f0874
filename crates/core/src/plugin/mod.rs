//! Typed plugin configuration blocks.
//!
//! Each plugin is a named, JSON-configurable feature block that can be
//! toggled without code changes. Configs round-trip through the `settings`
//! table as JSON; every block deserializes from an empty object so a
//! missing settings row always yields usable defaults.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub mod anchor;
pub mod guestbook;
pub mod push;
pub mod sendmail;
pub mod sitemap;

pub use anchor::AnchorConfig;
pub use guestbook::{CustomField, CustomFieldType, GuestbookConfig};
pub use push::PushConfig;
pub use sendmail::SendmailConfig;
pub use sitemap::SitemapConfig;

/// The set of configurable plugins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginName {
    Push,
    Sitemap,
    Anchor,
    Guestbook,
    Sendmail,
}

impl PluginName {
    /// Return the plugin name as its settings-table key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Push => "push",
            Self::Sitemap => "sitemap",
            Self::Anchor => "anchor",
            Self::Guestbook => "guestbook",
            Self::Sendmail => "sendmail",
        }
    }

    /// Parse a plugin name from a URL path segment.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "push" => Ok(Self::Push),
            "sitemap" => Ok(Self::Sitemap),
            "anchor" => Ok(Self::Anchor),
            "guestbook" => Ok(Self::Guestbook),
            "sendmail" => Ok(Self::Sendmail),
            other => Err(CoreError::Validation(format!(
                "unknown plugin '{other}', expected one of: push, sitemap, anchor, guestbook, sendmail"
            ))),
        }
    }
}

/// Ledger entry for a file stored through the plugin upload surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadFile {
    pub hash: String,
    pub file_name: String,
    pub created_time: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn plugin_name_round_trips() {
        for name in ["push", "sitemap", "anchor", "guestbook", "sendmail"] {
            assert_eq!(PluginName::parse(name).unwrap().as_str(), name);
        }
    }

    #[test]
    fn unknown_plugin_is_a_validation_error() {
        assert_matches!(PluginName::parse("metrics"), Err(CoreError::Validation(_)));
    }
}
