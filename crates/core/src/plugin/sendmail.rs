//! Outbound mail (SMTP relay) configuration.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Default SMTP submission port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Configuration for the outbound mail plugin.
///
/// `use_ssl == 1` selects implicit TLS (usually port 465); anything else
/// selects STARTTLS on the configured port.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SendmailConfig {
    pub server: String,
    pub use_ssl: i64,
    pub port: u16,
    pub account: String,
    pub password: String,
    /// Address that receives notification mail.
    pub recipient: String,
}

impl Default for SendmailConfig {
    fn default() -> Self {
        Self {
            server: String::new(),
            use_ssl: 0,
            port: DEFAULT_SMTP_PORT,
            account: String::new(),
            password: String::new(),
            recipient: String::new(),
        }
    }
}

impl SendmailConfig {
    /// Whether implicit TLS should be used instead of STARTTLS.
    pub fn implicit_tls(&self) -> bool {
        self.use_ssl == 1
    }

    /// Check that the config is complete enough to send mail.
    pub fn ensure_ready(&self) -> Result<(), CoreError> {
        if self.server.is_empty() {
            return Err(CoreError::Validation(
                "sendmail plugin is not configured: server is empty".to_string(),
            ));
        }
        if self.recipient.is_empty() {
            return Err(CoreError::Validation(
                "sendmail plugin is not configured: recipient is empty".to_string(),
            ));
        }
        Ok(())
    }
}
