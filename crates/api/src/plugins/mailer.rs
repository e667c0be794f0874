//! Outbound mail via SMTP for the sendmail plugin.
//!
//! [`Mailer`] wraps the `lettre` async SMTP transport to send plain-text
//! notification mail (guestbook submissions, probe messages) to the
//! configured recipient. Callers check `SendmailConfig::ensure_ready`
//! before constructing a mailer.

use sitecraft_core::plugin::SendmailConfig;

/// Error type for mail delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

/// Sends notification mail through the configured SMTP relay.
pub struct Mailer {
    config: SendmailConfig,
}

impl Mailer {
    /// Create a mailer from the sendmail plugin config.
    pub fn new(config: SendmailConfig) -> Self {
        Self { config }
    }

    /// Send a plain-text message to the configured recipient.
    ///
    /// The account doubles as the sender address. `use_ssl == 1` selects
    /// implicit TLS; anything else goes through STARTTLS on the
    /// configured port.
    pub async fn send(&self, subject: &str, body: &str) -> Result<(), MailError> {
        use lettre::{
            message::header::ContentType, transport::smtp::authentication::Credentials,
            AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
        };

        let email = Message::builder()
            .from(self.config.account.parse()?)
            .to(self.config.recipient.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| MailError::Build(e.to_string()))?;

        let mut transport_builder = if self.config.implicit_tls() {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.server)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.server)?
        }
        .port(self.config.port);

        if !self.config.account.is_empty() {
            transport_builder = transport_builder.credentials(Credentials::new(
                self.config.account.clone(),
                self.config.password.clone(),
            ));
        }

        let mailer = transport_builder.build();
        mailer.send(email).await?;

        tracing::info!(to = %self.config.recipient, subject, "Notification mail sent");
        Ok(())
    }
}
