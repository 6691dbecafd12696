//! SMTP mail delivery

mod error;

use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::{debug, info};

use crate::types::SmtpConfig;

pub use error::{MailerError, MailerResult};

/// Port served with implicit TLS
pub const IMPLICIT_TLS_PORT: u16 = 465;

/// An HTML email ready to be sent from the configured sender
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    /// Recipient address
    pub to: String,
    /// Subject line
    pub subject: String,
    /// HTML body
    pub html_body: String,
}

/// Trait for outbound mail delivery
#[async_trait::async_trait]
pub trait MailTransport: Send + Sync {
    /// Delivers one email, returning once the server accepted it
    async fn send(&self, email: OutgoingEmail) -> MailerResult<()>;
}

/// SMTP mailer that opens a fresh TLS connection per message
pub struct SmtpMailer {
    config: SmtpConfig,
}

impl SmtpMailer {
    /// Creates a new SMTP mailer
    #[must_use]
    pub const fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    /// Builds the MIME message for an email
    ///
    /// # Errors
    ///
    /// Returns `MailerError::InvalidAddress` if the sender or recipient does not
    /// parse, `MailerError::MessageBuild` if the message cannot be assembled
    pub fn compose(&self, email: &OutgoingEmail) -> MailerResult<Message> {
        let from: Mailbox = self
            .config
            .sender
            .parse()
            .map_err(|source| MailerError::InvalidAddress {
                role: "sender",
                source,
            })?;
        let to: Mailbox = email
            .to
            .parse()
            .map_err(|source| MailerError::InvalidAddress {
                role: "recipient",
                source,
            })?;

        let message = Message::builder()
            .from(from)
            .to(to)
            .subject(email.subject.as_str())
            .header(ContentType::TEXT_HTML)
            .body(email.html_body.clone())?;

        Ok(message)
    }

    /// Builds the transport for one delivery
    ///
    /// Port 465 wraps the whole session in TLS; any other port must upgrade
    /// with STARTTLS or the delivery fails.
    fn transport(&self) -> MailerResult<AsyncSmtpTransport<Tokio1Executor>> {
        let builder = if self.config.port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.host)?
        };

        let credentials = Credentials::new(
            self.config.sender.clone(),
            self.config.password.expose().to_string(),
        );

        Ok(builder
            .port(self.config.port)
            .credentials(credentials)
            .build())
    }
}

#[async_trait::async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, email: OutgoingEmail) -> MailerResult<()> {
        let message = self.compose(&email)?;
        let transport = self.transport()?;

        debug!(
            "Dialing SMTP server {}:{} for recipient {}",
            self.config.host, self.config.port, email.to
        );

        let response = transport.send(message).await?;

        info!(
            "Email delivered to {} (SMTP {})",
            email.to,
            response.code()
        );

        Ok(())
    }
}
