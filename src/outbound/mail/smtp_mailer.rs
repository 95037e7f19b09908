//! SMTP transport adapter built on `lettre`.

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::domain::ports::{Mailer, MailerError, OutboundEmail};

/// Connection settings for the SMTP relay.
#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// `From` address stamped onto every message.
    pub sender: String,
}

/// `lettre`-backed implementation of the `Mailer` port.
///
/// Uses STARTTLS against the configured relay. The underlying transport
/// keeps a connection pool, so cloning this adapter is cheap.
#[derive(Clone, Debug)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
}

impl SmtpMailer {
    /// Build the transport from relay settings.
    ///
    /// # Errors
    /// Returns `MailerError::InvalidMessage` when the sender address does not
    /// parse, and `MailerError::Transport` when the relay host is rejected.
    pub fn new(settings: &SmtpSettings) -> Result<Self, MailerError> {
        let sender = settings
            .sender
            .parse::<Mailbox>()
            .map_err(|err| MailerError::invalid_message(format!("sender address: {err}")))?;
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
            .map_err(|err| MailerError::transport(err.to_string()))?
            .port(settings.port)
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password.clone(),
            ))
            .timeout(Some(Duration::from_secs(30)))
            .build();
        Ok(Self { transport, sender })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailerError> {
        let to = email
            .to
            .as_str()
            .parse::<Mailbox>()
            .map_err(|err| MailerError::invalid_message(format!("recipient address: {err}")))?;
        let message = Message::builder()
            .from(self.sender.clone())
            .to(to)
            .subject(&email.subject)
            .header(ContentType::TEXT_HTML)
            .body(email.html.clone())
            .map_err(|err| MailerError::invalid_message(err.to_string()))?;
        self.transport
            .send(message)
            .await
            .map_err(|err| MailerError::transport(err.to_string()))?;
        tracing::info!(to = %email.to, "email accepted by SMTP relay");
        Ok(())
    }
}
