//! Driving port for the outbound mail transport.
//!
//! The dispatcher composes a message and hands it over; delivery is not
//! verified beyond the transport accepting the send call, and failures are
//! never retried or queued (the operator re-invokes the send manually).

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::RecipientEmail;

/// A fully composed outbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub to: RecipientEmail,
    pub subject: String,
    pub html: String,
}

/// Errors raised by mail transport adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MailerError {
    /// The transport rejected or failed the send call.
    #[error("mail transport failed: {message}")]
    Transport { message: String },

    /// The composed message could not be built (e.g. unparsable address).
    #[error("invalid outbound message: {message}")]
    InvalidMessage { message: String },
}

impl MailerError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn invalid_message(message: impl Into<String>) -> Self {
        Self::InvalidMessage {
            message: message.into(),
        }
    }
}

/// Port for handing composed messages to an outbound transport.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send one message. No retry, no queueing.
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailerError>;
}

/// Transport double that records sends instead of delivering them.
///
/// Backs the test suite, and serves as the runtime transport when no SMTP
/// credentials are configured so development sends are visible in the logs
/// instead of failing.
#[derive(Debug, Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<OutboundEmail>>,
}

impl RecordingMailer {
    /// Snapshot of every message handed to the transport so far.
    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailerError> {
        tracing::info!(to = %email.to, subject = %email.subject, "recording outbound email (no SMTP transport configured)");
        self.sent
            .lock()
            .map_err(|_| MailerError::transport("recording mailer poisoned"))?
            .push(email.clone());
        Ok(())
    }
}
