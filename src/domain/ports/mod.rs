//! Domain ports: traits the inbound adapters drive and the outbound adapters
//! implement.
//!
//! Each port ships an in-memory implementation. They back the test suite and
//! double as the runtime fallback when no database URL or SMTP credentials
//! are configured, which keeps the service runnable in API-only development
//! mode.

mod click_repository;
mod credential_repository;
mod login_page_repository;
mod login_service;
mod mailer;
mod template_repository;

pub use click_repository::{ClickRepository, InMemoryClickRepository};
pub use credential_repository::{CredentialRepository, InMemoryCredentialRepository};
pub use login_page_repository::{InMemoryLoginPageRepository, LoginPageRepository};
pub use login_service::{LoginService, StaticLoginService};
pub use mailer::{Mailer, MailerError, OutboundEmail, RecordingMailer};
pub use template_repository::{InMemoryTemplateRepository, TemplateRepository};

#[cfg(test)]
pub use click_repository::MockClickRepository;
#[cfg(test)]
pub use credential_repository::MockCredentialRepository;
#[cfg(test)]
pub use login_page_repository::MockLoginPageRepository;
#[cfg(test)]
pub use mailer::MockMailer;
#[cfg(test)]
pub use template_repository::MockTemplateRepository;

use crate::domain::Error;

/// Errors raised by storage adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached.
    #[error("store connection failed: {message}")]
    Connection { message: String },

    /// A query or mutation failed during execution.
    #[error("store query failed: {message}")]
    Query { message: String },

    /// A uniqueness constraint rejected the write.
    #[error("store constraint violated: {message}")]
    Conflict { message: String },
}

impl StoreError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }
}

impl From<StoreError> for Error {
    fn from(error: StoreError) -> Self {
        match error {
            // Uniqueness conflicts surface as validation failures (e.g. a
            // duplicate login-page name) rather than server errors.
            StoreError::Conflict { message } => Error::invalid_request(message),
            StoreError::Connection { message } | StoreError::Query { message } => {
                tracing::error!(%message, "store operation failed");
                Error::internal("Server error")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    fn conflict_maps_to_invalid_request() {
        let error = Error::from(StoreError::conflict("name already in use"));
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(error.message(), "name already in use");
    }

    #[rstest]
    #[case(StoreError::connection("refused"))]
    #[case(StoreError::query("syntax"))]
    fn infrastructure_failures_map_to_redacted_internal_errors(#[case] store_error: StoreError) {
        let error = Error::from(store_error);
        assert_eq!(error.code(), ErrorCode::InternalError);
        assert_eq!(error.message(), "Server error");
    }
}
