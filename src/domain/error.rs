//! Domain-level error type.
//!
//! Transport agnostic: the HTTP adapter maps these onto status codes and a
//! JSON `{error}` body for operator endpoints, and onto plain-text responses
//! for the recipient-facing endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or missing a required field.
    InvalidRequest,
    /// No valid operator session, or credentials were rejected.
    Unauthorized,
    /// The referenced template or login page does not exist.
    NotFound,
    /// Store or mail-transport failure.
    InternalError,
}

/// Domain error carried from services to adapters.
///
/// # Examples
/// ```
/// use phishsim::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("Template not found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    code: ErrorCode,
    message: String,
}

impl Error {
    /// Create a new error with an explicit code.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Operator-safe message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    ///
    /// Messages must stay operator-safe; log the underlying cause instead of
    /// embedding it here.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Error::invalid_request("missing field"), ErrorCode::InvalidRequest)]
    #[case(Error::unauthorized("login required"), ErrorCode::Unauthorized)]
    #[case(Error::not_found("no such page"), ErrorCode::NotFound)]
    #[case(Error::internal("store failure"), ErrorCode::InternalError)]
    fn constructors_set_expected_code(#[case] error: Error, #[case] expected: ErrorCode) {
        assert_eq!(error.code(), expected);
    }

    #[rstest]
    fn display_renders_the_message() {
        let error = Error::not_found("Template not found");
        assert_eq!(error.to_string(), "Template not found");
    }
}
