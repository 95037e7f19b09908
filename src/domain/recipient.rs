//! Recipient identity: the email-address-like string used as the natural key
//! for click and credential attribution.
//!
//! The value is deliberately opaque. It is expected to look like an email
//! address but is not validated against RFC 5322; campaigns are run against
//! operator-curated recipient lists, so any non-blank string is accepted.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors returned by [`RecipientEmail::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipientValidationError {
    Empty,
}

impl fmt::Display for RecipientValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "recipient email must not be empty"),
        }
    }
}

impl std::error::Error for RecipientValidationError {}

/// Opaque, non-blank recipient identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipientEmail(String);

impl RecipientEmail {
    /// Trim and validate a raw identity string.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, RecipientValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(RecipientValidationError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the underlying identity string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for RecipientEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for RecipientEmail {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<RecipientEmail> for String {
    fn from(value: RecipientEmail) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("alice@example.com", "alice@example.com")]
    #[case("  bob@example.com  ", "bob@example.com")]
    #[case("not-an-email-but-accepted", "not-an-email-but-accepted")]
    fn accepts_non_blank_identities(#[case] raw: &str, #[case] expected: &str) {
        let recipient = RecipientEmail::new(raw).expect("non-blank identity");
        assert_eq!(recipient.as_str(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn rejects_blank_identities(#[case] raw: &str) {
        assert_eq!(
            RecipientEmail::new(raw),
            Err(RecipientValidationError::Empty)
        );
    }
}
