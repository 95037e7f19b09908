//! Decoy login page data model.
//!
//! Pages are operator-authored HTML served verbatim to recipients who follow
//! a tracking link. Names are unique so operators can tell campaigns apart.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Persisted decoy page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginPage {
    pub id: Uuid,
    /// Unique operator-facing label.
    pub name: String,
    /// Full HTML document served to recipients.
    pub html: String,
    pub created_at: DateTime<Utc>,
}

/// Validation errors returned by [`LoginPageDraft::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginPageValidationError {
    EmptyName,
    EmptyHtml,
}

impl fmt::Display for LoginPageValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "login page name must not be empty"),
            Self::EmptyHtml => write!(f, "login page html must not be empty"),
        }
    }
}

impl std::error::Error for LoginPageValidationError {}

/// Validated input for creating or updating a decoy page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginPageDraft {
    name: String,
    html: String,
}

impl LoginPageDraft {
    /// Validate raw operator input into a draft.
    pub fn new(
        name: impl Into<String>,
        html: impl Into<String>,
    ) -> Result<Self, LoginPageValidationError> {
        let name = name.into();
        let html = html.into();
        if name.trim().is_empty() {
            return Err(LoginPageValidationError::EmptyName);
        }
        if html.trim().is_empty() {
            return Err(LoginPageValidationError::EmptyHtml);
        }
        Ok(Self { name, html })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    /// Materialise the draft into a persisted page with fresh identity.
    pub fn into_page(self) -> LoginPage {
        LoginPage {
            id: Uuid::new_v4(),
            name: self.name,
            html: self.html,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "<html/>", LoginPageValidationError::EmptyName)]
    #[case("Office365", " ", LoginPageValidationError::EmptyHtml)]
    fn rejects_blank_fields(
        #[case] name: &str,
        #[case] html: &str,
        #[case] expected: LoginPageValidationError,
    ) {
        assert_eq!(LoginPageDraft::new(name, html), Err(expected));
    }

    #[rstest]
    fn into_page_assigns_identity() {
        let page = LoginPageDraft::new("Office365", "<html><body>login</body></html>")
            .expect("valid draft")
            .into_page();
        assert_eq!(page.name, "Office365");
        assert!(!page.id.is_nil());
    }
}
