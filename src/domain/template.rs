//! Email template data model.
//!
//! Templates are operator-authored HTML carrying an optional
//! `{{verification_link}}` placeholder that the link builder substitutes at
//! dispatch time. Identity is immutable once created; templates are only
//! deleted in bulk by id list.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Persisted email template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmailTemplate {
    /// Stable identifier assigned at creation.
    pub id: Uuid,
    /// Operator-facing label.
    pub name: String,
    /// Subject line used verbatim for dispatched mail.
    pub subject: String,
    /// HTML body, optionally containing the verification-link placeholder.
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Validation errors returned by [`TemplateDraft::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateValidationError {
    EmptyName,
    EmptySubject,
    EmptyContent,
}

impl fmt::Display for TemplateValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "template name must not be empty"),
            Self::EmptySubject => write!(f, "template subject must not be empty"),
            Self::EmptyContent => write!(f, "template content must not be empty"),
        }
    }
}

impl std::error::Error for TemplateValidationError {}

/// Validated input for creating a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDraft {
    name: String,
    subject: String,
    content: String,
}

impl TemplateDraft {
    /// Validate raw operator input into a draft.
    pub fn new(
        name: impl Into<String>,
        subject: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Self, TemplateValidationError> {
        let name = name.into();
        let subject = subject.into();
        let content = content.into();
        if name.trim().is_empty() {
            return Err(TemplateValidationError::EmptyName);
        }
        if subject.trim().is_empty() {
            return Err(TemplateValidationError::EmptySubject);
        }
        if content.trim().is_empty() {
            return Err(TemplateValidationError::EmptyContent);
        }
        Ok(Self {
            name,
            subject,
            content,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Materialise the draft into a persisted template with fresh identity.
    pub fn into_template(self) -> EmailTemplate {
        EmailTemplate {
            id: Uuid::new_v4(),
            name: self.name,
            subject: self.subject,
            content: self.content,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "S", "C", TemplateValidationError::EmptyName)]
    #[case("T", "  ", "C", TemplateValidationError::EmptySubject)]
    #[case("T", "S", "", TemplateValidationError::EmptyContent)]
    fn rejects_blank_fields(
        #[case] name: &str,
        #[case] subject: &str,
        #[case] content: &str,
        #[case] expected: TemplateValidationError,
    ) {
        assert_eq!(TemplateDraft::new(name, subject, content), Err(expected));
    }

    #[rstest]
    fn into_template_assigns_identity_and_timestamp() {
        let draft = TemplateDraft::new("T1", "S", "Hi {{verification_link}}").expect("valid draft");
        let template = draft.into_template();
        assert_eq!(template.name, "T1");
        assert_eq!(template.subject, "S");
        assert!(!template.id.is_nil());
    }

    #[rstest]
    fn serialises_created_at_in_camel_case() {
        let template = TemplateDraft::new("T1", "S", "C")
            .expect("valid draft")
            .into_template();
        let value = serde_json::to_value(&template).expect("serializable template");
        assert!(value.get("createdAt").is_some());
        assert!(value.get("created_at").is_none());
    }
}
