//! Port for email template persistence.

use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{EmailTemplate, TemplateDraft};

use super::StoreError;

/// Port for template storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TemplateRepository: Send + Sync {
    /// Persist a new template and return it with assigned identity.
    async fn create(&self, draft: TemplateDraft) -> Result<EmailTemplate, StoreError>;

    /// Fetch all templates, newest first.
    async fn list(&self) -> Result<Vec<EmailTemplate>, StoreError>;

    /// Fetch one template by id.
    async fn find(&self, id: Uuid) -> Result<Option<EmailTemplate>, StoreError>;

    /// Delete every template whose id appears in `ids`; unknown ids are
    /// ignored. Returns the number of deleted records.
    async fn delete_many(&self, ids: &[Uuid]) -> Result<u64, StoreError>;
}

/// Process-local implementation used by tests and API-only development mode.
#[derive(Debug, Default)]
pub struct InMemoryTemplateRepository {
    templates: Mutex<Vec<EmailTemplate>>,
}

#[async_trait]
impl TemplateRepository for InMemoryTemplateRepository {
    async fn create(&self, draft: TemplateDraft) -> Result<EmailTemplate, StoreError> {
        let template = draft.into_template();
        let mut templates = self
            .templates
            .lock()
            .map_err(|_| StoreError::query("template store poisoned"))?;
        templates.push(template.clone());
        Ok(template)
    }

    async fn list(&self) -> Result<Vec<EmailTemplate>, StoreError> {
        let templates = self
            .templates
            .lock()
            .map_err(|_| StoreError::query("template store poisoned"))?;
        // Insertion order doubles as creation order; reverse for newest first.
        Ok(templates.iter().rev().cloned().collect())
    }

    async fn find(&self, id: Uuid) -> Result<Option<EmailTemplate>, StoreError> {
        let templates = self
            .templates
            .lock()
            .map_err(|_| StoreError::query("template store poisoned"))?;
        Ok(templates.iter().find(|t| t.id == id).cloned())
    }

    async fn delete_many(&self, ids: &[Uuid]) -> Result<u64, StoreError> {
        let mut templates = self
            .templates
            .lock()
            .map_err(|_| StoreError::query("template store poisoned"))?;
        let before = templates.len();
        templates.retain(|t| !ids.contains(&t.id));
        Ok((before - templates.len()) as u64)
    }
}
