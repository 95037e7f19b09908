//! Port for decoy login-page persistence.

use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{LoginPage, LoginPageDraft};

use super::StoreError;

/// Port for decoy page storage and retrieval.
///
/// Page names are unique; adapters surface duplicate names as
/// [`StoreError::Conflict`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginPageRepository: Send + Sync {
    /// Persist a new page and return it with assigned identity.
    async fn create(&self, draft: LoginPageDraft) -> Result<LoginPage, StoreError>;

    /// Fetch all pages, newest first.
    async fn list(&self) -> Result<Vec<LoginPage>, StoreError>;

    /// Fetch one page by id.
    async fn find(&self, id: Uuid) -> Result<Option<LoginPage>, StoreError>;

    /// Replace name and html of an existing page. Returns `None` when the id
    /// does not resolve.
    async fn update(&self, id: Uuid, draft: LoginPageDraft)
    -> Result<Option<LoginPage>, StoreError>;

    /// Delete a page; deleting an unknown id is a no-op.
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}

/// Process-local implementation used by tests and API-only development mode.
#[derive(Debug, Default)]
pub struct InMemoryLoginPageRepository {
    pages: Mutex<Vec<LoginPage>>,
}

fn lock_error() -> StoreError {
    StoreError::query("login page store poisoned")
}

#[async_trait]
impl LoginPageRepository for InMemoryLoginPageRepository {
    async fn create(&self, draft: LoginPageDraft) -> Result<LoginPage, StoreError> {
        let mut pages = self.pages.lock().map_err(|_| lock_error())?;
        if pages.iter().any(|p| p.name == draft.name()) {
            return Err(StoreError::conflict(format!(
                "login page name already in use: {}",
                draft.name()
            )));
        }
        let page = draft.into_page();
        pages.push(page.clone());
        Ok(page)
    }

    async fn list(&self) -> Result<Vec<LoginPage>, StoreError> {
        let pages = self.pages.lock().map_err(|_| lock_error())?;
        Ok(pages.iter().rev().cloned().collect())
    }

    async fn find(&self, id: Uuid) -> Result<Option<LoginPage>, StoreError> {
        let pages = self.pages.lock().map_err(|_| lock_error())?;
        Ok(pages.iter().find(|p| p.id == id).cloned())
    }

    async fn update(
        &self,
        id: Uuid,
        draft: LoginPageDraft,
    ) -> Result<Option<LoginPage>, StoreError> {
        let mut pages = self.pages.lock().map_err(|_| lock_error())?;
        if pages.iter().any(|p| p.id != id && p.name == draft.name()) {
            return Err(StoreError::conflict(format!(
                "login page name already in use: {}",
                draft.name()
            )));
        }
        let Some(page) = pages.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        page.name = draft.name().to_owned();
        page.html = draft.html().to_owned();
        Ok(Some(page.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut pages = self.pages.lock().map_err(|_| lock_error())?;
        pages.retain(|p| p.id != id);
        Ok(())
    }
}
