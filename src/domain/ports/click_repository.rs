//! Port for click attribution records.
//!
//! The at-most-one-click-per-recipient invariant is enforced here, at the
//! storage seam: [`ClickRepository::record_first_click`] is an atomic
//! insert-if-absent, so concurrent first clicks for one identity cannot both
//! land. Callers never check-then-insert.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{NewClick, PhishingClick};

use super::StoreError;

/// Port for phishing-click storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickRepository: Send + Sync {
    /// Insert the click unless a record already exists for the recipient
    /// identity. Returns `true` when this call created the record.
    async fn record_first_click(&self, click: &NewClick) -> Result<bool, StoreError>;

    /// Fetch all clicks, newest first.
    async fn list(&self) -> Result<Vec<PhishingClick>, StoreError>;

    /// Count stored clicks.
    async fn count(&self) -> Result<u64, StoreError>;
}

/// Process-local implementation used by tests and API-only development mode.
///
/// A single mutex makes insert-if-absent trivially atomic, matching the
/// unique-index guarantee of the database adapter.
#[derive(Debug, Default)]
pub struct InMemoryClickRepository {
    clicks: Mutex<Vec<PhishingClick>>,
}

fn lock_error() -> StoreError {
    StoreError::query("click store poisoned")
}

#[async_trait]
impl ClickRepository for InMemoryClickRepository {
    async fn record_first_click(&self, click: &NewClick) -> Result<bool, StoreError> {
        let mut clicks = self.clicks.lock().map_err(|_| lock_error())?;
        if clicks.iter().any(|c| c.email == click.email.as_str()) {
            return Ok(false);
        }
        clicks.push(click.clone().into_record());
        Ok(true)
    }

    async fn list(&self) -> Result<Vec<PhishingClick>, StoreError> {
        let clicks = self.clicks.lock().map_err(|_| lock_error())?;
        Ok(clicks.iter().rev().cloned().collect())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let clicks = self.clicks.lock().map_err(|_| lock_error())?;
        Ok(clicks.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RecipientEmail;

    fn click(email: &str) -> NewClick {
        NewClick::new(
            RecipientEmail::new(email).expect("valid recipient"),
            Some("203.0.113.7".to_owned()),
        )
    }

    #[tokio::test]
    async fn second_click_for_same_identity_is_ignored() {
        let repo = InMemoryClickRepository::default();

        assert!(
            repo.record_first_click(&click("alice@example.com"))
                .await
                .expect("first click")
        );
        assert!(
            !repo
                .record_first_click(&click("alice@example.com"))
                .await
                .expect("second click")
        );
        assert_eq!(repo.count().await.expect("count"), 1);
    }

    #[tokio::test]
    async fn distinct_identities_each_get_a_record() {
        let repo = InMemoryClickRepository::default();
        repo.record_first_click(&click("alice@example.com"))
            .await
            .expect("alice");
        repo.record_first_click(&click("bob@example.com"))
            .await
            .expect("bob");

        let clicks = repo.list().await.expect("list");
        assert_eq!(clicks.len(), 2);
        // Newest first.
        assert_eq!(clicks[0].email, "bob@example.com");
    }
}
