//! Port for captured-credential records.
//!
//! Exactly one current record per recipient identity: writes are atomic
//! upserts keyed by email, so resubmission overwrites rather than appends.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{CapturedCredential, CredentialSubmission};

use super::StoreError;

/// Port for captured-credential storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    /// Create or replace the record for the submission's recipient identity,
    /// refreshing password and timestamp.
    async fn upsert(&self, submission: &CredentialSubmission) -> Result<(), StoreError>;

    /// Fetch all credentials, newest first.
    async fn list(&self) -> Result<Vec<CapturedCredential>, StoreError>;

    /// Count stored credentials.
    async fn count(&self) -> Result<u64, StoreError>;
}

/// Process-local implementation used by tests and API-only development mode.
#[derive(Debug, Default)]
pub struct InMemoryCredentialRepository {
    credentials: Mutex<Vec<CapturedCredential>>,
}

fn lock_error() -> StoreError {
    StoreError::query("credential store poisoned")
}

#[async_trait]
impl CredentialRepository for InMemoryCredentialRepository {
    async fn upsert(&self, submission: &CredentialSubmission) -> Result<(), StoreError> {
        let mut credentials = self.credentials.lock().map_err(|_| lock_error())?;
        if let Some(existing) = credentials
            .iter_mut()
            .find(|c| c.email == submission.email.as_str())
        {
            existing.password = submission.password.clone();
            existing.timestamp = submission.timestamp;
        } else {
            credentials.push(submission.clone().into_record());
        }
        Ok(())
    }

    async fn list(&self) -> Result<Vec<CapturedCredential>, StoreError> {
        let credentials = self.credentials.lock().map_err(|_| lock_error())?;
        let mut records: Vec<_> = credentials.iter().cloned().collect();
        // Upserts refresh timestamps in place, so insertion order is not
        // submission order.
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(records)
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let credentials = self.credentials.lock().map_err(|_| lock_error())?;
        Ok(credentials.len() as u64)
    }
}
