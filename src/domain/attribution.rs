//! Click attribution: tying a tracking-link visit back to a recipient.
//!
//! Per recipient identity the state machine has two states, Unattributed and
//! Attributed, and the transition is terminal. The storage port enforces the
//! at-most-one invariant atomically (see
//! [`ClickRepository::record_first_click`]); a repeat visit is a no-op from
//! the caller's perspective. Every visit, attributed or not, ends in a
//! redirect to the decoy page so the recipient experience never changes.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::ClickRepository;
use crate::domain::{Error, RecipientEmail};

/// Persisted click record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PhishingClick {
    pub id: Uuid,
    /// Recipient identity; the dedupe key.
    pub email: String,
    /// Inferred client IP, when one could be determined.
    pub ip_address: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// A click about to be recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClick {
    pub email: RecipientEmail,
    pub ip_address: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl NewClick {
    pub fn new(email: RecipientEmail, ip_address: Option<String>) -> Self {
        Self {
            email,
            ip_address,
            timestamp: Utc::now(),
        }
    }

    /// Materialise into a persisted record with fresh identity.
    pub fn into_record(self) -> PhishingClick {
        PhishingClick {
            id: Uuid::new_v4(),
            email: self.email.into(),
            ip_address: self.ip_address,
            timestamp: self.timestamp,
        }
    }
}

/// Raw tracking-link hit as seen by the HTTP adapter.
#[derive(Debug, Clone)]
pub struct ClickEvent {
    /// Recipient identity from the `email` query parameter.
    pub email: Option<String>,
    /// Opaque decoy-page selector from the `page` query parameter.
    pub page: Option<String>,
    /// Client IP inferred from forwarding headers or the socket.
    pub ip_address: Option<String>,
}

/// Records attribution and resolves the decoy redirect target.
pub struct AttributionService {
    clicks: Arc<dyn ClickRepository>,
    base_url: Url,
}

impl AttributionService {
    pub fn new(clicks: Arc<dyn ClickRepository>, base_url: Url) -> Self {
        Self { clicks, base_url }
    }

    /// Attribute a tracking-link hit and return the decoy URL to redirect to.
    ///
    /// Idempotent per identity: only the first hit creates a record.
    pub async fn track(&self, event: ClickEvent) -> Result<Url, Error> {
        let recipient = event
            .email
            .as_deref()
            .map(RecipientEmail::new)
            .transpose()
            .ok()
            .flatten()
            .ok_or_else(|| Error::invalid_request("Email is required"))?;

        let click = NewClick::new(recipient.clone(), event.ip_address);
        let attributed = self.clicks.record_first_click(&click).await.map_err(Error::from)?;
        if attributed {
            tracing::info!(email = %recipient, "first click attributed");
        } else {
            tracing::debug!(email = %recipient, "repeat click ignored");
        }

        Ok(self.decoy_url(event.page.as_deref()))
    }

    /// `{base}/login/{page}` when a selector was supplied, else the static
    /// default decoy. The selector is passed through opaquely; an id that
    /// does not resolve simply 404s when the decoy page is served.
    fn decoy_url(&self, page: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        url.set_query(None);
        match page {
            Some(page) if !page.is_empty() => url.set_path(&format!("/login/{page}")),
            _ => url.set_path("/login.html"),
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::InMemoryClickRepository;
    use rstest::rstest;

    fn service(clicks: Arc<dyn ClickRepository>) -> AttributionService {
        let base = Url::parse("http://localhost:5000").expect("valid base url");
        AttributionService::new(clicks, base)
    }

    fn event(email: Option<&str>, page: Option<&str>) -> ClickEvent {
        ClickEvent {
            email: email.map(str::to_owned),
            page: page.map(str::to_owned),
            ip_address: Some("203.0.113.7".to_owned()),
        }
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("   "))]
    #[tokio::test]
    async fn missing_identity_is_rejected(#[case] email: Option<&str>) {
        let service = service(Arc::new(InMemoryClickRepository::default()));
        let error = service
            .track(event(email, None))
            .await
            .expect_err("missing identity");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn two_hits_store_exactly_one_record() {
        let clicks = Arc::new(InMemoryClickRepository::default());
        let service = service(clicks.clone());

        service
            .track(event(Some("alice@example.com"), None))
            .await
            .expect("first hit");
        service
            .track(event(Some("alice@example.com"), None))
            .await
            .expect("second hit");

        assert_eq!(clicks.count().await.expect("count"), 1);
    }

    #[tokio::test]
    async fn redirects_to_default_decoy_without_page_selector() {
        let service = service(Arc::new(InMemoryClickRepository::default()));
        let redirect = service
            .track(event(Some("alice@example.com"), None))
            .await
            .expect("tracked");
        assert_eq!(redirect.as_str(), "http://localhost:5000/login.html");
    }

    #[tokio::test]
    async fn redirects_to_selected_decoy_page() {
        let service = service(Arc::new(InMemoryClickRepository::default()));
        let redirect = service
            .track(event(
                Some("alice@example.com"),
                Some("550e8400-e29b-41d4-a716-446655440000"),
            ))
            .await
            .expect("tracked");
        assert_eq!(
            redirect.as_str(),
            "http://localhost:5000/login/550e8400-e29b-41d4-a716-446655440000"
        );
    }

    #[tokio::test]
    async fn repeat_hits_still_redirect() {
        let service = service(Arc::new(InMemoryClickRepository::default()));
        service
            .track(event(Some("alice@example.com"), None))
            .await
            .expect("first hit");
        let redirect = service
            .track(event(Some("alice@example.com"), None))
            .await
            .expect("second hit");
        assert_eq!(redirect.as_str(), "http://localhost:5000/login.html");
    }
}
