//! Operator dashboard: raw listings and derived campaign statistics.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::attribution::PhishingClick;
use crate::domain::credentials::CapturedCredential;
use crate::domain::ports::{ClickRepository, CredentialRepository};
use crate::domain::Error;

/// Aggregate counters for the dashboard header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Unique recipients who clicked the tracking link.
    pub clicks: u64,
    /// Unique recipients who also submitted credentials.
    pub credentials: u64,
    /// Percentage of clickers who went on to submit, rounded to nearest.
    pub success_rate: u32,
}

/// Percentage of clickers who submitted credentials.
///
/// Zero clicks means zero percent; the rate never divides by zero.
#[must_use]
pub fn success_rate(clicks: u64, credentials: u64) -> u32 {
    if clicks == 0 {
        return 0;
    }
    let rate = (credentials as f64 / clicks as f64) * 100.0;
    rate.round() as u32
}

/// Read-side service behind the operator dashboard endpoints.
pub struct DashboardService {
    clicks: Arc<dyn ClickRepository>,
    credentials: Arc<dyn CredentialRepository>,
}

impl DashboardService {
    pub fn new(
        clicks: Arc<dyn ClickRepository>,
        credentials: Arc<dyn CredentialRepository>,
    ) -> Self {
        Self {
            clicks,
            credentials,
        }
    }

    /// All attributed clicks, newest first.
    pub async fn clicks(&self) -> Result<Vec<PhishingClick>, Error> {
        self.clicks.list().await.map_err(Error::from)
    }

    /// All captured credentials, newest first.
    pub async fn credentials(&self) -> Result<Vec<CapturedCredential>, Error> {
        self.credentials.list().await.map_err(Error::from)
    }

    /// Aggregate counters plus the derived success rate.
    pub async fn stats(&self) -> Result<DashboardStats, Error> {
        let clicks = self.clicks.count().await.map_err(Error::from)?;
        let credentials = self.credentials.count().await.map_err(Error::from)?;
        Ok(DashboardStats {
            clicks,
            credentials,
            success_rate: success_rate(clicks, credentials),
        })
    }
}
