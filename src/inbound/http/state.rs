//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and services and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{LoginPageRepository, LoginService, TemplateRepository};
use crate::domain::{
    AttributionService, CampaignDispatcher, CredentialCaptureService, DashboardService,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub templates: Arc<dyn TemplateRepository>,
    pub login_pages: Arc<dyn LoginPageRepository>,
    pub dispatcher: Arc<CampaignDispatcher>,
    pub attribution: Arc<AttributionService>,
    pub capture: Arc<CredentialCaptureService>,
    pub dashboard: Arc<DashboardService>,
}
