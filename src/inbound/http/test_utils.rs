//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use url::Url;

use crate::domain::ports::{
    InMemoryClickRepository, InMemoryCredentialRepository, InMemoryLoginPageRepository,
    InMemoryTemplateRepository, RecordingMailer, StaticLoginService,
};
use crate::domain::{
    AttributionService, CampaignDispatcher, CredentialCaptureService, DashboardService,
    TrackingLinkBuilder,
};
use crate::inbound::http::state::HttpState;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Fully in-memory state with a recording mailer, plus a handle on the mailer
/// so tests can inspect what was sent.
pub fn test_state() -> (HttpState, Arc<RecordingMailer>) {
    let base_url = Url::parse("http://localhost:5000").expect("test base url");
    let landing_url = Url::parse("https://www.microsoft.com").expect("test landing url");

    let templates = Arc::new(InMemoryTemplateRepository::default());
    let login_pages = Arc::new(InMemoryLoginPageRepository::default());
    let clicks = Arc::new(InMemoryClickRepository::default());
    let credentials = Arc::new(InMemoryCredentialRepository::default());
    let mailer = Arc::new(RecordingMailer::default());

    let state = HttpState {
        login: Arc::new(StaticLoginService::new("admin", "password123")),
        templates: templates.clone(),
        login_pages: login_pages.clone(),
        dispatcher: Arc::new(CampaignDispatcher::new(
            templates,
            mailer.clone(),
            TrackingLinkBuilder::new(base_url.clone()),
        )),
        attribution: Arc::new(AttributionService::new(clicks.clone(), base_url)),
        capture: Arc::new(CredentialCaptureService::new(
            credentials.clone(),
            landing_url,
        )),
        dashboard: Arc::new(DashboardService::new(clicks, credentials)),
    };
    (state, mailer)
}
