//! Domain primitives, aggregates, and use-case services.
//!
//! Purpose: Define strongly typed domain entities and the services that
//! implement the campaign lifecycle (dispatch, attribution, capture,
//! dashboard). Keep types immutable and document invariants and
//! serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode — API error payload and its stable identifier.
//! - RecipientEmail — validated recipient identity.
//! - EmailTemplate / LoginPage — operator-authored content aggregates.
//! - CampaignDispatcher, AttributionService, CredentialCaptureService,
//!   DashboardService — the four use-case services wired by the server.

pub mod attribution;
pub mod auth;
pub mod credentials;
pub mod dashboard;
pub mod dispatch;
pub mod error;
pub mod login_page;
pub mod ports;
pub mod recipient;
pub mod template;
pub mod tracking_link;

pub use self::attribution::{AttributionService, ClickEvent, NewClick, PhishingClick};
pub use self::auth::{LoginCredentials, LoginValidationError, OperatorProfile};
pub use self::credentials::{CapturedCredential, CredentialCaptureService, CredentialSubmission};
pub use self::dashboard::{DashboardService, DashboardStats};
pub use self::dispatch::{CampaignDispatcher, DispatchRequest};
pub use self::error::{Error, ErrorCode};
pub use self::login_page::{LoginPage, LoginPageDraft, LoginPageValidationError};
pub use self::recipient::{RecipientEmail, RecipientValidationError};
pub use self::template::{EmailTemplate, TemplateDraft, TemplateValidationError};
pub use self::tracking_link::{TrackingLinkBuilder, substitute_link};

/// Convenient API result alias.
pub type ApiResult<T> = Result<T, Error>;
