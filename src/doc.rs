//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for
//! the REST API. The generated document backs Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/auth/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Phishing simulation API",
        description = "HTTP interface for running phishing awareness campaigns: \
                       template and decoy-page management, campaign dispatch, \
                       click attribution, and the operator dashboard."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::current_user,
        crate::inbound::http::auth::logout,
        crate::inbound::http::templates::create_template,
        crate::inbound::http::templates::list_templates,
        crate::inbound::http::templates::get_template,
        crate::inbound::http::templates::delete_templates,
        crate::inbound::http::login_pages::create_login_page,
        crate::inbound::http::login_pages::list_login_pages,
        crate::inbound::http::login_pages::get_login_page,
        crate::inbound::http::login_pages::update_login_page,
        crate::inbound::http::login_pages::delete_login_page,
        crate::inbound::http::campaign::send_phishing_email,
        crate::inbound::http::tracking::track_click,
        crate::inbound::http::tracking::submit_credentials,
        crate::inbound::http::tracking::serve_login_page,
        crate::inbound::http::dashboard::list_clicks,
        crate::inbound::http::dashboard::list_credentials,
        crate::inbound::http::dashboard::dashboard_stats,
        crate::inbound::http::status::status,
    ),
    components(schemas(
        crate::domain::ErrorCode,
        crate::domain::EmailTemplate,
        crate::domain::LoginPage,
        crate::domain::PhishingClick,
        crate::domain::CapturedCredential,
        crate::domain::DashboardStats,
        crate::domain::OperatorProfile,
        crate::inbound::http::error::ErrorBody,
        crate::inbound::http::auth::LoginRequest,
        crate::inbound::http::templates::CreateTemplateRequest,
        crate::inbound::http::templates::DeleteTemplatesRequest,
        crate::inbound::http::login_pages::LoginPageRequest,
        crate::inbound::http::campaign::SendEmailRequest,
    ))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_contains_every_operator_path() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/auth/login",
            "/api/email-templates",
            "/api/login-pages/{id}",
            "/send-phishing-email",
            "/track-click",
            "/submit-credentials",
            "/login/{id}",
            "/api/dashboard/stats",
            "/api/status",
        ] {
            assert!(
                doc.paths.paths.contains_key(path),
                "missing path: {path}"
            );
        }
    }
}
