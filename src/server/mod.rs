//! Server construction and middleware wiring.

pub mod config;

pub use config::{AppConfig, ConfigError};

use std::sync::Arc;

use actix_cors::Cors;
use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::body::MessageBody;
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::warn;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::ports::{
    ClickRepository, CredentialRepository, InMemoryClickRepository, InMemoryCredentialRepository,
    InMemoryLoginPageRepository, InMemoryTemplateRepository, LoginPageRepository, Mailer,
    RecordingMailer, StaticLoginService, TemplateRepository,
};
use crate::domain::{
    AttributionService, CampaignDispatcher, CredentialCaptureService, DashboardService,
    TrackingLinkBuilder,
};
use crate::inbound::http::auth::{current_user, login, logout};
use crate::inbound::http::campaign::send_phishing_email;
use crate::inbound::http::dashboard::{dashboard_stats, list_clicks, list_credentials};
use crate::inbound::http::login_pages::{
    create_login_page, delete_login_page, get_login_page, list_login_pages, update_login_page,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::status::status;
use crate::inbound::http::templates::{
    create_template, delete_templates, get_template, list_templates,
};
use crate::inbound::http::tracking::{serve_login_page, submit_credentials, track_click};
use crate::middleware::RequestTrace;
use crate::outbound::mail::SmtpMailer;
use crate::outbound::persistence::{
    DbPool, DieselClickRepository, DieselCredentialRepository, DieselLoginPageRepository,
    DieselTemplateRepository, PoolConfig,
};

struct Repositories {
    templates: Arc<dyn TemplateRepository>,
    login_pages: Arc<dyn LoginPageRepository>,
    clicks: Arc<dyn ClickRepository>,
    credentials: Arc<dyn CredentialRepository>,
}

/// Database-backed repositories when a URL is configured, in-memory
/// fallbacks otherwise so the service stays runnable in development.
async fn build_repositories(config: &AppConfig) -> std::io::Result<Repositories> {
    match &config.database_url {
        Some(url) => {
            let pool = DbPool::new(PoolConfig::new(url.clone()))
                .await
                .map_err(|err| std::io::Error::other(format!("database pool: {err}")))?;
            Ok(Repositories {
                templates: Arc::new(DieselTemplateRepository::new(pool.clone())),
                login_pages: Arc::new(DieselLoginPageRepository::new(pool.clone())),
                clicks: Arc::new(DieselClickRepository::new(pool.clone())),
                credentials: Arc::new(DieselCredentialRepository::new(pool)),
            })
        }
        None => {
            warn!("DATABASE_URL not set, using in-memory stores; data will not survive restarts");
            Ok(Repositories {
                templates: Arc::new(InMemoryTemplateRepository::default()),
                login_pages: Arc::new(InMemoryLoginPageRepository::default()),
                clicks: Arc::new(InMemoryClickRepository::default()),
                credentials: Arc::new(InMemoryCredentialRepository::default()),
            })
        }
    }
}

fn build_mailer(config: &AppConfig) -> std::io::Result<Arc<dyn Mailer>> {
    match &config.smtp {
        Some(settings) => {
            let mailer = SmtpMailer::new(settings)
                .map_err(|err| std::io::Error::other(format!("smtp transport: {err}")))?;
            Ok(Arc::new(mailer))
        }
        None => {
            warn!("EMAIL_USER/EMAIL_PASS not set, outbound email will be logged, not delivered");
            Ok(Arc::new(RecordingMailer::default()))
        }
    }
}

/// Assemble the dependency bundle handed to HTTP handlers.
pub async fn build_state(config: &AppConfig) -> std::io::Result<HttpState> {
    let repositories = build_repositories(config).await?;
    let mailer = build_mailer(config)?;

    Ok(HttpState {
        login: Arc::new(StaticLoginService::new(
            config.operator.username.clone(),
            config.operator.password.clone(),
        )),
        templates: repositories.templates.clone(),
        login_pages: repositories.login_pages.clone(),
        dispatcher: Arc::new(CampaignDispatcher::new(
            repositories.templates,
            mailer,
            TrackingLinkBuilder::new(config.base_url.clone()),
        )),
        attribution: Arc::new(AttributionService::new(
            repositories.clicks.clone(),
            config.base_url.clone(),
        )),
        capture: Arc::new(CredentialCaptureService::new(
            repositories.credentials.clone(),
            config.landing_url.clone(),
        )),
        dashboard: Arc::new(DashboardService::new(
            repositories.clicks,
            repositories.credentials,
        )),
    })
}

#[derive(Clone)]
struct AppDependencies {
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
    allowed_origins: Vec<String>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        http_state,
        key,
        cookie_secure,
        same_site,
        allowed_origins,
    } = deps;

    // 24 hour rolling session matching the dashboard's expectations.
    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(24)),
        )
        .build();

    let mut cors = Cors::default()
        .allow_any_header()
        .allow_any_method()
        .supports_credentials();
    for origin in &allowed_origins {
        cors = cors.allowed_origin(origin);
    }

    let app = App::new()
        .app_data(http_state)
        .wrap(session)
        .wrap(cors)
        .wrap(RequestTrace)
        .service(
            web::scope("/api/auth")
                .service(login)
                .service(current_user)
                .service(logout),
        )
        .service(
            web::scope("/api/email-templates")
                .service(create_template)
                .service(list_templates)
                .service(delete_templates)
                .service(get_template),
        )
        .service(
            web::scope("/api/login-pages")
                .service(create_login_page)
                .service(list_login_pages)
                .service(get_login_page)
                .service(update_login_page)
                .service(delete_login_page),
        )
        .service(
            web::scope("/api")
                .service(status)
                .service(web::scope("/dashboard").service(dashboard_stats)),
        )
        .service(send_phishing_email)
        .service(track_click)
        .service(submit_credentials)
        .service(serve_login_page)
        .service(list_clicks)
        .service(list_credentials);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server from resolved configuration and state.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(config: AppConfig, state: HttpState) -> std::io::Result<Server> {
    let http_state = web::Data::new(state);
    let key = config.session.signing_key();
    let cookie_secure = config.session.cookie_secure;
    let same_site = config.session.same_site;
    let allowed_origins = config.allowed_origins.clone();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
            allowed_origins: allowed_origins.clone(),
        })
    })
    .bind(config.bind_addr)?
    .run();

    Ok(server)
}
