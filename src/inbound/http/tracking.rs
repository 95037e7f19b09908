//! Recipient-facing endpoints: tracking link, credential form, decoy pages.
//!
//! These handlers never emit the JSON error shape used by the operator API.
//! A recipient only ever sees a redirect, a decoy page, or a terse plain-text
//! message; anything richer would betray the simulation.

use actix_web::http::StatusCode;
use actix_web::http::header::{self, ContentType};
use actix_web::{HttpRequest, HttpResponse, get, post, web};
use serde::Deserialize;
use url::Url;
use uuid::Uuid;

use crate::domain::{ClickEvent, Error, ErrorCode};
use crate::inbound::http::state::HttpState;

const CSP_HEADER: (&str, &str) = (
    "Content-Security-Policy",
    "default-src 'self' https: data: 'unsafe-inline' 'unsafe-eval'",
);

/// Query parameters accepted by `GET /track-click`.
#[derive(Debug, Deserialize)]
pub struct TrackClickQuery {
    pub email: Option<String>,
    pub page: Option<String>,
}

/// Body accepted by `POST /submit-credentials`, form or JSON encoded.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct SubmitCredentialsRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// First address in `X-Forwarded-For`, else the socket peer.
fn client_ip(req: &HttpRequest) -> Option<String> {
    let forwarded = req
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty());
    match forwarded {
        Some(ip) => Some(ip.to_owned()),
        None => req.peer_addr().map(|addr| addr.ip().to_string()),
    }
}

fn redirect_to(url: &Url) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, url.as_str()))
        .finish()
}

fn plain_text(status: StatusCode, body: &'static str) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(ContentType::plaintext())
        .body(body)
}

fn track_failure(error: &Error) -> HttpResponse {
    match error.code() {
        ErrorCode::InvalidRequest => plain_text(StatusCode::BAD_REQUEST, "Email is required"),
        _ => plain_text(StatusCode::INTERNAL_SERVER_ERROR, "Error tracking click"),
    }
}

fn capture_failure(error: &Error) -> HttpResponse {
    match error.code() {
        ErrorCode::InvalidRequest => {
            plain_text(StatusCode::BAD_REQUEST, "Email and password required")
        }
        _ => plain_text(StatusCode::INTERNAL_SERVER_ERROR, "Server error"),
    }
}

/// Attribute a tracking-link visit and bounce the recipient to a decoy page.
#[utoipa::path(
    get,
    path = "/track-click",
    params(
        ("email" = Option<String>, Query, description = "Recipient identity"),
        ("page" = Option<String>, Query, description = "Decoy page selector")
    ),
    responses(
        (status = 302, description = "Redirect to the decoy page"),
        (status = 400, description = "Missing email", content_type = "text/plain"),
        (status = 500, description = "Store failure", content_type = "text/plain")
    ),
    tags = ["tracking"],
    operation_id = "trackClick",
    security([])
)]
#[get("/track-click")]
pub async fn track_click(
    req: HttpRequest,
    state: web::Data<HttpState>,
    query: web::Query<TrackClickQuery>,
) -> HttpResponse {
    let query = query.into_inner();
    let event = ClickEvent {
        email: query.email,
        page: query.page,
        ip_address: client_ip(&req),
    };
    match state.attribution.track(event).await {
        Ok(decoy) => redirect_to(&decoy),
        Err(error) => track_failure(&error),
    }
}

/// Record a decoy-form submission and bounce to the configured landing page.
#[utoipa::path(
    post,
    path = "/submit-credentials",
    responses(
        (status = 302, description = "Redirect to the landing page"),
        (status = 400, description = "Missing field", content_type = "text/plain"),
        (status = 500, description = "Store failure", content_type = "text/plain")
    ),
    tags = ["tracking"],
    operation_id = "submitCredentials",
    security([])
)]
#[post("/submit-credentials")]
pub async fn submit_credentials(
    state: web::Data<HttpState>,
    payload: web::Either<web::Form<SubmitCredentialsRequest>, web::Json<SubmitCredentialsRequest>>,
) -> HttpResponse {
    let payload = match payload {
        web::Either::Left(form) => form.into_inner(),
        web::Either::Right(json) => json.into_inner(),
    };
    match state.capture.capture(payload.email, payload.password).await {
        Ok(landing) => redirect_to(&landing),
        Err(error) => capture_failure(&error),
    }
}

/// Serve a stored decoy page to the recipient.
///
/// The permissive CSP lets cloned corporate pages load their remote assets
/// while still blocking plain-http sources.
#[utoipa::path(
    get,
    path = "/login/{id}",
    params(("id" = String, Path, description = "Decoy page id")),
    responses(
        (status = 200, description = "Decoy page HTML", content_type = "text/html"),
        (status = 404, description = "Unknown page", content_type = "text/plain"),
        (status = 500, description = "Store failure", content_type = "text/plain")
    ),
    tags = ["tracking"],
    operation_id = "serveLoginPage",
    security([])
)]
#[get("/login/{id}")]
pub async fn serve_login_page(state: web::Data<HttpState>, id: web::Path<String>) -> HttpResponse {
    // The selector travels opaquely through the tracking link; a malformed
    // id is indistinguishable from an unknown one.
    let Ok(id) = id.into_inner().parse::<Uuid>() else {
        return plain_text(StatusCode::NOT_FOUND, "Login page not found");
    };
    match state.login_pages.find(id).await {
        Ok(Some(page)) => HttpResponse::Ok()
            .content_type(ContentType::html())
            .insert_header(CSP_HEADER)
            .body(page.html),
        Ok(None) => plain_text(StatusCode::NOT_FOUND, "Login page not found"),
        Err(error) => {
            tracing::error!(%error, "failed to load decoy page");
            plain_text(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::login_page::LoginPageDraft;
    use crate::inbound::http::state::HttpState;
    use crate::inbound::http::test_utils::test_state;
    use actix_web::{App, test};

    async fn tracking_app(
        state: HttpState,
    ) -> impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    > {
        test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(track_click)
                .service(submit_credentials)
                .service(serve_login_page),
        )
        .await
    }

    #[actix_web::test]
    async fn click_redirects_to_the_default_decoy() {
        let (state, _) = test_state();
        let app = tracking_app(state).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/track-click?email=alice%40example.com")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FOUND);
        let location = res
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .expect("location header");
        assert_eq!(location, "http://localhost:5000/login.html");
    }

    #[actix_web::test]
    async fn click_without_email_is_a_plain_400() {
        let (state, _) = test_state();
        let app = tracking_app(state).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/track-click").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = test::read_body(res).await;
        assert_eq!(body, "Email is required");
    }

    #[actix_web::test]
    async fn forwarded_header_wins_over_the_socket_address() {
        let req = test::TestRequest::get()
            .insert_header(("x-forwarded-for", "203.0.113.7, 10.0.0.1"))
            .to_http_request();
        assert_eq!(client_ip(&req), Some("203.0.113.7".to_owned()));
    }

    #[actix_web::test]
    async fn form_submission_redirects_to_the_landing_page() {
        let (state, _) = test_state();
        let app = tracking_app(state).await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/submit-credentials")
                .set_form([("email", "alice@example.com"), ("password", "hunter2")])
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FOUND);
        let location = res
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .expect("location header");
        assert_eq!(location, "https://www.microsoft.com/");
    }

    #[actix_web::test]
    async fn json_submission_without_password_is_a_plain_400() {
        let (state, _) = test_state();
        let app = tracking_app(state).await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/submit-credentials")
                .set_json(serde_json::json!({ "email": "alice@example.com" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = test::read_body(res).await;
        assert_eq!(body, "Email and password required");
    }

    #[actix_web::test]
    async fn decoy_page_is_served_with_a_csp_header() {
        let (state, _) = test_state();
        let page = state
            .login_pages
            .create(LoginPageDraft::new("Office365", "<form>login</form>").expect("valid draft"))
            .await
            .expect("create page");
        let app = tracking_app(state).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/login/{}", page.id))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let csp = res
            .headers()
            .get("content-security-policy")
            .and_then(|value| value.to_str().ok())
            .expect("csp header");
        assert!(csp.starts_with("default-src 'self'"));
        let body = test::read_body(res).await;
        assert_eq!(body, "<form>login</form>");
    }

    #[actix_web::test]
    async fn unknown_and_malformed_page_ids_both_404() {
        let (state, _) = test_state();
        let app = tracking_app(state).await;
        for path in [format!("/login/{}", Uuid::new_v4()), "/login/nope".into()] {
            let res =
                test::call_service(&app, test::TestRequest::get().uri(&path).to_request()).await;
            assert_eq!(res.status(), StatusCode::NOT_FOUND);
            let body = test::read_body(res).await;
            assert_eq!(body, "Login page not found");
        }
    }
}
