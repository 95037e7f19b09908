//! Operator authentication endpoints.
//!
//! ```text
//! POST /api/auth/login {"username":"admin","password":"password123"}
//! GET  /api/auth/user
//! POST /api/auth/logout
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{Error, LoginCredentials, LoginValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/auth/login`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// Authenticate the operator and establish a session.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = crate::inbound::http::error::ErrorBody),
        (status = 401, description = "Invalid credentials", body = crate::inbound::http::error::ErrorBody)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    session: SessionContext,
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = LoginCredentials::try_from(payload.into_inner())
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    let profile = state.login.authenticate(&credentials).await?;
    session.persist_operator(&profile)?;
    tracing::info!(operator = %profile.username, "operator logged in");
    Ok(HttpResponse::Ok().json(json!({ "success": true, "user": profile })))
}

/// Return the operator bound to the current session.
#[utoipa::path(
    get,
    path = "/api/auth/user",
    responses(
        (status = 200, description = "Current operator"),
        (status = 401, description = "No session", body = crate::inbound::http::error::ErrorBody)
    ),
    tags = ["auth"],
    operation_id = "currentUser"
)]
#[get("/user")]
pub async fn current_user(session: SessionContext) -> ApiResult<HttpResponse> {
    let profile = session.require_operator()?;
    Ok(HttpResponse::Ok().json(json!({ "user": profile })))
}

/// Destroy the operator session.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses((status = 200, description = "Session destroyed")),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> ApiResult<HttpResponse> {
    session.purge();
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{test_session_middleware, test_state};
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::Value;

    async fn login_response(username: &str, password: &str) -> (StatusCode, Value) {
        let (state, _) = test_state();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .wrap(test_session_middleware())
                .service(web::scope("/api/auth").service(login)),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/auth/login")
                .set_json(json!({ "username": username, "password": password }))
                .to_request(),
        )
        .await;
        let status = res.status();
        let body: Value = test::read_body_json(res).await;
        (status, body)
    }

    #[actix_web::test]
    async fn valid_credentials_establish_a_session() {
        let (status, body) = login_response("admin", "password123").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["user"]["username"], json!("admin"));
    }

    #[rstest]
    #[case("admin", "wrong")]
    #[case("intruder", "password123")]
    #[actix_web::test]
    async fn bad_credentials_are_rejected(#[case] username: &str, #[case] password: &str) {
        let (status, body) = login_response(username, password).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], json!("Invalid username or password"));
    }

    #[actix_web::test]
    async fn blank_username_is_a_bad_request() {
        let (status, _) = login_response("  ", "password123").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn session_survives_login_and_dies_on_logout() {
        let (state, _) = test_state();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .wrap(test_session_middleware())
                .service(
                    web::scope("/api/auth")
                        .service(login)
                        .service(current_user)
                        .service(logout),
                ),
        )
        .await;

        let unauth = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/auth/user").to_request(),
        )
        .await;
        assert_eq!(unauth.status(), StatusCode::UNAUTHORIZED);

        let login_res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/auth/login")
                .set_json(json!({ "username": "admin", "password": "password123" }))
                .to_request(),
        )
        .await;
        let cookie = login_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie")
            .into_owned();

        let user_res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/auth/user")
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(user_res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(user_res).await;
        assert_eq!(body["user"]["username"], json!("admin"));

        let logout_res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/auth/logout")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(logout_res.status(), StatusCode::OK);
    }
}
