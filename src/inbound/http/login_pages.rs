//! Decoy login-page management endpoints.
//!
//! CRUD for the operator plus the public decoy route that serves a stored
//! page to recipients. The public route deliberately skips the session guard
//! and the JSON error shape: recipients only ever see HTML or plain text.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::domain::login_page::LoginPageDraft;
use crate::domain::{Error, LoginPage};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Request body for page create and update.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginPageRequest {
    pub name: String,
    pub html: String,
}

impl TryFrom<LoginPageRequest> for LoginPageDraft {
    type Error = Error;

    fn try_from(value: LoginPageRequest) -> Result<Self, Self::Error> {
        LoginPageDraft::new(value.name, value.html)
            .map_err(|err| Error::invalid_request(err.to_string()))
    }
}

/// Store a new decoy page.
#[utoipa::path(
    post,
    path = "/api/login-pages",
    request_body = LoginPageRequest,
    responses(
        (status = 201, description = "Page created", body = LoginPage),
        (status = 400, description = "Missing field or duplicate name", body = crate::inbound::http::error::ErrorBody),
        (status = 401, description = "No session", body = crate::inbound::http::error::ErrorBody)
    ),
    tags = ["login-pages"],
    operation_id = "createLoginPage"
)]
#[post("")]
pub async fn create_login_page(
    session: SessionContext,
    state: web::Data<HttpState>,
    payload: web::Json<LoginPageRequest>,
) -> ApiResult<HttpResponse> {
    session.require_operator()?;
    let draft = LoginPageDraft::try_from(payload.into_inner())?;
    let page = state.login_pages.create(draft).await?;
    Ok(HttpResponse::Created().json(page))
}

/// List stored decoy pages, newest first.
#[utoipa::path(
    get,
    path = "/api/login-pages",
    responses(
        (status = 200, description = "Pages", body = [LoginPage]),
        (status = 401, description = "No session", body = crate::inbound::http::error::ErrorBody)
    ),
    tags = ["login-pages"],
    operation_id = "listLoginPages"
)]
#[get("")]
pub async fn list_login_pages(
    session: SessionContext,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<LoginPage>>> {
    session.require_operator()?;
    let pages = state.login_pages.list().await?;
    Ok(web::Json(pages))
}

/// Fetch one decoy page by id, including its HTML.
#[utoipa::path(
    get,
    path = "/api/login-pages/{id}",
    params(("id" = Uuid, Path, description = "Page id")),
    responses(
        (status = 200, description = "Page", body = LoginPage),
        (status = 401, description = "No session", body = crate::inbound::http::error::ErrorBody),
        (status = 404, description = "Unknown id", body = crate::inbound::http::error::ErrorBody)
    ),
    tags = ["login-pages"],
    operation_id = "getLoginPage"
)]
#[get("/{id}")]
pub async fn get_login_page(
    session: SessionContext,
    state: web::Data<HttpState>,
    id: web::Path<Uuid>,
) -> ApiResult<web::Json<LoginPage>> {
    session.require_operator()?;
    let page = state
        .login_pages
        .find(id.into_inner())
        .await?
        .ok_or_else(|| Error::not_found("Login page not found"))?;
    Ok(web::Json(page))
}

/// Replace a page's name and HTML.
#[utoipa::path(
    put,
    path = "/api/login-pages/{id}",
    params(("id" = Uuid, Path, description = "Page id")),
    request_body = LoginPageRequest,
    responses(
        (status = 200, description = "Updated page", body = LoginPage),
        (status = 400, description = "Missing field or duplicate name", body = crate::inbound::http::error::ErrorBody),
        (status = 401, description = "No session", body = crate::inbound::http::error::ErrorBody),
        (status = 404, description = "Unknown id", body = crate::inbound::http::error::ErrorBody)
    ),
    tags = ["login-pages"],
    operation_id = "updateLoginPage"
)]
#[put("/{id}")]
pub async fn update_login_page(
    session: SessionContext,
    state: web::Data<HttpState>,
    id: web::Path<Uuid>,
    payload: web::Json<LoginPageRequest>,
) -> ApiResult<web::Json<LoginPage>> {
    session.require_operator()?;
    let draft = LoginPageDraft::try_from(payload.into_inner())?;
    let page = state
        .login_pages
        .update(id.into_inner(), draft)
        .await?
        .ok_or_else(|| Error::not_found("Login page not found"))?;
    Ok(web::Json(page))
}

/// Delete a page. Unknown ids succeed silently.
#[utoipa::path(
    delete,
    path = "/api/login-pages/{id}",
    params(("id" = Uuid, Path, description = "Page id")),
    responses(
        (status = 200, description = "Page removed"),
        (status = 401, description = "No session", body = crate::inbound::http::error::ErrorBody)
    ),
    tags = ["login-pages"],
    operation_id = "deleteLoginPage"
)]
#[delete("/{id}")]
pub async fn delete_login_page(
    session: SessionContext,
    state: web::Data<HttpState>,
    id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    session.require_operator()?;
    state.login_pages.delete(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{test_session_middleware, test_state};
    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::Value;

    async fn page_app() -> (
        impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
        Cookie<'static>,
    ) {
        let (state, _) = test_state();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .wrap(test_session_middleware())
                .service(web::scope("/api/auth").service(crate::inbound::http::auth::login))
                .service(
                    web::scope("/api/login-pages")
                        .service(create_login_page)
                        .service(list_login_pages)
                        .service(get_login_page)
                        .service(update_login_page)
                        .service(delete_login_page),
                ),
        )
        .await;

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
        (app, cookie)
    }

    #[actix_web::test]
    async fn create_update_delete_lifecycle() {
        let (app, cookie) = page_app().await;

        let created = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/login-pages")
                .cookie(cookie.clone())
                .set_json(json!({ "name": "Office365", "html": "<form>v1</form>" }))
                .to_request(),
        )
        .await;
        assert_eq!(created.status(), StatusCode::CREATED);
        let created: Value = test::read_body_json(created).await;
        let id = created["id"].as_str().expect("page id").to_owned();

        let updated = test::call_service(
            &app,
            test::TestRequest::put()
                .uri(&format!("/api/login-pages/{id}"))
                .cookie(cookie.clone())
                .set_json(json!({ "name": "Office365", "html": "<form>v2</form>" }))
                .to_request(),
        )
        .await;
        assert_eq!(updated.status(), StatusCode::OK);
        let updated: Value = test::read_body_json(updated).await;
        assert_eq!(updated["html"], json!("<form>v2</form>"));

        let deleted = test::call_service(
            &app,
            test::TestRequest::delete()
                .uri(&format!("/api/login-pages/{id}"))
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(deleted.status(), StatusCode::OK);
        let deleted: Value = test::read_body_json(deleted).await;
        assert_eq!(deleted["success"], json!(true));

        let missing = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/api/login-pages/{id}"))
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn duplicate_names_are_rejected() {
        let (app, cookie) = page_app().await;
        for _ in 0..2 {
            let res = test::call_service(
                &app,
                test::TestRequest::post()
                    .uri("/api/login-pages")
                    .cookie(cookie.clone())
                    .set_json(json!({ "name": "Office365", "html": "<form/>" }))
                    .to_request(),
            )
            .await;
            if res.status() == StatusCode::CREATED {
                continue;
            }
            assert_eq!(res.status(), StatusCode::BAD_REQUEST);
            return;
        }
        panic!("second create with duplicate name should fail");
    }

    #[actix_web::test]
    async fn updating_an_unknown_page_is_not_found() {
        let (app, cookie) = page_app().await;
        let res = test::call_service(
            &app,
            test::TestRequest::put()
                .uri(&format!("/api/login-pages/{}", Uuid::new_v4()))
                .cookie(cookie)
                .set_json(json!({ "name": "n", "html": "<form/>" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn mutations_require_a_session() {
        let (app, _) = page_app().await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/login-pages")
                .set_json(json!({ "name": "n", "html": "<form/>" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
