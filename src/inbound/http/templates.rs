//! Email template management endpoints.
//!
//! All routes require an operator session. Deletion is a POST with an id
//! list rather than a DELETE per id so the dashboard can clear a selection
//! in one call.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::domain::template::TemplateDraft;
use crate::domain::{EmailTemplate, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /api/email-templates`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTemplateRequest {
    pub name: String,
    pub subject: String,
    pub content: String,
}

/// Request body for `POST /api/email-templates/delete`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteTemplatesRequest {
    pub ids: Vec<Uuid>,
}

/// Store a new template.
#[utoipa::path(
    post,
    path = "/api/email-templates",
    request_body = CreateTemplateRequest,
    responses(
        (status = 201, description = "Template created", body = EmailTemplate),
        (status = 400, description = "Missing field", body = crate::inbound::http::error::ErrorBody),
        (status = 401, description = "No session", body = crate::inbound::http::error::ErrorBody)
    ),
    tags = ["templates"],
    operation_id = "createTemplate"
)]
#[post("")]
pub async fn create_template(
    session: SessionContext,
    state: web::Data<HttpState>,
    payload: web::Json<CreateTemplateRequest>,
) -> ApiResult<HttpResponse> {
    session.require_operator()?;
    let payload = payload.into_inner();
    let draft = TemplateDraft::new(payload.name, payload.subject, payload.content)
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    let template = state.templates.create(draft).await?;
    Ok(HttpResponse::Created().json(template))
}

/// List stored templates, newest first.
#[utoipa::path(
    get,
    path = "/api/email-templates",
    responses(
        (status = 200, description = "Templates", body = [EmailTemplate]),
        (status = 401, description = "No session", body = crate::inbound::http::error::ErrorBody)
    ),
    tags = ["templates"],
    operation_id = "listTemplates"
)]
#[get("")]
pub async fn list_templates(
    session: SessionContext,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<EmailTemplate>>> {
    session.require_operator()?;
    let templates = state.templates.list().await?;
    Ok(web::Json(templates))
}

/// Fetch one template by id.
#[utoipa::path(
    get,
    path = "/api/email-templates/{id}",
    params(("id" = Uuid, Path, description = "Template id")),
    responses(
        (status = 200, description = "Template", body = EmailTemplate),
        (status = 401, description = "No session", body = crate::inbound::http::error::ErrorBody),
        (status = 404, description = "Unknown id", body = crate::inbound::http::error::ErrorBody)
    ),
    tags = ["templates"],
    operation_id = "getTemplate"
)]
#[get("/{id}")]
pub async fn get_template(
    session: SessionContext,
    state: web::Data<HttpState>,
    id: web::Path<Uuid>,
) -> ApiResult<web::Json<EmailTemplate>> {
    session.require_operator()?;
    let template = state
        .templates
        .find(id.into_inner())
        .await?
        .ok_or_else(|| Error::not_found("Template not found"))?;
    Ok(web::Json(template))
}

/// Delete a batch of templates. Unknown ids are ignored.
#[utoipa::path(
    post,
    path = "/api/email-templates/delete",
    request_body = DeleteTemplatesRequest,
    responses(
        (status = 200, description = "Templates removed"),
        (status = 401, description = "No session", body = crate::inbound::http::error::ErrorBody)
    ),
    tags = ["templates"],
    operation_id = "deleteTemplates"
)]
#[post("/delete")]
pub async fn delete_templates(
    session: SessionContext,
    state: web::Data<HttpState>,
    payload: web::Json<DeleteTemplatesRequest>,
) -> ApiResult<HttpResponse> {
    session.require_operator()?;
    let removed = state.templates.delete_many(&payload.ids).await?;
    tracing::info!(requested = payload.ids.len(), removed, "templates deleted");
    Ok(HttpResponse::Ok().json(json!({ "message": "Templates deleted successfully" })))
}
