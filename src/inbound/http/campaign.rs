//! Campaign dispatch endpoint.

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::domain::DispatchRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /send-phishing-email`.
///
/// `templateId` and `loginPageId` are optional; omitting the template selects
/// the built-in default message.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailRequest {
    pub recipient_email: Option<String>,
    pub template_id: Option<Uuid>,
    pub login_page_id: Option<Uuid>,
}

impl From<SendEmailRequest> for DispatchRequest {
    fn from(value: SendEmailRequest) -> Self {
        Self {
            recipient_email: value.recipient_email,
            template_id: value.template_id,
            login_page_id: value.login_page_id,
        }
    }
}

/// Compose and send one campaign email.
#[utoipa::path(
    post,
    path = "/send-phishing-email",
    request_body = SendEmailRequest,
    responses(
        (status = 200, description = "Email dispatched"),
        (status = 400, description = "Missing recipient", body = crate::inbound::http::error::ErrorBody),
        (status = 401, description = "No session", body = crate::inbound::http::error::ErrorBody),
        (status = 404, description = "Unknown template", body = crate::inbound::http::error::ErrorBody),
        (status = 500, description = "Transport failure", body = crate::inbound::http::error::ErrorBody)
    ),
    tags = ["campaign"],
    operation_id = "sendPhishingEmail"
)]
#[post("/send-phishing-email")]
pub async fn send_phishing_email(
    session: SessionContext,
    state: web::Data<HttpState>,
    payload: web::Json<SendEmailRequest>,
) -> ApiResult<HttpResponse> {
    session.require_operator()?;
    state
        .dispatcher
        .dispatch(DispatchRequest::from(payload.into_inner()))
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Phishing email sent successfully!" })))
}
