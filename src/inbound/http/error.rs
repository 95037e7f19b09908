//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into consistent JSON responses and status
//! codes. Operator endpoints get a `{"error": "..."}` body; the
//! recipient-facing endpoints map errors to plain text or redirects in their
//! own handlers and never go through this impl.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// JSON error body returned by operator endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable failure description.
    pub error: String,
}

impl From<&Error> for ErrorBody {
    fn from(error: &Error) -> Self {
        Self {
            error: error.message().to_owned(),
        }
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody::from(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use rstest::rstest;
    use serde_json::Value;

    #[rstest]
    #[case(Error::invalid_request("Email is required"), StatusCode::BAD_REQUEST)]
    #[case(Error::unauthorized("Not authenticated"), StatusCode::UNAUTHORIZED)]
    #[case(Error::not_found("Template not found"), StatusCode::NOT_FOUND)]
    #[case(Error::internal("Server error"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn maps_codes_to_statuses(#[case] error: Error, #[case] expected: StatusCode) {
        assert_eq!(error.status_code(), expected);
    }

    #[actix_web::test]
    async fn body_carries_the_message_under_the_error_key() {
        let response = Error::not_found("Template not found").error_response();
        let bytes = to_bytes(response.into_body()).await.expect("body bytes");
        let json: Value = serde_json::from_slice(&bytes).expect("json body");
        assert_eq!(json, serde_json::json!({ "error": "Template not found" }));
    }
}
