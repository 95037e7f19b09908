//! Liveness endpoint for the operator dashboard and load balancers.

use actix_web::{HttpResponse, get};
use serde_json::json;

/// Report that the API is up.
#[utoipa::path(
    get,
    path = "/api/status",
    responses((status = 200, description = "Service is running")),
    tags = ["status"],
    operation_id = "status",
    security([])
)]
#[get("/status")]
pub async fn status() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "Phishing-Sim API is running" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use serde_json::Value;

    #[actix_web::test]
    async fn reports_running() {
        let app =
            test::init_service(App::new().service(web::scope("/api").service(status))).await;
        let res =
            test::call_service(&app, test::TestRequest::get().uri("/api/status").to_request())
                .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(
            body,
            serde_json::json!({ "status": "Phishing-Sim API is running" })
        );
    }
}
