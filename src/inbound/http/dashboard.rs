//! Operator dashboard endpoints.

use actix_web::{get, web};

use crate::domain::{CapturedCredential, DashboardStats, PhishingClick};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// List attributed clicks, newest first.
#[utoipa::path(
    get,
    path = "/clicks",
    responses(
        (status = 200, description = "Clicks", body = [PhishingClick]),
        (status = 401, description = "No session", body = crate::inbound::http::error::ErrorBody)
    ),
    tags = ["dashboard"],
    operation_id = "listClicks"
)]
#[get("/clicks")]
pub async fn list_clicks(
    session: SessionContext,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<PhishingClick>>> {
    session.require_operator()?;
    let clicks = state.dashboard.clicks().await?;
    Ok(web::Json(clicks))
}

/// List captured credentials, newest first.
#[utoipa::path(
    get,
    path = "/credentials",
    responses(
        (status = 200, description = "Credentials", body = [CapturedCredential]),
        (status = 401, description = "No session", body = crate::inbound::http::error::ErrorBody)
    ),
    tags = ["dashboard"],
    operation_id = "listCredentials"
)]
#[get("/credentials")]
pub async fn list_credentials(
    session: SessionContext,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<CapturedCredential>>> {
    session.require_operator()?;
    let credentials = state.dashboard.credentials().await?;
    Ok(web::Json(credentials))
}

/// Aggregate campaign statistics.
#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    responses(
        (status = 200, description = "Statistics", body = DashboardStats),
        (status = 401, description = "No session", body = crate::inbound::http::error::ErrorBody)
    ),
    tags = ["dashboard"],
    operation_id = "dashboardStats"
)]
#[get("/stats")]
pub async fn dashboard_stats(
    session: SessionContext,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<DashboardStats>> {
    session.require_operator()?;
    let stats = state.dashboard.stats().await?;
    Ok(web::Json(stats))
}
