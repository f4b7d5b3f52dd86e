use axum::{Json, Router, extract::State, http::StatusCode, routing::post};

use crate::{
    dto::issues::ReportIssueRequest,
    error::AppResult,
    models::Issue,
    response::ApiResponse,
    services::issue_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(report_issue))
}

#[utoipa::path(
    post,
    path = "/api/issues",
    request_body = ReportIssueRequest,
    responses(
        (status = 201, description = "Issue recorded", body = ApiResponse<Issue>),
        (status = 400, description = "A field is missing")
    ),
    tag = "Issues"
)]
pub async fn report_issue(
    State(state): State<AppState>,
    Json(payload): Json<ReportIssueRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Issue>>)> {
    let resp = issue_service::report(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}
