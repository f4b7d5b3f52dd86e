use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::{
    dto::ads::AdList,
    error::AppResult,
    models::{Ad, RecordId},
    response::ApiResponse,
    services::ad_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_ads))
        .route("/{id}", get(get_ad))
}

#[utoipa::path(
    get,
    path = "/api/ads",
    responses(
        (status = 200, description = "Banner ads", body = ApiResponse<AdList>)
    ),
    tag = "Ads"
)]
pub async fn list_ads(State(state): State<AppState>) -> AppResult<Json<ApiResponse<AdList>>> {
    let resp = ad_service::list(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/ads/{id}",
    params(("id" = String, Path, description = "Ad id")),
    responses(
        (status = 200, description = "One banner ad", body = ApiResponse<Ad>),
        (status = 404, description = "Not found")
    ),
    tag = "Ads"
)]
pub async fn get_ad(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Ad>>> {
    let resp = ad_service::get(&state, RecordId::from(id)).await?;
    Ok(Json(resp))
}
