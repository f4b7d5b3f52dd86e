use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::profile::ProfileView,
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::profile_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(profile))
}

#[utoipa::path(
    get,
    path = "/api/profile",
    responses(
        (status = 200, description = "Account, wishlist and order history", body = ApiResponse<ProfileView>)
    ),
    security(("bearer_auth" = [])),
    tag = "Profile"
)]
pub async fn profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<ProfileView>>> {
    let resp = profile_service::profile(&state, &user).await?;
    Ok(Json(resp))
}
