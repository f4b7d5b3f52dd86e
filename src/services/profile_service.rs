use crate::{
    clients::users,
    dto::{orders::OrderLine, profile::ProfileView},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_customer},
    models::UserView,
    response::ApiResponse,
    state::AppState,
};

/// Fresh user record with wishlist and order history.
pub async fn profile(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<ProfileView>> {
    ensure_customer(user)?;
    let record = users::get(&state.store, &user.user_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let view = ProfileView {
        user: UserView::from(&record),
        wishlist: record.wishlist,
        orders: record.orders.into_iter().map(OrderLine::from).collect(),
    };
    Ok(ApiResponse::ok(view))
}
