use crate::{
    clients::ads,
    dto::ads::AdList,
    error::{AppError, AppResult},
    models::{Ad, RecordId},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list(state: &AppState) -> AppResult<ApiResponse<AdList>> {
    let items = ads::list(&state.store).await?;
    let total = items.len();
    Ok(ApiResponse::success(
        "OK",
        AdList { items },
        Some(Meta::total(total)),
    ))
}

pub async fn get(state: &AppState, id: RecordId) -> AppResult<ApiResponse<Ad>> {
    let ad = ads::get(&state.store, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::ok(ad))
}
