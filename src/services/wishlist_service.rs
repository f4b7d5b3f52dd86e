use crate::{
    audit::log_audit,
    clients::{products, users},
    dto::wishlist::{Wishlist, WishlistToggle},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_customer},
    models::{ProductRef, RecordId},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<Wishlist>> {
    ensure_customer(user)?;
    let record = users::get(&state.store, &user.user_id)
        .await?
        .ok_or(AppError::NotFound)?;
    let total = record.wishlist.len();
    Ok(ApiResponse::success(
        "OK",
        Wishlist {
            items: record.wishlist,
        },
        Some(Meta::total(total)),
    ))
}

/// Removes `product_id` from the wishlist when present, adds it otherwise.
pub async fn toggle(
    state: &AppState,
    user: &AuthUser,
    product_id: RecordId,
) -> AppResult<ApiResponse<WishlistToggle>> {
    ensure_customer(user)?;
    let record = users::get(&state.store, &user.user_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut wishlist = record.wishlist;
    let before = wishlist.len();
    wishlist.retain(|p| p.id != product_id);
    let in_wishlist = wishlist.len() == before;

    if in_wishlist {
        let product = products::get(&state.store, &product_id)
            .await?
            .ok_or(AppError::NotFound)?;
        wishlist.push(ProductRef::from(&product));
    }

    let updated = users::set_wishlist(&state.store, &record.id, &wishlist).await?;

    log_audit(
        Some(&user.user_id),
        if in_wishlist {
            "wishlist_add"
        } else {
            "wishlist_remove"
        },
        Some("users"),
        Some(serde_json::json!({ "product_id": product_id })),
    );

    let message = if in_wishlist {
        "Added to wishlist"
    } else {
        "Removed from wishlist"
    };
    Ok(ApiResponse::success(
        message,
        WishlistToggle {
            in_wishlist,
            items: updated.wishlist,
        },
        Some(Meta::empty()),
    ))
}
