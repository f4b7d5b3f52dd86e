use chrono::Local;

use crate::{
    audit::log_audit,
    catalog::cart_stock_note,
    clients::{cart, products},
    dto::cart::{AddToCartRequest, CartLine, CartSummary, CartView, UpdateCartItemRequest},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_customer},
    models::{CartItem, NewCartItem, RecordId},
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Cart dates are shown as `dd/mm/yyyy`.
pub fn today() -> String {
    Local::now().format("%d/%m/%Y").to_string()
}

pub fn summarize(items: &[CartItem]) -> CartSummary {
    let mut summary = CartSummary::default();
    for item in items {
        summary.total_items += item.quantity;
        summary.total_price += item.price * item.quantity;
        summary.total_mrp += item.mrp * item.quantity;
    }
    summary.total_discount = summary.total_mrp - summary.total_price;
    summary
}

fn to_line(item: CartItem) -> CartLine {
    CartLine {
        line_price: item.price * item.quantity,
        line_mrp: item.mrp * item.quantity,
        stock_note: cart_stock_note(item.stock),
        item,
    }
}

/// Cart line `id` when it belongs to `user`.
async fn owned_item(state: &AppState, user: &AuthUser, id: &RecordId) -> AppResult<CartItem> {
    cart::get(&state.store, id)
        .await?
        .filter(|item| item.user_id == user.user_id)
        .ok_or(AppError::NotFound)
}

pub async fn list_cart(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<CartView>> {
    ensure_customer(user)?;
    let items = cart::list_for_user(&state.store, &user.user_id).await?;
    let summary = summarize(&items);
    let total = items.len();
    let view = CartView {
        items: items.into_iter().map(to_line).collect(),
        summary,
    };
    Ok(ApiResponse::success("OK", view, Some(Meta::total(total))))
}

pub async fn add_to_cart(
    state: &AppState,
    user: &AuthUser,
    payload: AddToCartRequest,
) -> AppResult<ApiResponse<CartItem>> {
    ensure_customer(user)?;
    let product = products::get(&state.store, &payload.product_id)
        .await?
        .ok_or(AppError::NotFound)?;
    if product.stock <= 0 {
        return Err(AppError::bad_request("Product is out of stock!"));
    }

    let existing = cart::list_for_user(&state.store, &user.user_id)
        .await?
        .into_iter()
        .find(|item| item.product_id == product.id);

    let (item, message) = match existing {
        Some(item) => {
            let quantity = (item.quantity + 1).min(product.stock);
            let item = cart::set_quantity(&state.store, &item.id, quantity, product.stock).await?;
            (item, format!("{} quantity updated!", product.name))
        }
        None => {
            let line = NewCartItem {
                user_id: user.user_id.clone(),
                product_id: product.id.clone(),
                name: product.name.clone(),
                price: product.price,
                mrp: product.mrp,
                img: product.img.clone(),
                quantity: 1,
                stock: product.stock,
                date: today(),
            };
            let item = cart::create(&state.store, &line).await?;
            (item, format!("{} added to cart!", product.name))
        }
    };

    log_audit(
        Some(&user.user_id),
        "cart_add",
        Some("cart"),
        Some(serde_json::json!({ "product_id": product.id, "quantity": item.quantity })),
    );
    Ok(ApiResponse::success(message, item, Some(Meta::empty())))
}

pub async fn update_quantity(
    state: &AppState,
    user: &AuthUser,
    item_id: RecordId,
    payload: UpdateCartItemRequest,
) -> AppResult<ApiResponse<CartItem>> {
    ensure_customer(user)?;
    let item = owned_item(state, user, &item_id).await?;

    // Clamp against live stock; the snapshot on the line may be stale.
    let stock = match products::get(&state.store, &item.product_id).await? {
        Some(product) => product.stock,
        None => item.stock,
    };
    let quantity = payload.quantity.clamp(1, stock.max(1));
    let item = cart::set_quantity(&state.store, &item.id, quantity, stock).await?;

    log_audit(
        Some(&user.user_id),
        "cart_update",
        Some("cart"),
        Some(serde_json::json!({ "cart_id": item.id, "quantity": quantity })),
    );
    Ok(ApiResponse::success("Cart updated", item, Some(Meta::empty())))
}

pub async fn remove_item(
    state: &AppState,
    user: &AuthUser,
    item_id: RecordId,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_customer(user)?;
    let item = owned_item(state, user, &item_id).await?;
    cart::remove(&state.store, &item.id).await?;

    log_audit(
        Some(&user.user_id),
        "cart_remove",
        Some("cart"),
        Some(serde_json::json!({ "cart_id": item.id })),
    );
    Ok(ApiResponse::success(
        format!("{} removed from cart", item.name),
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(price: i64, mrp: i64, quantity: i64) -> CartItem {
        CartItem {
            id: RecordId::new("c"),
            user_id: RecordId::new("u"),
            product_id: RecordId::new("p"),
            name: "Attar".into(),
            price,
            mrp,
            img: String::new(),
            quantity,
            stock: 10,
            date: "01/01/2025".into(),
        }
    }

    #[test]
    fn summary_multiplies_by_quantity() {
        let summary = summarize(&[line(1000, 1500, 2), line(300, 300, 1)]);
        assert_eq!(
            summary,
            CartSummary {
                total_items: 3,
                total_price: 2300,
                total_mrp: 3300,
                total_discount: 1000,
            }
        );
        assert_eq!(summarize(&[]), CartSummary::default());
    }

    #[test]
    fn today_is_day_first() {
        let date = today();
        let parts: Vec<_> = date.split('/').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].len(), 2);
        assert_eq!(parts[2].len(), 4);
    }
}
