use crate::{
    audit::log_audit,
    clients::{cart, products, users},
    dto::orders::{CheckoutReceipt, CheckoutRequest, OrderLine, OrderList, PaymentMethod},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_customer},
    models::{CartItem, Order, RecordId},
    response::{ApiResponse, Meta},
    state::AppState,
    store::{Resource, StoreError, StoreResult},
};

/// Rejects a checkout form before anything is written.
pub fn validate_checkout(payload: &CheckoutRequest) -> AppResult<()> {
    let blank = [&payload.name, &payload.address, &payload.pin_code]
        .iter()
        .any(|field| field.trim().is_empty());
    if blank {
        return Err(AppError::bad_request("Please fill in all details."));
    }
    if let PaymentMethod::Upi { upi_id } = &payload.payment {
        let upi_id = upi_id.trim();
        if upi_id.is_empty() {
            return Err(AppError::bad_request("Enter UPI ID"));
        }
        if !upi_id.contains('@') {
            return Err(AppError::bad_request("Enter valid UPI ID"));
        }
    }
    Ok(())
}

/// Moves `items` into the user's orders, then decrements stock and clears
/// each cart line in turn. Writes are not rolled back if a later step fails.
async fn place_orders(
    state: &AppState,
    user_id: &RecordId,
    items: &[CartItem],
) -> StoreResult<Vec<Order>> {
    let user = users::get(&state.store, user_id)
        .await?
        .ok_or_else(|| StoreError::NotFound {
            resource: Resource::Users,
            id: user_id.clone(),
        })?;

    let placed: Vec<Order> = items.iter().map(Order::from_cart).collect();
    let mut orders = user.orders;
    orders.extend(placed.iter().cloned());
    users::set_orders(&state.store, user_id, &orders).await?;

    for item in items {
        let product = products::get(&state.store, &item.product_id)
            .await?
            .ok_or_else(|| StoreError::NotFound {
                resource: Resource::Products,
                id: item.product_id.clone(),
            })?;
        let stock = (product.stock - item.quantity).max(0);
        products::update_stock(&state.store, &product.id, stock).await?;
        cart::remove(&state.store, &item.id).await?;
    }

    Ok(placed)
}

pub async fn checkout(
    state: &AppState,
    user: &AuthUser,
    payload: CheckoutRequest,
) -> AppResult<ApiResponse<CheckoutReceipt>> {
    ensure_customer(user)?;
    validate_checkout(&payload)?;

    let items = cart::list_for_user(&state.store, &user.user_id).await?;
    if items.is_empty() {
        return Err(AppError::bad_request("Cart is empty"));
    }

    let orders = place_orders(state, &user.user_id, &items)
        .await
        .map_err(|err| {
            tracing::error!(user_id = %user.user_id, error = %err, "checkout aborted");
            AppError::CheckoutFailed
        })?;

    let total_items: i64 = orders.iter().map(|o| o.quantity).sum();
    let total_price: i64 = orders.iter().map(Order::value).sum();

    log_audit(
        Some(&user.user_id),
        "checkout",
        Some("orders"),
        Some(serde_json::json!({
            "lines": orders.len(),
            "total_price": total_price,
            "payment": payload.payment.label(),
        })),
    );

    let receipt = CheckoutReceipt {
        orders,
        total_items,
        total_price,
        payment_method: payload.payment.label().to_string(),
    };
    Ok(ApiResponse::success(
        "Order placed successfully!",
        receipt,
        Some(Meta::empty()),
    ))
}

pub async fn list_my_orders(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<OrderList>> {
    ensure_customer(user)?;
    let record = users::get(&state.store, &user.user_id)
        .await?
        .ok_or(AppError::NotFound)?;
    let items: Vec<OrderLine> = record.orders.into_iter().map(OrderLine::from).collect();
    let total = items.len();
    Ok(ApiResponse::success(
        "OK",
        OrderList { items },
        Some(Meta::total(total)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(payment: PaymentMethod) -> CheckoutRequest {
        CheckoutRequest {
            name: "Asha".into(),
            address: "12 MG Road".into(),
            pin_code: "560001".into(),
            payment,
        }
    }

    fn message(result: AppResult<()>) -> String {
        match result {
            Err(AppError::BadRequest(m)) => m,
            other => panic!("expected bad request, got {other:?}"),
        }
    }

    #[test]
    fn checkout_form_rules() {
        assert!(validate_checkout(&form(PaymentMethod::Cod)).is_ok());
        assert!(
            validate_checkout(&form(PaymentMethod::Upi {
                upi_id: "asha@upi".into()
            }))
            .is_ok()
        );

        let mut blank = form(PaymentMethod::Cod);
        blank.pin_code = "  ".into();
        assert_eq!(message(validate_checkout(&blank)), "Please fill in all details.");

        assert_eq!(
            message(validate_checkout(&form(PaymentMethod::Upi { upi_id: "".into() }))),
            "Enter UPI ID"
        );
        assert_eq!(
            message(validate_checkout(&form(PaymentMethod::Upi {
                upi_id: "asha".into()
            }))),
            "Enter valid UPI ID"
        );
    }
}
