mod common;

use storefront_api::{
    clients::cart,
    dto::cart::{AddToCartRequest, UpdateCartItemRequest},
    error::AppError,
    models::RecordId,
    services::cart_service,
};

fn add(product_id: &str) -> AddToCartRequest {
    AddToCartRequest {
        product_id: RecordId::new(product_id),
    }
}

#[tokio::test]
async fn adding_twice_bumps_quantity_instead_of_duplicating() -> anyhow::Result<()> {
    let state = common::memory_state();
    let user = common::shopper();

    let first = cart_service::add_to_cart(&state, &user, add("1")).await?;
    assert_eq!(first.message, "Oud Royale added to cart!");
    let second = cart_service::add_to_cart(&state, &user, add("1")).await?;
    assert_eq!(second.message, "Oud Royale quantity updated!");

    let lines = cart::list_for_user(&state.store, &user.user_id).await?;
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].quantity, 2);
    assert_eq!(lines[0].date.len(), 10);

    let view = cart_service::list_cart(&state, &user)
        .await?
        .data
        .expect("cart");
    assert_eq!(view.summary.total_items, 2);
    assert_eq!(view.summary.total_price, 5000);
    assert_eq!(view.summary.total_discount, 1000);
    assert_eq!(view.items[0].stock_note.as_deref(), Some("Only 5 left in stock!"));
    Ok(())
}

#[tokio::test]
async fn quantity_never_leaves_one_to_stock() -> anyhow::Result<()> {
    let state = common::memory_state();
    let user = common::shopper();

    // Musk has stock 2: the third add stays at 2.
    for _ in 0..3 {
        cart_service::add_to_cart(&state, &user, add("2")).await?;
    }
    let line = cart::list_for_user(&state.store, &user.user_id).await?.remove(0);
    assert_eq!(line.quantity, 2);

    let high = cart_service::update_quantity(
        &state,
        &user,
        line.id.clone(),
        UpdateCartItemRequest { quantity: 40 },
    )
    .await?
    .data
    .expect("line");
    assert_eq!(high.quantity, 2);

    let low = cart_service::update_quantity(
        &state,
        &user,
        line.id.clone(),
        UpdateCartItemRequest { quantity: 0 },
    )
    .await?
    .data
    .expect("line");
    assert_eq!(low.quantity, 1);
    Ok(())
}

#[tokio::test]
async fn out_of_stock_and_foreign_lines_are_refused() -> anyhow::Result<()> {
    let state = common::memory_state();
    let user = common::shopper();

    let err = cart_service::add_to_cart(&state, &user, add("3"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(ref m) if m == "Product is out of stock!"));

    let err = cart_service::add_to_cart(&state, &user, add("99"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));

    let line = cart_service::add_to_cart(&state, &user, add("1"))
        .await?
        .data
        .expect("line");

    let mut other = common::shopper();
    other.user_id = RecordId::new(common::BLOCKED);
    let err = cart_service::remove_item(&state, &other, line.id.clone())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));

    cart_service::remove_item(&state, &user, line.id).await?;
    assert!(cart::list_for_user(&state.store, &user.user_id).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn admins_have_no_cart() {
    let state = common::memory_state();
    let err = cart_service::list_cart(&state, &common::admin())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}
