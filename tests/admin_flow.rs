mod common;

use chrono::Duration;
use storefront_api::{
    clients::users,
    dto::{
        cart::AddToCartRequest,
        issues::ReportIssueRequest,
        orders::{CheckoutRequest, PaymentMethod},
        products::ProductPayload,
    },
    error::AppError,
    models::{OrderStatus, RecordId},
    services::{admin_service, cart_service, issue_service, order_service, product_service},
};

fn issue() -> ReportIssueRequest {
    ReportIssueRequest {
        name: "Asha".into(),
        email: "asha@zeyora.in".into(),
        subject: "Late delivery".into(),
        description: "Order still not here".into(),
    }
}

#[tokio::test]
async fn issues_must_be_fixed_before_deletion() -> anyhow::Result<()> {
    let state = common::memory_state();
    let admin = common::admin();

    let created = issue_service::report(&state, issue())
        .await?
        .data
        .expect("issue");
    assert!(!created.fixed);

    let err = issue_service::delete(&state, &admin, created.id.clone())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let fixed = issue_service::mark_fixed(&state, &admin, created.id.clone())
        .await?
        .data
        .expect("issue");
    assert!(fixed.fixed);

    issue_service::delete(&state, &admin, created.id).await?;
    let remaining = issue_service::list(&state, &admin).await?.data.expect("list");
    assert!(remaining.items.is_empty());
    Ok(())
}

#[tokio::test]
async fn incomplete_issue_reports_are_rejected() {
    let state = common::memory_state();
    let mut report = issue();
    report.subject = " ".into();
    assert!(issue_service::report(&state, report).await.is_err());
}

#[tokio::test]
async fn blocking_a_user_ends_their_sessions() -> anyhow::Result<()> {
    let state = common::memory_state();
    let admin = common::admin();
    let record = users::get(&state.store, &RecordId::new(common::SHOPPER))
        .await?
        .expect("user");
    let (session_id, _) = state.sessions.open(&record, Duration::hours(1)).await;

    let blocked = admin_service::toggle_user_status(&state, &admin, record.id.clone())
        .await?
        .data
        .expect("user");
    assert!(!blocked.active);
    assert!(state.sessions.get(&session_id).await.is_none());

    let unblocked = admin_service::toggle_user_status(&state, &admin, record.id)
        .await?
        .data
        .expect("user");
    assert!(unblocked.active);
    Ok(())
}

#[tokio::test]
async fn user_list_hides_admins_and_needs_admin_role() -> anyhow::Result<()> {
    let state = common::memory_state();

    let list = admin_service::list_users(&state, &common::admin())
        .await?
        .data
        .expect("users");
    assert_eq!(list.items.len(), 2);
    assert!(list.items.iter().all(|row| !row.user.id.as_str().contains("admin")));

    let err = admin_service::list_users(&state, &common::shopper())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
    Ok(())
}

#[tokio::test]
async fn orders_are_delivered_once() -> anyhow::Result<()> {
    let state = common::memory_state();
    let admin = common::admin();
    let shopper = common::shopper();

    cart_service::add_to_cart(
        &state,
        &shopper,
        AddToCartRequest {
            product_id: RecordId::new("1"),
        },
    )
    .await?;
    order_service::checkout(
        &state,
        &shopper,
        CheckoutRequest {
            name: "Asha".into(),
            address: "12 MG Road".into(),
            pin_code: "560001".into(),
            payment: PaymentMethod::Upi {
                upi_id: "asha@upi".into(),
            },
        },
    )
    .await?;

    let all = admin_service::list_orders(&state, &admin)
        .await?
        .data
        .expect("orders");
    assert_eq!(all.items.len(), 1);
    assert_eq!(all.items[0].user_name, "asha");
    assert_eq!(all.pending, 1);
    let order_id = all.items[0].order.id.clone();

    let line = admin_service::mark_delivered(&state, &admin, shopper.user_id.clone(), order_id.clone())
        .await?
        .data
        .expect("order");
    assert_eq!(line.order.status, OrderStatus::Delivered);
    assert_eq!(line.status_text, "Delivered");

    let err = admin_service::mark_delivered(&state, &admin, shopper.user_id.clone(), order_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let stats = admin_service::dashboard(&state, &admin)
        .await?
        .data
        .expect("stats");
    assert_eq!(stats.users, 3);
    assert_eq!(stats.products, 3);
    assert_eq!(stats.orders, 1);
    assert_eq!(stats.income, 2500);
    assert_eq!(stats.products_by_origin.get("India"), Some(&2));
    Ok(())
}

#[tokio::test]
async fn admins_manage_the_catalog() -> anyhow::Result<()> {
    let state = common::memory_state();
    let admin = common::admin();
    let payload = ProductPayload {
        name: "Amber Nights".into(),
        brand: "Zeyora".into(),
        origin: "India".into(),
        kind: "Attar".into(),
        price: 1800,
        mrp: 2100,
        size_ml: 12,
        stock: 3,
        img: String::new(),
        description: String::new(),
    };

    let created = product_service::create_product(&state, &admin, payload.clone())
        .await?
        .data
        .expect("product");
    assert!(created.id.numeric().is_some());

    let mut changed = payload;
    changed.stock = 0;
    let updated = product_service::update_product(&state, &admin, created.id.clone(), changed)
        .await?
        .data
        .expect("product");
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.stock, 0);

    let rows = product_service::list_admin_products(&state, &admin, Default::default())
        .await?
        .data
        .expect("rows");
    assert_eq!(rows.items[0].product.id, created.id);
    assert_eq!(rows.items[0].stock_label, "Out of Stock");

    product_service::delete_product(&state, &admin, created.id.clone()).await?;
    let err = product_service::get_product(&state, created.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound));
    Ok(())
}
