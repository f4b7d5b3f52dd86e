use std::collections::BTreeMap;

use crate::{
    audit::log_audit,
    clients::{products, users},
    dto::{
        admin::{AdminOrderList, AdminOrderRow, AdminUserList, AdminUserRow, DashboardStats},
        orders::{OrderLine, OrderList},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Order, OrderStatus, Product, RecordId, Role, User, UserView},
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Headline numbers for the back-office dashboard.
pub fn dashboard_stats(users: &[User], products: &[Product]) -> DashboardStats {
    let orders: Vec<&Order> = users.iter().flat_map(|u| u.orders.iter()).collect();

    let mut products_by_origin = BTreeMap::new();
    for product in products.iter().filter(|p| !p.origin.is_empty()) {
        *products_by_origin.entry(product.origin.clone()).or_insert(0) += 1;
    }

    let order_values: Vec<i64> = orders.iter().map(|o| o.value()).collect();
    DashboardStats {
        users: users.len(),
        products: products.len(),
        orders: orders.len(),
        // Income weighs each order by quantity, not just the unit price.
        income: order_values.iter().sum(),
        products_by_origin,
        order_values,
    }
}

/// Every order across all users, tagged with the buyer's name.
pub fn flatten_orders(users: Vec<User>) -> AdminOrderList {
    let items: Vec<AdminOrderRow> = users
        .into_iter()
        .flat_map(|user| {
            let name = user.username;
            user.orders.into_iter().map(move |order| AdminOrderRow {
                user_name: name.clone(),
                order,
            })
        })
        .collect();
    let delivered = items
        .iter()
        .filter(|row| row.order.status == OrderStatus::Delivered)
        .count();
    AdminOrderList {
        pending: items.len() - delivered,
        delivered,
        items,
    }
}

pub async fn dashboard(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<DashboardStats>> {
    ensure_admin(user)?;
    let all_users = users::list(&state.store).await?;
    let all_products = products::list(&state.store).await?;
    Ok(ApiResponse::ok(dashboard_stats(&all_users, &all_products)))
}

pub async fn list_users(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<AdminUserList>> {
    ensure_admin(user)?;
    let items: Vec<AdminUserRow> = users::list(&state.store)
        .await?
        .iter()
        .filter(|u| u.role != Role::Admin)
        .map(|u| AdminUserRow {
            user: UserView::from(u),
            order_count: u.orders.len(),
        })
        .collect();
    let total = items.len();
    Ok(ApiResponse::success(
        "OK",
        AdminUserList { items },
        Some(Meta::total(total)),
    ))
}

async fn customer(state: &AppState, id: &RecordId) -> AppResult<User> {
    users::get(&state.store, id)
        .await?
        .ok_or(AppError::NotFound)
}

/// Blocks an active user or unblocks a blocked one. Blocking ends every open
/// session of that user.
pub async fn toggle_user_status(
    state: &AppState,
    user: &AuthUser,
    id: RecordId,
) -> AppResult<ApiResponse<UserView>> {
    ensure_admin(user)?;
    let target = customer(state, &id).await?;
    if target.is_admin() {
        return Err(AppError::bad_request("Admin accounts cannot be blocked"));
    }

    let updated = users::set_active(&state.store, &target.id, !target.active).await?;
    let revoked = if updated.active {
        0
    } else {
        state.sessions.revoke_user(&updated.id).await
    };

    log_audit(
        Some(&user.user_id),
        if updated.active {
            "user_unblock"
        } else {
            "user_block"
        },
        Some("users"),
        Some(serde_json::json!({ "user_id": updated.id, "sessions_revoked": revoked })),
    );
    let message = if updated.active {
        "User unblocked"
    } else {
        "User blocked"
    };
    Ok(ApiResponse::success(
        message,
        UserView::from(&updated),
        Some(Meta::empty()),
    ))
}

pub async fn delete_user(
    state: &AppState,
    user: &AuthUser,
    id: RecordId,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    let target = customer(state, &id).await?;
    if target.is_admin() {
        return Err(AppError::bad_request("Admin accounts cannot be deleted"));
    }

    users::delete(&state.store, &target.id).await?;
    let revoked = state.sessions.revoke_user(&target.id).await;

    log_audit(
        Some(&user.user_id),
        "user_delete",
        Some("users"),
        Some(serde_json::json!({ "user_id": target.id, "sessions_revoked": revoked })),
    );
    Ok(ApiResponse::success(
        "User deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn user_orders(
    state: &AppState,
    user: &AuthUser,
    id: RecordId,
) -> AppResult<ApiResponse<OrderList>> {
    ensure_admin(user)?;
    let target = customer(state, &id).await?;
    let items: Vec<OrderLine> = target.orders.into_iter().map(OrderLine::from).collect();
    let total = items.len();
    Ok(ApiResponse::success(
        "OK",
        OrderList { items },
        Some(Meta::total(total)),
    ))
}

pub async fn list_orders(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<AdminOrderList>> {
    ensure_admin(user)?;
    let list = flatten_orders(users::list(&state.store).await?);
    let total = list.items.len();
    Ok(ApiResponse::success("OK", list, Some(Meta::total(total))))
}

pub async fn mark_delivered(
    state: &AppState,
    user: &AuthUser,
    user_id: RecordId,
    order_id: RecordId,
) -> AppResult<ApiResponse<OrderLine>> {
    ensure_admin(user)?;
    let target = customer(state, &user_id).await?;

    let mut orders = target.orders;
    let order = orders
        .iter_mut()
        .find(|o| o.id == order_id)
        .ok_or(AppError::NotFound)?;
    if order.status == OrderStatus::Delivered {
        return Err(AppError::bad_request("Order already delivered"));
    }
    order.status = OrderStatus::Delivered;
    let delivered = order.clone();

    users::set_orders(&state.store, &target.id, &orders).await?;

    log_audit(
        Some(&user.user_id),
        "order_delivered",
        Some("orders"),
        Some(serde_json::json!({ "user_id": target.id, "order_id": delivered.id })),
    );
    Ok(ApiResponse::success(
        "Order marked as delivered",
        OrderLine::from(delivered),
        Some(Meta::empty()),
    ))
}
