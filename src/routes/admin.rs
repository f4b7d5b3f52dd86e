use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{delete, get, patch},
};

use crate::{
    dto::{
        admin::{AdminOrderList, AdminUserList, DashboardStats},
        issues::IssueList,
        orders::{OrderLine, OrderList},
        products::AdminProductList,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::{Issue, RecordId, UserView},
    response::ApiResponse,
    routes::params::AdminProductQuery,
    services::{admin_service, issue_service, product_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/products", get(list_products))
        .route("/users", get(list_users))
        .route("/users/{id}", delete(delete_user))
        .route("/users/{id}/status", patch(toggle_user_status))
        .route("/users/{id}/orders", get(user_orders))
        .route("/orders", get(list_all_orders))
        .route("/orders/{user_id}/{order_id}/deliver", patch(mark_delivered))
        .route("/issues", get(list_issues))
        .route("/issues/{id}", delete(delete_issue))
        .route("/issues/{id}/fixed", patch(mark_issue_fixed))
}

#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    responses(
        (status = 200, description = "Store totals", body = ApiResponse<DashboardStats>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn dashboard(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<DashboardStats>>> {
    let resp = admin_service::dashboard(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/products",
    params(AdminProductQuery),
    responses(
        (status = 200, description = "Products with back-office stock labels", body = ApiResponse<AdminProductList>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_products(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<AdminProductQuery>,
) -> AppResult<Json<ApiResponse<AdminProductList>>> {
    let resp = product_service::list_admin_products(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/users",
    responses(
        (status = 200, description = "Shopper accounts", body = ApiResponse<AdminUserList>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_users(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<AdminUserList>>> {
    let resp = admin_service::list_users(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/users/{id}/status",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Account blocked or unblocked", body = ApiResponse<UserView>),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn toggle_user_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<UserView>>> {
    let resp = admin_service::toggle_user_status(&state, &user, RecordId::from(id)).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/users/{id}",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Account deleted", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_user(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = admin_service::delete_user(&state, &user, RecordId::from(id)).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/users/{id}/orders",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Orders of one user", body = ApiResponse<OrderList>),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn user_orders(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = admin_service::user_orders(&state, &user, RecordId::from(id)).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/orders",
    responses(
        (status = 200, description = "Every order with its buyer", body = ApiResponse<AdminOrderList>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_all_orders(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<AdminOrderList>>> {
    let resp = admin_service::list_orders(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/orders/{user_id}/{order_id}/deliver",
    params(
        ("user_id" = String, Path, description = "Buyer id"),
        ("order_id" = String, Path, description = "Order id")
    ),
    responses(
        (status = 200, description = "Order delivered", body = ApiResponse<OrderLine>),
        (status = 400, description = "Already delivered"),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn mark_delivered(
    State(state): State<AppState>,
    user: AuthUser,
    Path((user_id, order_id)): Path<(String, String)>,
) -> AppResult<Json<ApiResponse<OrderLine>>> {
    let resp = admin_service::mark_delivered(
        &state,
        &user,
        RecordId::from(user_id),
        RecordId::from(order_id),
    )
    .await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/issues",
    responses(
        (status = 200, description = "Reported issues", body = ApiResponse<IssueList>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_issues(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<IssueList>>> {
    let resp = issue_service::list(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/issues/{id}/fixed",
    params(("id" = String, Path, description = "Issue id")),
    responses(
        (status = 200, description = "Issue marked fixed", body = ApiResponse<Issue>),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn mark_issue_fixed(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Issue>>> {
    let resp = issue_service::mark_fixed(&state, &user, RecordId::from(id)).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/issues/{id}",
    params(("id" = String, Path, description = "Issue id")),
    responses(
        (status = 200, description = "Issue deleted", body = ApiResponse<serde_json::Value>),
        (status = 400, description = "Issue is not fixed yet"),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_issue(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = issue_service::delete(&state, &user, RecordId::from(id)).await?;
    Ok(Json(resp))
}
