use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Order, UserView};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DashboardStats {
    pub users: usize,
    pub products: usize,
    pub orders: usize,
    pub income: i64,
    pub products_by_origin: BTreeMap<String, usize>,
    pub order_values: Vec<i64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminUserRow {
    #[serde(flatten)]
    pub user: UserView,
    pub order_count: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct AdminUserList {
    #[schema(value_type = Vec<AdminUserRow>)]
    pub items: Vec<AdminUserRow>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminOrderRow {
    pub user_name: String,
    #[serde(flatten)]
    pub order: Order,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminOrderList {
    pub items: Vec<AdminOrderRow>,
    pub delivered: usize,
    pub pending: usize,
}
