use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    dto::orders::OrderLine,
    models::{ProductRef, UserView},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProfileView {
    pub user: UserView,
    pub wishlist: Vec<ProductRef>,
    pub orders: Vec<OrderLine>,
}
