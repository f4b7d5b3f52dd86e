use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::ProductRef;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WishlistToggle {
    pub in_wishlist: bool,
    pub items: Vec<ProductRef>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct Wishlist {
    #[schema(value_type = Vec<ProductRef>)]
    pub items: Vec<ProductRef>,
}
