use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{CartItem, RecordId};

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddToCartRequest {
    pub product_id: RecordId,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCartItemRequest {
    pub quantity: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CartLine {
    #[serde(flatten)]
    pub item: CartItem,
    pub line_price: i64,
    pub line_mrp: i64,
    pub stock_note: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq, Default)]
pub struct CartSummary {
    pub total_items: i64,
    pub total_price: i64,
    pub total_mrp: i64,
    pub total_discount: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CartView {
    pub items: Vec<CartLine>,
    pub summary: CartSummary,
}
