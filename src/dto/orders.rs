use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Order, OrderStatus};

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, PartialEq, Eq, Default)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash on delivery.
    #[default]
    Cod,
    Upi { upi_id: String },
}

impl PaymentMethod {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cod => "cod",
            PaymentMethod::Upi { .. } => "upi",
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckoutRequest {
    pub name: String,
    pub address: String,
    pub pin_code: String,
    #[serde(default)]
    pub payment: PaymentMethod,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CheckoutReceipt {
    pub orders: Vec<Order>,
    pub total_items: i64,
    pub total_price: i64,
    pub payment_method: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderLine {
    #[serde(flatten)]
    pub order: Order,
    pub status_text: String,
}

impl From<Order> for OrderLine {
    fn from(order: Order) -> Self {
        let status_text = match order.status {
            OrderStatus::Delivered => "Delivered",
            OrderStatus::ShippingInProcess => "Shipping in process - Arrives in 3-5 days",
        }
        .to_string();
        Self { order, status_text }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct OrderList {
    #[schema(value_type = Vec<OrderLine>)]
    pub items: Vec<OrderLine>,
}
