use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Identifier of a record in the REST store.
///
/// The store hands out either JSON strings or integers depending on how a
/// record was created, so both decode into the same string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, ToSchema)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of the id, when it is one.
    pub fn numeric(&self) -> Option<i64> {
        self.0.parse().ok()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Int(i64),
            Float(f64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => RecordId(s),
            Raw::Int(n) => RecordId(n.to_string()),
            Raw::Float(n) => RecordId(n.to_string()),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[serde(alias = "Admin", alias = "ADMIN")]
    Admin,
    #[default]
    #[serde(alias = "User", alias = "USER")]
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

/// User record as stored in `/users`. Orders and the wishlist are embedded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: RecordId,
    #[serde(default)]
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub wishlist: Vec<ProductRef>,
    #[serde(default)]
    pub orders: Vec<Order>,
}

fn default_active() -> bool {
    true
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn has_ordered(&self, product_id: &RecordId) -> bool {
        self.orders.iter().any(|o| &o.product_id == product_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub origin: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub price: i64,
    #[serde(default)]
    pub mrp: i64,
    #[serde(default)]
    pub size_ml: i64,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub img: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub review: Vec<String>,
}

/// Wishlist entry: the product fields a profile page needs.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductRef {
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: i64,
    #[serde(default)]
    pub img: String,
}

impl From<&Product> for ProductRef {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
            price: p.price,
            img: p.img.clone(),
        }
    }
}

/// Cart line in `/cart`, a snapshot of the product at add time.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: RecordId,
    pub user_id: RecordId,
    pub product_id: RecordId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: i64,
    #[serde(default)]
    pub mrp: i64,
    #[serde(default)]
    pub img: String,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub date: String,
}

fn default_quantity() -> i64 {
    1
}

/// Body used to create a cart line; the store assigns the id.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCartItem {
    pub user_id: RecordId,
    pub product_id: RecordId,
    pub name: String,
    pub price: i64,
    pub mrp: i64,
    pub img: String,
    pub quantity: i64,
    pub stock: i64,
    pub date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
pub enum OrderStatus {
    #[default]
    #[serde(rename = "Shipping in process")]
    ShippingInProcess,
    #[serde(rename = "Delivered")]
    Delivered,
}

/// Order line embedded in `User.orders`, copied from a cart line at checkout.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: RecordId,
    pub user_id: RecordId,
    pub product_id: RecordId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: i64,
    #[serde(default)]
    pub mrp: i64,
    #[serde(default)]
    pub img: String,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub status: OrderStatus,
}

impl Order {
    pub fn from_cart(item: &CartItem) -> Self {
        Self {
            id: item.id.clone(),
            user_id: item.user_id.clone(),
            product_id: item.product_id.clone(),
            name: item.name.clone(),
            price: item.price,
            mrp: item.mrp,
            img: item.img.clone(),
            quantity: item.quantity,
            stock: item.stock,
            date: item.date.clone(),
            status: OrderStatus::ShippingInProcess,
        }
    }

    pub fn value(&self) -> i64 {
        self.price * self.quantity
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Issue {
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub fixed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Ad {
    pub id: RecordId,
    #[serde(default)]
    pub img: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// User as returned to API callers; never carries the password.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserView {
    pub id: RecordId,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub active: bool,
}

impl From<&User> for UserView {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.clone(),
            username: u.username.clone(),
            email: u.email.clone(),
            role: u.role,
            active: u.active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_id_accepts_numbers_and_strings() {
        let a: RecordId = serde_json::from_value(json!(17)).unwrap();
        let b: RecordId = serde_json::from_value(json!("17")).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.numeric(), Some(17));
        assert_eq!(serde_json::to_value(&a).unwrap(), json!("17"));
    }

    #[test]
    fn order_without_status_reads_as_shipping() {
        let order: Order = serde_json::from_value(json!({
            "id": "c1",
            "userId": "u1",
            "productId": 4,
            "name": "Oud Royale",
            "price": 2500,
            "quantity": 2
        }))
        .unwrap();
        assert_eq!(order.status, OrderStatus::ShippingInProcess);
        assert_eq!(order.value(), 5000);
        assert_eq!(
            serde_json::to_value(order.status).unwrap(),
            json!("Shipping in process")
        );
    }

    #[test]
    fn user_defaults_fill_missing_fields() {
        let user: User = serde_json::from_value(json!({
            "id": "u1",
            "email": "a@b.co"
        }))
        .unwrap();
        assert!(user.active);
        assert_eq!(user.role, Role::User);
        assert!(user.orders.is_empty());
    }
}
