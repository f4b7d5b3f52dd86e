use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    catalog::ShopStockStatus,
    models::{Product, RecordId},
};

/// Product fields an admin submits on create or full update.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ProductPayload {
    pub name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub origin: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub price: i64,
    #[serde(default)]
    pub mrp: i64,
    #[serde(default)]
    pub size_ml: i64,
    pub stock: i64,
    #[serde(default)]
    pub img: String,
    #[serde(default)]
    pub description: String,
}

impl ProductPayload {
    pub fn into_product(self, id: RecordId, review: Vec<String>) -> Product {
        Product {
            id,
            name: self.name.trim().to_string(),
            brand: self.brand,
            origin: self.origin,
            kind: self.kind,
            price: self.price,
            mrp: self.mrp,
            size_ml: self.size_ml,
            stock: self.stock,
            img: self.img,
            description: self.description,
            review,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductCard {
    #[serde(flatten)]
    pub product: Product,
    pub stock_status: ShopStockStatus,
}

impl From<Product> for ProductCard {
    fn from(product: Product) -> Self {
        let stock_status = ShopStockStatus::of(product.stock);
        Self {
            product,
            stock_status,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<ProductCard>)]
    pub items: Vec<ProductCard>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HomeSections {
    pub new_arrivals: Vec<ProductCard>,
    pub trending: Vec<ProductCard>,
    pub premium: Vec<ProductCard>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReviewRequest {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminProductRow {
    #[serde(flatten)]
    pub product: Product,
    pub stock_label: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct AdminProductList {
    #[schema(value_type = Vec<AdminProductRow>)]
    pub items: Vec<AdminProductRow>,
}
