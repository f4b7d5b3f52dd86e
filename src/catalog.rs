//! Pure product-list rules: search, shop filters, ordering, home sections
//! and stock labels.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Product;

/// Quick filters offered on the shop page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ShopFilter {
    Oud,
    Musk,
    Vanilla,
    Amber,
    Rose,
    Jasmin,
    Under1000,
    Under2000,
    Under5000,
}

impl ShopFilter {
    pub fn matches(&self, product: &Product) -> bool {
        let name = product.name.to_lowercase();
        match self {
            ShopFilter::Oud => name.contains("oud"),
            ShopFilter::Musk => name.contains("musk"),
            ShopFilter::Vanilla => name.contains("vanilla"),
            ShopFilter::Amber => name.contains("amber"),
            ShopFilter::Rose => name.contains("rose"),
            ShopFilter::Jasmin => name.contains("jasmin"),
            ShopFilter::Under1000 => product.price <= 1000,
            ShopFilter::Under2000 => product.price <= 2000,
            ShopFilter::Under5000 => product.price <= 5000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ShopStockStatus {
    #[serde(rename = "In Stock")]
    InStock,
    #[serde(rename = "Limited Stock")]
    Limited,
    #[serde(rename = "Out of Stock")]
    OutOfStock,
}

impl ShopStockStatus {
    pub fn of(stock: i64) -> Self {
        if stock > 10 {
            ShopStockStatus::InStock
        } else if stock > 0 {
            ShopStockStatus::Limited
        } else {
            ShopStockStatus::OutOfStock
        }
    }
}

/// Back-office wording, which warns earlier than the shop does.
pub fn admin_stock_label(stock: i64) -> String {
    if stock <= 0 {
        "Out of Stock".to_string()
    } else if stock < 5 {
        format!("Low Stock ({stock} left)")
    } else {
        "In Stock".to_string()
    }
}

/// Note shown next to a cart line.
pub fn cart_stock_note(stock: i64) -> Option<String> {
    match stock {
        0 => Some("Out of Stock".to_string()),
        1..=5 => Some(format!("Only {stock} left in stock!")),
        _ => None,
    }
}

pub fn matches_query(product: &Product, query: &str) -> bool {
    product.name.to_lowercase().contains(&query.to_lowercase())
}

/// Newest first. Numeric ids compare as numbers, anything else as text.
pub fn newest_first(a: &Product, b: &Product) -> Ordering {
    match (a.id.numeric(), b.id.numeric()) {
        (Some(x), Some(y)) => y.cmp(&x),
        _ => b.id.cmp(&a.id),
    }
}

/// Shop listing: search, then filter, newest first.
pub fn shop_listing(
    mut products: Vec<Product>,
    query: Option<&str>,
    filter: Option<ShopFilter>,
) -> Vec<Product> {
    if let Some(q) = query.map(str::trim).filter(|q| !q.is_empty()) {
        products.retain(|p| matches_query(p, q));
    }
    if let Some(f) = filter {
        products.retain(|p| f.matches(p));
    }
    products.sort_by(newest_first);
    products
}

pub struct Sections {
    pub new_arrivals: Vec<Product>,
    pub trending: Vec<Product>,
    pub premium: Vec<Product>,
}

const NEW_ARRIVALS: usize = 8;
const TRENDING: std::ops::Range<usize> = 10..18;
const PREMIUM_LIMIT: usize = 12;
const PREMIUM_PRICE: i64 = 5000;

/// Home page sections, taken from the products in store order.
pub fn home_sections(products: &[Product]) -> Sections {
    let new_arrivals = products[products.len().saturating_sub(NEW_ARRIVALS)..].to_vec();
    let trending = products
        .iter()
        .skip(TRENDING.start)
        .take(TRENDING.len())
        .cloned()
        .collect();
    let premium = products
        .iter()
        .filter(|p| p.price > PREMIUM_PRICE)
        .take(PREMIUM_LIMIT)
        .cloned()
        .collect();
    Sections {
        new_arrivals,
        trending,
        premium,
    }
}
