use chrono::Utc;

use crate::{
    audit::log_audit,
    catalog::{self, admin_stock_label},
    clients::{products, users},
    dto::products::{
        AdminProductList, AdminProductRow, HomeSections, ProductCard, ProductList, ProductPayload,
        ReviewRequest,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin, ensure_customer},
    models::{Product, RecordId},
    response::{ApiResponse, Meta},
    routes::params::{AdminProductQuery, ProductQuery},
    state::AppState,
};

fn validate_payload(payload: &ProductPayload) -> AppResult<()> {
    if payload.name.trim().is_empty() {
        return Err(AppError::bad_request("name is required"));
    }
    if payload.price < 0 || payload.mrp < 0 {
        return Err(AppError::bad_request("price must be >= 0"));
    }
    if payload.stock < 0 {
        return Err(AppError::bad_request("stock must be >= 0"));
    }
    if payload.size_ml < 0 {
        return Err(AppError::bad_request("size_ml must be >= 0"));
    }
    Ok(())
}

pub async fn list_products(
    state: &AppState,
    query: ProductQuery,
) -> AppResult<ApiResponse<ProductList>> {
    let all = products::list(&state.store).await?;
    let listed = catalog::shop_listing(all, query.q.as_deref(), query.filter);
    let (page, meta) = query.pagination().apply(listed);
    let items = page.into_iter().map(ProductCard::from).collect();
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

pub async fn home_sections(state: &AppState) -> AppResult<ApiResponse<HomeSections>> {
    let all = products::list(&state.store).await?;
    let sections = catalog::home_sections(&all);
    let cards = |list: Vec<Product>| -> Vec<ProductCard> {
        list.into_iter().map(ProductCard::from).collect()
    };
    let data = HomeSections {
        new_arrivals: cards(sections.new_arrivals),
        trending: cards(sections.trending),
        premium: cards(sections.premium),
    };
    Ok(ApiResponse::ok(data))
}

pub async fn get_product(state: &AppState, id: RecordId) -> AppResult<ApiResponse<ProductCard>> {
    let product = products::get(&state.store, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::ok(ProductCard::from(product)))
}

pub async fn create_product(
    state: &AppState,
    user: &AuthUser,
    payload: ProductPayload,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;
    validate_payload(&payload)?;

    let id = RecordId::new(Utc::now().timestamp_millis().to_string());
    let product = payload.into_product(id, Vec::new());
    let product = products::create(&state.store, &product).await?;

    log_audit(
        Some(&user.user_id),
        "product_create",
        Some("products"),
        Some(serde_json::json!({ "product_id": product.id, "name": product.name })),
    );
    Ok(ApiResponse::success(
        "Product added",
        product,
        Some(Meta::empty()),
    ))
}

pub async fn update_product(
    state: &AppState,
    user: &AuthUser,
    id: RecordId,
    payload: ProductPayload,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;
    validate_payload(&payload)?;

    let existing = products::get(&state.store, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    let product = payload.into_product(existing.id, existing.review);
    let product = products::replace(&state.store, &id, &product).await?;

    log_audit(
        Some(&user.user_id),
        "product_update",
        Some("products"),
        Some(serde_json::json!({ "product_id": product.id })),
    );
    Ok(ApiResponse::success(
        "Product updated",
        product,
        Some(Meta::empty()),
    ))
}

pub async fn delete_product(
    state: &AppState,
    user: &AuthUser,
    id: RecordId,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    products::delete(&state.store, &id).await?;

    log_audit(
        Some(&user.user_id),
        "product_delete",
        Some("products"),
        Some(serde_json::json!({ "product_id": id })),
    );
    Ok(ApiResponse::success(
        "Product deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

/// Appends a review. Only shoppers who ordered the product may write one.
pub async fn add_review(
    state: &AppState,
    user: &AuthUser,
    id: RecordId,
    payload: ReviewRequest,
) -> AppResult<ApiResponse<Vec<String>>> {
    ensure_customer(user)?;
    let text = payload.text.trim();
    if text.is_empty() {
        return Err(AppError::bad_request("Review cannot be empty"));
    }

    let product = products::get(&state.store, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    let buyer = users::get(&state.store, &user.user_id)
        .await?
        .ok_or(AppError::NotFound)?;
    if !buyer.has_ordered(&product.id) {
        return Err(AppError::bad_request(
            "Only customers who ordered this product can review it",
        ));
    }

    let mut reviews = product.review;
    reviews.push(text.to_string());
    let product = products::set_reviews(&state.store, &product.id, &reviews).await?;

    log_audit(
        Some(&user.user_id),
        "product_review",
        Some("products"),
        Some(serde_json::json!({ "product_id": product.id })),
    );
    Ok(ApiResponse::success(
        "Review added",
        product.review,
        Some(Meta::total(reviews.len())),
    ))
}

pub async fn list_admin_products(
    state: &AppState,
    user: &AuthUser,
    query: AdminProductQuery,
) -> AppResult<ApiResponse<AdminProductList>> {
    ensure_admin(user)?;
    let all = products::list(&state.store).await?;
    let listed = catalog::shop_listing(all, query.q.as_deref(), None);
    let (page, meta) = query.pagination().apply(listed);
    let items = page
        .into_iter()
        .map(|product| AdminProductRow {
            stock_label: admin_stock_label(product.stock),
            product,
        })
        .collect();
    Ok(ApiResponse::success(
        "Products",
        AdminProductList { items },
        Some(meta),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: &str, price: i64, stock: i64) -> ProductPayload {
        ProductPayload {
            name: name.into(),
            brand: "Zeyora".into(),
            origin: "India".into(),
            kind: "Attar".into(),
            price,
            mrp: price,
            size_ml: 12,
            stock,
            img: String::new(),
            description: String::new(),
        }
    }

    #[test]
    fn payload_rules() {
        assert!(validate_payload(&payload("Oud", 100, 1)).is_ok());
        assert!(validate_payload(&payload("  ", 100, 1)).is_err());
        assert!(validate_payload(&payload("Oud", -1, 1)).is_err());
        assert!(validate_payload(&payload("Oud", 100, -3)).is_err());
    }
}
