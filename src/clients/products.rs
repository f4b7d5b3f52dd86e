use serde_json::json;

use crate::{
    models::{Product, RecordId},
    store::{Resource, Store, StoreResult},
};

/// All products in store order.
pub async fn list(store: &Store) -> StoreResult<Vec<Product>> {
    store.list(Resource::Products, &[]).await
}

pub async fn get(store: &Store, id: &RecordId) -> StoreResult<Option<Product>> {
    store.get(Resource::Products, id).await
}

pub async fn create(store: &Store, product: &Product) -> StoreResult<Product> {
    store.create(Resource::Products, product).await
}

pub async fn replace(store: &Store, id: &RecordId, product: &Product) -> StoreResult<Product> {
    store.replace(Resource::Products, id, product).await
}

pub async fn update_stock(store: &Store, id: &RecordId, stock: i64) -> StoreResult<Product> {
    store
        .patch(Resource::Products, id, json!({ "stock": stock }))
        .await
}

pub async fn set_reviews(
    store: &Store,
    id: &RecordId,
    reviews: &[String],
) -> StoreResult<Product> {
    store
        .patch(Resource::Products, id, json!({ "review": reviews }))
        .await
}

pub async fn delete(store: &Store, id: &RecordId) -> StoreResult<()> {
    store.delete(Resource::Products, id).await
}
