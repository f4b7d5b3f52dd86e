use serde_json::json;

use crate::{
    models::{CartItem, NewCartItem, RecordId},
    store::{Resource, Store, StoreResult},
};

/// Cart lines belonging to `user_id`.
pub async fn list_for_user(store: &Store, user_id: &RecordId) -> StoreResult<Vec<CartItem>> {
    store
        .list(Resource::Cart, &[("userId", user_id.to_string())])
        .await
}

pub async fn get(store: &Store, id: &RecordId) -> StoreResult<Option<CartItem>> {
    store.get(Resource::Cart, id).await
}

pub async fn create(store: &Store, item: &NewCartItem) -> StoreResult<CartItem> {
    store.create(Resource::Cart, item).await
}

pub async fn set_quantity(
    store: &Store,
    id: &RecordId,
    quantity: i64,
    stock: i64,
) -> StoreResult<CartItem> {
    store
        .patch(
            Resource::Cart,
            id,
            json!({ "quantity": quantity, "stock": stock }),
        )
        .await
}

pub async fn remove(store: &Store, id: &RecordId) -> StoreResult<()> {
    store.delete(Resource::Cart, id).await
}
