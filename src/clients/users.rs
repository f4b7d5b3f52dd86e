use serde_json::json;

use crate::{
    models::{Order, ProductRef, RecordId, User},
    store::{Resource, Store, StoreResult},
};

pub async fn list(store: &Store) -> StoreResult<Vec<User>> {
    store.list(Resource::Users, &[]).await
}

pub async fn get(store: &Store, id: &RecordId) -> StoreResult<Option<User>> {
    store.get(Resource::Users, id).await
}

/// Users whose email matches ignoring case. The store only filters on exact
/// values, so the whole collection is fetched and filtered here.
pub async fn find_by_email(store: &Store, email: &str) -> StoreResult<Vec<User>> {
    let wanted = email.trim().to_lowercase();
    Ok(list(store)
        .await?
        .into_iter()
        .filter(|u| u.email.to_lowercase() == wanted)
        .collect())
}

pub async fn create(store: &Store, user: &User) -> StoreResult<User> {
    store.create(Resource::Users, user).await
}

pub async fn set_orders(store: &Store, id: &RecordId, orders: &[Order]) -> StoreResult<User> {
    store
        .patch(Resource::Users, id, json!({ "orders": orders }))
        .await
}

pub async fn set_wishlist(
    store: &Store,
    id: &RecordId,
    wishlist: &[ProductRef],
) -> StoreResult<User> {
    store
        .patch(Resource::Users, id, json!({ "wishlist": wishlist }))
        .await
}

pub async fn set_active(store: &Store, id: &RecordId, active: bool) -> StoreResult<User> {
    store
        .patch(Resource::Users, id, json!({ "active": active }))
        .await
}

pub async fn set_password(store: &Store, id: &RecordId, password: &str) -> StoreResult<User> {
    store
        .patch(Resource::Users, id, json!({ "password": password }))
        .await
}

pub async fn delete(store: &Store, id: &RecordId) -> StoreResult<()> {
    store.delete(Resource::Users, id).await
}
