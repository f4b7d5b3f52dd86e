use crate::{
    models::{Ad, RecordId},
    store::{Resource, Store, StoreResult},
};

pub async fn list(store: &Store) -> StoreResult<Vec<Ad>> {
    store.list(Resource::Ads, &[]).await
}

pub async fn get(store: &Store, id: &RecordId) -> StoreResult<Option<Ad>> {
    store.get(Resource::Ads, id).await
}
