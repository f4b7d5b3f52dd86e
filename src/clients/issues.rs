use serde::Serialize;
use serde_json::json;

use crate::{
    models::{Issue, RecordId},
    store::{Resource, Store, StoreResult},
};

#[derive(Debug, Serialize)]
pub struct NewIssue {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub description: String,
    pub fixed: bool,
}

pub async fn list(store: &Store) -> StoreResult<Vec<Issue>> {
    store.list(Resource::Issues, &[]).await
}

pub async fn get(store: &Store, id: &RecordId) -> StoreResult<Option<Issue>> {
    store.get(Resource::Issues, id).await
}

pub async fn create(store: &Store, issue: &NewIssue) -> StoreResult<Issue> {
    store.create(Resource::Issues, issue).await
}

pub async fn mark_fixed(store: &Store, id: &RecordId) -> StoreResult<Issue> {
    store
        .patch(Resource::Issues, id, json!({ "fixed": true }))
        .await
}

pub async fn delete(store: &Store, id: &RecordId) -> StoreResult<()> {
    store.delete(Resource::Issues, id).await
}
