//! Access to the external REST data store.
//!
//! Every record the storefront touches lives behind a generic CRUD service
//! exposing `/users`, `/products`, `/cart`, `/issues` and `/ads`. [`Backend`]
//! is the untyped seam (JSON in, JSON out); [`Store`] layers serde decoding
//! on top so callers only ever see the structs in [`crate::models`].

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use thiserror::Error;

use crate::models::RecordId;

pub mod http;
pub mod memory;

pub use http::HttpBackend;
pub use memory::MemoryBackend;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Users,
    Products,
    Cart,
    Issues,
    Ads,
}

impl Resource {
    pub const ALL: [Resource; 5] = [
        Resource::Users,
        Resource::Products,
        Resource::Cart,
        Resource::Issues,
        Resource::Ads,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Resource::Users => "users",
            Resource::Products => "products",
            Resource::Cart => "cart",
            Resource::Issues => "issues",
            Resource::Ads => "ads",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{resource}/{id} not found")]
    NotFound { resource: Resource, id: RecordId },

    #[error("store answered {status} for {resource}: {message}")]
    Status {
        resource: Resource,
        status: u16,
        message: String,
    },

    #[error("store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed {resource} record: {source}")]
    Decode {
        resource: Resource,
        #[source]
        source: serde_json::Error,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Equality filters applied to a list call, e.g. `userId=42`.
pub type Filter<'a> = &'a [(&'a str, String)];

#[async_trait]
pub trait Backend: Send + Sync {
    async fn list(&self, resource: Resource, filter: Filter<'_>) -> StoreResult<Vec<Value>>;

    async fn get(&self, resource: Resource, id: &RecordId) -> StoreResult<Option<Value>>;

    async fn create(&self, resource: Resource, body: Value) -> StoreResult<Value>;

    /// Shallow merge of `body` into the stored record.
    async fn patch(&self, resource: Resource, id: &RecordId, body: Value) -> StoreResult<Value>;

    /// Full replacement of the stored record, keeping its id.
    async fn replace(&self, resource: Resource, id: &RecordId, body: Value)
    -> StoreResult<Value>;

    async fn delete(&self, resource: Resource, id: &RecordId) -> StoreResult<()>;
}

/// Typed handle over a [`Backend`]. Cheap to clone.
#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn Backend>,
}

impl Store {
    pub fn new(backend: impl Backend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    pub fn from_arc(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    pub async fn list<T: DeserializeOwned>(
        &self,
        resource: Resource,
        filter: Filter<'_>,
    ) -> StoreResult<Vec<T>> {
        self.backend
            .list(resource, filter)
            .await?
            .into_iter()
            .map(|v| decode(resource, v))
            .collect()
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        resource: Resource,
        id: &RecordId,
    ) -> StoreResult<Option<T>> {
        match self.backend.get(resource, id).await? {
            Some(v) => decode(resource, v).map(Some),
            None => Ok(None),
        }
    }

    pub async fn create<B: Serialize, T: DeserializeOwned>(
        &self,
        resource: Resource,
        body: &B,
    ) -> StoreResult<T> {
        let body = encode(resource, body)?;
        let created = self.backend.create(resource, body).await?;
        decode(resource, created)
    }

    pub async fn patch<T: DeserializeOwned>(
        &self,
        resource: Resource,
        id: &RecordId,
        body: Value,
    ) -> StoreResult<T> {
        let updated = self.backend.patch(resource, id, body).await?;
        decode(resource, updated)
    }

    pub async fn replace<B: Serialize, T: DeserializeOwned>(
        &self,
        resource: Resource,
        id: &RecordId,
        body: &B,
    ) -> StoreResult<T> {
        let body = encode(resource, body)?;
        let updated = self.backend.replace(resource, id, body).await?;
        decode(resource, updated)
    }

    pub async fn delete(&self, resource: Resource, id: &RecordId) -> StoreResult<()> {
        self.backend.delete(resource, id).await
    }
}

fn decode<T: DeserializeOwned>(resource: Resource, value: Value) -> StoreResult<T> {
    serde_json::from_value(value).map_err(|source| StoreError::Decode { resource, source })
}

fn encode<B: Serialize>(resource: Resource, body: &B) -> StoreResult<Value> {
    serde_json::to_value(body).map_err(|source| StoreError::Decode { resource, source })
}
