use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;

use super::{Backend, Filter, Resource, StoreError, StoreResult};
use crate::models::RecordId;

/// [`Backend`] speaking JSON over HTTP to the REST store.
#[derive(Clone)]
pub struct HttpBackend {
    base_url: String,
    client: Client,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> StoreResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(timeout)
            .build()?;
        Ok(Self::with_client(base_url, client))
    }

    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    fn collection_url(&self, resource: Resource) -> String {
        format!("{}/{}", self.base_url, resource.path())
    }

    fn record_url(&self, resource: Resource, id: &RecordId) -> String {
        format!("{}/{}/{}", self.base_url, resource.path(), id)
    }
}

async fn expect_success(resource: Resource, response: Response) -> StoreResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(StoreError::Status {
        resource,
        status: status.as_u16(),
        message,
    })
}

fn not_found(resource: Resource, id: &RecordId) -> StoreError {
    StoreError::NotFound {
        resource,
        id: id.clone(),
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn list(&self, resource: Resource, filter: Filter<'_>) -> StoreResult<Vec<Value>> {
        tracing::debug!(%resource, ?filter, "store list");
        let response = self
            .client
            .get(self.collection_url(resource))
            .query(filter)
            .send()
            .await?;
        let body: Value = expect_success(resource, response).await?.json().await?;
        // Anything other than an array is treated as an empty collection.
        Ok(match body {
            Value::Array(items) => items,
            _ => Vec::new(),
        })
    }

    async fn get(&self, resource: Resource, id: &RecordId) -> StoreResult<Option<Value>> {
        tracing::debug!(%resource, %id, "store get");
        let response = self.client.get(self.record_url(resource, id)).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let body = expect_success(resource, response).await?.json().await?;
        Ok(Some(body))
    }

    async fn create(&self, resource: Resource, body: Value) -> StoreResult<Value> {
        tracing::debug!(%resource, "store create");
        let response = self
            .client
            .post(self.collection_url(resource))
            .json(&body)
            .send()
            .await?;
        Ok(expect_success(resource, response).await?.json().await?)
    }

    async fn patch(&self, resource: Resource, id: &RecordId, body: Value) -> StoreResult<Value> {
        tracing::debug!(%resource, %id, "store patch");
        let response = self
            .client
            .patch(self.record_url(resource, id))
            .json(&body)
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(not_found(resource, id));
        }
        Ok(expect_success(resource, response).await?.json().await?)
    }

    async fn replace(
        &self,
        resource: Resource,
        id: &RecordId,
        body: Value,
    ) -> StoreResult<Value> {
        tracing::debug!(%resource, %id, "store replace");
        let response = self
            .client
            .put(self.record_url(resource, id))
            .json(&body)
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(not_found(resource, id));
        }
        Ok(expect_success(resource, response).await?.json().await?)
    }

    async fn delete(&self, resource: Resource, id: &RecordId) -> StoreResult<()> {
        tracing::debug!(%resource, %id, "store delete");
        let response = self
            .client
            .delete(self.record_url(resource, id))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(not_found(resource, id));
        }
        expect_success(resource, response).await?;
        Ok(())
    }
}
