use std::{collections::HashMap, path::Path};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Backend, Filter, Resource, StoreError, StoreResult};
use crate::models::RecordId;

/// In-process store with the same list/get/patch semantics as the REST
/// store. Collections keep insertion order.
#[derive(Default)]
pub struct MemoryBackend {
    collections: RwLock<HashMap<Resource, Vec<Value>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from a `db.json` style document:
    /// `{ "users": [...], "products": [...], ... }`. Unknown keys are ignored.
    pub fn from_snapshot(snapshot: Value) -> Self {
        let mut collections = HashMap::new();
        if let Value::Object(mut root) = snapshot {
            for resource in Resource::ALL {
                if let Some(Value::Array(items)) = root.remove(resource.path()) {
                    collections.insert(resource, items);
                }
            }
        }
        Self {
            collections: RwLock::new(collections),
        }
    }

    pub async fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let raw = tokio::fs::read_to_string(path).await?;
        let snapshot: Value = serde_json::from_str(&raw)?;
        Ok(Self::from_snapshot(snapshot))
    }

    /// Current contents as a `db.json` style document.
    pub async fn snapshot(&self) -> Value {
        let collections = self.collections.read().await;
        let mut root = Map::new();
        for resource in Resource::ALL {
            let items = collections.get(&resource).cloned().unwrap_or_default();
            root.insert(resource.path().to_string(), Value::Array(items));
        }
        Value::Object(root)
    }
}

fn id_string(id: &Value) -> Option<String> {
    match id {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn field_matches(record: &Value, field: &str, expected: &str) -> bool {
    match record.get(field) {
        Some(Value::String(s)) => s == expected,
        Some(Value::Number(n)) => n.to_string() == expected,
        Some(Value::Bool(b)) => b.to_string() == expected,
        _ => false,
    }
}

fn not_found(resource: Resource, id: &RecordId) -> StoreError {
    StoreError::NotFound {
        resource,
        id: id.clone(),
    }
}

fn position(items: &[Value], id: &RecordId) -> Option<usize> {
    items
        .iter()
        .position(|v| v.get("id").and_then(id_string).as_deref() == Some(id.as_str()))
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn list(&self, resource: Resource, filter: Filter<'_>) -> StoreResult<Vec<Value>> {
        let collections = self.collections.read().await;
        let items = collections.get(&resource).map(Vec::as_slice).unwrap_or(&[]);
        Ok(items
            .iter()
            .filter(|v| filter.iter().all(|(k, want)| field_matches(v, k, want)))
            .cloned()
            .collect())
    }

    async fn get(&self, resource: Resource, id: &RecordId) -> StoreResult<Option<Value>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&resource)
            .and_then(|items| position(items, id).map(|i| items[i].clone())))
    }

    async fn create(&self, resource: Resource, body: Value) -> StoreResult<Value> {
        let mut record = match body {
            Value::Object(map) => map,
            _ => {
                return Err(StoreError::Status {
                    resource,
                    status: 400,
                    message: "record must be a JSON object".into(),
                });
            }
        };
        let mut collections = self.collections.write().await;
        let items = collections.entry(resource).or_default();

        let id = match record.get("id").and_then(id_string) {
            Some(id) => id,
            None => {
                let id = Uuid::new_v4().simple().to_string();
                record.insert("id".into(), Value::String(id.clone()));
                id
            }
        };
        if position(items, &RecordId::new(id.clone())).is_some() {
            return Err(StoreError::Status {
                resource,
                status: 409,
                message: format!("duplicate id {id}"),
            });
        }

        let record = Value::Object(record);
        items.push(record.clone());
        Ok(record)
    }

    async fn patch(&self, resource: Resource, id: &RecordId, body: Value) -> StoreResult<Value> {
        let mut collections = self.collections.write().await;
        let items = collections.entry(resource).or_default();
        let idx = position(items, id).ok_or_else(|| not_found(resource, id))?;

        if let (Value::Object(target), Value::Object(changes)) = (&mut items[idx], body) {
            for (key, value) in changes {
                if key != "id" {
                    target.insert(key, value);
                }
            }
        }
        Ok(items[idx].clone())
    }

    async fn replace(
        &self,
        resource: Resource,
        id: &RecordId,
        body: Value,
    ) -> StoreResult<Value> {
        let mut collections = self.collections.write().await;
        let items = collections.entry(resource).or_default();
        let idx = position(items, id).ok_or_else(|| not_found(resource, id))?;

        let mut record = match body {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        // The stored id wins over whatever the body carries.
        if let Some(existing) = items[idx].get("id").cloned() {
            record.insert("id".into(), existing);
        }
        items[idx] = Value::Object(record);
        Ok(items[idx].clone())
    }

    async fn delete(&self, resource: Resource, id: &RecordId) -> StoreResult<()> {
        let mut collections = self.collections.write().await;
        let items = collections.entry(resource).or_default();
        let idx = position(items, id).ok_or_else(|| not_found(resource, id))?;
        items.remove(idx);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn list_filters_on_string_and_numeric_fields() {
        let store = MemoryBackend::from_snapshot(json!({
            "cart": [
                { "id": "a", "userId": "u1", "productId": 3 },
                { "id": "b", "userId": "u2", "productId": 3 },
                { "id": "c", "userId": "u1", "productId": 4 }
            ]
        }));

        let mine = store
            .list(Resource::Cart, &[("userId", "u1".to_string())])
            .await
            .unwrap();
        assert_eq!(mine.len(), 2);

        let by_product = store
            .list(
                Resource::Cart,
                &[("userId", "u1".to_string()), ("productId", "3".to_string())],
            )
            .await
            .unwrap();
        assert_eq!(by_product.len(), 1);
        assert_eq!(by_product[0]["id"], "a");
    }

    #[tokio::test]
    async fn create_assigns_ids_and_patch_merges() {
        let store = MemoryBackend::new();
        let created = store
            .create(Resource::Issues, json!({ "subject": "late", "fixed": false }))
            .await
            .unwrap();
        let id = RecordId::new(created["id"].as_str().unwrap());

        let patched = store
            .patch(Resource::Issues, &id, json!({ "fixed": true, "id": "other" }))
            .await
            .unwrap();
        assert_eq!(patched["fixed"], true);
        assert_eq!(patched["subject"], "late");
        assert_eq!(patched["id"], json!(id.as_str()));
    }

    #[tokio::test]
    async fn missing_records_are_reported() {
        let store = MemoryBackend::new();
        let id = RecordId::new("nope");
        assert!(store.get(Resource::Ads, &id).await.unwrap().is_none());
        assert!(matches!(
            store.delete(Resource::Ads, &id).await,
            Err(StoreError::NotFound { .. })
        ));
    }
}
