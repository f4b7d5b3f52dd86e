use std::{collections::HashMap, time::Duration};

use axum::{
    Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    routing::get,
};
use serde_json::{Value, json};
use storefront_api::{
    clients::products,
    models::{Product, RecordId},
    store::{HttpBackend, Resource, Store, StoreError},
};

fn catalog() -> Vec<Value> {
    vec![
        json!({ "id": 1, "name": "Oud Royale", "origin": "India", "price": 2500, "stock": 5 }),
        json!({ "id": "2", "name": "Vanilla Dusk", "origin": "France", "price": 4600, "stock": 8 }),
    ]
}

async fn list_products(Query(filter): Query<HashMap<String, String>>) -> Json<Value> {
    let items: Vec<Value> = catalog()
        .into_iter()
        .filter(|p| {
            filter
                .iter()
                .all(|(k, v)| p.get(k).and_then(Value::as_str) == Some(v.as_str()))
        })
        .collect();
    Json(Value::Array(items))
}

async fn get_product(Path(id): Path<String>) -> Result<Json<Value>, StatusCode> {
    match id.as_str() {
        "1" => Ok(Json(catalog().remove(0))),
        _ => Err(StatusCode::NOT_FOUND),
    }
}

async fn patch_product(
    Path(id): Path<String>,
    Json(changes): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    if id != "1" {
        return Err(StatusCode::NOT_FOUND);
    }
    let mut record = catalog().remove(0);
    if let (Some(target), Some(changes)) = (record.as_object_mut(), changes.as_object()) {
        for (k, v) in changes {
            target.insert(k.clone(), v.clone());
        }
    }
    Ok(Json(record))
}

async fn broken() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "boom")
}

async fn fake_store() -> String {
    let app = Router::new()
        .route("/products", get(list_products))
        .route("/products/{id}", get(get_product).patch(patch_product))
        .route("/ads", get(broken));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    format!("http://{addr}/")
}

#[tokio::test]
async fn http_backend_speaks_rest() -> anyhow::Result<()> {
    let base = fake_store().await;
    let store = Store::new(HttpBackend::new(base, Duration::from_secs(5))?);

    let all = products::list(&store).await?;
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, RecordId::new("1"));

    let french: Vec<Product> = store
        .list(Resource::Products, &[("origin", "France".to_string())])
        .await?;
    assert_eq!(french.len(), 1);
    assert_eq!(french[0].name, "Vanilla Dusk");

    assert!(products::get(&store, &RecordId::new("1")).await?.is_some());
    assert!(products::get(&store, &RecordId::new("9")).await?.is_none());

    let updated = products::update_stock(&store, &RecordId::new("1"), 2).await?;
    assert_eq!(updated.stock, 2);

    let missing = products::update_stock(&store, &RecordId::new("9"), 2).await;
    assert!(matches!(missing, Err(StoreError::NotFound { .. })));

    let failed: Result<Vec<Value>, _> = store.list(Resource::Ads, &[]).await;
    assert!(matches!(failed, Err(StoreError::Status { status: 500, .. })));
    Ok(())
}
