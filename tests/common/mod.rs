#![allow(dead_code)]

use serde_json::{Value, json};
use storefront_api::{
    middleware::auth::AuthUser,
    models::{RecordId, Role},
    state::{AppState, AuthSettings},
    store::{MemoryBackend, Store},
};
use uuid::Uuid;

pub const SHOPPER: &str = "u-asha";
pub const BLOCKED: &str = "u-ravi";
pub const ADMIN: &str = "u-admin";

/// A small `db.json` style store: two shoppers (one blocked), one admin,
/// three products and one banner. Passwords are stored in plain text the
/// way older records were written.
pub fn snapshot() -> Value {
    json!({
        "users": [
            {
                "id": SHOPPER, "username": "asha", "email": "asha@zeyora.in",
                "password": "secret1", "role": "user", "active": true,
                "wishlist": [], "orders": []
            },
            {
                "id": BLOCKED, "username": "ravi", "email": "ravi@zeyora.in",
                "password": "secret2", "role": "user", "active": false,
                "wishlist": [], "orders": []
            },
            {
                "id": ADMIN, "username": "admin", "email": "admin@zeyora.in",
                "password": "admin123", "role": "admin", "active": true
            }
        ],
        "products": [
            { "id": 1, "name": "Oud Royale", "origin": "India", "price": 2500, "mrp": 3000, "stock": 5 },
            { "id": 2, "name": "Musk Al Tahara", "origin": "UAE", "price": 900, "mrp": 900, "stock": 2 },
            { "id": 3, "name": "Rose Taifi", "origin": "India", "price": 1800, "mrp": 2000, "stock": 0 }
        ],
        "cart": [],
        "issues": [],
        "ads": [ { "id": 1, "img": "/banners/festive.jpg" } ]
    })
}

pub fn auth_settings() -> AuthSettings {
    AuthSettings {
        jwt_secret: "test-secret".to_string(),
        token_ttl_hours: 1,
    }
}

pub fn state_with(store: Store) -> AppState {
    AppState::new(store, auth_settings())
}

pub fn memory_state() -> AppState {
    state_with(Store::new(MemoryBackend::from_snapshot(snapshot())))
}

pub fn shopper() -> AuthUser {
    AuthUser {
        user_id: RecordId::new(SHOPPER),
        role: Role::User,
        session_id: Uuid::new_v4(),
    }
}

pub fn admin() -> AuthUser {
    AuthUser {
        user_id: RecordId::new(ADMIN),
        role: Role::Admin,
        session_id: Uuid::new_v4(),
    }
}
