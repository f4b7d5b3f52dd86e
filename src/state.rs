use crate::{session::SessionStore, store::Store};

/// Signing material and lifetime for session tokens.
#[derive(Clone)]
pub struct AuthSettings {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub sessions: SessionStore,
    pub auth: AuthSettings,
}

impl AppState {
    pub fn new(store: Store, auth: AuthSettings) -> Self {
        Self {
            store,
            sessions: SessionStore::default(),
            auth,
        }
    }
}
