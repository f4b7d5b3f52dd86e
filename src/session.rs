//! Signed-in user records, keyed by session id.
//!
//! A session is opened at login and closed at logout. The bearer token only
//! names the session; the user record itself stays here.

use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{RecordId, User, UserView};

#[derive(Debug, Clone)]
pub struct Session {
    pub user: UserView,
    pub expires_at: DateTime<Utc>,
}

#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl SessionStore {
    pub async fn open(&self, user: &User, ttl: Duration) -> (Uuid, Session) {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let session = Session {
            user: UserView::from(user),
            expires_at: now + ttl,
        };
        let mut sessions = self.inner.write().await;
        sessions.retain(|_, s| s.expires_at > now);
        sessions.insert(id, session.clone());
        (id, session)
    }

    /// Live session for `id`. Expired sessions are dropped on lookup.
    pub async fn get(&self, id: &Uuid) -> Option<Session> {
        let session = self.inner.read().await.get(id).cloned()?;
        if session.expires_at <= Utc::now() {
            self.inner.write().await.remove(id);
            return None;
        }
        Some(session)
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn close(&self, id: &Uuid) -> bool {
        self.inner.write().await.remove(id).is_some()
    }

    /// Closes every session of `user_id`, returning how many were open.
    pub async fn revoke_user(&self, user_id: &RecordId) -> usize {
        let mut sessions = self.inner.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| &s.user.id != user_id);
        before - sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn user(id: &str) -> User {
        User {
            id: RecordId::new(id),
            username: "sam".into(),
            email: format!("{id}@example.com"),
            password: String::new(),
            role: Role::User,
            active: true,
            wishlist: vec![],
            orders: vec![],
        }
    }

    #[tokio::test]
    async fn open_close_and_revoke() {
        let store = SessionStore::default();
        let (a, _) = store.open(&user("u1"), Duration::hours(1)).await;
        let (b, _) = store.open(&user("u1"), Duration::hours(1)).await;
        let (c, _) = store.open(&user("u2"), Duration::hours(1)).await;

        assert!(store.get(&a).await.is_some());
        assert!(store.close(&a).await);
        assert!(store.get(&a).await.is_none());

        assert_eq!(store.revoke_user(&RecordId::new("u1")).await, 1);
        assert!(store.get(&b).await.is_none());
        assert!(store.get(&c).await.is_some());
    }

    #[tokio::test]
    async fn expired_sessions_are_gone() {
        let store = SessionStore::default();
        let (id, _) = store.open(&user("u1"), Duration::seconds(-1)).await;
        assert!(store.get(&id).await.is_none());
    }

    #[tokio::test]
    async fn opening_a_session_sweeps_stale_ones() {
        let store = SessionStore::default();
        store.open(&user("u1"), Duration::seconds(-1)).await;
        store.open(&user("u2"), Duration::seconds(-1)).await;
        assert_eq!(store.len().await, 2);

        store.open(&user("u3"), Duration::hours(1)).await;
        assert_eq!(store.len().await, 1);
    }
}
