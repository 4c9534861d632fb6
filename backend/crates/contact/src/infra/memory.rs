//! In-memory session store
//!
//! Sessions live in a `HashMap` behind a `RwLock` and vanish when the
//! process exits, which is all the contact form needs: rate counters and
//! CSRF tokens are only meaningful for the lifetime of a browser session.

use kernel::id::SessionId;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::repository::SessionStore;
use crate::domain::session::ContactSession;
use crate::error::ContactResult;

/// Thread-safe, clonable in-memory session store
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, ContactSession>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live sessions
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

impl SessionStore for InMemorySessionStore {
    async fn get(&self, id: SessionId) -> ContactResult<Option<ContactSession>> {
        Ok(self.sessions.read().await.get(&id).cloned())
    }

    async fn set(&self, id: SessionId, session: ContactSession) -> ContactResult<()> {
        self.sessions.write().await.insert(id, session);
        Ok(())
    }

    async fn remove(&self, id: SessionId) -> ContactResult<()> {
        self.sessions.write().await.remove(&id);
        Ok(())
    }

    async fn sweep_idle(&self, idle_before_secs: i64) -> ContactResult<usize> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| session.last_seen_secs >= idle_before_secs);
        Ok(before - sessions.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove() {
        let store = InMemorySessionStore::new();
        let id = SessionId::new();

        assert!(store.get(id).await.unwrap().is_none());

        let mut session = ContactSession::new(10);
        session.ensure_csrf_token();
        store.set(id, session.clone()).await.unwrap();

        let loaded = store.get(id).await.unwrap().unwrap();
        assert_eq!(loaded.csrf_token, session.csrf_token);

        store.remove(id).await.unwrap();
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let store = InMemorySessionStore::new();
        let id = SessionId::new();

        store.set(id, ContactSession::new(1)).await.unwrap();
        store.set(id, ContactSession::new(2)).await.unwrap();

        assert_eq!(store.get(id).await.unwrap().unwrap().last_seen_secs, 2);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_sweep_idle() {
        let store = InMemorySessionStore::new();
        let stale = SessionId::new();
        let fresh = SessionId::new();

        store.set(stale, ContactSession::new(100)).await.unwrap();
        store.set(fresh, ContactSession::new(500)).await.unwrap();

        assert_eq!(store.sweep_idle(300).await.unwrap(), 1);
        assert!(store.get(stale).await.unwrap().is_none());
        assert!(store.get(fresh).await.unwrap().is_some());
    }
}
