// src/session/memory_store.rs

use async_trait::async_trait;
use chrono::Duration;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{Session, SessionStore};

/// Process-local session store. Sessions do not survive a restart.
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, Session>>,
    ttl: Duration,
}

impl InMemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    #[cfg(test)]
    async fn insert(&self, session: Session) {
        self.sessions
            .write()
            .await
            .insert(session.token.clone(), session);
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, username: &str) -> Session {
        let session = Session::new(username, self.ttl);
        self.sessions
            .write()
            .await
            .insert(session.token.clone(), session.clone());
        session
    }

    async fn get(&self, token: &str) -> Option<Session> {
        let session = self.sessions.read().await.get(token).cloned()?;
        if session.is_expired() {
            self.sessions.write().await.remove(token);
            return None;
        }
        Some(session)
    }

    async fn invalidate(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }

    async fn purge_expired(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired());
        before - sessions.len()
    }
}
