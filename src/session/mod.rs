// src/session/mod.rs
// Server-side sessions keyed by an opaque client token

mod memory_store;

pub use memory_store::InMemorySessionStore;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::debug;
use uuid::Uuid;

/// An authenticated session. Anonymous clients have no session at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn new(username: impl Into<String>, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            token: generate_session_token(),
            username: username.into(),
            created_at: now,
            expires_at: now.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// Generates a new random session token (UUID v4)
pub fn generate_session_token() -> String {
    Uuid::new_v4().to_string()
}

/// Storage for live sessions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Create and store a session bound to `username`.
    async fn create(&self, username: &str) -> Session;

    /// Look up a live session. Expired sessions are never returned.
    async fn get(&self, token: &str) -> Option<Session>;

    /// Remove a session. Returns whether one was removed.
    async fn invalidate(&self, token: &str) -> bool;

    /// Drop every expired session, returning how many were removed.
    async fn purge_expired(&self) -> usize;
}

/// Shortest sweep period; `tokio::time::interval` panics on zero
const MIN_SWEEP_INTERVAL: std::time::Duration = std::time::Duration::from_secs(1);

/// Periodically sweep expired sessions out of the store
pub fn spawn_session_sweeper(
    store: Arc<dyn SessionStore>,
    interval: std::time::Duration,
) -> JoinHandle<()> {
    let interval = interval.max(MIN_SWEEP_INTERVAL);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // First tick completes immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let purged = store.purge_expired().await;
            if purged > 0 {
                debug!("Purged {} expired sessions", purged);
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_not_expired() {
        let session = Session::new("testuser", Duration::hours(1));
        assert!(!session.is_expired());
        assert_eq!(session.username, "testuser");
    }

    #[test]
    fn test_session_expired() {
        let mut session = Session::new("testuser", Duration::hours(1));
        session.expires_at = Utc::now() - Duration::seconds(1);
        assert!(session.is_expired());
    }

    #[test]
    fn test_huge_ttl_saturates_expiry() {
        let session = Session::new("testuser", Duration::MAX);
        assert_eq!(session.expires_at, DateTime::<Utc>::MAX_UTC);
        assert!(!session.is_expired());
    }

    #[tokio::test]
    async fn test_sweeper_survives_zero_interval() {
        let store: Arc<dyn SessionStore> =
            Arc::new(InMemorySessionStore::new(Duration::hours(1)));
        let handle = spawn_session_sweeper(store, std::time::Duration::ZERO);

        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        assert!(!handle.is_finished());

        handle.abort();
        let result = handle.await;
        assert!(result.unwrap_err().is_cancelled());
    }

    #[test]
    fn test_tokens_are_unique() {
        let a = Session::new("testuser", Duration::hours(1));
        let b = Session::new("testuser", Duration::hours(1));
        assert_ne!(a.token, b.token);
    }
}
