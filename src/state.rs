// src/state.rs
// Shared handles injected into every request handler

use sqlx::SqlitePool;
use std::sync::Arc;

use crate::{
    auth::{AuthGate, UserStore},
    config::PortalConfig,
    contact::{ContactDesk, ContactSink, SqliteContactSink},
    session::{InMemorySessionStore, SessionStore},
};

#[derive(Clone)]
pub struct AppState {
    // -------- Storage --------
    pub pool: SqlitePool,
    pub users: UserStore,
    pub sessions: Arc<dyn SessionStore>,

    // -------- Services --------
    pub gate: Arc<AuthGate>,
    pub contact_desk: Arc<ContactDesk>,

    pub config: Arc<PortalConfig>,
}

impl AppState {
    /// Wire the default stores: in-memory sessions, SQLite users and messages.
    pub fn new(pool: SqlitePool, config: PortalConfig) -> Self {
        let sessions: Arc<dyn SessionStore> =
            Arc::new(InMemorySessionStore::new(config.session_ttl()));
        let sink: Arc<dyn ContactSink> = Arc::new(SqliteContactSink::new(pool.clone()));
        Self::with_stores(pool, config, sessions, sink)
    }

    pub fn with_stores(
        pool: SqlitePool,
        config: PortalConfig,
        sessions: Arc<dyn SessionStore>,
        sink: Arc<dyn ContactSink>,
    ) -> Self {
        let users = UserStore::new(pool.clone(), config.bcrypt_cost);
        let gate = Arc::new(AuthGate::new(users.clone(), sessions.clone()));
        let contact_desk = Arc::new(ContactDesk::new(gate.clone(), sink));

        Self {
            pool,
            users,
            sessions,
            gate,
            contact_desk,
            config: Arc::new(config),
        }
    }
}
