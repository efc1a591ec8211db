// src/auth/gate.rs
//
// The session auth gate. A client is either anonymous (no live session) or
// authenticated (exactly one session bound to one username):
//
//   Anonymous --authenticate ok--> Authenticated
//   Authenticated --logout--> Anonymous
//
// A failed authenticate leaves the client anonymous.

use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use super::password::{spawn_hash_password, spawn_verify_password};
use super::{AuthError, UserStore};
use crate::session::{Session, SessionStore};

/// Outcome of checking a request against the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authorization {
    Allowed(Session),
    RedirectToLogin,
}

impl Authorization {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Authorization::Allowed(_))
    }
}

pub struct AuthGate {
    users: UserStore,
    sessions: Arc<dyn SessionStore>,
    // Verified against for unknown usernames so both rejections cost one bcrypt run
    dummy_hash: OnceCell<String>,
}

impl AuthGate {
    pub fn new(users: UserStore, sessions: Arc<dyn SessionStore>) -> Self {
        Self {
            users,
            sessions,
            dummy_hash: OnceCell::new(),
        }
    }

    async fn dummy_hash(&self) -> Result<String, AuthError> {
        let cost = self.users.bcrypt_cost();
        let hash = self
            .dummy_hash
            .get_or_try_init(|| async move {
                spawn_hash_password(&uuid::Uuid::new_v4().to_string(), cost).await
            })
            .await?;
        Ok(hash.clone())
    }

    /// Verify credentials and open a session on success.
    ///
    /// Unknown usernames and wrong passwords both yield
    /// [`AuthError::InvalidCredentials`].
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        let Some(user) = self.users.find_by_username(username).await? else {
            let dummy = self.dummy_hash().await?;
            spawn_verify_password(password, dummy).await?;
            info!(username, "Login rejected");
            return Err(AuthError::InvalidCredentials);
        };

        if !spawn_verify_password(password, user.password_hash.clone()).await? {
            info!(username, "Login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let session = self.sessions.create(&user.username).await;
        info!(username = %user.username, "Login succeeded");
        Ok(session)
    }

    /// Resolve the client's session token, if any.
    pub async fn authorize(&self, token: Option<&str>) -> Authorization {
        let Some(token) = token else {
            return Authorization::RedirectToLogin;
        };

        match self.sessions.get(token).await {
            Some(session) => Authorization::Allowed(session),
            None => {
                debug!("Session token not recognised");
                Authorization::RedirectToLogin
            }
        }
    }

    /// Drop the client's session. Safe to call without one.
    pub async fn logout(&self, token: Option<&str>) {
        if let Some(token) = token {
            if self.sessions.invalidate(token).await {
                info!("Session closed");
            }
        }
    }
}
