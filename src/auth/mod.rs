// src/auth/mod.rs
// Credential checks and the session gate in front of protected pages

pub mod error;
pub mod gate;
pub mod password;
pub mod users;

pub use error::AuthError;
pub use gate::{AuthGate, Authorization};
pub use password::{hash_password, spawn_hash_password, spawn_verify_password, verify_password};
pub use users::{User, UserStore};

use serde::Deserialize;

/// Form body posted to `/login`. Missing fields deserialize as empty strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}
