// src/auth/password.rs

use bcrypt::{hash, verify};
use tracing::warn;

use super::AuthError;

pub fn hash_password(password: &str, cost: u32) -> Result<String, AuthError> {
    Ok(hash(password, cost)?)
}

/// Check `password` against a stored bcrypt hash.
///
/// A stored hash that cannot be parsed counts as a mismatch.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match verify(password, hash) {
        Ok(matches) => matches,
        Err(e) => {
            warn!("Stored password hash could not be verified: {}", e);
            false
        }
    }
}

/// Hash on the blocking pool; bcrypt would otherwise stall a runtime worker.
pub async fn spawn_hash_password(password: &str, cost: u32) -> Result<String, AuthError> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || hash_password(&password, cost)).await?
}

/// Verify on the blocking pool.
pub async fn spawn_verify_password(password: &str, hash: String) -> Result<bool, AuthError> {
    let password = password.to_owned();
    Ok(tokio::task::spawn_blocking(move || verify_password(&password, &hash)).await?)
}
