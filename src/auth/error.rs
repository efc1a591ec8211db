// src/auth/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    /// Unknown username or wrong password; callers cannot tell which.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("username already exists: {0}")]
    UsernameTaken(String),

    #[error("username and password must not be empty")]
    EmptyCredentials,

    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("password worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

impl AuthError {
    /// True for failures the user caused, as opposed to infrastructure faults
    pub fn is_credential_failure(&self) -> bool {
        matches!(self, AuthError::InvalidCredentials)
    }
}
