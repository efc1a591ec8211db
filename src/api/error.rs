// src/api/error.rs
// Centralized error handling for HTTP responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;
use tracing::error;

use super::pages;
use crate::auth::AuthError;
use crate::contact::ContactError;

/// Error rendered to the browser as an HTML page
#[derive(Debug)]
pub struct ApiError {
    pub message: String,
    pub status_code: StatusCode,
}

impl ApiError {
    /// Create a new internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Create a new not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: StatusCode::NOT_FOUND,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code, pages::error_page(self.status_code, &self.message)).into_response()
    }
}

// Infrastructure faults are logged in full but shown to the user generically.
impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        error!("Authentication backend failure: {}", err);
        ApiError::internal("Something went wrong while signing you in.")
    }
}

impl From<ContactError> for ApiError {
    fn from(err: ContactError) -> Self {
        error!("Contact submission failure: {}", err);
        ApiError::internal("Your message could not be saved. Please try again.")
    }
}

/// Result type alias for handlers
pub type ApiResult<T> = Result<T, ApiError>;
