// src/api/mod.rs
// HTTP surface: routing table, handlers, pages and cookies

pub mod cookies;
pub mod error;
pub mod http;
pub mod pages;

pub use error::{ApiError, ApiResult};

use axum::{
    Router,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(http::auth::index))
        .route("/login", get(http::auth::login_form).post(http::auth::login))
        .route("/logout", get(http::auth::logout))
        .route(
            "/contact",
            get(http::contact::contact_form).post(http::contact::submit_contact),
        )
        .route("/health", get(http::health_check))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 302 Found pointing at `location`
pub fn found(location: &'static str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

async fn not_found() -> ApiError {
    ApiError::not_found("Page not found")
}
