// src/lib.rs

pub mod api;
pub mod auth;
pub mod config;
pub mod contact;
pub mod db;
pub mod server;
pub mod session;
pub mod state;

// Export commonly used items
pub use api::create_router;
pub use config::PortalConfig;
pub use state::AppState;
