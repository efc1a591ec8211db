// src/api/http/mod.rs

pub mod auth;
pub mod contact;
pub mod health;

pub use health::health_check;
