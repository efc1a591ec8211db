// src/config/mod.rs
// Runtime configuration, loaded from .env and the process environment

use chrono::TimeDelta;
use serde::Deserialize;
use std::str::FromStr;

/// Longest session lifetime accepted from configuration (ten years)
pub const MAX_SESSION_TTL_SECS: i64 = 10 * 365 * 24 * 60 * 60;

#[derive(Debug, Clone, Deserialize)]
pub struct PortalConfig {
    // ── Server Configuration
    pub host: String,
    pub port: u16,

    // ── Database Configuration
    pub database_url: String,
    pub sqlite_max_connections: u32,

    // ── Session Configuration
    pub session_ttl_secs: i64,
    pub session_sweep_interval_secs: u64,
    pub secure_cookies: bool,

    // ── Password Hashing
    pub bcrypt_cost: u32,

    // ── Logging Configuration
    pub log_level: String,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            database_url: "sqlite:./portal.db?mode=rwc".to_string(),
            sqlite_max_connections: 5,
            session_ttl_secs: 86_400,
            session_sweep_interval_secs: 600,
            secure_cookies: false,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            log_level: "info".to_string(),
        }
    }
}

// Values may carry trailing comments and whitespace, e.g. `PORTAL_PORT=8080 # dev`.
fn env_var_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    match std::env::var(key) {
        Ok(val) => {
            let clean_val = val.split('#').next().unwrap_or("").trim();
            match clean_val.parse::<T>() {
                Ok(parsed) => parsed,
                Err(_) => {
                    eprintln!("Config: {} = '{}' (parse failed, using default)", key, val);
                    default
                }
            }
        }
        Err(_) => default,
    }
}

impl PortalConfig {
    pub fn from_env() -> Self {
        if dotenvy::dotenv().is_err() {
            eprintln!("Warning: .env file not found. Using environment variables and defaults.");
        }

        let defaults = Self::default();
        Self {
            host: env_var_or("PORTAL_HOST", defaults.host),
            port: env_var_or("PORTAL_PORT", defaults.port),
            database_url: env_var_or("DATABASE_URL", defaults.database_url),
            sqlite_max_connections: env_var_or(
                "SQLITE_MAX_CONNECTIONS",
                defaults.sqlite_max_connections,
            ),
            session_ttl_secs: env_var_or("PORTAL_SESSION_TTL", defaults.session_ttl_secs),
            session_sweep_interval_secs: env_var_or(
                "PORTAL_SESSION_SWEEP_INTERVAL",
                defaults.session_sweep_interval_secs,
            ),
            secure_cookies: env_var_or("PORTAL_SECURE_COOKIES", defaults.secure_cookies),
            bcrypt_cost: env_var_or("PORTAL_BCRYPT_COST", defaults.bcrypt_cost),
            log_level: env_var_or("PORTAL_LOG_LEVEL", defaults.log_level),
        }
        .sanitized()
    }

    /// Clamp values that would otherwise panic chrono or tokio at runtime.
    pub fn sanitized(mut self) -> Self {
        let ttl = self.session_ttl_secs.clamp(1, MAX_SESSION_TTL_SECS);
        if ttl != self.session_ttl_secs {
            eprintln!(
                "Config: PORTAL_SESSION_TTL = {} out of range, using {}",
                self.session_ttl_secs, ttl
            );
            self.session_ttl_secs = ttl;
        }
        if self.session_sweep_interval_secs == 0 {
            eprintln!("Config: PORTAL_SESSION_SWEEP_INTERVAL = 0 not allowed, using 1");
            self.session_sweep_interval_secs = 1;
        }
        self
    }

    /// Get server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Session lifetime as a chrono duration
    pub fn session_ttl(&self) -> TimeDelta {
        TimeDelta::try_seconds(self.session_ttl_secs.clamp(1, MAX_SESSION_TTL_SECS))
            .unwrap_or(TimeDelta::MAX)
    }

    /// Tracing level, falling back to INFO on unknown names
    pub fn tracing_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }
}
