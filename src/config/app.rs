//! Process configuration from the environment.

use crate::error::ConfigError;

/// Fixed listen address for the HTTP server.
pub const LISTEN_ADDR: &str = "127.0.0.1:5555";

/// Local file-backed store, created on first start.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://app.db";

pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

pub const DEFAULT_LOG_FILTER: &str = "pizza_restaurants=info,tower_http=info";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// From `DB_URI`.
    pub database_url: String,
    /// From `DB_MAX_CONNECTIONS`.
    pub max_connections: u32,
}

impl AppConfig {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DB_URI")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.into());
        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::InvalidValue {
                    key: "DB_MAX_CONNECTIONS",
                    value: raw,
                })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        Ok(AppConfig {
            database_url,
            max_connections,
        })
    }
}
