use std::str::FromStr;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every value has a default; only malformed numbers fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    /// Upper bound applied to the `limit` query parameter when listing.
    pub max_page_size: u32,
    pub max_body_bytes: usize,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_url: "sqlite://jobs.db".to_string(),
            db_max_connections: 5,
            max_page_size: 100,
            max_body_bytes: 64 * 1024,
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            database_url: std::env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            db_max_connections: parse_env("DB_MAX_CONNECTIONS", defaults.db_max_connections)?,
            max_page_size: parse_env("MAX_PAGE_SIZE", defaults.max_page_size)?,
            max_body_bytes: parse_env("MAX_BODY_BYTES", defaults.max_body_bytes)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
        })
    }
}

fn parse_env<T: FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}
