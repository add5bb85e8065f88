use std::str::FromStr;

use anyhow::Result;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool};
use tracing::info;

use crate::config::Config;
use crate::errors::AppError;
use crate::state::AppState;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS jobs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    company TEXT NOT NULL,
    location TEXT NOT NULL,
    type TEXT NOT NULL,
    salary TEXT,
    tags TEXT,
    description TEXT,
    requirements TEXT,
    application_link TEXT,
    date_posted TEXT NOT NULL
)
"#;

/// Creates and returns a SQLite connection pool, creating the data file if missing.
pub async fn create_pool(config: &Config) -> Result<SqlitePool> {
    info!("Opening SQLite database {}", config.database_url);

    let options = SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect_with(options)
        .await?;

    info!("SQLite connection pool established");
    Ok(pool)
}

/// Creates the `jobs` table if it does not exist yet. Safe to run repeatedly.
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(SCHEMA).execute(pool).await?;
    Ok(())
}

/// A storage connection scoped to a single request.
///
/// Acquired from the pool when the handler's arguments are extracted and
/// handed back when the handler returns, whichever way it exits.
pub struct DbConn(pub PoolConnection<Sqlite>);

#[async_trait]
impl FromRequestParts<AppState> for DbConn {
    type Rejection = AppError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(DbConn(state.db.acquire().await?))
    }
}
