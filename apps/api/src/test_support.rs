use sqlx::SqlitePool;
use tempfile::TempDir;

use crate::config::Config;
use crate::db::{create_pool, init_schema};
use crate::state::AppState;

/// A migrated SQLite file living in a temporary directory.
/// The directory is removed when this is dropped.
pub struct TestDb {
    pub pool: SqlitePool,
    pub config: Config,
    _dir: TempDir,
}

pub async fn test_db() -> TestDb {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        database_url: format!("sqlite://{}", dir.path().join("jobs.db").display()),
        ..Config::default()
    };
    let pool = create_pool(&config).await.unwrap();
    init_schema(&pool).await.unwrap();
    TestDb {
        pool,
        config,
        _dir: dir,
    }
}

impl TestDb {
    pub fn state(&self) -> AppState {
        AppState {
            db: self.pool.clone(),
            config: self.config.clone(),
        }
    }
}
