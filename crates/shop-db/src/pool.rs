//! # Database Handle
//!
//! Opens the storefront database, applies the embedded schema and hands out
//! repositories.
//!
//! A file database is opened in WAL mode with foreign keys on, so an order
//! can never point at a missing user. The in-memory variant exists for tests
//! and is pinned to one connection: every SQLite `:memory:` connection is a
//! separate database.
//!
//! Schema files live in `migrations/sqlite/` and are compiled into the
//! binary. Add a new numbered file for every change; applied files must not
//! be edited.

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use crate::error::{DbError, DbResult};
use crate::repository::order::OrderRepository;
use crate::repository::user::UserRepository;

static SCHEMA: Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Where the data lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Storage {
    File(PathBuf),
    Memory,
}

/// Connection settings for [`Database::new`].
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub storage: Storage,
    /// Upper bound on pooled connections. Ignored for [`Storage::Memory`].
    pub max_connections: u32,
    /// How long a request waits for a free connection before
    /// [`DbError::PoolExhausted`].
    pub acquire_timeout: Duration,
}

impl DbConfig {
    /// File-backed database at `path`, created on first use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            storage: Storage::File(path.into()),
            max_connections: 5,
            acquire_timeout: Duration::from_secs(30),
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Private throwaway database for tests and demos.
    pub fn in_memory() -> Self {
        DbConfig {
            storage: Storage::Memory,
            max_connections: 1,
            acquire_timeout: Duration::from_secs(5),
        }
    }

    fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        let options = match &self.storage {
            Storage::File(path) => SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal),
            Storage::Memory => SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?,
        };
        Ok(options.foreign_keys(true))
    }

    fn pool_size(&self) -> u32 {
        match self.storage {
            Storage::File(_) => self.max_connections,
            Storage::Memory => 1,
        }
    }
}

/// Shared handle to the users and orders tables. Clones share one pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connects and brings the schema up to date.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(config.pool_size())
            .acquire_timeout(config.acquire_timeout)
            .connect_with(config.connect_options()?)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        SCHEMA.run(&pool).await?;

        match &config.storage {
            Storage::File(path) => info!(
                path = %path.display(),
                max_connections = config.max_connections,
                "Shop database ready"
            ),
            Storage::Memory => info!("In-memory shop database ready"),
        }

        Ok(Database { pool })
    }

    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.pool.clone())
    }

    pub fn orders(&self) -> OrderRepository {
        OrderRepository::new(self.pool.clone())
    }

    /// `true` while the database answers a trivial query. Backs `/ready`.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }

    /// Drains the pool on shutdown. Later queries fail with
    /// [`DbError::ConnectionFailed`].
    pub async fn close(&self) {
        info!("Closing shop database");
        self.pool.close().await;
    }
}
