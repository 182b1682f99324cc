//! Application state shared across handlers.

use std::sync::Arc;

use shop_db::Database;

use crate::config::ApiConfig;
use crate::services::{OrderService, SqliteOrderService, SqliteUserService, UserService};

/// Shared application state.
///
/// Handlers see services only through their traits.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserService>,
    pub orders: Arc<dyn OrderService>,
    /// Kept for readiness checks.
    pub db: Database,
    pub config: Arc<ApiConfig>,
}

impl AppState {
    /// Wires the SQLite-backed services over one database handle.
    pub fn new(db: Database, config: ApiConfig) -> Self {
        AppState {
            users: Arc::new(SqliteUserService::new(db.clone())),
            orders: Arc::new(SqliteOrderService::new(db.clone())),
            db,
            config: Arc::new(config),
        }
    }
}
