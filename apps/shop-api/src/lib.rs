//! # Shop API
//!
//! REST server for customers and orders over the storefront rule engine.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Shop API Layers                                 │
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────────┐│
//! │  │  routes        │  │  handlers      │  │  services                  ││
//! │  │                │  │                │  │                            ││
//! │  │ • /api/users   │─►│ • extract      │─►│ • UserService  (trait)     ││
//! │  │ • /api/orders  │  │ • call service │  │ • OrderService (trait)     ││
//! │  │ • /health      │  │ • JSON reply   │  │ • Sqlite* implementations  ││
//! │  └────────────────┘  └────────────────┘  └─────────────┬──────────────┘│
//! │                                                        │               │
//! │  ┌─────────────────────────────────────────────────────▼────────────┐  │
//! │  │  shop-core (pricing, tiering, validation)  shop-db (SQLite)      │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `HTTP_PORT` - listen port (default: 8080)
//! - `BIND_ADDRESS` - listen interface (default: 0.0.0.0)
//! - `DATABASE_PATH` - SQLite file (default: ./shop.db)
//! - `DB_MAX_CONNECTIONS` - pool size (default: 5)
//! - `ADMIN_API_KEY` - bearer key for admin routes (unset: admin routes refuse everyone)
//! - `EXPOSE_ERROR_DETAILS` - include internal error details in responses (default: false)
//! - `LOG_LEVEL` - tracing filter when `RUST_LOG` is unset (default: info)

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;
pub mod services;
pub mod state;

// Re-exports
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
