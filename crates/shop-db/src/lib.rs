//! # shop-db: Database Layer for the Storefront
//!
//! Users and orders persisted in SQLite through sqlx.
//!
//! Repositories return domain types from `shop-core` directly; pricing and
//! tiering decisions are made by the caller before anything is written. The
//! one rule enforced here is that an order's status only changes if it still
//! holds the status the caller checked (see
//! [`OrderRepository::update_status`]).
//!
//! ## Module Organization
//!
//! - [`pool`] - Database handle, connection settings and embedded schema
//! - [`error`] - Database error types
//! - [`repository`] - User and order repositories
//! - [`credentials`] - Argon2 password hashing
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shop_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./shop.db")).await?;
//!
//! let user = db.users().get_by_id(&user_id).await?;
//! let orders = db.orders().list_by_user(&user.id).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod credentials;
pub mod error;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig, Storage};

// Repository re-exports for convenience
pub use repository::order::{NewOrder, OrderRepository};
pub use repository::user::{NewUser, UserRepository};
