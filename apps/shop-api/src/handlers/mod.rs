//! HTTP handlers.
//!
//! Thin adapters: extract, call a service, wrap the result in JSON.
//! Business decisions live in the services and in shop-core.

pub mod health;
pub mod orders;
pub mod users;
