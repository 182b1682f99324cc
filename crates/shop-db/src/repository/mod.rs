//! # Repository Module
//!
//! Database repository implementations for the storefront.
//!
//! Each repository wraps a clone of the pool and speaks parameterized SQL
//! only (`.bind`). Column lists live in one constant per table so every
//! `SELECT` decodes into the same `shop-core` type.
//!
//! ## Available Repositories
//!
//! - [`UserRepository`](user::UserRepository) - Users, search, order history
//! - [`OrderRepository`](order::OrderRepository) - Orders, status changes, statistics

pub mod order;
pub mod user;

/// Escapes `%`, `_` and the escape character itself for a `LIKE ... ESCAPE '\'` clause.
pub(crate) fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
