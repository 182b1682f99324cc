//! # shop-core: Pure Business Rules for the Storefront
//!
//! Pricing and customer-tiering rules as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    shop-api (axum)                              │   │
//! │  │    /api/users ──► UserService      /api/orders ──► OrderService │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ shop-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  pricing  │  │  tiering  │  │   types   │  │ validation│  │   │
//! │  │   │ discounts │  │ New..Plat │  │ User      │  │  email    │  │   │
//! │  │   │ net total │  │ premium?  │  │ Order     │  │  card     │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    shop-db (SQLite)                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`pricing`] - Order totals and bulk discount tiers
//! - [`tiering`] - Loyalty tier and premium eligibility
//! - [`types`] - Domain types (User, Order, OrderStatus, statistics)
//! - [`money`] - Cent rounding and currency formatting for display
//! - [`error`] - Domain error types
//! - [`validation`] - Request input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, bit for bit
//! 2. **No I/O**: database, network, logging are FORBIDDEN here
//! 3. **Unrounded Amounts**: rules work in `f64`; only display rounds
//! 4. **Explicit Errors**: bad input is `CoreError::InvalidArgument`, never a panic
//!
//! ## Example Usage
//!
//! ```rust
//! use shop_core::pricing::compute_total;
//! use shop_core::tiering::{classify, is_eligible_for_premium, TierCategory};
//! use shop_core::money::Money;
//!
//! let priced = compute_total(100.0, 15, false).unwrap();
//! assert_eq!(Money::from_amount(priced.net_amount()).to_string(), "€1425.00");
//!
//! assert_eq!(classify(10), TierCategory::Gold);
//! assert!(!is_eligible_for_premium(10, 999.99).unwrap());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod pricing;
pub mod tiering;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::{compute_total, PricingResult};
pub use tiering::{classify, is_eligible_for_premium, CustomerStanding, TierCategory};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Orders whose total exceeds this are flagged for manual payment review.
pub const PAYMENT_LARGE_ORDER_THRESHOLD: f64 = 1000.0;
