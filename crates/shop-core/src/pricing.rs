//! # Pricing Module
//!
//! Order total computation with bulk-quantity discount tiers.
//!
//! ## Discount Tiers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Discount Rate Selection                            │
//! │                                                                         │
//! │  gross = unit_price × quantity                                         │
//! │       │                                                                 │
//! │       ├── Standard customer                                            │
//! │       │     ├── quantity > 10          → 5%                            │
//! │       │     ├── quantity > 5           → 3%                            │
//! │       │     └── otherwise              → 0%                            │
//! │       │                                                                 │
//! │       └── Premium customer                                             │
//! │             ├── quantity ≤ 5           → 10%                           │
//! │             ├── gross > 100.00         → 15%                           │
//! │             └── otherwise              → 10%                           │
//! │                                                                         │
//! │  net = gross × (1 − rate)                                              │
//! │  First matching row wins.                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Precision
//! Amounts are `f64` and are never rounded here. Rounding to cents happens
//! only for display (see [`crate::money`]), so repeated computations don't
//! accumulate rounding error.
//!
//! ## Usage
//! ```rust
//! use shop_core::pricing::compute_total;
//!
//! let result = compute_total(100.0, 7, true).unwrap();
//! assert_eq!(result.discount_rate(), 0.15);
//! assert!((result.net_amount() - 595.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Thresholds and Rates
// =============================================================================

/// Quantities above this get the small bulk discount (standard customers).
/// Premium customers at or below it get the flat member discount.
pub const BULK_QUANTITY_SMALL: i64 = 5;

/// Quantities above this get the large bulk discount (standard customers).
pub const BULK_QUANTITY_LARGE: i64 = 10;

/// Gross amount above which premium bulk orders get the high discount.
pub const BULK_AMOUNT_THRESHOLD: f64 = 100.0;

/// Standard customer, quantity in (5, 10].
pub const BULK_DISCOUNT_SMALL: f64 = 0.03;

/// Standard customer, quantity > 10.
pub const BULK_DISCOUNT_LARGE: f64 = 0.05;

/// Premium customer, flat member rate.
pub const PREMIUM_DISCOUNT: f64 = 0.10;

/// Premium customer, bulk order with gross above the amount threshold.
pub const PREMIUM_BULK_HIGH_DISCOUNT: f64 = 0.15;

// =============================================================================
// Pricing Result
// =============================================================================

/// Outcome of a single pricing computation.
///
/// Fields are private: a result is only ever produced by [`compute_total`],
/// so `net_amount` always agrees with `gross_amount` and `discount_rate`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingResult {
    gross_amount: f64,
    discount_rate: f64,
    net_amount: f64,
}

impl PricingResult {
    /// Unit price × quantity, before discount.
    #[inline]
    pub fn gross_amount(&self) -> f64 {
        self.gross_amount
    }

    /// The tier-selected rate, in `[0, 1]`.
    #[inline]
    pub fn discount_rate(&self) -> f64 {
        self.discount_rate
    }

    /// Gross after discount.
    #[inline]
    pub fn net_amount(&self) -> f64 {
        self.net_amount
    }

    /// Amount taken off the gross.
    #[inline]
    pub fn discount_amount(&self) -> f64 {
        self.gross_amount - self.net_amount
    }
}

// =============================================================================
// Computation
// =============================================================================

/// Computes the order total for `quantity` units at `unit_price`.
///
/// ## Errors
/// `CoreError::InvalidArgument` when `quantity < 1`, `unit_price < 0`, or
/// `unit_price` is NaN/infinite.
///
/// ## Example
/// ```rust
/// use shop_core::pricing::compute_total;
///
/// // Standard customer, 15 units: 5% off 1500.00
/// let result = compute_total(100.0, 15, false).unwrap();
/// assert_eq!(result.gross_amount(), 1500.0);
/// assert_eq!(result.discount_rate(), 0.05);
///
/// assert!(compute_total(100.0, 0, false).is_err());
/// assert!(compute_total(-1.0, 1, false).is_err());
/// ```
pub fn compute_total(unit_price: f64, quantity: i64, is_premium: bool) -> CoreResult<PricingResult> {
    if quantity < 1 {
        return Err(CoreError::invalid_argument(
            "quantity",
            format!("must be at least 1, got {}", quantity),
        ));
    }
    check_amount("unit_price", unit_price)?;

    let gross_amount = unit_price * quantity as f64;
    let discount_rate = if is_premium {
        premium_rate(quantity, gross_amount)
    } else {
        standard_rate(quantity)
    };

    Ok(PricingResult {
        gross_amount,
        discount_rate,
        net_amount: gross_amount * (1.0 - discount_rate),
    })
}

fn standard_rate(quantity: i64) -> f64 {
    if quantity > BULK_QUANTITY_LARGE {
        BULK_DISCOUNT_LARGE
    } else if quantity > BULK_QUANTITY_SMALL {
        BULK_DISCOUNT_SMALL
    } else {
        0.0
    }
}

fn premium_rate(quantity: i64, gross_amount: f64) -> f64 {
    if quantity <= BULK_QUANTITY_SMALL {
        PREMIUM_DISCOUNT
    } else if gross_amount > BULK_AMOUNT_THRESHOLD {
        PREMIUM_BULK_HIGH_DISCOUNT
    } else {
        PREMIUM_DISCOUNT
    }
}

/// Price a premium member pays for an arbitrary amount.
///
/// Premium members get the flat member rate regardless of quantity;
/// everyone else pays `amount` unchanged. Used for discount quotes.
///
/// ## Example
/// ```rust
/// use shop_core::pricing::premium_member_price;
///
/// assert!((premium_member_price(100.0, true).unwrap() - 90.0).abs() < 1e-9);
/// assert_eq!(premium_member_price(100.0, false).unwrap(), 100.0);
/// ```
pub fn premium_member_price(amount: f64, is_premium: bool) -> CoreResult<f64> {
    check_amount("amount", amount)?;

    if is_premium {
        Ok(amount * (1.0 - PREMIUM_DISCOUNT))
    } else {
        Ok(amount)
    }
}

fn check_amount(field: &str, value: f64) -> CoreResult<()> {
    if !value.is_finite() {
        return Err(CoreError::invalid_argument(field, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(CoreError::invalid_argument(
            field,
            format!("must not be negative, got {}", value),
        ));
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_standard_small_orders_are_not_discounted() {
        for qty in 1..=5 {
            let result = compute_total(19.99, qty, false).unwrap();
            assert_eq!(result.discount_rate(), 0.0);
            assert_eq!(result.net_amount(), result.gross_amount());
        }
    }

    #[test]
    fn test_standard_small_bulk() {
        let result = compute_total(100.0, 7, false).unwrap();
        assert_eq!(result.gross_amount(), 700.0);
        assert_eq!(result.discount_rate(), 0.03);
        assert_close(result.net_amount(), 679.0);
    }

    #[test]
    fn test_standard_large_bulk() {
        let result = compute_total(100.0, 15, false).unwrap();
        assert_eq!(result.discount_rate(), 0.05);
        assert_close(result.net_amount(), 1425.0);
    }

    #[test]
    fn test_standard_boundaries() {
        // 10 is not > 10, so still the small bulk rate
        assert_eq!(compute_total(1.0, 10, false).unwrap().discount_rate(), 0.03);
        assert_eq!(compute_total(1.0, 11, false).unwrap().discount_rate(), 0.05);
        assert_eq!(compute_total(1.0, 6, false).unwrap().discount_rate(), 0.03);
    }

    #[test]
    fn test_premium_small_order() {
        let result = compute_total(100.0, 3, true).unwrap();
        assert_eq!(result.discount_rate(), 0.10);
        assert_close(result.net_amount(), 270.0);
    }

    #[test]
    fn test_premium_bulk_low_gross() {
        // gross 70 is not above 100
        let result = compute_total(10.0, 7, true).unwrap();
        assert_eq!(result.gross_amount(), 70.0);
        assert_eq!(result.discount_rate(), 0.10);
        assert_close(result.net_amount(), 63.0);
    }

    #[test]
    fn test_premium_bulk_high_gross() {
        let result = compute_total(100.0, 7, true).unwrap();
        assert_eq!(result.discount_rate(), 0.15);
        assert_close(result.net_amount(), 595.0);
    }

    #[test]
    fn test_premium_gross_exactly_at_threshold() {
        // threshold is strict: gross of exactly 100 stays at the member rate
        let result = compute_total(10.0, 10, true).unwrap();
        assert_eq!(result.gross_amount(), 100.0);
        assert_eq!(result.discount_rate(), 0.10);
    }

    #[test]
    fn test_premium_quantity_five_ignores_gross() {
        let result = compute_total(1000.0, 5, true).unwrap();
        assert_eq!(result.discount_rate(), 0.10);
    }

    #[test]
    fn test_free_items_are_allowed() {
        let result = compute_total(0.0, 3, true).unwrap();
        assert_eq!(result.gross_amount(), 0.0);
        assert_eq!(result.net_amount(), 0.0);
    }

    #[test]
    fn test_invalid_arguments() {
        for premium in [false, true] {
            assert!(matches!(
                compute_total(10.0, 0, premium),
                Err(CoreError::InvalidArgument { .. })
            ));
            assert!(matches!(
                compute_total(10.0, -3, premium),
                Err(CoreError::InvalidArgument { .. })
            ));
            assert!(matches!(
                compute_total(-1.0, 1, premium),
                Err(CoreError::InvalidArgument { .. })
            ));
            assert!(compute_total(f64::NAN, 1, premium).is_err());
            assert!(compute_total(f64::INFINITY, 1, premium).is_err());
            assert!(compute_total(f64::NEG_INFINITY, 1, premium).is_err());
        }
    }

    #[test]
    fn test_results_are_bit_identical_across_calls() {
        let a = compute_total(33.33, 7, true).unwrap();
        let b = compute_total(33.33, 7, true).unwrap();
        assert_eq!(a.net_amount().to_bits(), b.net_amount().to_bits());
        assert_eq!(a, b);
    }

    #[test]
    fn test_discount_amount() {
        let result = compute_total(100.0, 3, true).unwrap();
        assert_close(result.discount_amount(), 30.0);
    }

    #[test]
    fn test_premium_member_price() {
        assert_close(premium_member_price(100.0, true).unwrap(), 90.0);
        assert_close(premium_member_price(100.0, false).unwrap(), 100.0);
        assert!(premium_member_price(-5.0, true).is_err());
        assert!(premium_member_price(f64::NAN, false).is_err());
    }

    #[test]
    fn test_serializes_camel_case() {
        let result = compute_total(100.0, 3, false).unwrap();
        let json = serde_json::to_value(result).unwrap();
        assert_eq!(json["grossAmount"], 300.0);
        assert_eq!(json["discountRate"], 0.0);
        assert_eq!(json["netAmount"], 300.0);
    }
}
