//! # Money Module
//!
//! Display-side money handling.
//!
//! Pricing and tiering work on unrounded `f64` and store results as they
//! come. Rounding to cents happens only here, when an amount is shown to a
//! person (discount quote summaries, the seed report).
//!
//! ## Usage
//! ```rust
//! use shop_core::money::Money;
//!
//! let total = Money::from_amount(678.999_999_999_9);
//! assert_eq!(total.cents(), 67900);
//! assert_eq!(total.to_string(), "€679.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// A monetary value rounded to whole cents, for display and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Rounds an unrounded amount to the nearest cent (half away from zero).
    ///
    /// Non-finite input maps to zero; rule results are always finite, so
    /// this only guards presentation of corrupt stored values.
    ///
    /// ## Example
    /// ```rust
    /// use shop_core::money::Money;
    ///
    /// assert_eq!(Money::from_amount(10.005).cents(), 1001);
    /// assert_eq!(Money::from_amount(-5.5).cents(), -550);
    /// ```
    pub fn from_amount(amount: f64) -> Self {
        if !amount.is_finite() {
            return Money(0);
        }
        // scale before rounding; 10.005 * 100 = 1000.4999.. so nudge by a
        // tolerance far below a cent
        let scaled = amount * 100.0;
        let nudged = scaled + scaled.signum() * 1e-7;
        Money(nudged.round() as i64)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    #[inline]
    const fn euros(&self) -> i64 {
        self.0 / 100
    }

    /// Always 0-99.
    #[inline]
    const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }
}

/// Euro formatting with two decimals, e.g. `€1425.00` or `-€5.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}€{}.{:02}", sign, self.euros().abs(), self.cents_part())
    }
}
