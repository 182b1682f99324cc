//! # Tiering Module
//!
//! Loyalty classification and premium-program eligibility.
//!
//! ## Tier Bands
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  completed orders:  0 │ 1 ─ 4  │ 5 ─ 9  │ 10 ─ 19 │ 20 ─ ∞             │
//! │  tier:            New │ Bronze │ Silver │  Gold   │ Platinum           │
//! │                                                                         │
//! │  Each threshold (5, 10, 20) promotes to the next band on equality.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Premium Eligibility
//! Both conditions are required:
//! - at least 10 completed orders, AND
//! - at least 1000.00 cumulative spend.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Thresholds
// =============================================================================

/// Order count at which Bronze ends and Silver starts.
pub const BRONZE_THRESHOLD: u32 = 5;

/// Order count at which Silver ends and Gold starts.
pub const SILVER_THRESHOLD: u32 = 10;

/// Order count at which Gold ends and Platinum starts.
pub const GOLD_THRESHOLD: u32 = 20;

/// Minimum completed orders for the premium program.
pub const PREMIUM_ELIGIBILITY_ORDERS: i64 = 10;

/// Minimum cumulative spend for the premium program.
pub const PREMIUM_ELIGIBILITY_AMOUNT: f64 = 1000.0;

// =============================================================================
// Tier Category
// =============================================================================

/// Loyalty classification derived from historical order count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TierCategory {
    New,
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl TierCategory {
    /// Display name, as shown to customers.
    pub const fn as_str(&self) -> &'static str {
        match self {
            TierCategory::New => "New",
            TierCategory::Bronze => "Bronze",
            TierCategory::Silver => "Silver",
            TierCategory::Gold => "Gold",
            TierCategory::Platinum => "Platinum",
        }
    }
}

impl fmt::Display for TierCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Classifies a customer by completed order count.
///
/// ## Example
/// ```rust
/// use shop_core::tiering::{classify, TierCategory};
///
/// assert_eq!(classify(0), TierCategory::New);
/// assert_eq!(classify(5), TierCategory::Silver);
/// assert_eq!(classify(20), TierCategory::Platinum);
/// ```
pub const fn classify(completed_order_count: u32) -> TierCategory {
    if completed_order_count == 0 {
        TierCategory::New
    } else if completed_order_count < BRONZE_THRESHOLD {
        TierCategory::Bronze
    } else if completed_order_count < SILVER_THRESHOLD {
        TierCategory::Silver
    } else if completed_order_count < GOLD_THRESHOLD {
        TierCategory::Gold
    } else {
        TierCategory::Platinum
    }
}

// =============================================================================
// Premium Eligibility
// =============================================================================

/// Decides whether a customer qualifies for the premium program.
///
/// ## Errors
/// `CoreError::InvalidArgument` only if `completed_order_count` is negative.
/// Any spend that fails the threshold, NaN and negatives included, is an
/// ordinary `Ok(false)`.
///
/// ## Example
/// ```rust
/// use shop_core::tiering::is_eligible_for_premium;
///
/// assert!(is_eligible_for_premium(10, 1000.0).unwrap());
/// assert!(!is_eligible_for_premium(9, 5000.0).unwrap());
/// assert!(!is_eligible_for_premium(10, 999.99).unwrap());
/// ```
pub fn is_eligible_for_premium(completed_order_count: i64, cumulative_spend: f64) -> CoreResult<bool> {
    if completed_order_count < 0 {
        return Err(CoreError::invalid_argument(
            "completed_order_count",
            format!("must not be negative, got {}", completed_order_count),
        ));
    }

    Ok(completed_order_count >= PREMIUM_ELIGIBILITY_ORDERS
        && cumulative_spend >= PREMIUM_ELIGIBILITY_AMOUNT)
}

// =============================================================================
// Customer Standing
// =============================================================================

/// Tier and premium eligibility evaluated together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerStanding {
    pub completed_orders: u32,
    pub cumulative_spend: f64,
    pub tier: TierCategory,
    pub eligible_for_premium: bool,
}

impl CustomerStanding {
    /// Evaluates both rules for one customer's history.
    pub fn evaluate(completed_orders: u32, cumulative_spend: f64) -> CoreResult<Self> {
        let eligible_for_premium =
            is_eligible_for_premium(i64::from(completed_orders), cumulative_spend)?;

        Ok(CustomerStanding {
            completed_orders,
            cumulative_spend,
            tier: classify(completed_orders),
            eligible_for_premium,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify(0), TierCategory::New);
        assert_eq!(classify(1), TierCategory::Bronze);
        assert_eq!(classify(4), TierCategory::Bronze);
        assert_eq!(classify(5), TierCategory::Silver);
        assert_eq!(classify(9), TierCategory::Silver);
        assert_eq!(classify(10), TierCategory::Gold);
        assert_eq!(classify(19), TierCategory::Gold);
        assert_eq!(classify(20), TierCategory::Platinum);
        assert_eq!(classify(u32::MAX), TierCategory::Platinum);
    }

    #[test]
    fn test_tier_display() {
        assert_eq!(TierCategory::New.to_string(), "New");
        assert_eq!(TierCategory::Platinum.to_string(), "Platinum");
        assert_eq!(
            serde_json::to_string(&TierCategory::Gold).unwrap(),
            "\"Gold\""
        );
    }

    #[test]
    fn test_tiers_are_ordered() {
        assert!(TierCategory::New < TierCategory::Bronze);
        assert!(TierCategory::Gold < TierCategory::Platinum);
    }

    #[test]
    fn test_eligible_when_both_conditions_hold() {
        assert!(is_eligible_for_premium(10, 1000.0).unwrap());
        assert!(is_eligible_for_premium(25, 4000.0).unwrap());
    }

    #[test]
    fn test_order_count_alone_is_not_enough() {
        assert!(!is_eligible_for_premium(10, 999.99).unwrap());
        assert!(!is_eligible_for_premium(50, 0.0).unwrap());
    }

    #[test]
    fn test_spend_alone_is_not_enough() {
        assert!(!is_eligible_for_premium(9, 5000.0).unwrap());
        assert!(!is_eligible_for_premium(0, 1_000_000.0).unwrap());
    }

    #[test]
    fn test_eligibility_rejects_only_negative_count() {
        assert!(matches!(
            is_eligible_for_premium(-1, 2000.0),
            Err(CoreError::InvalidArgument { .. })
        ));
        assert!(!is_eligible_for_premium(10, -1.0).unwrap());
        assert!(!is_eligible_for_premium(10, f64::NAN).unwrap());
        assert!(!is_eligible_for_premium(0, 0.0).unwrap());
    }

    #[test]
    fn test_customer_standing() {
        let standing = CustomerStanding::evaluate(12, 1500.0).unwrap();
        assert_eq!(standing.tier, TierCategory::Gold);
        assert!(standing.eligible_for_premium);

        let standing = CustomerStanding::evaluate(3, 1500.0).unwrap();
        assert_eq!(standing.tier, TierCategory::Bronze);
        assert!(!standing.eligible_for_premium);
    }

    #[test]
    fn test_repeated_calls_agree() {
        assert_eq!(classify(7), classify(7));
        assert_eq!(
            is_eligible_for_premium(10, 1000.0).unwrap(),
            is_eligible_for_premium(10, 1000.0).unwrap()
        );
    }
}
