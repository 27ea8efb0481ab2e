//! # Validation Module
//!
//! Shape checks for pricing policies.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Policy Trust Boundary                              │
//! │                                                                         │
//! │  Policy JSON file (user supplied)                                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  serde_json::from_str  ──► shape + types                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  validate_policy()     ──► THIS MODULE: tiers, signs                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  calculate_price()     ──► trusts the policy, never re-checks          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use delivery_core::types::*;
//! use delivery_core::validation::validate_policy;
//!
//! let mut policy = PricingPolicy {
//!     currency: Currency::Eur,
//!     base_fee_cents: 199,
//!     distance_tiers: vec![DistanceTier::new(1000, 0)],
//!     max_delivery_fee_cents: None,
//!     small_order: SmallOrderRule::default(),
//!     items: ItemRule::default(),
//! };
//! assert!(validate_policy(&policy).is_ok());
//!
//! policy.distance_tiers.clear();
//! assert!(validate_policy(&policy).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{DistanceTier, PricingPolicy};
use crate::MAX_POLICY_AMOUNT_CENTS;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Policy Validators
// =============================================================================

/// Validates a whole policy. Returns the first violation found.
///
/// ## Rules
/// - At least one distance tier
/// - Tier bounds strictly increasing and non-negative
/// - Every fee, threshold and cap in `[0, MAX_POLICY_AMOUNT_CENTS]`
/// - Bulk threshold non-negative
pub fn validate_policy(policy: &PricingPolicy) -> ValidationResult<()> {
    validate_amount("baseFeeCents", policy.base_fee_cents)?;
    validate_distance_tiers(&policy.distance_tiers)?;

    if let Some(cap) = policy.max_delivery_fee_cents {
        validate_amount("maxDeliveryFeeCents", cap)?;
    }

    validate_amount("smallOrder.thresholdCents", policy.small_order.threshold_cents)?;

    validate_amount("items.perItemFeeCents", policy.items.per_item_fee_cents)?;
    validate_non_negative("items.bulkThreshold", policy.items.bulk_threshold)?;
    validate_amount("items.bulkFeeCents", policy.items.bulk_fee_cents)?;

    Ok(())
}

/// Validates the distance tier table.
///
/// ## Example
/// ```rust
/// use delivery_core::types::DistanceTier;
/// use delivery_core::validation::validate_distance_tiers;
///
/// assert!(validate_distance_tiers(&[DistanceTier::new(1000, 100), DistanceTier::new(2000, 200)]).is_ok());
/// assert!(validate_distance_tiers(&[DistanceTier::new(2000, 200), DistanceTier::new(1000, 100)]).is_err());
/// assert!(validate_distance_tiers(&[]).is_err());
/// ```
pub fn validate_distance_tiers(tiers: &[DistanceTier]) -> ValidationResult<()> {
    if tiers.is_empty() {
        return Err(ValidationError::Required {
            field: "distanceTiers".to_string(),
        });
    }

    let mut previous: Option<i64> = None;
    for (index, tier) in tiers.iter().enumerate() {
        validate_non_negative(&format!("distanceTiers[{index}].upToMeters"), tier.up_to_meters)?;
        validate_amount(&format!("distanceTiers[{index}].feeCents"), tier.fee_cents)?;

        if let Some(previous) = previous {
            if tier.up_to_meters <= previous {
                return Err(ValidationError::NotAscending {
                    field: format!("distanceTiers[{index}].upToMeters"),
                    previous,
                    value: tier.up_to_meters,
                });
            }
        }
        previous = Some(tier.up_to_meters);
    }

    Ok(())
}

/// Validates that an amount or count is zero or more.
pub fn validate_non_negative(field: &str, value: i64) -> ValidationResult<()> {
    if value < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
            value,
        });
    }

    Ok(())
}

/// Validates a cent amount: non-negative and at most [`MAX_POLICY_AMOUNT_CENTS`].
pub fn validate_amount(field: &str, value: i64) -> ValidationResult<()> {
    validate_non_negative(field, value)?;

    if value > MAX_POLICY_AMOUNT_CENTS {
        return Err(ValidationError::MustBeAtMost {
            field: field.to_string(),
            value,
            max: MAX_POLICY_AMOUNT_CENTS,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Currency, ItemRule, SmallOrderRule};

    fn valid_policy() -> PricingPolicy {
        PricingPolicy {
            currency: Currency::Eur,
            base_fee_cents: 100,
            distance_tiers: vec![DistanceTier::new(1000, 100), DistanceTier::new(2000, 200)],
            max_delivery_fee_cents: Some(800),
            small_order: SmallOrderRule {
                enabled: true,
                threshold_cents: 2000,
            },
            items: ItemRule {
                enabled: true,
                per_item_fee_cents: 10,
                bulk_threshold: 13,
                bulk_fee_cents: 120,
            },
        }
    }

    #[test]
    fn test_valid_policy() {
        assert!(validate_policy(&valid_policy()).is_ok());
    }

    #[test]
    fn test_empty_tiers_rejected() {
        let mut policy = valid_policy();
        policy.distance_tiers.clear();
        assert_eq!(
            validate_policy(&policy),
            Err(ValidationError::Required {
                field: "distanceTiers".to_string()
            })
        );
    }

    #[test]
    fn test_duplicate_tier_bound_rejected() {
        let mut policy = valid_policy();
        policy.distance_tiers = vec![DistanceTier::new(1000, 100), DistanceTier::new(1000, 200)];
        assert_eq!(
            validate_policy(&policy),
            Err(ValidationError::NotAscending {
                field: "distanceTiers[1].upToMeters".to_string(),
                previous: 1000,
                value: 1000,
            })
        );
    }

    #[test]
    fn test_negative_amounts_rejected() {
        let mut policy = valid_policy();
        policy.base_fee_cents = -1;
        assert!(validate_policy(&policy).is_err());

        let mut policy = valid_policy();
        policy.max_delivery_fee_cents = Some(-5);
        assert!(validate_policy(&policy).is_err());

        let mut policy = valid_policy();
        policy.items.bulk_fee_cents = -120;
        let err = validate_policy(&policy).unwrap_err();
        assert_eq!(err.to_string(), "items.bulkFeeCents must not be negative (got -120)");

        let mut policy = valid_policy();
        policy.distance_tiers[0].fee_cents = -1;
        assert!(validate_policy(&policy).is_err());
    }

    #[test]
    fn test_missing_cap_is_fine() {
        let mut policy = valid_policy();
        policy.max_delivery_fee_cents = None;
        assert!(validate_policy(&policy).is_ok());
    }

    #[test]
    fn test_oversized_amounts_rejected() {
        let mut policy = valid_policy();
        policy.items.per_item_fee_cents = 1_000_000_000_000_000;
        assert_eq!(
            validate_policy(&policy),
            Err(ValidationError::MustBeAtMost {
                field: "items.perItemFeeCents".to_string(),
                value: 1_000_000_000_000_000,
                max: MAX_POLICY_AMOUNT_CENTS,
            })
        );

        let mut policy = valid_policy();
        policy.base_fee_cents = i64::MAX;
        assert!(validate_policy(&policy).is_err());

        let mut policy = valid_policy();
        policy.distance_tiers[1].fee_cents = i64::MAX;
        let err = validate_policy(&policy).unwrap_err();
        assert!(err.to_string().starts_with("distanceTiers[1].feeCents must be at most"));
    }

    #[test]
    fn test_largest_valid_policy_prices_without_overflow() {
        let max = MAX_POLICY_AMOUNT_CENTS;
        let policy = PricingPolicy {
            currency: Currency::Eur,
            base_fee_cents: max,
            distance_tiers: vec![DistanceTier::new(0, max)],
            max_delivery_fee_cents: None,
            small_order: SmallOrderRule {
                enabled: true,
                threshold_cents: max,
            },
            items: ItemRule {
                enabled: true,
                per_item_fee_cents: max,
                bulk_threshold: 0,
                bulk_fee_cents: max,
            },
        };
        assert!(validate_policy(&policy).is_ok());

        let input = crate::PricingInput::new(i64::MAX, i64::MAX, i64::MAX);
        let result = crate::calculate_price(&input, &policy);

        // 2,000 steps of 50 cents past the single tier at 0 m
        let delivery = max + max + 2_000 * 50;
        assert_eq!(result.delivery_fee_cents, delivery);
        assert_eq!(result.small_order_surcharge_cents, 0);
        assert_eq!(result.item_surcharge_cents, max * crate::MAX_ITEM_COUNT);
        assert_eq!(
            result.total_cents,
            crate::MAX_CART_VALUE_CENTS + delivery + max * crate::MAX_ITEM_COUNT + max
        );
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount("x", 0).is_ok());
        assert!(validate_amount("x", MAX_POLICY_AMOUNT_CENTS).is_ok());
        assert!(validate_amount("x", MAX_POLICY_AMOUNT_CENTS + 1).is_err());
        assert!(validate_amount("x", -1).is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative("x", 0).is_ok());
        assert!(validate_non_negative("x", 10).is_ok());
        assert!(validate_non_negative("x", -1).is_err());
    }
}
