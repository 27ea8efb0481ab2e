//! # Pricing Engine
//!
//! `calculate_price` turns one [`PricingInput`] and one [`PricingPolicy`]
//! into a [`PricingResult`]. It is total: every input produces a result,
//! out-of-range values are clamped rather than rejected.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  input ──► clamp(cart, items, distance)                                │
//! │                 │                                                       │
//! │                 ├──► base fee + tier fee(distance) ──► min(cap)         │
//! │                 │                                   = delivery          │
//! │                 ├──► cart < threshold ? threshold - cart : 0            │
//! │                 │                                   = small order       │
//! │                 ├──► items × per item fee           = item surcharge    │
//! │                 └──► items >= bulk threshold ? bulk fee : 0             │
//! │                                                     = bulk fee          │
//! │                                                                         │
//! │  total = cart + delivery + small order + item surcharge + bulk fee      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use delivery_core::engine::calculate_price;
//! use delivery_core::types::*;
//!
//! let policy = PricingPolicy {
//!     currency: Currency::Eur,
//!     base_fee_cents: 100,
//!     distance_tiers: vec![DistanceTier::new(1000, 100), DistanceTier::new(2000, 200)],
//!     max_delivery_fee_cents: Some(800),
//!     small_order: SmallOrderRule { enabled: true, threshold_cents: 2000 },
//!     items: ItemRule { enabled: true, per_item_fee_cents: 10, bulk_threshold: 13, bulk_fee_cents: 120 },
//! };
//!
//! let result = calculate_price(&PricingInput::new(1500, 900, 4), &policy);
//! assert_eq!(result.delivery_fee_cents, 200);
//! assert_eq!(result.small_order_surcharge_cents, 500);
//! assert_eq!(result.item_surcharge_cents, 40);
//! assert_eq!(result.total_cents, 1500 + 200 + 500 + 40);
//! ```

use crate::money::Money;
use crate::types::{BreakdownKey, BreakdownLine, PricingInput, PricingPolicy, PricingResult};
use crate::{MAX_CART_VALUE_CENTS, MAX_DISTANCE_METERS, MAX_ITEM_COUNT};

/// Distance covered by one surcharge step past the last tier.
pub const BEYOND_TIER_STEP_METERS: i64 = 500;

/// Fee added per started step past the last tier.
pub const BEYOND_TIER_STEP_FEE_CENTS: i64 = 50;

/// Prices one order against one policy.
///
/// Pure: no I/O, no clock, no shared state. `input.order_time_iso` is not
/// read.
pub fn calculate_price(input: &PricingInput, policy: &PricingPolicy) -> PricingResult {
    let cart = Money::from_cents(input.cart_value_cents.clamp(0, MAX_CART_VALUE_CENTS));
    let items = input.item_count.clamp(0, MAX_ITEM_COUNT);
    let distance = input.distance_meters.clamp(0, MAX_DISTANCE_METERS);

    let delivery_fee = apply_cap(
        policy.base_fee() + tier_fee(distance, policy),
        policy.max_delivery_fee(),
    );

    let small_order_surcharge = if policy.small_order.enabled {
        let threshold = Money::from_cents(policy.small_order.threshold_cents);
        if cart < threshold {
            threshold - cart
        } else {
            Money::zero()
        }
    } else {
        Money::zero()
    };

    let item_surcharge = if policy.items.enabled {
        Money::from_cents(policy.items.per_item_fee_cents).multiply_quantity(items)
    } else {
        Money::zero()
    };

    let bulk_fee = if policy.items.enabled && items >= policy.items.bulk_threshold {
        Money::from_cents(policy.items.bulk_fee_cents)
    } else {
        Money::zero()
    };

    let total = cart + delivery_fee + small_order_surcharge + item_surcharge + bulk_fee;

    let breakdown = vec![
        BreakdownLine::new(BreakdownKey::Cart, cart),
        BreakdownLine::new(BreakdownKey::Delivery, delivery_fee),
        BreakdownLine::new(BreakdownKey::SmallOrder, small_order_surcharge),
        BreakdownLine::new(BreakdownKey::Items, item_surcharge),
        BreakdownLine::new(BreakdownKey::Bulk, bulk_fee),
        BreakdownLine::new(BreakdownKey::Total, total),
    ];

    PricingResult {
        total_cents: total.cents(),
        delivery_fee_cents: delivery_fee.cents(),
        small_order_surcharge_cents: small_order_surcharge.cents(),
        item_surcharge_cents: item_surcharge.cents(),
        bulk_fee_cents: bulk_fee.cents(),
        breakdown,
    }
}

/// Fee of the first tier covering `distance_meters`.
///
/// Past the last tier the last fee grows by [`BEYOND_TIER_STEP_FEE_CENTS`]
/// for every started [`BEYOND_TIER_STEP_METERS`]. The distance is clamped to
/// `[0, MAX_DISTANCE_METERS]` first. An empty tier table yields zero.
///
/// ## Example
/// ```rust
/// use delivery_core::engine::tier_fee;
/// use delivery_core::types::*;
///
/// let policy = PricingPolicy {
///     currency: Currency::Eur,
///     base_fee_cents: 0,
///     distance_tiers: vec![DistanceTier::new(1000, 100), DistanceTier::new(2000, 200)],
///     max_delivery_fee_cents: None,
///     small_order: SmallOrderRule::default(),
///     items: ItemRule::default(),
/// };
///
/// assert_eq!(tier_fee(1000, &policy).cents(), 100); // bound is inclusive
/// assert_eq!(tier_fee(1001, &policy).cents(), 200);
/// assert_eq!(tier_fee(2600, &policy).cents(), 300); // 600m beyond = 2 steps
/// ```
pub fn tier_fee(distance_meters: i64, policy: &PricingPolicy) -> Money {
    let distance = distance_meters.clamp(0, MAX_DISTANCE_METERS);

    if let Some(tier) = policy
        .distance_tiers
        .iter()
        .find(|tier| distance <= tier.up_to_meters)
    {
        return tier.fee();
    }

    let Some(last) = policy.distance_tiers.last() else {
        return Money::zero();
    };

    let beyond = distance - last.up_to_meters;
    let steps = (beyond + BEYOND_TIER_STEP_METERS - 1) / BEYOND_TIER_STEP_METERS;
    last.fee() + Money::from_cents(BEYOND_TIER_STEP_FEE_CENTS).multiply_quantity(steps)
}

fn apply_cap(fee: Money, cap: Option<Money>) -> Money {
    match cap {
        Some(cap) => fee.min(cap),
        None => fee,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
