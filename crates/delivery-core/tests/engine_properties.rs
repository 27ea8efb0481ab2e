//! Property tests for the pricing engine.

use delivery_core::engine::{tier_fee, BEYOND_TIER_STEP_METERS};
use delivery_core::types::{
    BreakdownKey, Currency, DistanceTier, ItemRule, PricingInput, PricingPolicy, SmallOrderRule,
};
use delivery_core::{calculate_price, Money, MAX_CART_VALUE_CENTS};
use proptest::prelude::*;

/// Well-formed policies: ascending bounds, non-decreasing tier fees.
fn policy_strategy() -> impl Strategy<Value = PricingPolicy> {
    (
        0i64..1_000,
        prop::collection::vec((1i64..5_000, 0i64..500), 1..6),
        prop::option::of(0i64..3_000),
        any::<bool>(),
        0i64..5_000,
        any::<bool>(),
        0i64..200,
        0i64..50,
        0i64..500,
    )
        .prop_map(
            |(base, steps, cap, small_enabled, threshold, items_enabled, per_item, bulk_threshold, bulk_fee)| {
                let mut bound = 0;
                let mut fee = 0;
                let distance_tiers = steps
                    .into_iter()
                    .map(|(gap, delta)| {
                        bound += gap;
                        fee += delta;
                        DistanceTier::new(bound, fee)
                    })
                    .collect();

                PricingPolicy {
                    currency: Currency::Eur,
                    base_fee_cents: base,
                    distance_tiers,
                    max_delivery_fee_cents: cap,
                    small_order: SmallOrderRule {
                        enabled: small_enabled,
                        threshold_cents: threshold,
                    },
                    items: ItemRule {
                        enabled: items_enabled,
                        per_item_fee_cents: per_item,
                        bulk_threshold,
                        bulk_fee_cents: bulk_fee,
                    },
                }
            },
        )
}

fn input_strategy() -> impl Strategy<Value = PricingInput> {
    (
        -10_000i64..200_000_000,
        -1_000i64..1_200_000,
        -10i64..12_000,
    )
        .prop_map(|(cart, distance, items)| PricingInput::new(cart, distance, items))
}

proptest! {
    #[test]
    fn test_same_arguments_same_result(input in input_strategy(), policy in policy_strategy()) {
        let first = calculate_price(&input, &policy);
        let second = calculate_price(&input, &policy);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_delivery_fee_never_exceeds_cap(input in input_strategy(), policy in policy_strategy()) {
        let result = calculate_price(&input, &policy);
        if let Some(cap) = policy.max_delivery_fee_cents {
            prop_assert!(result.delivery_fee_cents <= cap);
        }
    }

    #[test]
    fn test_small_order_fills_gap_exactly(input in input_strategy(), policy in policy_strategy()) {
        let result = calculate_price(&input, &policy);
        if result.small_order_surcharge_cents > 0 {
            let cart = result.line(BreakdownKey::Cart).unwrap().amount_cents;
            prop_assert_eq!(
                cart + result.small_order_surcharge_cents,
                policy.small_order.threshold_cents
            );
        }
    }

    #[test]
    fn test_breakdown_sums_to_total(input in input_strategy(), policy in policy_strategy()) {
        let result = calculate_price(&input, &policy);
        let keys: Vec<BreakdownKey> = result.breakdown.iter().map(|l| l.key).collect();
        prop_assert_eq!(keys, BreakdownKey::ALL.to_vec());

        let components: Money = result.breakdown[..5].iter().map(|l| l.amount()).sum();
        prop_assert_eq!(components.cents(), result.total_cents);
        prop_assert!(result.breakdown.iter().all(|l| l.amount_cents >= 0));
        prop_assert!(result.breakdown[0].amount_cents <= MAX_CART_VALUE_CENTS);
    }

    #[test]
    fn test_tier_fee_non_decreasing(policy in policy_strategy(), a in 0i64..1_000_000, b in 0i64..1_000_000) {
        let (near, far) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(tier_fee(near, &policy) <= tier_fee(far, &policy));
    }

    #[test]
    fn test_fee_grows_every_step_past_last_tier(policy in policy_strategy(), k in 0i64..100) {
        let last = policy.distance_tiers.last().unwrap().up_to_meters;
        let here = last + 1 + k * BEYOND_TIER_STEP_METERS;
        let next = here + BEYOND_TIER_STEP_METERS;
        prop_assert!(tier_fee(here, &policy) < tier_fee(next, &policy));
    }
}
