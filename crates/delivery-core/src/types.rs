//! # Domain Types
//!
//! Value types flowing into and out of the pricing engine.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────┐   ┌─────────────────┐   ┌─────────────────┐   │
//! │  │   PricingPolicy     │   │  PricingInput   │   │ PricingResult   │   │
//! │  │  ─────────────────  │   │  ─────────────  │   │  ─────────────  │   │
//! │  │  currency           │   │  cart cents     │   │  total cents    │   │
//! │  │  base fee           │ + │  distance (m)   │ → │  fee components │   │
//! │  │  distance tiers     │   │  item count     │   │  breakdown[6]   │   │
//! │  │  cap, small order,  │   │  order time     │   │                 │   │
//! │  │  item rules         │   │  (ignored)      │   │                 │   │
//! │  └─────────────────────┘   └─────────────────┘   └─────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## JSON Shape
//! All types use camelCase keys so the policy files written for the web
//! calculator load unchanged:
//! ```json
//! {
//!   "currency": "EUR",
//!   "baseFeeCents": 199,
//!   "distanceTiers": [{ "upToMeters": 1000, "feeCents": 0 }],
//!   "maxDeliveryFeeCents": 1500,
//!   "smallOrder": { "enabled": true, "thresholdCents": 1000 },
//!   "items": { "enabled": true, "perItemFeeCents": 50, "bulkThreshold": 13, "bulkFeeCents": 120 }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Currency
// =============================================================================

/// Supported currencies. Policies are priced in exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Currency {
    #[default]
    #[serde(rename = "EUR")]
    Eur,
}

impl Currency {
    /// ISO 4217 code.
    pub const fn code(&self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
        }
    }

    /// Display symbol.
    pub const fn symbol(&self) -> &'static str {
        match self {
            Currency::Eur => "€",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// =============================================================================
// Pricing Policy
// =============================================================================

/// A distance bracket with a flat fee.
///
/// `up_to_meters` is inclusive: a distance equal to the bound falls in this
/// tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DistanceTier {
    pub up_to_meters: i64,
    pub fee_cents: i64,
}

impl DistanceTier {
    pub const fn new(up_to_meters: i64, fee_cents: i64) -> Self {
        DistanceTier {
            up_to_meters,
            fee_cents,
        }
    }

    #[inline]
    pub fn fee(&self) -> Money {
        Money::from_cents(self.fee_cents)
    }
}

/// Small-order rule: carts below the threshold pay the gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SmallOrderRule {
    pub enabled: bool,
    pub threshold_cents: i64,
}

/// Item-count rules: a per-item surcharge and a flat bulk fee.
///
/// Both apply together when enabled; the bulk fee is not a replacement for
/// the per-item surcharge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ItemRule {
    pub enabled: bool,
    pub per_item_fee_cents: i64,
    /// Item count at or above which the bulk fee is charged.
    pub bulk_threshold: i64,
    pub bulk_fee_cents: i64,
}

/// Declarative fee configuration for one calculation.
///
/// ## Invariants (trusted, not checked by the engine)
/// - `distance_tiers` is non-empty
/// - `distance_tiers` is sorted by strictly increasing `up_to_meters`
/// - every amount is non-negative
///
/// Use [`crate::validation::validate_policy`] at the loading boundary when
/// the source is not trusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingPolicy {
    pub currency: Currency,
    pub base_fee_cents: i64,
    pub distance_tiers: Vec<DistanceTier>,
    /// Upper bound on the delivery fee. `None` means uncapped.
    #[serde(default)]
    pub max_delivery_fee_cents: Option<i64>,
    pub small_order: SmallOrderRule,
    pub items: ItemRule,
}

impl PricingPolicy {
    #[inline]
    pub fn base_fee(&self) -> Money {
        Money::from_cents(self.base_fee_cents)
    }

    #[inline]
    pub fn max_delivery_fee(&self) -> Option<Money> {
        self.max_delivery_fee_cents.map(Money::from_cents)
    }
}

// =============================================================================
// Pricing Input
// =============================================================================

/// One calculation request.
///
/// Values are unvalidated user-facing numbers: negative or huge values are
/// fine, the engine clamps them. Fractional JSON numbers are truncated toward
/// zero on deserialization; missing numeric fields read as zero.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingInput {
    #[serde(default, deserialize_with = "truncate::deserialize")]
    pub cart_value_cents: i64,

    #[serde(default, deserialize_with = "truncate::deserialize")]
    pub distance_meters: i64,

    #[serde(default, deserialize_with = "truncate::deserialize")]
    pub item_count: i64,

    /// Reserved for time-based rules. Carried through, never parsed.
    #[serde(default, rename = "orderTimeISO")]
    pub order_time_iso: String,
}

impl PricingInput {
    /// Creates an input from whole numbers.
    pub fn new(cart_value_cents: i64, distance_meters: i64, item_count: i64) -> Self {
        PricingInput {
            cart_value_cents,
            distance_meters,
            item_count,
            order_time_iso: String::new(),
        }
    }

    /// Creates an input from raw floating point entry.
    ///
    /// Each value is truncated toward zero (`2.9` → `2`, `-2.9` → `-2`).
    /// NaN becomes zero and infinities saturate.
    ///
    /// ## Example
    /// ```rust
    /// use delivery_core::PricingInput;
    ///
    /// let input = PricingInput::from_raw(1999.7, 1200.4, 3.9);
    /// assert_eq!(input.cart_value_cents, 1999);
    /// assert_eq!(input.distance_meters, 1200);
    /// assert_eq!(input.item_count, 3);
    /// ```
    pub fn from_raw(cart_value_cents: f64, distance_meters: f64, item_count: f64) -> Self {
        PricingInput::new(
            truncate::to_i64(cart_value_cents),
            truncate::to_i64(distance_meters),
            truncate::to_i64(item_count),
        )
    }

    /// Attaches the order timestamp.
    pub fn with_order_time(mut self, order_time_iso: impl Into<String>) -> Self {
        self.order_time_iso = order_time_iso.into();
        self
    }
}

/// Truncating number deserialization for [`PricingInput`].
mod truncate {
    use serde::de::{self, Deserializer, Visitor};
    use std::fmt;

    /// `as` truncates toward zero, saturates out-of-range values and maps NaN to 0.
    pub(super) fn to_i64(value: f64) -> i64 {
        value.trunc() as i64
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TruncatingVisitor;

        impl<'de> Visitor<'de> for TruncatingVisitor {
            type Value = i64;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a number")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
                Ok(v)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
                Ok(i64::try_from(v).unwrap_or(i64::MAX))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
                Ok(to_i64(v))
            }
        }

        deserializer.deserialize_any(TruncatingVisitor)
    }
}

// =============================================================================
// Pricing Result
// =============================================================================

/// Identifies a breakdown line. Serialized as snake_case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum BreakdownKey {
    Cart,
    Delivery,
    SmallOrder,
    Items,
    Bulk,
    Total,
}

impl BreakdownKey {
    /// Every key, in breakdown order.
    pub const ALL: [BreakdownKey; 6] = [
        BreakdownKey::Cart,
        BreakdownKey::Delivery,
        BreakdownKey::SmallOrder,
        BreakdownKey::Items,
        BreakdownKey::Bulk,
        BreakdownKey::Total,
    ];

    /// Human-readable label shown next to the amount.
    pub const fn label(&self) -> &'static str {
        match self {
            BreakdownKey::Cart => "Cart value",
            BreakdownKey::Delivery => "Delivery fee",
            BreakdownKey::SmallOrder => "Small order surcharge",
            BreakdownKey::Items => "Items surcharge",
            BreakdownKey::Bulk => "Bulk fee",
            BreakdownKey::Total => "Total",
        }
    }
}

/// One labelled amount in a breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownLine {
    pub key: BreakdownKey,
    pub label: String,
    pub amount_cents: i64,
}

impl BreakdownLine {
    pub fn new(key: BreakdownKey, amount: Money) -> Self {
        BreakdownLine {
            key,
            label: key.label().to_string(),
            amount_cents: amount.cents(),
        }
    }

    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

/// The priced quote. Fully determined by input + policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingResult {
    pub total_cents: i64,
    pub delivery_fee_cents: i64,
    pub small_order_surcharge_cents: i64,
    pub item_surcharge_cents: i64,
    pub bulk_fee_cents: i64,
    /// Six lines: cart, delivery, small_order, items, bulk, total.
    pub breakdown: Vec<BreakdownLine>,
}

impl PricingResult {
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Looks up a breakdown line by key.
    pub fn line(&self, key: BreakdownKey) -> Option<&BreakdownLine> {
        self.breakdown.iter().find(|line| line.key == key)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_serializes_as_code() {
        assert_eq!(serde_json::to_string(&Currency::Eur).unwrap(), "\"EUR\"");
        let parsed: Currency = serde_json::from_str("\"EUR\"").unwrap();
        assert_eq!(parsed, Currency::Eur);
        assert!(serde_json::from_str::<Currency>("\"USD\"").is_err());
    }

    #[test]
    fn test_policy_parses_camel_case_json() {
        let json = r#"{
            "currency": "EUR",
            "baseFeeCents": 100,
            "distanceTiers": [
                { "upToMeters": 1000, "feeCents": 100 },
                { "upToMeters": 2000, "feeCents": 200 }
            ],
            "maxDeliveryFeeCents": 800,
            "smallOrder": { "enabled": true, "thresholdCents": 2000 },
            "items": { "enabled": true, "perItemFeeCents": 10, "bulkThreshold": 13, "bulkFeeCents": 120 }
        }"#;

        let policy: PricingPolicy = serde_json::from_str(json).unwrap();
        assert_eq!(policy.base_fee_cents, 100);
        assert_eq!(policy.distance_tiers[1], DistanceTier::new(2000, 200));
        assert_eq!(policy.max_delivery_fee(), Some(Money::from_cents(800)));
        assert!(policy.small_order.enabled);
        assert_eq!(policy.items.bulk_threshold, 13);
    }

    #[test]
    fn test_policy_without_cap() {
        let json = r#"{
            "currency": "EUR",
            "baseFeeCents": 0,
            "distanceTiers": [{ "upToMeters": 500, "feeCents": 0 }],
            "smallOrder": { "enabled": false, "thresholdCents": 0 },
            "items": { "enabled": false, "perItemFeeCents": 0, "bulkThreshold": 0, "bulkFeeCents": 0 }
        }"#;

        let policy: PricingPolicy = serde_json::from_str(json).unwrap();
        assert_eq!(policy.max_delivery_fee_cents, None);
    }

    #[test]
    fn test_input_truncates_fractional_json() {
        let json = r#"{
            "cartValueCents": 1999.99,
            "distanceMeters": -12.7,
            "itemCount": 3,
            "orderTimeISO": "2024-05-01T12:00:00.000Z"
        }"#;

        let input: PricingInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.cart_value_cents, 1999);
        assert_eq!(input.distance_meters, -12);
        assert_eq!(input.item_count, 3);
        assert_eq!(input.order_time_iso, "2024-05-01T12:00:00.000Z");
    }

    #[test]
    fn test_input_missing_fields_default_to_zero() {
        let input: PricingInput = serde_json::from_str("{}").unwrap();
        assert_eq!(input, PricingInput::default());
    }

    #[test]
    fn test_input_accepts_garbage_order_time() {
        let input: PricingInput =
            serde_json::from_str(r#"{ "orderTimeISO": "not a timestamp" }"#).unwrap();
        assert_eq!(input.order_time_iso, "not a timestamp");
    }

    #[test]
    fn test_from_raw_handles_non_finite() {
        let input = PricingInput::from_raw(f64::NAN, f64::INFINITY, -2.9);
        assert_eq!(input.cart_value_cents, 0);
        assert_eq!(input.distance_meters, i64::MAX);
        assert_eq!(input.item_count, -2);
    }

    #[test]
    fn test_breakdown_key_serialization() {
        assert_eq!(
            serde_json::to_string(&BreakdownKey::SmallOrder).unwrap(),
            "\"small_order\""
        );
        assert_eq!(BreakdownKey::Items.label(), "Items surcharge");
        assert_eq!(BreakdownKey::ALL.len(), 6);
    }
}
