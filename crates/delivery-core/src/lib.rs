//! # delivery-core: Pure Pricing Logic for Delivery Pricing Studio
//!
//! This crate prices a delivery order against a declarative policy. It
//! contains no I/O: policies and inputs come in as values, a breakdown goes
//! out.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Delivery Pricing Studio Architecture                  │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    delivery-studio (CLI)                        │   │
//! │  │   quote / scenario ──► policy catalog ──► render breakdown      │   │
//! │  │   support ──► in-memory ticket board (never touches pricing)   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ PricingInput + &PricingPolicy          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ delivery-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  engine   │  │ validation│  │   │
//! │  │   │  Policy   │  │   Money   │  │ calculate │  │  policy   │  │   │
//! │  │   │  Result   │  │  Currency │  │  _price   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO GLOBAL POLICY • PURE FUNCTIONS        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Policy, input and result types
//! - [`money`] - Money type with integer arithmetic
//! - [`engine`] - `calculate_price` and the distance tier lookup
//! - [`validation`] - Policy shape checks for untrusted policy files
//! - [`error`] - Validation error types
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: same input + same policy = same breakdown
//! 2. **Total**: the engine never fails; out-of-range input is clamped
//! 3. **Integer Money**: every amount is in cents (i64)
//! 4. **Explicit Policy**: each call names the policy it prices against
//!
//! ## Example Usage
//!
//! ```rust
//! use delivery_core::{calculate_price, PricingInput, PricingPolicy};
//!
//! let policy: PricingPolicy = serde_json::from_str(r#"{
//!     "currency": "EUR",
//!     "baseFeeCents": 100,
//!     "distanceTiers": [{ "upToMeters": 1000, "feeCents": 100 }, { "upToMeters": 2000, "feeCents": 200 }],
//!     "maxDeliveryFeeCents": 800,
//!     "smallOrder": { "enabled": true, "thresholdCents": 2000 },
//!     "items": { "enabled": true, "perItemFeeCents": 10, "bulkThreshold": 13, "bulkFeeCents": 120 }
//! }"#).unwrap();
//!
//! let result = calculate_price(&PricingInput::new(3000, 2600, 0), &policy);
//! assert_eq!(result.delivery_fee_cents, 400); // 100 base + 200 tier + 2 steps × 50
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod engine;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use engine::calculate_price;
pub use error::ValidationError;
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Upper clamp for the cart value (1,000,000.00).
pub const MAX_CART_VALUE_CENTS: i64 = 100_000_000;

/// Upper clamp for the delivery distance (1,000 km).
pub const MAX_DISTANCE_METERS: i64 = 1_000_000;

/// Upper clamp for the item count.
pub const MAX_ITEM_COUNT: i64 = 10_000;

/// Largest fee, threshold or cap a policy may carry (1,000,000.00).
///
/// With every input clamped, the largest possible total stays far below
/// `i64::MAX`.
pub const MAX_POLICY_AMOUNT_CENTS: i64 = 100_000_000;
