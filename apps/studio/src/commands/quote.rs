//! # Quote Commands
//!
//! Prices one order against a policy and renders the breakdown.
//!
//! ## Quote Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Quote Flow                                           │
//! │                                                                         │
//! │  --cart "8.50"  --distance "3200"  --items "1"                          │
//! │       │               │                 │                               │
//! │       ▼               ▼                 ▼                               │
//! │  parse_number (non-numeric or empty → 0)                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  cart euros × 100, rounded ──► PricingInput::from_raw (truncates)       │
//! │                                        │                                │
//! │  resolve_policy ───────────────────────┤                                │
//! │  (--policy-file > --policy > config)   ▼                                │
//! │                                 calculate_price                         │
//! │                                        │                                │
//! │                          ┌─────────────┴──────────────┐                 │
//! │                          ▼                            ▼                 │
//! │                  render_quote (text)          serde_json (--json)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::Path;

use clap::ValueEnum;
use delivery_core::{
    calculate_price, BreakdownKey, Currency, PricingInput, PricingPolicy, PricingResult,
};
use serde::Serialize;
use tracing::debug;

use crate::error::StudioResult;
use crate::state::{load_policy_file, PolicyCatalog, StudioConfig};

/// Raw user entry, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteRequest {
    /// Cart value in euros (`"18.50"`).
    pub cart_eur: String,
    pub distance_meters: String,
    pub item_count: String,
}

impl QuoteRequest {
    pub fn new(
        cart_eur: impl Into<String>,
        distance_meters: impl Into<String>,
        item_count: impl Into<String>,
    ) -> Self {
        QuoteRequest {
            cart_eur: cart_eur.into(),
            distance_meters: distance_meters.into(),
            item_count: item_count.into(),
        }
    }

    /// Converts the entry into an engine input.
    ///
    /// Unparseable fields become 0. The cart is converted from euros to
    /// cents with rounding; every field is then truncated by
    /// [`PricingInput::from_raw`].
    pub fn to_input(&self) -> PricingInput {
        let cart_cents = (parse_number(&self.cart_eur) * 100.0).round();
        PricingInput::from_raw(
            cart_cents,
            parse_number(&self.distance_meters),
            parse_number(&self.item_count),
        )
    }
}

/// Lenient number parsing for form-style entry.
///
/// Anything that is not a finite decimal reads as 0, except the exact
/// spellings `Infinity`, `+Infinity` and `-Infinity`.
pub fn parse_number(raw: &str) -> f64 {
    let raw = raw.trim();
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        Ok(value) if raw.trim_start_matches(['+', '-']) == "Infinity" => value,
        _ => 0.0,
    }
}

/// Preset orders for quick comparisons between policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scenario {
    /// 8 € cart, 3200 m, 1 item
    SmallFar,
    /// 18 € cart, 1400 m, 13 items
    Bulk,
    /// 45 € cart, 700 m, 3 items
    NearHigh,
}

impl Scenario {
    pub fn request(self) -> QuoteRequest {
        match self {
            Scenario::SmallFar => QuoteRequest::new("8", "3200", "1"),
            Scenario::Bulk => QuoteRequest::new("18", "1400", "13"),
            Scenario::NearHigh => QuoteRequest::new("45", "700", "3"),
        }
    }
}

/// A priced order plus the policy it was priced with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub policy: String,
    pub currency: Currency,
    pub input: PricingInput,
    pub result: PricingResult,
}

/// Picks the policy for a quote.
///
/// `--policy-file` wins over `--policy`, which wins over the configured
/// default. Returns the display name together with the policy.
pub fn resolve_policy(
    catalog: &PolicyCatalog,
    config: &StudioConfig,
    policy: Option<&str>,
    policy_file: Option<&Path>,
) -> StudioResult<(String, PricingPolicy)> {
    if let Some(path) = policy_file {
        let policy = load_policy_file(path)?;
        return Ok((path.display().to_string(), policy));
    }

    let name = policy.unwrap_or(&config.default_policy);
    let policy = catalog.get(name)?.clone();
    Ok((name.to_string(), policy))
}

/// Prices a request. Stamps the order time with the current UTC time.
pub fn quote(request: &QuoteRequest, name: &str, policy: &PricingPolicy) -> Quote {
    let input = request
        .to_input()
        .with_order_time(chrono::Utc::now().to_rfc3339());
    debug!(
        policy = %name,
        cart = input.cart_value_cents,
        distance = input.distance_meters,
        items = input.item_count,
        "Pricing order"
    );

    let result = calculate_price(&input, policy);
    Quote {
        policy: name.to_string(),
        currency: policy.currency,
        input,
        result,
    }
}

/// Renders the breakdown as aligned text.
///
/// ```text
/// Policy 2024 (EUR)
///   Cart value                       8.00 €
///   Delivery fee                    15.00 €
///   ...
///   ---------------------------------------
///   Total                           25.50 €
/// ```
pub fn render_quote(quote: &Quote) -> String {
    let mut out = format!("Policy {} ({})\n", quote.policy, quote.currency);
    for line in &quote.result.breakdown {
        if line.key == BreakdownKey::Total {
            out.push_str(&format!("  {}\n", "-".repeat(39)));
        }
        out.push_str(&format!(
            "  {:<24}{:>15}\n",
            line.label,
            line.amount().format(quote.currency)
        ));
    }
    out
}
