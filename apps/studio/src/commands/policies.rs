//! # Policy Commands
//!
//! Listing and inspecting the policy catalog.

use delivery_core::{Money, PricingPolicy};
use serde::Serialize;

use crate::error::StudioResult;
use crate::state::{PolicyCatalog, PolicySource};

/// One row of `policies` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicySummary {
    pub name: String,
    pub source: PolicySource,
    pub base_fee_cents: i64,
    pub tier_count: usize,
    pub max_delivery_fee_cents: Option<i64>,
    pub is_default: bool,
}

/// Summaries of every catalog entry, in name order.
pub fn list_policies(catalog: &PolicyCatalog, default_policy: &str) -> Vec<PolicySummary> {
    catalog
        .entries()
        .map(|entry| PolicySummary {
            name: entry.name.clone(),
            source: entry.source.clone(),
            base_fee_cents: entry.policy.base_fee_cents,
            tier_count: entry.policy.distance_tiers.len(),
            max_delivery_fee_cents: entry.policy.max_delivery_fee_cents,
            is_default: entry.name == default_policy,
        })
        .collect()
}

/// Renders summaries one per line. The default policy is marked with `*`.
pub fn render_policy_list(summaries: &[PolicySummary]) -> String {
    summaries
        .iter()
        .map(|s| {
            let source = match &s.source {
                PolicySource::BuiltIn => "built-in".to_string(),
                PolicySource::File(path) => path.display().to_string(),
            };
            let cap = s
                .max_delivery_fee_cents
                .map(|cents| Money::from_cents(cents).to_string())
                .unwrap_or_else(|| "none".to_string());
            format!(
                "{} {:<10} base {:>6}  tiers {}  cap {:>6}  {}\n",
                if s.is_default { '*' } else { ' ' },
                s.name,
                Money::from_cents(s.base_fee_cents),
                s.tier_count,
                cap,
                source
            )
        })
        .collect()
}

/// Pretty JSON of one policy, in the same shape policy files use.
pub fn show_policy(catalog: &PolicyCatalog, name: &str) -> StudioResult<String> {
    let policy: &PricingPolicy = catalog.get(name)?;
    Ok(serde_json::to_string_pretty(policy)?)
}
