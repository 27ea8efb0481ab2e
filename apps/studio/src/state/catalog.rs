//! # Policy Catalog
//!
//! Named pricing policies available to the studio.
//!
//! ## Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Policy Catalog                                   │
//! │                                                                         │
//! │  Built-in (embedded JSON)        Policy directory (*.json)              │
//! │  ────────────────────────        ──────────────────────────             │
//! │  2023, 2024, 2025                <file stem> → policy                   │
//! │          │                                │                             │
//! │          └──────────────┬─────────────────┘                             │
//! │                         ▼                                               │
//! │           parse ──► validate_policy ──► BTreeMap<name, entry>           │
//! │                                                                         │
//! │  A directory file named like a built-in replaces the built-in.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Policies are validated here, once, so the engine can trust them.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use delivery_core::validation::validate_policy;
use delivery_core::{PricingPolicy, ValidationError};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

const BUILT_IN_POLICIES: [(&str, &str); 3] = [
    ("2023", include_str!("../../policies/2023.json")),
    ("2024", include_str!("../../policies/2024.json")),
    ("2025", include_str!("../../policies/2025.json")),
];

/// Where a catalog entry came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "path")]
pub enum PolicySource {
    BuiltIn,
    File(PathBuf),
}

/// A named, validated policy.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub name: String,
    pub source: PolicySource,
    pub policy: PricingPolicy,
}

/// Policy loading errors.
#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("Unknown policy '{name}' (available: {})", .available.join(", "))]
    Unknown { name: String, available: Vec<String> },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Policy '{name}' is not valid JSON: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Policy '{name}' is invalid: {source}")]
    Invalid {
        name: String,
        #[source]
        source: ValidationError,
    },
}

/// The set of policies the studio can price against.
#[derive(Debug, Clone, Default)]
pub struct PolicyCatalog {
    entries: BTreeMap<String, CatalogEntry>,
}

impl PolicyCatalog {
    /// Catalog with only the embedded policies.
    pub fn built_in() -> Result<Self, PolicyError> {
        let mut catalog = PolicyCatalog::default();
        for (name, json) in BUILT_IN_POLICIES {
            let policy = parse_policy(name, json)?;
            catalog.insert(name.to_string(), PolicySource::BuiltIn, policy);
        }
        Ok(catalog)
    }

    /// Built-in policies plus every `*.json` file in `dir`.
    ///
    /// Files are read in name order. The first unreadable or invalid file
    /// aborts loading.
    pub fn load(dir: Option<&Path>) -> Result<Self, PolicyError> {
        let mut catalog = Self::built_in()?;

        let Some(dir) = dir else {
            return Ok(catalog);
        };

        let io_err = |source| PolicyError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut files: Vec<PathBuf> = fs::read_dir(dir)
            .map_err(io_err)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        files.sort();

        for path in files {
            let Some(name) = path.file_stem().map(|s| s.to_string_lossy().to_string()) else {
                continue;
            };
            let policy = load_policy_file(&path)?;
            debug!(policy = %name, path = %path.display(), "Loaded policy file");
            catalog.insert(name, PolicySource::File(path), policy);
        }

        info!(dir = %dir.display(), policies = catalog.len(), "Policy catalog loaded");
        Ok(catalog)
    }

    /// Looks up a policy by name.
    pub fn get(&self, name: &str) -> Result<&PricingPolicy, PolicyError> {
        self.entries
            .get(name)
            .map(|entry| &entry.policy)
            .ok_or_else(|| PolicyError::Unknown {
                name: name.to_string(),
                available: self.names(),
            })
    }

    /// Looks up the full entry (with source) by name.
    pub fn entry(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.get(name)
    }

    /// Entries in name order.
    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, name: String, source: PolicySource, policy: PricingPolicy) {
        self.entries.insert(
            name.clone(),
            CatalogEntry {
                name,
                source,
                policy,
            },
        );
    }
}

/// Reads, parses and validates a single policy file.
pub fn load_policy_file(path: &Path) -> Result<PricingPolicy, PolicyError> {
    let json = fs::read_to_string(path).map_err(|source| PolicyError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_policy(&path.display().to_string(), &json)
}

/// Parses and validates policy JSON. `name` is only used in error messages.
pub fn parse_policy(name: &str, json: &str) -> Result<PricingPolicy, PolicyError> {
    let policy: PricingPolicy = serde_json::from_str(json).map_err(|source| PolicyError::Parse {
        name: name.to_string(),
        source,
    })?;

    validate_policy(&policy).map_err(|source| PolicyError::Invalid {
        name: name.to_string(),
        source,
    })?;

    Ok(policy)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CUSTOM: &str = r#"{
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

    #[test]
    fn test_built_in_policies_are_valid() {
        let catalog = PolicyCatalog::built_in().unwrap();
        assert_eq!(catalog.names(), vec!["2023", "2024", "2025"]);
        for entry in catalog.entries() {
            assert_eq!(entry.source, PolicySource::BuiltIn);
            assert!(validate_policy(&entry.policy).is_ok());
        }
        assert_eq!(catalog.get("2023").unwrap().max_delivery_fee_cents, None);
    }

    #[test]
    fn test_unknown_policy_lists_available() {
        let catalog = PolicyCatalog::built_in().unwrap();
        let err = catalog.get("1999").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown policy '1999' (available: 2023, 2024, 2025)"
        );
    }

    #[test]
    fn test_load_directory_adds_and_overrides() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("reference.json"), CUSTOM).unwrap();
        fs::write(dir.path().join("2024.json"), CUSTOM).unwrap();
        fs::write(dir.path().join("notes.txt"), "not a policy").unwrap();

        let catalog = PolicyCatalog::load(Some(dir.path())).unwrap();
        assert_eq!(catalog.names(), vec!["2023", "2024", "2025", "reference"]);
        assert_eq!(catalog.get("2024").unwrap().base_fee_cents, 100);
        assert!(matches!(
            catalog.entry("reference").unwrap().source,
            PolicySource::File(_)
        ));
    }

    #[test]
    fn test_load_without_directory_is_built_in() {
        let catalog = PolicyCatalog::load(None).unwrap();
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_invalid_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let unsorted = CUSTOM.replace("\"upToMeters\": 2000", "\"upToMeters\": 500");
        fs::write(dir.path().join("broken.json"), unsorted).unwrap();

        let err = PolicyCatalog::load(Some(dir.path())).unwrap_err();
        assert!(matches!(err, PolicyError::Invalid { .. }));
        assert!(err.to_string().contains("distanceTiers[1].upToMeters"));
    }

    #[test]
    fn test_malformed_json_is_reported() {
        let err = parse_policy("inline", "{ \"currency\": \"USD\" }").unwrap_err();
        assert!(matches!(err, PolicyError::Parse { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = load_policy_file(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, PolicyError::Io { .. }));
    }
}
