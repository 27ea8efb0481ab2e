//! # Configuration State
//!
//! Studio configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--policy`, `--policy-dir`)
//! 2. Environment variables (`STUDIO_*`)
//! 3. Platform data directory (policy files only)
//! 4. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the built-in policy used when nothing else is selected.
pub const DEFAULT_POLICY: &str = "2024";

/// Studio configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudioConfig {
    /// Policy name used by `quote` and `scenario` when `--policy` is absent.
    pub default_policy: String,

    /// Directory of additional `*.json` policies.
    pub policy_dir: Option<PathBuf>,
}

impl Default for StudioConfig {
    fn default() -> Self {
        StudioConfig {
            default_policy: DEFAULT_POLICY.to_string(),
            policy_dir: None,
        }
    }
}

impl StudioConfig {
    /// Loads configuration from the process environment.
    ///
    /// ## Environment Variables
    /// - `STUDIO_POLICY`: default policy name
    /// - `STUDIO_POLICY_DIR`: directory of extra policy files
    ///
    /// When `STUDIO_POLICY_DIR` is unset, the platform data directory
    /// (`.../delivery-studio/policies`) is used if it exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::from_lookup(|key| std::env::var(key).ok())?;

        if config.policy_dir.is_none() {
            config.policy_dir = platform_policy_dir().filter(|dir| dir.is_dir());
        }

        Ok(config)
    }

    /// Builds configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = StudioConfig::default();

        if let Some(name) = lookup("STUDIO_POLICY") {
            let name = name.trim();
            if name.is_empty() {
                return Err(ConfigError::InvalidValue("STUDIO_POLICY".to_string()));
            }
            config.default_policy = name.to_string();
        }

        if let Some(dir) = lookup("STUDIO_POLICY_DIR") {
            let dir = PathBuf::from(dir);
            if !dir.is_dir() {
                return Err(ConfigError::NotADirectory(dir));
            }
            config.policy_dir = Some(dir);
        }

        Ok(config)
    }
}

/// `~/.local/share/delivery-studio/policies` on Linux, the platform
/// equivalent elsewhere.
fn platform_policy_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "delivery", "delivery-studio")
        .map(|dirs| dirs.data_dir().join("policies"))
}

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Policy directory does not exist: {}", .0.display())]
    NotADirectory(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = StudioConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, StudioConfig::default());
        assert_eq!(config.default_policy, "2024");
        assert!(config.policy_dir.is_none());
    }

    #[test]
    fn test_policy_override() {
        let config = StudioConfig::from_lookup(lookup(&[("STUDIO_POLICY", " 2025 ")])).unwrap();
        assert_eq!(config.default_policy, "2025");
    }

    #[test]
    fn test_blank_policy_rejected() {
        let err = StudioConfig::from_lookup(lookup(&[("STUDIO_POLICY", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
    }

    #[test]
    fn test_policy_dir_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().to_string_lossy().to_string();
        let config = StudioConfig::from_lookup(lookup(&[("STUDIO_POLICY_DIR", path.as_str())])).unwrap();
        assert_eq!(config.policy_dir.as_deref(), Some(dir.path()));

        let missing = dir.path().join("missing").to_string_lossy().to_string();
        let err = StudioConfig::from_lookup(lookup(&[("STUDIO_POLICY_DIR", missing.as_str())])).unwrap_err();
        assert!(matches!(err, ConfigError::NotADirectory(_)));
    }
}
