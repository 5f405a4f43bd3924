//! Configuration loading for the tally CLI
//!
//! Settings come from an optional TOML file. A missing file is not an error:
//! the CLI falls back to defaults with a warning, and a `--rules` flag on the
//! command line always wins over the file.

use crate::error::ConfigError;
use crate::rules::{Branch, RuleSet};
use log::warn;
use serde::Deserialize;
use std::path::Path;

/// On-disk configuration for the CLI front end
///
/// ```toml
/// rule-set = "guarded"
///
/// # Or a custom branch ordering, validated on load:
/// # branches = ["minor-person", "number", "list", "person", "reject"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Settings {
    /// Name of the built-in rule set to use when no flag is given
    pub rule_set: Option<String>,
    /// Custom branch ordering; takes precedence over `rule_set`
    pub branches: Option<Vec<Branch>>,
}

impl Settings {
    /// Load settings from a TOML file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    /// Load settings, falling back to defaults when no usable file exists
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) if path.exists() => Self::load(path),
            Some(path) => {
                warn!(
                    "Config file not found, using defaults: {}",
                    path.display()
                );
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Resolve the rule set these settings select
    ///
    /// Precedence: `override_name` (the CLI flag), then a custom `branches`
    /// ordering, then the named `rule_set`, then `strict`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for an unknown rule set name or an invalid
    /// custom branch ordering.
    pub fn resolve_rules(&self, override_name: Option<&str>) -> Result<RuleSet, ConfigError> {
        if let Some(name) = override_name {
            return RuleSet::by_name(name);
        }
        if let Some(branches) = &self.branches {
            return RuleSet::custom("custom", branches.clone());
        }
        match &self.rule_set {
            Some(name) => RuleSet::by_name(name),
            None => Ok(RuleSet::strict()),
        }
    }
}
