//! Configuration loading and management
//!
//! Configuration is immutable data passed explicitly into the validator and
//! the normalizer; nothing here is process-wide state.

use crate::core::entity::{EntityKind, Operation};
use crate::core::error::ConfigError;
use crate::core::validation::RuleSet;
use crate::core::validation::catalog::{PROPERTY_STATUSES, PROPERTY_TYPES};
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Defaults and bounds for list endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryPolicy {
    /// Page used when `page` is missing, zero or unreadable
    pub default_page: u64,

    /// Page size used when `limit` is missing, zero or unreadable
    pub default_limit: u64,

    /// Largest `limit` the list-query rules accept
    pub max_limit: u64,

    /// Fields a listing may be sorted by (`-field` sorts descending)
    pub sortable_fields: Vec<String>,

    /// Accepted values of the `type` filter
    pub property_types: Vec<String>,

    /// Accepted values of the `status` filter
    pub property_statuses: Vec<String>,
}

impl Default for QueryPolicy {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_limit: 10,
            max_limit: 100,
            sortable_fields: ["createdAt", "price", "title", "views"]
                .into_iter()
                .map(String::from)
                .collect(),
            property_types: PROPERTY_TYPES.iter().map(|s| s.to_string()).collect(),
            property_statuses: PROPERTY_STATUSES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl QueryPolicy {
    /// Load a policy from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load a policy from a YAML string; missing keys take their defaults
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let policy: Self = serde_yaml::from_str(yaml)?;
        policy.check()?;
        Ok(policy)
    }

    /// Reject policies whose defaults cannot produce a usable page
    pub fn check(&self) -> Result<(), ConfigError> {
        if self.default_page == 0 {
            return Err(ConfigError::InvalidValue {
                field: "default_page".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.max_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_limit".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.default_limit == 0 || self.default_limit > self.max_limit {
            return Err(ConfigError::InvalidValue {
                field: "default_limit".to_string(),
                message: format!("must be between 1 and max_limit ({})", self.max_limit),
            });
        }
        Ok(())
    }
}

/// A rule set replacing the built-in one for a kind and operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSetOverride {
    pub kind: EntityKind,
    pub operation: Operation,

    #[serde(flatten)]
    pub rule_set: RuleSet,
}

/// Rule set replacements loaded from configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaOverrides {
    #[serde(default)]
    pub rule_sets: Vec<RuleSetOverride>,
}

impl SchemaOverrides {
    /// Load overrides from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load overrides from a YAML string
    ///
    /// Invalid regular expressions are reported here, not at validation time.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let overrides: Self = serde_yaml::from_str(yaml)?;
        Ok(overrides)
    }
}
