use anchorage_core::{Priority, DEFAULT_STORAGE_PREFIXES};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Defaults the facade falls back to when a call does not say otherwise.
///
/// Every field is optional when loading from TOML:
///
/// ```toml
/// self_key = "root"
/// default_priority = 750.0
/// storage_prefixes = ["_"]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Key the subject view is registered under in generated view dictionaries
    pub self_key: String,

    /// Priority used by [`Layout::size`](crate::Layout::size)
    pub default_priority: Priority,

    /// Prefixes stripped from field names when building view dictionaries
    pub storage_prefixes: Vec<String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            self_key: "self".to_string(),
            default_priority: Priority::REQUIRED,
            storage_prefixes: DEFAULT_STORAGE_PREFIXES.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl LayoutConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: LayoutConfig = toml::from_str(source)?;
        if config.self_key.is_empty() {
            return Err(ConfigError::EmptySelfKey);
        }
        Ok(config)
    }

    pub fn with_self_key(mut self, key: impl Into<String>) -> Self {
        self.self_key = key.into();
        self
    }

    pub fn with_default_priority(mut self, priority: Priority) -> Self {
        self.default_priority = priority;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = LayoutConfig::from_toml_str("").unwrap();
        assert_eq!(config, LayoutConfig::default());
        assert_eq!(config.self_key, "self");
        assert_eq!(config.default_priority, Priority::REQUIRED);
    }

    #[test]
    fn test_partial_toml() {
        let config = LayoutConfig::from_toml_str("self_key = \"root\"\ndefault_priority = 750.0\n").unwrap();
        assert_eq!(config.self_key, "root");
        assert_eq!(config.default_priority, Priority::DEFAULT_HIGH);
        assert_eq!(config.storage_prefixes, LayoutConfig::default().storage_prefixes);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            LayoutConfig::from_toml_str("self_key = \"\""),
            Err(ConfigError::EmptySelfKey)
        ));
        assert!(matches!(
            LayoutConfig::from_toml_str("default_priority = \"high\""),
            Err(ConfigError::Toml(_))
        ));
    }
}
