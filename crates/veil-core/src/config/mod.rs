//! Configuration types for Veil.
//!
//! A single YAML file (conventionally `veil.yaml`) carries the scan tunables,
//! the obfuscation rules keyed by base column name, and the ordered list of
//! patterns used when scanning for sensitive data.
//!
//! ```yaml
//! scan:
//!   sample_limit: 5
//!   alias_resolution_enabled: true
//! rules:
//!   first_name:
//!     method: mask
//!     start: 1
//!     end: 10
//! patterns:
//!   - builtin:email
//!   - '^\d+$'
//! ```

pub mod rules;
pub mod scan;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub use rules::{ObfuscationMethod, RuleDefinition};
pub use scan::ScanConfig;

/// Complete Veil configuration loaded from a file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VeilConfig {
    /// Scan and masking tunables.
    #[serde(default)]
    pub scan: ScanConfig,

    /// Obfuscation rules keyed by base column name, in declaration order.
    #[serde(default)]
    pub rules: IndexMap<String, RuleDefinition>,

    /// Ordered patterns for sensitive-data scanning. Entries of the form
    /// `builtin:<name>` refer to the built-in pattern catalogue.
    #[serde(default)]
    pub patterns: Vec<String>,
}

/// Errors that can occur loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl VeilConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML content.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Structural checks that serde cannot express.
    ///
    /// Rules with unusable parameters are not rejected here; they degrade to
    /// no-ops when they are compiled.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(name) = self.rules.keys().find(|name| name.trim().is_empty()) {
            return Err(ConfigError::Config(format!(
                "rule key {:?} is not a column name",
                name
            )));
        }
        if self.patterns.iter().any(|p| p.is_empty()) {
            return Err(ConfigError::Config("empty scan pattern".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"
scan:
  sample_limit: 3
rules:
  last_name:
    method: truncate
    start: 0
    end: 1
  first_name:
    method: mask
    start: 1
    end: 10
patterns:
  - builtin:email
  - '^\d+$'
"#;

    #[test]
    fn test_parse_full_config() {
        let config = VeilConfig::from_yaml(SAMPLE).unwrap();
        assert_eq!(config.scan.sample_limit, 3);
        assert!(config.scan.alias_resolution_enabled);

        let keys: Vec<&str> = config.rules.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["last_name", "first_name"]);
        assert_eq!(config.rules["last_name"], RuleDefinition::truncate(0, 1));
        assert_eq!(config.patterns, vec!["builtin:email".to_string(), r"^\d+$".to_string()]);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = VeilConfig::from_yaml("{}").unwrap();
        assert_eq!(config.scan, ScanConfig::default());
        assert!(config.rules.is_empty());
        assert!(config.patterns.is_empty());
    }

    #[test]
    fn test_empty_pattern_rejected() {
        let result = VeilConfig::from_yaml("patterns: ['']");
        assert!(matches!(result, Err(ConfigError::Config(_))));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("veil.yaml");
        fs::write(&path, SAMPLE).unwrap();

        let config = VeilConfig::from_file(&path).unwrap();
        assert_eq!(config.rules.len(), 2);
    }

    #[test]
    fn test_missing_file() {
        let result = VeilConfig::from_file("/nonexistent/veil.yaml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
