//! Library-wide defaults
//!
//! Verb options read their defaults from the process-wide [`TidyConfig`].
//! The configuration can be replaced at runtime or loaded from a TOML or
//! YAML file.

use std::fs;
use std::path::Path;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Library defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TidyConfig {
    /// Name of the count column produced by `count` and `Stat::n`
    pub count_name: String,
    /// Suffixes added to clashing non-key columns by the joins
    pub join_suffixes: (String, String),
    /// Whether group-by drops rows whose key contains a missing value
    pub drop_null_keys: bool,
    /// Maximum number of rows printed by `Display for DataFrame`
    pub display_max_rows: usize,
}

impl Default for TidyConfig {
    fn default() -> Self {
        Self {
            count_name: "n".to_string(),
            join_suffixes: ("_x".to_string(), "_y".to_string()),
            drop_null_keys: true,
            display_max_rows: 20,
        }
    }
}

impl TidyConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration from YAML text
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file, choosing the format from its extension
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&text),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&text),
            other => Err(Error::Config(format!(
                "Unsupported configuration format: {:?}",
                other.unwrap_or("")
            ))),
        }
    }

    /// Serialize the configuration as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| Error::Config(e.to_string()))
    }

    fn validate(&self) -> Result<()> {
        if self.count_name.is_empty() {
            return Err(Error::Config("count_name must not be empty".to_string()));
        }
        if self.join_suffixes.0 == self.join_suffixes.1 {
            return Err(Error::Config(
                "join_suffixes must be two different strings".to_string(),
            ));
        }
        Ok(())
    }
}

lazy_static::lazy_static! {
    static ref GLOBAL_CONFIG: RwLock<TidyConfig> = RwLock::new(TidyConfig::default());
}

/// Snapshot of the process-wide configuration
pub fn global() -> TidyConfig {
    match GLOBAL_CONFIG.read() {
        Ok(config) => config.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// Replace the process-wide configuration
pub fn set_global(config: TidyConfig) -> Result<()> {
    config.validate()?;
    log::debug!("Replacing global configuration: {:?}", config);
    match GLOBAL_CONFIG.write() {
        Ok(mut guard) => *guard = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = TidyConfig::from_toml_str("count_name = \"total\"").unwrap();
        assert_eq!(config.count_name, "total");
        assert_eq!(config.join_suffixes, ("_x".to_string(), "_y".to_string()));
        assert!(config.drop_null_keys);
    }

    #[test]
    fn test_yaml() {
        let config =
            TidyConfig::from_yaml_str("display_max_rows: 5\ndrop_null_keys: false\n").unwrap();
        assert_eq!(config.display_max_rows, 5);
        assert!(!config.drop_null_keys);
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            TidyConfig::from_toml_str("count_name = \"\""),
            Err(Error::Config(_))
        ));
        assert!(TidyConfig::from_toml_str("count_name = 3").is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = TidyConfig::default();
        let text = config.to_toml_string().unwrap();
        assert_eq!(TidyConfig::from_toml_str(&text).unwrap(), config);
    }
}
