// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Engine configuration.
//!
//! ```toml
//! [engine]
//! verify_factory_results = true
//!
//! [registry]
//! composites = ["com.example.Documented"]
//! ```

use crate::composite::DescriptorOptions;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unknown composite type: {0}")]
    UnknownType(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Descriptor behavior.
    #[serde(default)]
    pub engine: EngineSection,

    /// Composite types to register.
    #[serde(default)]
    pub registry: RegistryConfig,
}

/// `[engine]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSection {
    /// Reject custom factory results of the wrong record type.
    #[serde(default = "default_true")]
    pub verify_factory_results: bool,
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            verify_factory_results: true,
        }
    }
}

/// `[registry]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Fully qualified names of the composite types to register.
    #[serde(default)]
    pub composites: Vec<String>,
}

fn default_true() -> bool {
    true
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        log::debug!("loading engine configuration from {}", path.display());
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for name in &self.registry.composites {
            if name.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "composite type name cannot be empty".to_string(),
                ));
            }
            if !seen.insert(name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "composite type {} listed twice",
                    name
                )));
            }
        }
        Ok(())
    }

    /// Descriptor options with the default instance accessor.
    pub fn descriptor_options(&self) -> DescriptorOptions {
        DescriptorOptions::default().verify_factory_results(self.engine.verify_factory_results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_config() {
        let config = EngineConfig::from_toml_str(
            r#"
            [engine]
            verify_factory_results = false

            [registry]
            composites = ["com.example.A", "com.example.B"]
            "#,
        )
        .unwrap();

        assert!(!config.engine.verify_factory_results);
        assert_eq!(config.registry.composites, vec!["com.example.A", "com.example.B"]);
        assert!(!config.descriptor_options().verify_factory_results);
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert!(config.engine.verify_factory_results);
        assert!(config.registry.composites.is_empty());
    }

    #[test]
    fn duplicate_composite_rejected() {
        let err = EngineConfig::from_toml_str(
            r#"
            [registry]
            composites = ["A", "A"]
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn empty_name_rejected() {
        let err = EngineConfig::from_toml_str("[registry]\ncomposites = [\" \"]\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn malformed_toml_rejected() {
        let err = EngineConfig::from_toml_str("[engine\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }
}
