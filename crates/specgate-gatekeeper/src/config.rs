//! Engine configuration
//!
//! One TOML document with a table per component:
//!
//! ```toml
//! [coverage]
//! pass_threshold = 70.0
//! max_gaps = 3
//!
//! [bias]
//! threshold = 0.5
//!
//! [conflict]
//! tolerance_factor = 2.0
//!
//! [paths]
//! rework_multiplier = 3.0
//! ```

use crate::{GatekeeperError, Result};
use serde::{Deserialize, Serialize};
use specgate_analyzer::{BiasConfig, CoverageConfig, PathConfig};
use specgate_conflict::ConflictConfig;
use std::path::Path;

/// Configuration for every component of the gate
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Coverage model and pass criteria
    pub coverage: CoverageConfig,

    /// Bias threshold and extra patterns
    pub bias: BiasConfig,

    /// Conflict rule settings
    pub conflict: ConflictConfig,

    /// Path cost model
    pub paths: PathConfig,
}

impl EngineConfig {
    /// Strict preset: higher bars everywhere
    pub fn strict() -> Self {
        let mut config = Self::default();
        config.coverage.pass_threshold = 85.0;
        config.coverage.max_gaps = 1;
        config.bias.threshold = 0.3;
        config.conflict.tolerance_factor = 1.5;
        config.conflict.critical_confidence = 0.8;
        config
    }

    /// Lenient preset: for early exploration
    pub fn lenient() -> Self {
        let mut config = Self::default();
        config.coverage.pass_threshold = 50.0;
        config.coverage.max_gaps = 5;
        config.bias.threshold = 0.7;
        config.conflict.tolerance_factor = 5.0;
        config
    }

    /// Look up a preset by name
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "default" => Some(Self::default()),
            "strict" => Some(Self::strict()),
            "lenient" => Some(Self::lenient()),
            _ => None,
        }
    }

    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        self.coverage.validate()?;
        self.bias.validate()?;
        self.conflict.validate()?;
        self.paths.validate()?;
        Ok(())
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(toml_str)
            .map_err(|e| GatekeeperError::Config(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to a TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| GatekeeperError::Config(format!("Failed to serialize to TOML: {}", e)))
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                GatekeeperError::NotFound(format!("config file {}", path.display()))
            }
            _ => GatekeeperError::Config(format!("Failed to read {}: {}", path.display(), e)),
        })?;
        Self::from_toml(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(EngineConfig::default().validate().is_ok());
        assert!(EngineConfig::strict().validate().is_ok());
        assert!(EngineConfig::lenient().validate().is_ok());
    }

    #[test]
    fn test_preset_lookup() {
        assert_eq!(EngineConfig::preset("strict").unwrap().bias.threshold, 0.3);
        assert!(EngineConfig::preset("paranoid").is_none());
    }

    #[test]
    fn test_toml_roundtrip_keeps_overrides() {
        let config = EngineConfig::strict();
        let text = config.to_toml().unwrap();
        let parsed = EngineConfig::from_toml(&text).unwrap();
        assert_eq!(parsed.coverage.max_gaps, 1);
        assert_eq!(parsed.conflict.groups.len(), config.conflict.groups.len());
    }

    #[test]
    fn test_partial_toml() {
        let config = EngineConfig::from_toml(
            r#"
            [bias]
            threshold = 0.6
            "#,
        )
        .unwrap();
        assert_eq!(config.bias.threshold, 0.6);
        assert_eq!(config.coverage.pass_threshold, 70.0);
    }

    #[test]
    fn test_invalid_values_rejected_on_load() {
        let err = EngineConfig::from_toml("[coverage]\npass_threshold = 150.0").unwrap_err();
        assert!(matches!(err, GatekeeperError::Config(_)));

        let err = EngineConfig::from_toml("[coverage.thresholds]\ngoals = 0").unwrap_err();
        assert!(matches!(err, GatekeeperError::Config(_)));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = EngineConfig::from_file("/nonexistent/specgate.toml").unwrap_err();
        assert!(matches!(err, GatekeeperError::NotFound(_)));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.toml");
        std::fs::write(&path, EngineConfig::lenient().to_toml().unwrap()).unwrap();
        let config = EngineConfig::from_file(&path).unwrap();
        assert_eq!(config.coverage.max_gaps, 5);
    }
}
