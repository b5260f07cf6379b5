//! # Configuration System
//!
//! YAML configuration for applications embedding the engine:
//!
//! - Engine settings (frame size, ground-truth verification cadence, drift tolerance)
//! - Logging configuration
//!
//! ## Configuration Search Path
//!
//! Configuration is loaded from the first file found:
//! 1. Path specified via `EFFT_CONFIG` environment variable
//! 2. `./efft.yaml` (current directory)
//! 3. `~/.config/efft/config.yaml` (user config)
//! 4. `/etc/efft/config.yaml` (system config)
//!
//! ## Example Configuration
//!
//! ```yaml
//! engine:
//!   framesize: 256
//!   verify_every: 1000
//!   tolerance: 1.0e-3
//!
//! logging:
//!   level: debug
//!   format: compact
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::frame_size::FrameSize;
use crate::observe::LogConfig;

/// Error type for configuration operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("config not found: {0}")]
    NotFound(String),
    #[error("failed to read config: {0}")]
    ReadError(String),
    #[error("failed to parse config: {0}")]
    ParseError(String),
    #[error("invalid config: {0}")]
    ValidationError(String),
    #[error("failed to write config: {0}")]
    WriteError(String),
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Frame side length; must be a supported power of two
    pub framesize: FrameSize,
    /// Compare against the reference transform every N stimuli (0 = never)
    pub verify_every: usize,
    /// Largest acceptable Frobenius distance from the reference transform
    pub tolerance: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            framesize: FrameSize::default(),
            verify_every: 0,
            tolerance: 1e-3,
        }
    }
}

impl EngineConfig {
    /// Whether the stimulus with 1-based sequence number `count` is due a check.
    pub fn verify_due(&self, count: usize) -> bool {
        self.verify_every != 0 && count % self.verify_every == 0
    }
}

/// Complete configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EfftConfig {
    /// Configuration version
    pub version: String,
    pub engine: EngineConfig,
    pub logging: LogConfig,
}

impl Default for EfftConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            engine: EngineConfig::default(),
            logging: LogConfig::default(),
        }
    }
}

impl EfftConfig {
    /// Load configuration from the default search path.
    ///
    /// Returns the default config if no file is found.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = std::env::var("EFFT_CONFIG") {
            let path = Path::new(&path);
            if !path.exists() {
                return Err(ConfigError::NotFound(path.display().to_string()));
            }
            return Self::load_from(path);
        }

        for path in &Self::config_search_paths() {
            if path.exists() {
                return Self::load_from(path);
            }
        }

        Ok(Self::default())
    }

    /// Load and validate configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(format!("{}: {}", path.display(), e)))?;

        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// Unsupported frame sizes are rejected here, since `FrameSize` only
    /// deserializes from the supported set.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content =
            serde_yaml::to_string(self).map_err(|e| ConfigError::WriteError(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| ConfigError::WriteError(format!("{}: {}", path.display(), e)))
    }

    /// Get configuration search paths (excluding `EFFT_CONFIG`).
    pub fn config_search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("./efft.yaml")];

        if let Some(dirs) = directories::ProjectDirs::from("", "", "efft") {
            paths.push(dirs.config_dir().join("config.yaml"));
        }

        paths.push(PathBuf::from("/etc/efft/config.yaml"));
        paths
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.engine.tolerance.is_finite() && self.engine.tolerance > 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "tolerance must be positive and finite, got {}",
                self.engine.tolerance
            )));
        }

        if let Some(ref filter) = self.logging.filter {
            if filter.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "logging.filter must not be empty".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Generate example configuration YAML.
    pub fn example_yaml() -> String {
        let config = Self {
            engine: EngineConfig {
                framesize: FrameSize::N256,
                verify_every: 1000,
                ..Default::default()
            },
            ..Default::default()
        };

        serde_yaml::to_string(&config).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observe::{LogFormat, LogLevel};

    #[test]
    fn test_default_config() {
        let config = EfftConfig::default();
        assert_eq!(config.engine.framesize, FrameSize::N128);
        assert_eq!(config.engine.verify_every, 0);
        assert_eq!(config.logging.level, LogLevel::Info);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
engine:
  framesize: 512
  verify_every: 250
  tolerance: 1.0e-6

logging:
  level: trace
  format: json
"#;

        let config = EfftConfig::parse(yaml).unwrap();
        assert_eq!(config.engine.framesize, FrameSize::N512);
        assert_eq!(config.engine.verify_every, 250);
        assert_eq!(config.engine.tolerance, 1e-6);
        assert_eq!(config.logging.level, LogLevel::Trace);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_parse_partial_yaml() {
        let config = EfftConfig::parse("engine:\n  framesize: 8\n").unwrap();
        assert_eq!(config.engine.framesize, FrameSize::N8);
        // Defaults should be applied
        assert_eq!(config.engine.tolerance, 1e-3);
        assert_eq!(config.logging, LogConfig::default());
    }

    #[test]
    fn test_parse_rejects_unsupported_framesize() {
        let err = EfftConfig::parse("engine:\n  framesize: 100\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(ref msg) if msg.contains("100")));
    }

    #[test]
    fn test_validation() {
        let mut config = EfftConfig::default();
        config.engine.tolerance = 0.0;
        assert!(config.validate().is_err());

        config.engine.tolerance = f64::NAN;
        assert!(config.validate().is_err());

        config.engine.tolerance = 1e-4;
        config.logging.filter = Some("  ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_verify_due() {
        let mut engine = EngineConfig::default();
        assert!(!engine.verify_due(1000));

        engine.verify_every = 10;
        assert!(!engine.verify_due(9));
        assert!(engine.verify_due(10));
        assert!(engine.verify_due(20));
    }

    #[test]
    fn test_example_yaml() {
        let yaml = EfftConfig::example_yaml();
        assert!(yaml.contains("engine:"));
        assert!(yaml.contains("framesize: 256"));
        let parsed = EfftConfig::parse(&yaml).unwrap();
        assert_eq!(parsed.engine.verify_every, 1000);
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("efft-config-{}.yaml", std::process::id()));
        let config = EfftConfig {
            engine: EngineConfig {
                framesize: FrameSize::N64,
                ..Default::default()
            },
            ..Default::default()
        };

        config.save(&path).unwrap();
        let loaded = EfftConfig::load_from(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = EfftConfig::load_from(Path::new("/nonexistent/efft.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError(_)));
    }

    #[test]
    fn test_save_to_missing_directory() {
        let path = Path::new("/nonexistent/efft/config.yaml");
        let err = EfftConfig::default().save(path).unwrap_err();
        assert!(matches!(err, ConfigError::WriteError(ref msg) if msg.contains("/nonexistent")));
    }

    #[test]
    fn test_config_search_paths() {
        let paths = EfftConfig::config_search_paths();
        assert!(paths[0].ends_with("efft.yaml"));
        assert!(paths.last().unwrap().starts_with("/etc/efft"));
    }
}
