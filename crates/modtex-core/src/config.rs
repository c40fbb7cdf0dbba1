//! Configuration management for modtex.
//!
//! Configuration is loaded from the platform config directory (falling
//! back to `~/.modtex/config.toml`) with defaults matching the values the
//! tools have always shipped with. Every section is `#[serde(default)]`,
//! so a partial config file only overrides what it names.

use crate::error::ConfigError;
use crate::pixel::Rgb;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for modtex.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Archive scanner settings
    pub scan: ScanConfig,

    /// Darkener settings (shared by uniform and grayscale-only modes)
    pub darken: DarkenConfig,

    /// Report and log-rotation settings
    pub report: ReportConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories, falling back to
    /// `~/.modtex/config.toml` if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "modtex", "modtex")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".modtex").join("config.toml")
            })
    }

    /// Get the resolved mods directory path (with ~ expansion).
    pub fn mods_dir(&self) -> PathBuf {
        let expanded = shellexpand::tilde(&self.scan.mods_dir);
        PathBuf::from(expanded.into_owned())
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }

    /// Validate configuration values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scan.target_colors.is_empty() {
            return Err(ConfigError::ValidationError(
                "scan.target_colors must name at least one color".into(),
            ));
        }
        if self.scan.archive_extension.is_empty() {
            return Err(ConfigError::ValidationError(
                "scan.archive_extension must not be empty".into(),
            ));
        }
        if !(self.darken.factor > 0.0 && self.darken.factor < 1.0) {
            return Err(ConfigError::ValidationError(
                "darken.factor must be strictly between 0.0 and 1.0".into(),
            ));
        }
        if self.darken.extensions.is_empty() {
            return Err(ConfigError::ValidationError(
                "darken.extensions must name at least one extension".into(),
            ));
        }
        if self.report.max_backups == 0 {
            return Err(ConfigError::ValidationError(
                "report.max_backups must be >= 1".into(),
            ));
        }
        Ok(())
    }
}

/// Archive scanner settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Directory containing the mod archives
    pub mods_dir: String,

    /// Colors the scanner looks for (exact match, no tolerance)
    pub target_colors: Vec<Rgb>,

    /// Archive extension, matched case-insensitively
    pub archive_extension: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            mods_dir: "~/mods".to_string(),
            target_colors: vec![Rgb::new(198, 198, 198), Rgb::new(85, 85, 85)],
            archive_extension: "jar".to_string(),
        }
    }
}

/// Darkener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DarkenConfig {
    /// Channel multiplier, strictly between 0 and 1
    pub factor: f32,

    /// Max pairwise channel difference for a pixel to count as gray
    pub gray_tolerance: u8,

    /// Image extensions eligible for rewriting
    pub extensions: Vec<String>,
}

impl Default for DarkenConfig {
    fn default() -> Self {
        Self {
            factor: 0.399,
            gray_tolerance: 5,
            extensions: vec!["png".to_string()],
        }
    }
}

/// Report and log-rotation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Number of historical report logs to retain
    pub max_backups: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { max_backups: 5 }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.darken.factor, 0.399);
        assert_eq!(config.darken.gray_tolerance, 5);
        assert_eq!(config.report.max_backups, 5);
        assert_eq!(config.scan.target_colors.len(), 2);
    }

    #[test]
    fn test_default_config_passes_validation() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_config_to_toml() {
        let config = Config::default();
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("[scan]"));
        assert!(toml.contains("[darken]"));
        assert!(toml.contains("[report]"));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: Config = toml::from_str("[darken]\nfactor = 0.5\n").unwrap();
        assert_eq!(config.darken.factor, 0.5);
        assert_eq!(config.darken.gray_tolerance, 5);
        assert_eq!(config.scan.archive_extension, "jar");
    }

    #[test]
    fn test_validate_rejects_factor_of_one() {
        let mut config = Config::default();
        config.darken.factor = 1.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("darken.factor"));
    }

    #[test]
    fn test_validate_rejects_zero_factor() {
        let mut config = Config::default();
        config.darken.factor = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_color_set() {
        let mut config = Config::default();
        config.scan.target_colors.clear();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("target_colors"));
    }

    #[test]
    fn test_validate_rejects_zero_backups() {
        let mut config = Config::default();
        config.report.max_backups = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_backups"));
    }

    #[test]
    fn test_load_from_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[darken]\nfactor = 2.5\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
