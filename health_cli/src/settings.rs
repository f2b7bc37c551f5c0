//! CLI settings
//!
//! Loaded in layers, later sources overriding earlier ones:
//! 1. Built-in defaults
//! 2. A TOML file (`health.toml` in the working directory, or `--config`)
//! 3. Environment variables prefixed `HEALTH__`, e.g.
//!    `HEALTH__STORAGE__DATA_DIR=/tmp/health` sets `storage.data_dir`

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use health_core::units::{HeightUnit, WeightUnit};
use serde::{Deserialize, Serialize};

/// Config file looked up when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "health.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub storage: StorageSettings,
    pub report: ReportSettings,
    pub defaults: UnitDefaults,
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Directory holding `bmi-history.json`
    pub data_dir: PathBuf,
    /// Append each `bmi` result to the history
    pub record_history: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSettings {
    pub output_dir: PathBuf,
    /// Overrides the report heading when set
    #[serde(default)]
    pub title: Option<String>,
}

/// Units assumed when a command does not name one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitDefaults {
    pub weight_unit: WeightUnit,
    pub height_unit: HeightUnit,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage: StorageSettings {
                data_dir: PathBuf::from("health-data"),
                record_history: true,
            },
            report: ReportSettings {
                output_dir: PathBuf::from("."),
                title: None,
            },
            defaults: UnitDefaults {
                weight_unit: WeightUnit::Kg,
                height_unit: HeightUnit::Cm,
            },
            log_level: "warn".to_string(),
        }
    }
}

impl Settings {
    /// Load settings. An explicit `config_path` must exist; the default
    /// `health.toml` is optional.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let file = match config_path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let config = config::Config::builder()
            .add_source(config::Config::try_from(&Settings::default())?)
            .add_source(file)
            .add_source(
                config::Environment::with_prefix("HEALTH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to load configuration")?;

        config
            .try_deserialize()
            .context("Invalid configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;
    use std::fs;

    #[test]
    fn test_defaults_survive_empty_file() {
        let path = temp_dir().join(format!("health_settings_empty_{}.toml", std::process::id()));
        fs::write(&path, "").unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.storage.data_dir, PathBuf::from("health-data"));
        assert!(settings.storage.record_history);
        assert_eq!(settings.defaults.weight_unit, WeightUnit::Kg);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let path = temp_dir().join(format!("health_settings_file_{}.toml", std::process::id()));
        fs::write(
            &path,
            r#"
log_level = "debug"

[storage]
record_history = false

[report]
title = "Quarterly Check-in"

[defaults]
weight_unit = "lbs"
height_unit = "feet-inches"
"#,
        )
        .unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.log_level, "debug");
        assert!(!settings.storage.record_history);
        assert_eq!(settings.storage.data_dir, PathBuf::from("health-data"));
        assert_eq!(settings.report.title.as_deref(), Some("Quarterly Check-in"));
        assert_eq!(settings.defaults.weight_unit, WeightUnit::Lbs);
        assert_eq!(settings.defaults.height_unit, HeightUnit::FeetInches);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let path = temp_dir().join("health_settings_does_not_exist.toml");
        assert!(Settings::load(Some(&path)).is_err());
    }
}
