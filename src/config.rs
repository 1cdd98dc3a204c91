//! Application settings, read from an optional JSON file.

use crate::charts::ChartLimits;
use crate::data::MoneyFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming an alternative settings file.
pub const CONFIG_ENV: &str = "FINESCOPE_CONFIG";
/// Settings file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "finescope.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Dataset opened at startup.
    pub data_path: Option<PathBuf>,
    pub currency_symbol: String,
    pub thousands_separator: String,
    pub top_categories: usize,
    pub top_regions: usize,
    pub top_companies: usize,
    pub window_width: f32,
    pub window_height: f32,
    pub export_width: u32,
    pub export_height: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            currency_symbol: "$".to_string(),
            thousands_separator: ".".to_string(),
            top_categories: 15,
            top_regions: 10,
            top_companies: 10,
            window_width: 1400.0,
            window_height: 900.0,
            export_width: 1200,
            export_height: 800,
        }
    }
}

impl AppConfig {
    /// Read settings from `FINESCOPE_CONFIG`, else `finescope.json`.
    /// A missing default file yields the defaults; an explicitly named one must exist.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_path(Path::new(&path)),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::from_path(path)
                } else {
                    log::debug!("No {} found, using default settings", DEFAULT_CONFIG_FILE);
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded settings from {}", path.display());
        Ok(config)
    }

    pub fn money(&self) -> MoneyFormat {
        MoneyFormat::new(&self.currency_symbol, &self.thousands_separator)
    }

    pub fn chart_limits(&self) -> ChartLimits {
        ChartLimits {
            categories: self.top_categories,
            regions: self.top_regions,
            companies: self.top_companies,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"currency_symbol": "CLP ", "top_regions": 5}"#).unwrap();
        assert_eq!(config.currency_symbol, "CLP ");
        assert_eq!(config.top_regions, 5);
        assert_eq!(config.top_companies, 10);
        assert_eq!(config.thousands_separator, ".");
        assert_eq!(config.money().format(1500), "CLP 1.500");
        assert_eq!(config.chart_limits().regions, 5);
    }

    #[test]
    fn test_from_path_errors() {
        let dir = std::env::temp_dir().join(format!("finescope-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let missing = dir.join("nope.json");
        assert!(matches!(
            AppConfig::from_path(&missing),
            Err(ConfigError::Io { .. })
        ));

        let bad = dir.join("bad.json");
        std::fs::write(&bad, "{ top_regions: }").unwrap();
        assert!(matches!(
            AppConfig::from_path(&bad),
            Err(ConfigError::Parse { .. })
        ));

        let good = dir.join("good.json");
        std::fs::write(&good, r#"{"data_path": "multas.csv"}"#).unwrap();
        let config = AppConfig::from_path(&good).unwrap();
        assert_eq!(config.data_path, Some(PathBuf::from("multas.csv")));

        std::fs::remove_dir_all(&dir).ok();
    }
}
