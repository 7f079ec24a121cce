//! Application Configuration
//! Source file locations, column names and display options, read from an
//! optional JSON file next to the working directory.

use crate::stats::DEFAULT_TOP_N;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "movie_explorer.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {error}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },
    #[error("Malformed config file {}: {error}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        error: serde_json::Error,
    },
    #[error("top_n must be at least 1")]
    InvalidTopN,
}

/// File names of the three input tables, relative to `data_dir`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceFiles {
    pub listings: PathBuf,
    pub details: PathBuf,
    pub ratings: PathBuf,
}

impl Default for SourceFiles {
    fn default() -> Self {
        Self {
            listings: PathBuf::from("movie_list.csv"),
            details: PathBuf::from("details.csv"),
            ratings: PathBuf::from("movie_rate.csv"),
        }
    }
}

/// Column names used for joining, filtering and ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub index: String,
    pub movie_name: String,
    pub director: String,
    pub area: String,
    pub rating: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            index: "index".to_string(),
            movie_name: "Movie Name".to_string(),
            director: "director".to_string(),
            area: "area".to_string(),
            rating: "Movie Rate".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub sources: SourceFiles,
    pub columns: ColumnNames,
    /// Number of entries kept in each frequency ranking.
    pub top_n: usize,
    /// Keep explorer filter inputs when switching pages.
    pub persist_filters: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            sources: SourceFiles::default(),
            columns: ColumnNames::default(),
            top_n: DEFAULT_TOP_N,
            persist_filters: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from `path`, falling back to defaults when the
    /// file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::info!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path).map_err(|error| ConfigError::Io {
            path: path.to_path_buf(),
            error,
        })?;
        let config = Self::from_json(&text).map_err(|err| match err {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })?;

        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate a JSON configuration document.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: AppConfig =
            serde_json::from_str(text).map_err(|error| ConfigError::Parse {
                path: PathBuf::new(),
                error,
            })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.top_n == 0 {
            return Err(ConfigError::InvalidTopN);
        }
        Ok(())
    }

    /// Compact JSON rendering of the effective configuration, for logging.
    pub fn describe(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{self:?}"))
    }

    pub fn listings_path(&self) -> PathBuf {
        self.data_dir.join(&self.sources.listings)
    }

    pub fn details_path(&self) -> PathBuf {
        self.data_dir.join(&self.sources.details)
    }

    pub fn ratings_path(&self) -> PathBuf {
        self.data_dir.join(&self.sources.ratings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.top_n, 20);
        assert_eq!(config.columns.rating, "Movie Rate");
    }

    #[test]
    fn test_partial_json_keeps_other_defaults() {
        let config =
            AppConfig::from_json(r#"{"data_dir": "data", "columns": {"area": "country"}}"#)
                .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.columns.area, "country");
        assert_eq!(config.columns.director, "director");
        assert_eq!(
            config.listings_path(),
            PathBuf::from("data").join("movie_list.csv")
        );
    }

    #[test]
    fn test_describe_reflects_overrides() {
        let config = AppConfig::from_json(r#"{"top_n": 5, "persist_filters": true}"#).unwrap();
        let described: serde_json::Value = serde_json::from_str(&config.describe()).unwrap();
        assert_eq!(described["top_n"], 5);
        assert_eq!(described["persist_filters"], true);
        assert_eq!(described["columns"]["rating"], "Movie Rate");
        assert_eq!(described["sources"]["ratings"], "movie_rate.csv");
    }

    #[test]
    fn test_zero_top_n_rejected() {
        let err = AppConfig::from_json(r#"{"top_n": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTopN));
    }

    #[test]
    fn test_malformed_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "{ not json").unwrap();

        let err = AppConfig::load(&path).unwrap_err();
        match err {
            ConfigError::Parse { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other}"),
        }
    }
}
