//! Dashboard configuration.
//!
//! Settings are layered: built-in defaults, then an optional `rsf.toml`, then
//! environment variables. Every entry point (server, exporter) goes through
//! [`DashboardConfig::load`].

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::pipeline::loader::{DEFAULT_OCCUPANCY_COLUMN, DEFAULT_TIMESTAMP_COLUMN};
use crate::pipeline::LoaderOptions;

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "RSF_CONFIG";

/// Lower and upper bound of the colour-scale maximum.
pub const ZMAX_RANGE: (f64, f64) = (60.0, 140.0);

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Invalid value for {key}: '{value}'")]
    InvalidEnv { key: String, value: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Runtime settings shared by the server and the exporter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub timestamp_column: String,
    pub occupancy_column: String,
    pub filter_open_hours: bool,
    /// Colour-scale maximum in percent.
    pub zmax: f64,
    /// Multiplier from stored fractions to displayed percent.
    pub percent_scale: f64,
    pub output_path: PathBuf,
    /// Whether HTTP callers may point the pipeline at another CSV.
    pub allow_source_override: bool,
    pub host: String,
    pub port: u16,
}

fn default_data_path() -> PathBuf {
    PathBuf::from("scraped_data2.csv")
}

fn default_output_path() -> PathBuf {
    PathBuf::from("dashboard.html")
}

fn default_zmax() -> f64 {
    120.0
}

fn default_percent_scale() -> f64 {
    100.0
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            timestamp_column: DEFAULT_TIMESTAMP_COLUMN.to_string(),
            occupancy_column: DEFAULT_OCCUPANCY_COLUMN.to_string(),
            filter_open_hours: true,
            zmax: default_zmax(),
            percent_scale: default_percent_scale(),
            output_path: default_output_path(),
            allow_source_override: false,
            host: default_host(),
            port: default_port(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from a TOML file.
    ///
    /// Keys missing from the file keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load configuration from the default location.
    ///
    /// Uses `RSF_CONFIG` when set, otherwise searches for `rsf.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    ///
    /// Returns `Ok(None)` when no file exists.
    pub fn from_default_location() -> Result<Option<Self>, ConfigError> {
        if let Ok(explicit) = env::var(CONFIG_PATH_ENV) {
            return Self::from_file(explicit).map(Some);
        }

        let search_paths = [
            PathBuf::from("rsf.toml"),
            PathBuf::from("backend/rsf.toml"),
            PathBuf::from("../rsf.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                log::info!("Loading configuration from {}", path.display());
                return Self::from_file(&path).map(Some);
            }
        }

        Ok(None)
    }

    /// Defaults, then the config file if any, then environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_default_location()?.unwrap_or_default();
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay values from `RSF_*`, `HOST` and `PORT` environment variables.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Some(v) = env_string("RSF_DATA_PATH") {
            self.data_path = PathBuf::from(v);
        }
        if let Some(v) = env_string("RSF_TIMESTAMP_COLUMN") {
            self.timestamp_column = v;
        }
        if let Some(v) = env_string("RSF_OCCUPANCY_COLUMN") {
            self.occupancy_column = v;
        }
        if let Some(v) = env_parsed("RSF_FILTER_OPEN_HOURS", parse_bool)? {
            self.filter_open_hours = v;
        }
        if let Some(v) = env_parsed("RSF_ZMAX", |s| s.parse::<f64>().ok())? {
            self.zmax = v;
        }
        if let Some(v) = env_parsed("RSF_PERCENT_SCALE", |s| s.parse::<f64>().ok())? {
            self.percent_scale = v;
        }
        if let Some(v) = env_string("RSF_OUTPUT_PATH") {
            self.output_path = PathBuf::from(v);
        }
        if let Some(v) = env_parsed("RSF_ALLOW_SOURCE_OVERRIDE", parse_bool)? {
            self.allow_source_override = v;
        }
        if let Some(v) = env_string("HOST") {
            self.host = v;
        }
        if let Some(v) = env_parsed("PORT", |s| s.parse::<u16>().ok())? {
            self.port = v;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_zmax(self.zmax)?;
        if !self.percent_scale.is_finite() || self.percent_scale <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "percent_scale must be a positive number, got {}",
                self.percent_scale
            )));
        }
        if self.timestamp_column.trim().is_empty() || self.occupancy_column.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "column names must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn loader_options(&self) -> LoaderOptions {
        LoaderOptions::new(&self.timestamp_column, &self.occupancy_column)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Check a colour-scale maximum against [`ZMAX_RANGE`].
pub fn validate_zmax(zmax: f64) -> Result<(), ConfigError> {
    let (lo, hi) = ZMAX_RANGE;
    if zmax.is_finite() && (lo..=hi).contains(&zmax) {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "zmax must be between {} and {}, got {}",
            lo, hi, zmax
        )))
    }
}

/// Lenient boolean parsing for env vars and query strings.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn env_string(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_parsed<T>(key: &str, parse: impl Fn(&str) -> Option<T>) -> Result<Option<T>, ConfigError> {
    match env_string(key) {
        None => Ok(None),
        Some(raw) => parse(raw.trim()).map(Some).ok_or(ConfigError::InvalidEnv {
            key: key.to_string(),
            value: raw,
        }),
    }
}
