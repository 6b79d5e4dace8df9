//! `fintrack.toml` configuration.
//!
//! Every key is optional; anything missing takes its default.
//!
//! ```toml
//! log_level = "info"
//!
//! [tax]
//! marginal_relief = "proportional"   # or "exact"
//!
//! [export]
//! date_format = "%d-%m-%Y"
//! include_metadata = true
//!
//! [gst]
//! supply = "intra_state"             # or "inter_state"
//! ```

use std::path::{Path, PathBuf};

use fintrack_core::{GstSupply, MarginalReliefMethod};
use fintrack_ledger::DEFAULT_CSV_DATE_FORMAT;
use serde::Deserialize;
use thiserror::Error;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "fintrack.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_level: String,
    pub tax: TaxConfig,
    pub export: ExportConfig,
    pub gst: GstConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            tax: TaxConfig::default(),
            export: ExportConfig::default(),
            gst: GstConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct TaxConfig {
    pub marginal_relief: MarginalReliefMethod,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// strftime pattern for CSV dates.
    pub date_format: String,
    pub include_metadata: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_CSV_DATE_FORMAT.to_string(),
            include_metadata: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct GstConfig {
    pub supply: GstSupply,
}

impl AppConfig {
    /// Reads `path`, returning `None` when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }
}
