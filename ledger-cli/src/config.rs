//! Optional TOML settings file.
//!
//! ```toml
//! [formset]
//! prefix = "details"
//! max_rows = 1000
//!
//! [logging]
//! level = "info"
//! console = true
//! file = "ledger.log"
//! ```
//!
//! Every key is optional; command-line flags override what is read here.

use std::path::{Path, PathBuf};

use ledger_core::details::{DEFAULT_MAX_NUM_FORMS, DEFAULT_PREFIX};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("formset.max_rows must be at least 1")]
    ZeroMaxRows,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub formset: FormsetConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormsetConfig {
    pub prefix: String,
    /// Server-side row limit; a submitted `MAX_NUM_FORMS` above it is clamped.
    pub max_rows: usize,
}

impl Default for FormsetConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            max_rows: DEFAULT_MAX_NUM_FORMS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Bare level or full filter directive. `RUST_LOG` wins when set.
    pub level: Option<String>,
    pub console: bool,
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: None,
            console: true,
            file: None,
        }
    }
}

impl Config {
    pub fn from_toml_str(
        contents: &str,
        path: &Path,
    ) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if config.formset.max_rows == 0 {
            return Err(ConfigError::ZeroMaxRows);
        }
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents, path)
    }

    /// Loads `path` when given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }
}
