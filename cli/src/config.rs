//! Where the CLI finds the API.
//!
//! Precedence, highest first: `--base-url`, `SUBWATCH_BASE_URL`, the
//! `base_url` key of the TOML file given with `--config`, then
//! `DEFAULT_BASE_URL`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";
pub const BASE_URL_ENV: &str = "SUBWATCH_BASE_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Contents of the TOML config file. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub base_url: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
}

impl Settings {
    pub fn resolve(flag: Option<&str>, env: Option<&str>, file: Option<&FileConfig>) -> Self {
        let set = |url: &&str| !url.is_empty();
        let from_file = file.and_then(|f| f.base_url.as_deref());
        let base_url = flag
            .filter(set)
            .or(env.filter(set))
            .or(from_file.filter(set))
            .unwrap_or(DEFAULT_BASE_URL)
            .to_string();
        Self { base_url }
    }
}
