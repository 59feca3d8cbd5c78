//! User configuration stored as JSON in the application directory.

use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::debug;

use crate::{
    errors::LedgerError,
    ledger::{CategoryNode, CategoryTree},
    utils::paths::{self, ensure_dir, write_atomic},
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serde(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Overrides the default `<app dir>/records.txt` location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub records_file: Option<PathBuf>,
    /// Disables colors and icons in command output.
    #[serde(default)]
    pub plain_output: bool,
    /// Replaces the built-in category taxonomy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxonomy: Option<Vec<CategoryNode>>,
}

impl Config {
    /// Builds the category tree this configuration asks for.
    pub fn category_tree(&self) -> Result<CategoryTree, LedgerError> {
        match &self.taxonomy {
            Some(nodes) => CategoryTree::from_nodes(nodes.clone()),
            None => Ok(CategoryTree::default()),
        }
    }
}

/// Handles persistence of [`Config`] and resolution of data file locations.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    base: PathBuf,
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_base_dir(paths::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        ensure_dir(&base)?;
        let config_path = paths::config_file_in(&base);
        Ok(Self { base, config_path })
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn load(&self) -> Result<Config, ConfigError> {
        if self.config_path.exists() {
            let data = fs::read_to_string(&self.config_path)?;
            debug!(path = %self.config_path.display(), "config loaded");
            serde_json::from_str(&data).map_err(|err| ConfigError::Serde(err.to_string()))
        } else {
            Ok(Config::default())
        }
    }

    /// Writes `config` atomically. The shell only reads its config; this is
    /// for library callers that generate one.
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| ConfigError::Serde(err.to_string()))?;
        write_atomic(&self.config_path, &json)?;
        Ok(())
    }

    /// Location of the records file; relative overrides resolve against the
    /// application directory.
    pub fn records_path(&self, config: &Config) -> PathBuf {
        match &config.records_file {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => self.base.join(path),
            None => paths::records_file_in(&self.base),
        }
    }
}
