//! Configuration-related functionality for the estimator.

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::Error;

/// Estimator configuration.
///
/// Every field has a default, so a configuration file only needs to name the
/// values it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the serialized model artifact, relative to the working
    /// directory unless absolute.
    pub model_path: PathBuf,
    /// Address the HTTP server listens on.
    pub bind: String,
    /// Page title.
    pub title: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("best_model.json"),
            bind: "127.0.0.1:8501".to_string(),
            title: "Fuel Efficiency Estimator".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the given file if it exists, otherwise fall
    /// back to the defaults.
    pub fn load_or_default<P: AsRef<Path>>(maybe_config_file: P) -> Result<Self> {
        let maybe_config_file = maybe_config_file.as_ref();
        debug!(
            "Attempting to load config file: {}",
            maybe_config_file.display()
        );
        if !maybe_config_file.exists() {
            debug!(
                "No such configuration file, using defaults: {}",
                maybe_config_file.display()
            );
            return Ok(Self::default());
        }
        let config_path = maybe_config_file
            .canonicalize()
            .map_err(|e| Error::Io(maybe_config_file.display().to_string(), e))?;
        let config = Self::load_from_file(&config_path)
            .wrap_err_with(|| Error::FailedToLoadConfig(config_path.clone()))?;
        debug!("Loaded configuration from {}", config_path.display());
        Ok(config)
    }

    /// Load configuration from a JSON or YAML file, chosen by extension.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| Error::CannotDetermineFileType(path.to_path_buf()))?;
        let is_json = match ext {
            "json" => true,
            "yml" | "yaml" => false,
            _ => return Err(Error::CannotDetermineFileType(path.to_path_buf())),
        };
        let content =
            fs::read_to_string(path).map_err(|e| Error::Io(path.display().to_string(), e))?;
        if is_json {
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(serde_yaml::from_str(&content)?)
        }
    }

    /// Override the model artifact path.
    pub fn with_model_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.model_path = path.into();
        self
    }

    /// Override the listen address.
    pub fn with_bind<S: Into<String>>(mut self, bind: S) -> Self {
        self.bind = bind.into();
        self
    }

    /// Parse the configured listen address.
    pub fn bind_addr(&self) -> Result<SocketAddr, Error> {
        self.bind
            .parse()
            .map_err(|e| Error::InvalidBindAddress(self.bind.clone(), e))
    }
}
