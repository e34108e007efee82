//! The model artifact: a serialized preprocessing + estimator pipeline,
//! loaded once from disk.

use std::fs;
use std::path::Path;

use eyre::{Result, WrapErr};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::hash::sha256;
use crate::model::{Estimator, Model, Preprocessor};
use crate::{Error, PredictError, VehicleRecord};

/// The artifact format version understood by this build.
pub const FORMAT_VERSION: u32 = 1;

/// A pre-trained model artifact: a preprocessing stage followed by an
/// estimator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    pub format_version: u32,
    #[serde(default)]
    pub name: Option<String>,
    pub preprocessor: Preprocessor,
    pub estimator: Estimator,
}

impl Pipeline {
    /// Load and validate a model artifact from the given file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Attempting to load model artifact: {}", path.display());
        let content = fs::read(path)
            .map_err(|e| Error::Io(path.display().to_string(), e))
            .wrap_err_with(|| Error::FailedToLoadModel(path.to_path_buf()))?;
        let pipeline = Self::from_slice(&content)
            .wrap_err_with(|| Error::FailedToLoadModel(path.to_path_buf()))?;
        info!(
            "Loaded model \"{}\" from {} (sha256 {})",
            pipeline.name(),
            path.display(),
            sha256(&content)
        );
        Ok(pipeline)
    }

    /// Parse and validate a model artifact from its JSON representation.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, Error> {
        let pipeline: Self = serde_json::from_slice(bytes)?;
        pipeline.validate()?;
        Ok(pipeline)
    }

    /// Check that the artifact is of a supported version and that its stages
    /// fit together.
    pub fn validate(&self) -> Result<(), Error> {
        if self.format_version != FORMAT_VERSION {
            return Err(Error::UnsupportedFormatVersion(
                self.format_version,
                FORMAT_VERSION,
            ));
        }
        self.preprocessor.validate()?;
        self.estimator.validate(self.preprocessor.width())
    }

    /// A human-readable name for the model.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("unnamed")
    }
}

impl Model for Pipeline {
    fn predict(&self, records: &[VehicleRecord]) -> Result<Vec<f64>, PredictError> {
        records
            .iter()
            .map(|record| {
                let features = self.preprocessor.encode(record)?;
                Ok(self.estimator.predict(&features))
            })
            .collect()
    }
}
