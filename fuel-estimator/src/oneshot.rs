//! Single-record estimation outside the HTTP server, as used by the command
//! line `predict` command.

use std::fmt;
use std::path::{Path, PathBuf};

use log::debug;

use crate::form::sanitize;
use crate::predict::predict;
use crate::view::{load_failure_message, PREDICT_FAILURE_MESSAGE};
use crate::{Pipeline, Prediction, VehicleRecord};

/// The result of estimating a single vehicle.
#[derive(Debug, Clone, PartialEq)]
pub enum Estimate {
    Estimated(Prediction),
    ModelUnavailable(PathBuf),
    Failed,
}

impl Estimate {
    /// Process exit code: 0 on success, 1 when the model rejected the record
    /// and 2 when no model could be loaded.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Estimated(_) => 0,
            Self::Failed => 1,
            Self::ModelUnavailable(_) => 2,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Estimated(_))
    }
}

impl fmt::Display for Estimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Estimated(prediction) => write!(f, "{}", prediction),
            Self::ModelUnavailable(path) => write!(f, "{}", load_failure_message(path)),
            Self::Failed => write!(f, "{}", PREDICT_FAILURE_MESSAGE),
        }
    }
}

/// Load the model at `model_path` and estimate the fuel efficiency of
/// `record`, after clamping its numeric fields.
pub fn estimate<P: AsRef<Path>>(model_path: P, record: VehicleRecord) -> Estimate {
    let model_path = model_path.as_ref();
    let pipeline = match Pipeline::load(model_path) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            debug!("{:?}", e);
            return Estimate::ModelUnavailable(model_path.to_path_buf());
        }
    };
    match predict(&pipeline, &sanitize(record)) {
        Ok(prediction) => Estimate::Estimated(prediction),
        Err(_) => {
            debug!("Prediction failed");
            Estimate::Failed
        }
    }
}
