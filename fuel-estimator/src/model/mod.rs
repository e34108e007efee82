//! The model contract and its JSON-serialized pipeline implementation.

mod encoder;
mod estimator;
mod pipeline;

pub use encoder::{CategoricalColumn, NumericColumn, Preprocessor};
pub use estimator::{Estimator, Node, Tree};
pub use pipeline::{Pipeline, FORMAT_VERSION};

use crate::{PredictError, VehicleRecord};

/// A function from vehicle records to fuel-efficiency estimates in miles per
/// gallon.
///
/// Implementations must be deterministic and must return one estimate per
/// record on success.
pub trait Model: Send + Sync {
    fn predict(&self, records: &[VehicleRecord]) -> Result<Vec<f64>, PredictError>;
}
