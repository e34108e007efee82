//! Feature encoding: turns a [`VehicleRecord`] into the numeric feature vector
//! the estimator was trained on.

use serde::{Deserialize, Serialize};

use crate::{Error, PredictError, VehicleRecord};

/// A numeric column, standardised as `(x - mean) / scale`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericColumn {
    pub column: String,
    #[serde(default)]
    pub mean: f64,
    #[serde(default = "unit_scale")]
    pub scale: f64,
}

fn unit_scale() -> f64 {
    1.0
}

/// A categorical column, one-hot encoded against a fixed list of categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalColumn {
    pub column: String,
    pub categories: Vec<String>,
}

/// Column-wise preprocessing. Numeric columns are emitted first, in the order
/// given, followed by the one-hot blocks of the categorical columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preprocessor {
    #[serde(default)]
    pub numeric: Vec<NumericColumn>,
    #[serde(default)]
    pub categorical: Vec<CategoricalColumn>,
}

impl Preprocessor {
    /// The number of features produced for each record.
    pub fn width(&self) -> usize {
        self.numeric.len()
            + self
                .categorical
                .iter()
                .map(|c| c.categories.len())
                .sum::<usize>()
    }

    /// Checks that every column exists in a [`VehicleRecord`] with the right
    /// kind and that the encoding parameters are usable.
    pub fn validate(&self) -> Result<(), Error> {
        let probe = VehicleRecord::default();
        for col in &self.numeric {
            if probe.numeric(&col.column).is_none() {
                return Err(Error::UnknownColumn(col.column.clone()));
            }
            if !col.mean.is_finite() || !col.scale.is_finite() || col.scale == 0.0 {
                return Err(Error::InvalidArtifact(format!(
                    "numeric column {} has unusable mean/scale ({}, {})",
                    col.column, col.mean, col.scale
                )));
            }
        }
        for col in &self.categorical {
            if probe.categorical(&col.column).is_none() {
                return Err(Error::UnknownColumn(col.column.clone()));
            }
            if col.categories.is_empty() {
                return Err(Error::InvalidArtifact(format!(
                    "categorical column {} has no categories",
                    col.column
                )));
            }
        }
        Ok(())
    }

    /// Encode a single record.
    ///
    /// Fails if a categorical value is not one of the known categories for its
    /// column.
    pub fn encode(&self, record: &VehicleRecord) -> Result<Vec<f64>, PredictError> {
        let mut features = Vec::with_capacity(self.width());
        for col in &self.numeric {
            let x = record
                .numeric(&col.column)
                .ok_or_else(|| PredictError::MissingColumn(col.column.clone()))?;
            if !x.is_finite() {
                return Err(PredictError::NonFiniteInput {
                    column: col.column.clone(),
                    value: x,
                });
            }
            features.push((x - col.mean) / col.scale);
        }
        for col in &self.categorical {
            let value = record
                .categorical(&col.column)
                .ok_or_else(|| PredictError::MissingColumn(col.column.clone()))?;
            let hot = col
                .categories
                .iter()
                .position(|c| c == value)
                .ok_or_else(|| PredictError::UnknownCategory {
                    column: col.column.clone(),
                    value: value.to_string(),
                })?;
            features.extend((0..col.categories.len()).map(|i| if i == hot { 1.0 } else { 0.0 }));
        }
        Ok(features)
    }
}
