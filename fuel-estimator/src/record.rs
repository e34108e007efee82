//! The vehicle query record: one hypothetical vehicle, as described by the
//! user, in the shape the model expects.

use serde::{Deserialize, Serialize};

use crate::form;

/// Column names understood by the model, in the order the form presents them
/// to the model.
pub const COLUMNS: &[&str] = &[
    "cylinders",
    "displacement",
    "fuelType1",
    "trany",
    "VClass",
    "drive",
    "fuelCost08",
    "model_year",
];

/// A flat set of user-supplied vehicle attributes.
///
/// Categorical attributes are kept as plain strings. The form only offers a
/// fixed set of options, but whether a value is meaningful is for the model to
/// decide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRecord {
    pub cylinders: i64,
    pub displacement: f64,
    #[serde(rename = "fuelType1")]
    pub fuel_type: String,
    #[serde(rename = "trany")]
    pub transmission: String,
    #[serde(rename = "VClass")]
    pub vehicle_class: String,
    pub drive: String,
    #[serde(rename = "fuelCost08")]
    pub fuel_cost: i64,
    pub model_year: i64,
}

impl VehicleRecord {
    /// Look up a numeric column by its model column name.
    pub fn numeric(&self, column: &str) -> Option<f64> {
        match column {
            "cylinders" => Some(self.cylinders as f64),
            "displacement" => Some(self.displacement),
            "fuelCost08" => Some(self.fuel_cost as f64),
            "model_year" => Some(self.model_year as f64),
            _ => None,
        }
    }

    /// Look up a categorical column by its model column name.
    pub fn categorical(&self, column: &str) -> Option<&str> {
        match column {
            "fuelType1" => Some(&self.fuel_type),
            "trany" => Some(&self.transmission),
            "VClass" => Some(&self.vehicle_class),
            "drive" => Some(&self.drive),
            _ => None,
        }
    }
}

impl Default for VehicleRecord {
    fn default() -> Self {
        Self {
            cylinders: form::CYLINDERS.default as i64,
            displacement: form::DISPLACEMENT.default,
            fuel_type: form::FUEL_TYPE.first().to_string(),
            transmission: form::TRANSMISSION.first().to_string(),
            vehicle_class: form::VEHICLE_CLASS.first().to_string(),
            drive: form::DRIVE.first().to_string(),
            fuel_cost: form::FUEL_COST.default as i64,
            model_year: form::MODEL_YEAR.default as i64,
        }
    }
}
