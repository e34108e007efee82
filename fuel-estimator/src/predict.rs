//! The predict operation: one record in, one formatted estimate out.

use std::fmt;

use log::debug;

use crate::{Model, PredictError, VehicleRecord};

/// A finite fuel-efficiency estimate, in miles per gallon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction(f64);

impl Prediction {
    pub fn mpg(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Predicted Fuel Efficiency: {:.2} MPG", self.0)
    }
}

/// Run the model on a single record and take its first estimate.
pub fn predict(model: &dyn Model, record: &VehicleRecord) -> Result<Prediction, PredictError> {
    let outputs = model.predict(std::slice::from_ref(record))?;
    let mpg = *outputs.first().ok_or(PredictError::EmptyOutput)?;
    if !mpg.is_finite() {
        return Err(PredictError::NonFinite(mpg));
    }
    debug!("Predicted {} MPG for {:?}", mpg, record);
    Ok(Prediction(mpg))
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;
    use crate::model::Pipeline;

    /// A model that always returns the same outputs.
    pub(crate) struct Fixed(pub Vec<f64>);

    impl Model for Fixed {
        fn predict(&self, _records: &[VehicleRecord]) -> Result<Vec<f64>, PredictError> {
            Ok(self.0.clone())
        }
    }

    /// A model that only accepts the drive types it was trained on.
    pub(crate) struct DriveAware;

    impl Model for DriveAware {
        fn predict(&self, records: &[VehicleRecord]) -> Result<Vec<f64>, PredictError> {
            records
                .iter()
                .map(|r| match r.drive.as_str() {
                    "FWD" | "RWD" | "4WD" | "AWD" => Ok(30.0 - r.displacement),
                    other => Err(PredictError::UnknownCategory {
                        column: "drive".to_string(),
                        value: other.to_string(),
                    }),
                })
                .collect()
        }
    }

    fn example_record() -> VehicleRecord {
        VehicleRecord {
            cylinders: 4,
            displacement: 2.0,
            fuel_type: "Regular Gasoline".to_string(),
            transmission: "Automatic".to_string(),
            vehicle_class: "Compact Cars".to_string(),
            drive: "FWD".to_string(),
            fuel_cost: 2000,
            model_year: 2020,
        }
    }

    #[test]
    fn formats_to_two_decimal_places() {
        let p = predict(&Fixed(vec![31.4567, 12.0]), &example_record()).unwrap();
        assert_eq!(p.mpg(), 31.4567);
        assert_eq!(p.to_string(), "Predicted Fuel Efficiency: 31.46 MPG");

        let p = predict(&Fixed(vec![28.0]), &example_record()).unwrap();
        assert_eq!(p.to_string(), "Predicted Fuel Efficiency: 28.00 MPG");
    }

    #[test]
    fn example_scenario_with_pipeline() {
        let pipeline = Pipeline::load(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/fixtures/best_model.json"
        ))
        .unwrap();
        let p = predict(&pipeline, &example_record()).unwrap();
        assert_eq!(
            p.to_string(),
            format!("Predicted Fuel Efficiency: {:.2} MPG", p.mpg())
        );
    }

    #[test]
    fn repeated_predictions_are_identical() {
        let pipeline = Pipeline::load(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/fixtures/best_model.json"
        ))
        .unwrap();
        let record = example_record();
        let first = predict(&pipeline, &record).unwrap();
        for _ in 0..10 {
            assert_eq!(predict(&pipeline, &record).unwrap(), first);
        }
    }

    #[test]
    fn boundary_records_predict() {
        let pipeline = Pipeline::load(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/fixtures/best_model.json"
        ))
        .unwrap();
        let base = example_record();
        let records = [
            VehicleRecord { cylinders: 3, ..base.clone() },
            VehicleRecord { cylinders: 16, ..base.clone() },
            VehicleRecord { displacement: 0.5, ..base.clone() },
            VehicleRecord { displacement: 10.0, ..base.clone() },
            VehicleRecord { model_year: 1980, ..base.clone() },
            VehicleRecord { model_year: 2025, ..base },
        ];
        for record in &records {
            let p = predict(&pipeline, record).unwrap();
            assert!(p.mpg().is_finite(), "{:?}", record);
        }
    }

    #[test]
    fn unknown_category_is_an_error() {
        let record = VehicleRecord {
            drive: "6WD".to_string(),
            ..example_record()
        };
        assert!(matches!(
            predict(&DriveAware, &record),
            Err(PredictError::UnknownCategory { .. })
        ));
        assert!(predict(&DriveAware, &example_record()).is_ok());
    }

    #[test]
    fn empty_and_non_finite_outputs_are_errors() {
        assert_eq!(
            predict(&Fixed(vec![]), &example_record()),
            Err(PredictError::EmptyOutput)
        );
        assert!(matches!(
            predict(&Fixed(vec![f64::NAN]), &example_record()),
            Err(PredictError::NonFinite(_))
        ));
        assert_eq!(
            predict(&Fixed(vec![f64::INFINITY]), &example_record()),
            Err(PredictError::NonFinite(f64::INFINITY))
        );
    }
}
