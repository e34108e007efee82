//! Form field definitions and assembly of a [`VehicleRecord`] from submitted
//! form values.

use std::collections::HashMap;

use crate::VehicleRecord;

/// Whether a numeric field holds whole numbers or decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericKind {
    Integer,
    Decimal,
}

/// A numeric input with an inclusive range and a default value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericField {
    pub name: &'static str,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub kind: NumericKind,
}

impl NumericField {
    /// Bring a value into this field's range. Integer fields are rounded to
    /// the nearest whole number first. Non-finite values become the default.
    pub fn clamp(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return self.default;
        }
        let value = match self.kind {
            NumericKind::Integer => value.round(),
            NumericKind::Decimal => value,
        };
        value.clamp(self.min, self.max)
    }

    /// Parse a submitted value, falling back to the default if it is not a
    /// number.
    pub fn parse(&self, raw: Option<&str>) -> f64 {
        match raw.map(str::trim).and_then(|s| s.parse::<f64>().ok()) {
            Some(v) => self.clamp(v),
            None => self.default,
        }
    }

    /// Increment used by the input control.
    pub fn step(&self) -> f64 {
        match self.kind {
            NumericKind::Integer => 1.0,
            NumericKind::Decimal => 0.01,
        }
    }
}

/// A single-choice input with an enumerated set of options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceField {
    pub name: &'static str,
    pub label: &'static str,
    pub options: &'static [&'static str],
}

impl ChoiceField {
    /// The option selected when nothing else has been chosen.
    pub fn first(&self) -> &'static str {
        self.options[0]
    }
}

pub const CYLINDERS: NumericField = NumericField {
    name: "cylinders",
    label: "Cylinders",
    min: 3.0,
    max: 16.0,
    default: 4.0,
    kind: NumericKind::Integer,
};

pub const DISPLACEMENT: NumericField = NumericField {
    name: "displacement",
    label: "Engine Displacement (liters)",
    min: 0.5,
    max: 10.0,
    default: 2.0,
    kind: NumericKind::Decimal,
};

pub const FUEL_COST: NumericField = NumericField {
    name: "fuelCost08",
    label: "Annual Fuel Cost (USD)",
    min: 500.0,
    max: 6000.0,
    default: 2000.0,
    kind: NumericKind::Integer,
};

pub const MODEL_YEAR: NumericField = NumericField {
    name: "model_year",
    label: "Model Year",
    min: 1980.0,
    max: 2025.0,
    default: 2020.0,
    kind: NumericKind::Integer,
};

pub const FUEL_TYPE: ChoiceField = ChoiceField {
    name: "fuelType1",
    label: "Fuel Type",
    options: &[
        "Regular Gasoline",
        "Premium Gasoline",
        "Diesel",
        "Electricity",
        "CNG",
    ],
};

pub const TRANSMISSION: ChoiceField = ChoiceField {
    name: "trany",
    label: "Transmission",
    options: &["Automatic", "Manual", "Auto (AM-S)", "CVT"],
};

pub const VEHICLE_CLASS: ChoiceField = ChoiceField {
    name: "VClass",
    label: "Vehicle Class",
    options: &[
        "Compact Cars",
        "Midsize Cars",
        "Large Cars",
        "SUV",
        "Pickup Trucks",
    ],
};

pub const DRIVE: ChoiceField = ChoiceField {
    name: "drive",
    label: "Drive Type",
    options: &["FWD", "RWD", "4WD", "AWD"],
};

/// Numeric fields, in display order.
pub const NUMERIC_FIELDS: [NumericField; 4] = [CYLINDERS, DISPLACEMENT, FUEL_COST, MODEL_YEAR];

/// Choice fields, in display order.
pub const CHOICE_FIELDS: [ChoiceField; 4] = [FUEL_TYPE, TRANSMISSION, VEHICLE_CLASS, DRIVE];

/// Build a record from submitted form values.
///
/// Numeric values are clamped to their field's range, or replaced by the
/// field default if missing or malformed. Choice values are taken verbatim.
pub fn assemble(values: &HashMap<String, String>) -> VehicleRecord {
    let number = |field: &NumericField| field.parse(values.get(field.name).map(String::as_str));
    let choice = |field: &ChoiceField| {
        values
            .get(field.name)
            .cloned()
            .unwrap_or_else(|| field.first().to_string())
    };
    VehicleRecord {
        cylinders: number(&CYLINDERS) as i64,
        displacement: number(&DISPLACEMENT),
        fuel_type: choice(&FUEL_TYPE),
        transmission: choice(&TRANSMISSION),
        vehicle_class: choice(&VEHICLE_CLASS),
        drive: choice(&DRIVE),
        fuel_cost: number(&FUEL_COST) as i64,
        model_year: number(&MODEL_YEAR) as i64,
    }
}

/// Clamp the numeric fields of a record that was built outside the form.
pub fn sanitize(record: VehicleRecord) -> VehicleRecord {
    VehicleRecord {
        cylinders: CYLINDERS.clamp(record.cylinders as f64) as i64,
        displacement: DISPLACEMENT.clamp(record.displacement),
        fuel_cost: FUEL_COST.clamp(record.fuel_cost as f64) as i64,
        model_year: MODEL_YEAR.clamp(record.model_year as f64) as i64,
        ..record
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn empty_submission_yields_defaults() {
        assert_eq!(assemble(&HashMap::new()), VehicleRecord::default());
    }

    #[test]
    fn boundary_values_are_accepted_unchanged() {
        let low = assemble(&values(&[
            ("cylinders", "3"),
            ("displacement", "0.5"),
            ("fuelCost08", "500"),
            ("model_year", "1980"),
        ]));
        assert_eq!(low.cylinders, 3);
        assert_eq!(low.displacement, 0.5);
        assert_eq!(low.fuel_cost, 500);
        assert_eq!(low.model_year, 1980);

        let high = assemble(&values(&[
            ("cylinders", "16"),
            ("displacement", "10.0"),
            ("fuelCost08", "6000"),
            ("model_year", "2025"),
        ]));
        assert_eq!(high.cylinders, 16);
        assert_eq!(high.displacement, 10.0);
        assert_eq!(high.fuel_cost, 6000);
        assert_eq!(high.model_year, 2025);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let record = assemble(&values(&[
            ("cylinders", "40"),
            ("displacement", "0.1"),
            ("fuelCost08", "-3"),
            ("model_year", "2099"),
        ]));
        assert_eq!(record.cylinders, 16);
        assert_eq!(record.displacement, 0.5);
        assert_eq!(record.fuel_cost, 500);
        assert_eq!(record.model_year, 2025);
    }

    #[test]
    fn malformed_numbers_fall_back_to_defaults() {
        let record = assemble(&values(&[
            ("cylinders", "four"),
            ("displacement", ""),
            ("fuelCost08", "NaN"),
            ("model_year", " 2010 "),
        ]));
        assert_eq!(record.cylinders, 4);
        assert_eq!(record.displacement, 2.0);
        assert_eq!(record.fuel_cost, 2000);
        assert_eq!(record.model_year, 2010);
    }

    #[test]
    fn integer_fields_round() {
        let record = assemble(&values(&[("cylinders", "5.6")]));
        assert_eq!(record.cylinders, 6);
    }

    #[test]
    fn choices_pass_through_verbatim() {
        let record = assemble(&values(&[("drive", "Hover"), ("VClass", "SUV")]));
        assert_eq!(record.drive, "Hover");
        assert_eq!(record.vehicle_class, "SUV");
        assert_eq!(record.transmission, "Automatic");
    }

    #[test]
    fn non_finite_values_become_defaults() {
        assert_eq!(DISPLACEMENT.clamp(f64::NAN), 2.0);
        assert_eq!(DISPLACEMENT.clamp(f64::INFINITY), 2.0);
        assert_eq!(CYLINDERS.clamp(f64::NEG_INFINITY), 4.0);

        let record = sanitize(VehicleRecord {
            displacement: f64::NAN,
            ..VehicleRecord::default()
        });
        assert_eq!(record.displacement, 2.0);
        assert_eq!(DISPLACEMENT.parse(Some("inf")), 2.0);
    }

    #[test]
    fn sanitize_clamps_only_numeric_fields() {
        let record = sanitize(VehicleRecord {
            cylinders: 1,
            displacement: 12.5,
            drive: "AWD".to_string(),
            ..VehicleRecord::default()
        });
        assert_eq!(record.cylinders, 3);
        assert_eq!(record.displacement, 10.0);
        assert_eq!(record.drive, "AWD");
    }
}
