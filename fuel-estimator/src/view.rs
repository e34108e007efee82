//! Page rendering. This is the only place that decides what the user gets to
//! see when something goes wrong.

use std::path::Path;

use handlebars::Handlebars;
use log::debug;
use pulldown_cmark::{html, Parser};
use serde_json::{json, Value as JsonValue};

use crate::form::{NumericField, NumericKind, CHOICE_FIELDS, NUMERIC_FIELDS};
use crate::{Error, PredictError, Prediction, VehicleRecord};

const PAGE_TEMPLATE: &str = "page";
const LOAD_FAILURE_TEMPLATE: &str = "load_failure";

/// Shown in place of a prediction whenever the model fails on a record.
pub const PREDICT_FAILURE_MESSAGE: &str =
    "⚠️ Could not make prediction. Ensure input format matches training data.";

/// Shown instead of the whole page when the model artifact cannot be loaded.
pub fn load_failure_message(model_path: &Path) -> String {
    format!(
        "⚠️ Error loading model file. Please make sure '{}' is in the same folder.",
        model_path.display()
    )
}

/// What the result region of the page currently shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    NotPredicted,
    Showing(Prediction),
    Failed,
}

impl From<Result<Prediction, PredictError>> for Outcome {
    fn from(result: Result<Prediction, PredictError>) -> Self {
        match result {
            Ok(prediction) => Self::Showing(prediction),
            Err(_) => {
                debug!("Prediction failed");
                Self::Failed
            }
        }
    }
}

/// Renders the estimator's HTML pages.
pub struct Page {
    hb: Handlebars<'static>,
    title: String,
    about: String,
}

impl Page {
    /// Compile the page templates and pre-render the about section.
    pub fn new<S: AsRef<str>>(title: S) -> Result<Self, Error> {
        let mut hb = Handlebars::new();
        for (name, template) in [
            (PAGE_TEMPLATE, include_str!("../templates/page.hbs")),
            (
                LOAD_FAILURE_TEMPLATE,
                include_str!("../templates/load_failure.hbs"),
            ),
        ] {
            hb.register_template_string(name, template)
                .map_err(|e| Error::TemplateRegister(name.to_string(), Box::new(e)))?;
        }
        Ok(Self {
            hb,
            title: title.as_ref().to_string(),
            about: markdown_to_html(include_str!("../templates/about.md")),
        })
    }

    /// Render the form, populated from `record`, with the result region set
    /// from `outcome`.
    pub fn render_form(&self, record: &VehicleRecord, outcome: Outcome) -> Result<String, Error> {
        let numeric = NUMERIC_FIELDS
            .iter()
            .map(|field| {
                json!({
                    "name": field.name,
                    "label": field.label,
                    "min": number(field, field.min),
                    "max": number(field, field.max),
                    "step": number(field, field.step()),
                    "value": number(field, record.numeric(field.name).unwrap_or(field.default)),
                })
            })
            .collect::<Vec<JsonValue>>();
        let choices = CHOICE_FIELDS
            .iter()
            .map(|field| {
                let selected = record.categorical(field.name);
                let options = field
                    .options
                    .iter()
                    .map(|opt| json!({ "value": opt, "selected": Some(*opt) == selected }))
                    .collect::<Vec<JsonValue>>();
                json!({ "name": field.name, "label": field.label, "options": options })
            })
            .collect::<Vec<JsonValue>>();
        let (success, failure) = match outcome {
            Outcome::NotPredicted => (None, None),
            Outcome::Showing(prediction) => (Some(prediction.to_string()), None),
            Outcome::Failed => (None, Some(PREDICT_FAILURE_MESSAGE.to_string())),
        };
        let data = json!({
            "title": self.title,
            "numeric": numeric,
            "choices": choices,
            "success": success,
            "failure": failure,
            "about": self.about,
        });
        self.render(PAGE_TEMPLATE, &data)
    }

    /// Render the page shown when no model could be loaded. Nothing but the
    /// error message is shown.
    pub fn render_load_failure(&self, model_path: &Path) -> Result<String, Error> {
        let data = json!({
            "title": self.title,
            "failure": load_failure_message(model_path),
        });
        self.render(LOAD_FAILURE_TEMPLATE, &data)
    }

    fn render(&self, name: &str, data: &JsonValue) -> Result<String, Error> {
        self.hb
            .render(name, data)
            .map_err(|e| Error::TemplateRender(name.to_string(), e))
    }
}

// Integer fields are rendered without a fractional part.
fn number(field: &NumericField, v: f64) -> JsonValue {
    match field.kind {
        NumericKind::Integer => json!(v as i64),
        NumericKind::Decimal => json!(v),
    }
}

fn markdown_to_html(md: &str) -> String {
    let mut out = String::new();
    html::push_html(&mut out, Parser::new(md));
    out
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::predict::predict;
    use crate::predict::test::Fixed;

    fn page() -> Page {
        Page::new("Fuel Efficiency Estimator").unwrap()
    }

    #[test]
    fn initial_page_has_all_fields_and_no_result() {
        let html = page()
            .render_form(&VehicleRecord::default(), Outcome::NotPredicted)
            .unwrap();
        for name in ["cylinders", "displacement", "fuelCost08", "model_year"] {
            assert!(html.contains(&format!("name=\"{}\"", name)), "{}", name);
        }
        for name in ["fuelType1", "trany", "VClass", "drive"] {
            assert!(html.contains(&format!("<select id=\"{}\"", name)), "{}", name);
        }
        assert!(html.contains(r#"min="3" max="16" step="1" value="4""#));
        assert!(html.contains(r#"min="1980" max="2025" step="1" value="2020""#));
        assert!(html.contains(r#"<option value="FWD" selected>FWD</option>"#));
        assert!(html.contains(r#"<option value="AWD">AWD</option>"#));
        assert!(html.contains("Predict Fuel Efficiency"));
        assert!(html.contains("<strong>Goal:</strong>"));
        assert!(html.contains("<strong>Tech Stack:</strong>"));
        assert!(html.contains("<em>For Mini ML Project Submission</em>"));
        assert!(html.contains("| Mini Project | Developed using Rust and axum</p>"));
        assert!(!html.contains("class=\"success\""));
        assert!(!html.contains("class=\"error\""));
    }

    #[test]
    fn shows_prediction() {
        let outcome = Outcome::from(predict(&Fixed(vec![29.934]), &VehicleRecord::default()));
        let html = page()
            .render_form(&VehicleRecord::default(), outcome)
            .unwrap();
        assert!(html.contains("Predicted Fuel Efficiency: 29.93 MPG"));
        assert!(!html.contains("class=\"error\""));
    }

    #[test]
    fn shows_generic_failure_only() {
        let outcome = Outcome::from(predict(&Fixed(vec![]), &VehicleRecord::default()));
        assert_eq!(outcome, Outcome::Failed);
        let html = page()
            .render_form(&VehicleRecord::default(), outcome)
            .unwrap();
        assert!(html.contains("Could not make prediction. Ensure input format matches training data."));
        assert!(!html.contains("no output"));
        assert!(!html.contains("class=\"success\""));
    }

    #[test]
    fn keeps_submitted_selection() {
        let record = VehicleRecord {
            vehicle_class: "SUV".to_string(),
            displacement: 3.5,
            ..VehicleRecord::default()
        };
        let html = page().render_form(&record, Outcome::NotPredicted).unwrap();
        assert!(html.contains(r#"<option value="SUV" selected>SUV</option>"#));
        assert!(html.contains(r#"<option value="Compact Cars">Compact Cars</option>"#));
        assert!(html.contains(r#"value="3.5""#));
    }

    #[test]
    fn load_failure_page_shows_only_the_error() {
        let html = page()
            .render_load_failure(Path::new("best_model.json"))
            .unwrap();
        assert!(html.contains("Error loading model file. Please make sure"));
        assert!(html.contains("best_model.json"));
        assert!(!html.contains("<form"));
        assert!(!html.contains("Predict Fuel Efficiency"));
    }
}
