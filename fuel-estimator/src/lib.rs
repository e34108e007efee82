//! A fuel-efficiency estimator: a form that collects vehicle attributes, runs
//! them through a pre-trained regression model and shows the estimated miles
//! per gallon.
//!
//! This crate provides the model contract, the artifact loader, the form and
//! the HTTP handlers. For the command line interface, see the
//! `fuel-estimator-cli` crate.

mod config;
mod error;
pub mod form;
mod hash;
pub mod model;
mod oneshot;
mod predict;
mod record;
mod server;
mod view;

pub use config::Config;
pub use error::{Error, PredictError};
pub use model::{Model, Pipeline};
pub use oneshot::{estimate, Estimate};
pub use predict::{predict, Prediction};
pub use record::{VehicleRecord, COLUMNS};
pub use server::{router, run, serve, AppState, ModelState};
pub use view::{load_failure_message, Outcome, Page, PREDICT_FAILURE_MESSAGE};
