use std::path::PathBuf;

use thiserror::Error;

/// The primary error type that can be produced while setting up the
/// estimator: loading configuration and model artifacts, and rendering pages.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error {0}: {1}")]
    Io(String, std::io::Error),
    #[error("failed to load model artifact from {0}")]
    FailedToLoadModel(PathBuf),
    #[error("failed to load configuration from {0}")]
    FailedToLoadConfig(PathBuf),
    #[error("cannot determine file type of file: {0}")]
    CannotDetermineFileType(PathBuf),
    #[error("unsupported model artifact format version {0} (expected {1})")]
    UnsupportedFormatVersion(u32, u32),
    #[error("unknown column in model artifact: \"{0}\"")]
    UnknownColumn(String),
    #[error("invalid model artifact: {0}")]
    InvalidArtifact(String),
    #[error("invalid bind address \"{0}\": {1}")]
    InvalidBindAddress(String, std::net::AddrParseError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to register template \"{0}\": {1}")]
    TemplateRegister(String, Box<handlebars::TemplateError>),
    #[error("failed to render template \"{0}\": {1}")]
    TemplateRender(String, handlebars::RenderError),
}

/// Reasons why the model could not produce an estimate for a record.
///
/// These are recoverable: the caller decides how (and whether) to present them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictError {
    #[error("value \"{value}\" for column {column} was not seen during training")]
    UnknownCategory { column: String, value: String },
    #[error("column {column} has a non-finite value: {value}")]
    NonFiniteInput { column: String, value: f64 },
    #[error("record has no column named {0}")]
    MissingColumn(String),
    #[error("model produced no output")]
    EmptyOutput,
    #[error("model produced a non-finite estimate: {0}")]
    NonFinite(f64),
}
