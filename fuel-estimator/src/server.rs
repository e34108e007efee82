//! HTTP request/response handlers for the estimator form.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use eyre::{Result, WrapErr};
use log::{error, info};

use crate::form::assemble;
use crate::model::Pipeline;
use crate::predict::predict;
use crate::view::{Outcome, Page};
use crate::{Config, Error, Model, VehicleRecord};

/// Whether a usable model was loaded at startup.
pub enum ModelState {
    Ready(Arc<dyn Model>),
    LoadFailed(PathBuf),
}

struct Inner {
    page: Page,
    model: ModelState,
}

/// Shared, read-only state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

impl AppState {
    pub fn new(page: Page, model: ModelState) -> Self {
        Self {
            inner: Arc::new(Inner { page, model }),
        }
    }

    /// Load the model artifact named by the configuration.
    ///
    /// A model that fails to load does not make this fail: the resulting state
    /// serves the load failure page until the process is restarted.
    pub fn load(config: &Config) -> Result<Self, Error> {
        let page = Page::new(&config.title)?;
        let model = match Pipeline::load(&config.model_path) {
            Ok(pipeline) => ModelState::Ready(Arc::new(pipeline)),
            Err(e) => {
                error!("{:?}", e);
                ModelState::LoadFailed(config.model_path.clone())
            }
        };
        Ok(Self::new(page, model))
    }

    /// Returns whether a model is available for predictions.
    pub fn is_ready(&self) -> bool {
        matches!(self.inner.model, ModelState::Ready(_))
    }

    fn respond(&self, record: &VehicleRecord, run_model: bool) -> Response {
        let page = &self.inner.page;
        let rendered = match &self.inner.model {
            ModelState::LoadFailed(path) => {
                return html(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    page.render_load_failure(path),
                )
            }
            ModelState::Ready(model) if run_model => {
                page.render_form(record, Outcome::from(predict(model.as_ref(), record)))
            }
            ModelState::Ready(_) => page.render_form(record, Outcome::NotPredicted),
        };
        html(StatusCode::OK, rendered)
    }
}

fn html(status: StatusCode, rendered: Result<String, Error>) -> Response {
    match rendered {
        Ok(body) => (status, Html(body)).into_response(),
        Err(e) => {
            error!("{}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
        }
    }
}

async fn index(State(state): State<AppState>) -> Response {
    state.respond(&VehicleRecord::default(), false)
}

async fn submit(
    State(state): State<AppState>,
    Form(values): Form<HashMap<String, String>>,
) -> Response {
    let record = assemble(&values);
    state.respond(&record, true)
}

/// Build the estimator's router: `GET /` shows the form and `POST /predict`
/// runs the model on the submitted form.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/predict", post(submit))
        .with_state(state)
}

/// Load the model and serve the form until the process is stopped.
pub async fn serve(config: Config) -> Result<()> {
    let addr = config.bind_addr()?;
    let state = AppState::load(&config)?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::Io(addr.to_string(), e))?;
    info!("Serving {} on http://{}", config.title, addr);
    axum::serve(listener, router(state))
        .await
        .wrap_err("server terminated unexpectedly")
}

/// Run [`serve`] to completion on a single-threaded runtime.
pub fn run(config: Config) -> Result<()> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to start runtime")?
        .block_on(serve(config))
}
