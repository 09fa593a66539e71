//! HTTP inbound adapter.
//!
//! - `GET|POST /` job picker form
//! - `GET|POST /run` page that follows a job's stream
//! - `GET|POST /job_fields` extra inputs for the selected job
//! - `GET /stream?job=<id>&path=<parameter>` server-sent events of a job's output
//! - `/static/*` files from the configured static directory

pub mod error;
mod pages;
mod stream;

use crate::application::{JobRegistry, JobRunner};
use crate::config::{ServerConfig, StreamTransport};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub use error::StreamError;

/// How `/stream` responses are produced.
#[derive(Clone, Copy, Debug)]
pub struct StreamSettings {
    pub transport: StreamTransport,
    pub done_event: bool,
}

impl From<&ServerConfig> for StreamSettings {
    fn from(config: &ServerConfig) -> Self {
        Self {
            transport: config.stream_transport,
            done_event: config.stream_done_event,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub runner: Arc<JobRunner>,
    pub stream: StreamSettings,
}

impl AppState {
    pub fn new(config: &ServerConfig, registry: JobRegistry) -> Self {
        Self {
            runner: Arc::new(JobRunner::new(Arc::new(registry), config.max_concurrent_jobs)),
            stream: StreamSettings::from(config),
        }
    }
}

/// Routes without static files or request tracing.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::index).post(pages::index))
        .route("/run", get(pages::run_redirect).post(pages::run))
        .route(
            "/job_fields",
            get(pages::job_fields_query).post(pages::job_fields_form),
        )
        .route("/stream", get(stream::stream_job))
        .with_state(state)
}

/// The full application served by the binary.
pub fn app(config: &ServerConfig, registry: JobRegistry) -> Router {
    router(AppState::new(config, registry))
        .nest_service("/static", ServeDir::new(&config.static_dir))
        .layer(TraceLayer::new_for_http())
}
