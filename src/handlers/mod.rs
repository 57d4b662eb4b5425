pub mod api;
pub mod convert;
pub mod health;
pub mod static_files;
pub mod upload;

pub use api::*;
pub use convert::*;
pub use health::*;
pub use static_files::*;
pub use upload::*;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderMap,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::middleware::logging::{logging_middleware, REQUEST_ID_HEADER};
use crate::services::{ConversionPipeline, HtmlToMarkdown, MarkdownConverter, PdfProcessor};

/// Everything a handler needs, built once at startup and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub pipeline: ConversionPipeline,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self::with_converter(config, Arc::new(HtmlToMarkdown::new()))
    }

    pub fn with_converter(config: Config, converter: Arc<dyn MarkdownConverter>) -> Self {
        Self {
            config: Arc::new(config),
            pipeline: ConversionPipeline::new(PdfProcessor::new(), converter),
        }
    }
}

/// Build the application router.
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.max_body_bytes();

    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/convert", post(convert_handler))
        .route("/api/convert", post(api_convert_handler))
        .route("/:filename", get(static_file_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(body_limit))
                .layer(axum::middleware::from_fn(logging_middleware)),
        )
        .with_state(state)
}

/// Request id stamped by the logging middleware, or a fresh short one.
pub(crate) fn request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(|id| id.chars().take(8).collect())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()[..8].to_string())
}
