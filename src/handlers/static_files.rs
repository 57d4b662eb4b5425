use std::path::PathBuf;

use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tower::ServiceExt;
use tower_http::services::ServeFile;
use tracing::debug;

use crate::handlers::AppState;

pub const INDEX_FILE: &str = "index.html";

/// `GET /`: the upload page.
pub async fn index_handler(State(state): State<AppState>, request: Request) -> Response {
    serve(state.config.static_dir.join(INDEX_FILE), request).await
}

/// `GET /<filename>`: a single file from the static directory.
pub async fn static_file_handler(
    State(state): State<AppState>,
    Path(filename): Path<String>,
    request: Request,
) -> Response {
    if !is_plain_file_name(&filename) {
        debug!(filename = %filename, "Rejected static asset name");
        return StatusCode::NOT_FOUND.into_response();
    }
    serve(state.config.static_dir.join(filename), request).await
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

async fn serve(path: PathBuf, request: Request) -> Response {
    match ServeFile::new(path).oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}
