use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::HeaderMap,
    response::Json,
};
use std::time::Instant;
use tracing::{error, info};

use crate::error::{AppError, AppResult, Endpoint};
use crate::handlers::{read_upload, request_id, AppState};
use crate::models::MarkdownResponse;

/// `POST /api/convert`: converts the upload in memory and answers with
/// `{"markdown": ...}`.
pub async fn api_convert_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<MarkdownResponse>> {
    let start = Instant::now();
    let request_id = request_id(&headers);
    let endpoint = Endpoint::Api;

    info!(request_id = %request_id, "Starting PDF to Markdown API request");

    let upload = read_upload(multipart, endpoint, state.config.max_file_size_mb).await?;

    info!(
        request_id = %request_id,
        file_name = %upload.filename,
        file_size = upload.size(),
        "File extracted from multipart form"
    );

    let markdown = match state.pipeline.convert_bytes(upload.content).await {
        Ok(markdown) => markdown,
        Err(e) => {
            error!(request_id = %request_id, error = %e, "PDF processing failed");
            return Err(AppError::pipeline(endpoint, e));
        }
    };

    info!(
        request_id = %request_id,
        markdown_length = markdown.len(),
        total_time_ms = start.elapsed().as_millis() as u64,
        "Request completed successfully"
    );

    Ok(Json(MarkdownResponse::new(markdown)))
}
