use axum::{
    body::Body,
    extract::{multipart::MultipartRejection, Multipart, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
};
use std::time::Instant;
use tokio::fs::File;
use tracing::{error, info};

use crate::error::{AppError, AppResult, Endpoint};
use crate::handlers::{read_upload, request_id, AppState};
use crate::services::{stream_then_release, Workspace};

pub const MARKDOWN_CONTENT_TYPE: &str = "text/markdown; charset=utf-8";

/// `POST /convert`: answers with the Markdown as a file download.
///
/// The workspace holding the saved PDF and the generated Markdown moves
/// into the response body and is released once the body has been streamed.
/// Any failure before that releases it before the error is returned.
pub async fn convert_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Response> {
    let start = Instant::now();
    let request_id = request_id(&headers);
    let endpoint = Endpoint::Download;

    info!(request_id = %request_id, "Starting PDF to Markdown download request");

    let upload = read_upload(multipart, endpoint, state.config.max_file_size_mb).await?;
    if !upload.has_filename() {
        return Err(AppError::NoFileSelected);
    }

    info!(
        request_id = %request_id,
        file_name = %upload.filename,
        file_size = upload.size(),
        "File extracted from multipart form"
    );

    let workspace = Workspace::create(state.config.workspace_dir.as_deref())
        .map_err(|e| AppError::pipeline(endpoint, e.into()))?;

    let generated = match state.pipeline.convert_into(&upload, &workspace).await {
        Ok(generated) => generated,
        Err(e) => {
            error!(request_id = %request_id, error = %e, "PDF conversion failed");
            workspace.release().await;
            return Err(AppError::pipeline(endpoint, e));
        }
    };

    let file = match File::open(&generated.path).await {
        Ok(file) => file,
        Err(e) => {
            error!(request_id = %request_id, error = %e, "Generated Markdown could not be opened");
            workspace.release().await;
            return Err(AppError::pipeline(endpoint, e.into()));
        }
    };

    info!(
        request_id = %request_id,
        download_name = %generated.file_name,
        pages = generated.pages,
        total_time_ms = start.elapsed().as_millis() as u64,
        "Streaming Markdown download"
    );

    let body = Body::from_stream(stream_then_release(file, workspace));
    let response_headers = [
        (header::CONTENT_TYPE, MARKDOWN_CONTENT_TYPE.to_string()),
        (header::CONTENT_DISPOSITION, content_disposition(&generated.file_name)),
    ];

    Ok((response_headers, body).into_response())
}

/// `attachment` disposition for `file_name`. Names that are not plain
/// printable ASCII get an ASCII fallback plus an RFC 5987 `filename*`.
pub fn content_disposition(file_name: &str) -> String {
    let fallback: String = file_name
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c == ' ' || c.is_ascii_graphic() => c,
            _ => '_',
        })
        .collect();

    if fallback == file_name {
        format!("attachment; filename=\"{}\"", fallback)
    } else {
        format!(
            "attachment; filename=\"{}\"; filename*=UTF-8''{}",
            fallback,
            encode_ext_value(file_name)
        )
    }
}

fn encode_ext_value(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len() * 3);
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'!' | b'#' | b'$' | b'&' | b'+' | b'-' | b'.' | b'^' | b'_' | b'`' | b'|' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_names_are_quoted() {
        assert_eq!(
            content_disposition("report.md"),
            "attachment; filename=\"report.md\""
        );
        assert_eq!(
            content_disposition("annual report.md"),
            "attachment; filename=\"annual report.md\""
        );
    }

    #[test]
    fn non_ascii_names_get_extended_parameter() {
        assert_eq!(
            content_disposition("relatório.md"),
            "attachment; filename=\"relat_rio.md\"; filename*=UTF-8''relat%C3%B3rio.md"
        );
    }

    #[test]
    fn quotes_never_break_the_header() {
        let value = content_disposition("a\"b.md");
        assert!(value.starts_with("attachment; filename=\"a_b.md\""));
        assert!(value.ends_with("a%22b.md"));
    }
}
