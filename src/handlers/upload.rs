use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart,
    },
    http::StatusCode,
};
use tracing::debug;

use crate::error::{AppError, AppResult, Endpoint};
use crate::models::Upload;

/// Name of the multipart field carrying the PDF.
pub const FILE_FIELD: &str = "file";

/// Pull the `file` field out of a multipart body.
///
/// A body that is not multipart at all counts as a request without a file,
/// and so does a `file` part sent without a `filename` parameter. An
/// explicit empty filename is kept so the caller can tell "no file
/// selected" apart. Other fields are skipped.
pub async fn read_upload(
    multipart: Result<Multipart, MultipartRejection>,
    endpoint: Endpoint,
    limit_mb: usize,
) -> AppResult<Upload> {
    let mut multipart = multipart.map_err(|rejection| {
        debug!(rejection = %rejection, "Request body is not multipart");
        AppError::MissingFile { endpoint }
    })?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit_mb))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        // a part without a filename parameter is a form value, not a file
        let Some(filename) = field.file_name().map(str::to_string) else {
            debug!("Skipping `file` part without a filename parameter");
            continue;
        };

        let data = field.bytes().await.map_err(|e| multipart_error(e, limit_mb))?;
        let upload = Upload::new(filename, data.to_vec());

        debug!("Extracted upload: {:?} ({} bytes)", upload.filename, upload.size());

        return Ok(upload);
    }

    Err(AppError::MissingFile { endpoint })
}

fn multipart_error(err: MultipartError, limit_mb: usize) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::UploadTooLarge { limit_mb }
    } else {
        AppError::MalformedUpload {
            message: err.body_text(),
        }
    }
}
