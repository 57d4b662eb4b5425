use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;
use crate::services::PipelineError;

pub type AppResult<T> = Result<T, AppError>;

/// Failure taxonomy shared by the pipeline and the HTTP layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingFile,
    NoFileSelected,
    UploadTooLarge,
    MalformedUpload,
    ExtractionFailure,
    ConversionFailure,
    IoFailure,
}

impl ErrorKind {
    pub fn error_code(&self) -> &'static str {
        match self {
            ErrorKind::MissingFile => "MISSING_FILE",
            ErrorKind::NoFileSelected => "NO_FILE_SELECTED",
            ErrorKind::UploadTooLarge => "FILE_TOO_LARGE",
            ErrorKind::MalformedUpload => "MALFORMED_UPLOAD",
            ErrorKind::ExtractionFailure => "EXTRACTION_FAILURE",
            ErrorKind::ConversionFailure => "CONVERSION_FAILURE",
            ErrorKind::IoFailure => "IO_FAILURE",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorKind::MissingFile => StatusCode::BAD_REQUEST,
            ErrorKind::NoFileSelected => StatusCode::BAD_REQUEST,
            ErrorKind::UploadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ErrorKind::MalformedUpload => StatusCode::BAD_REQUEST,
            ErrorKind::ExtractionFailure => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorKind::ConversionFailure => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorKind::IoFailure => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Which conversion endpoint produced an error. The two endpoints word
/// their client messages differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `POST /convert`, answers with a file download.
    Download,
    /// `POST /api/convert`, answers with JSON.
    Api,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing file in request")]
    MissingFile { endpoint: Endpoint },

    #[error("No file selected")]
    NoFileSelected,

    #[error("Upload exceeds limit of {limit_mb}MB")]
    UploadTooLarge { limit_mb: usize },

    #[error("Malformed upload: {message}")]
    MalformedUpload { message: String },

    #[error("Conversion pipeline failed: {source}")]
    Pipeline {
        endpoint: Endpoint,
        #[source]
        source: PipelineError,
    },
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::MissingFile { .. } => ErrorKind::MissingFile,
            AppError::NoFileSelected => ErrorKind::NoFileSelected,
            AppError::UploadTooLarge { .. } => ErrorKind::UploadTooLarge,
            AppError::MalformedUpload { .. } => ErrorKind::MalformedUpload,
            AppError::Pipeline { source, .. } => source.kind(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        self.kind().error_code()
    }

    pub fn status_code(&self) -> StatusCode {
        self.kind().status_code()
    }

    /// The message sent to the client under the `error` key.
    pub fn user_message(&self) -> String {
        match self {
            AppError::MissingFile { endpoint: Endpoint::Download } => {
                "Nenhum arquivo enviado.".to_string()
            }
            AppError::MissingFile { endpoint: Endpoint::Api } => {
                "Nenhum arquivo enviado".to_string()
            }
            AppError::NoFileSelected => "Nenhum arquivo selecionado.".to_string(),
            AppError::UploadTooLarge { limit_mb } => {
                format!("Arquivo muito grande (limite de {} MB).", limit_mb)
            }
            AppError::MalformedUpload { message } => {
                format!("Falha ao ler o arquivo enviado: {}", message)
            }
            AppError::Pipeline { endpoint: Endpoint::Download, source } => {
                format!("Erro durante a conversão: {}", source)
            }
            AppError::Pipeline { endpoint: Endpoint::Api, source } => {
                format!("Erro ao processar o arquivo: {}", source)
            }
        }
    }

    pub fn pipeline(endpoint: Endpoint, source: PipelineError) -> Self {
        AppError::Pipeline { endpoint, source }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.user_message();

        if status.is_server_error() {
            tracing::error!(
                error_code = error_code,
                status_code = %status,
                error_message = %self,
                "API error occurred"
            );
        } else {
            tracing::warn!(
                error_code = error_code,
                status_code = %status,
                error_message = %self,
                "Request rejected"
            );
        }

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
