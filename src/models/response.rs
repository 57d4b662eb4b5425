use serde::{Deserialize, Serialize};

/// Body of a successful `POST /api/convert`.
#[derive(Debug, Serialize, Deserialize)]
pub struct MarkdownResponse {
    pub markdown: String,
}

/// Body of every failed conversion request.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
    pub services: ServiceStatus,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub markdown_converter: String,
}

impl MarkdownResponse {
    pub fn new(markdown: String) -> Self {
        Self { markdown }
    }
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}
