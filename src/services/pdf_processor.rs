use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::services::PipelineError;

/// Plain text pulled out of a PDF, pages joined in document order.
#[derive(Debug)]
pub struct ExtractionResult {
    pub text: String,
    pub pages: usize,
    pub processing_time_ms: u64,
}

/// Text extraction backed by `pdf-extract`.
///
/// Extraction is CPU-bound and the underlying crate may panic on malformed
/// input, so every call runs on the blocking pool. A panic there is reported
/// as an extraction failure. A single unreadable page fails the whole
/// document; nothing is returned for the pages that did succeed.
#[derive(Debug, Clone, Default)]
pub struct PdfProcessor;

impl PdfProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Extract text from an in-memory PDF.
    pub async fn extract_from_bytes(&self, content: Vec<u8>) -> Result<ExtractionResult, PipelineError> {
        tracing::info!("Starting PDF text extraction from memory ({} bytes)", content.len());
        run_blocking(move || {
            pdf_extract::extract_text_from_mem_by_pages(&content).map_err(|e| e.to_string())
        })
        .await
    }

    /// Extract text from a PDF stored on disk.
    pub async fn extract_from_path(&self, path: &Path) -> Result<ExtractionResult, PipelineError> {
        tracing::info!("Starting PDF text extraction for file: {}", display_name(path));
        let path: PathBuf = path.to_path_buf();
        run_blocking(move || pdf_extract::extract_text_by_pages(&path).map_err(|e| e.to_string())).await
    }
}

async fn run_blocking<F>(extract: F) -> Result<ExtractionResult, PipelineError>
where
    F: FnOnce() -> Result<Vec<String>, String> + Send + 'static,
{
    let start = Instant::now();

    let pages = tokio::task::spawn_blocking(extract)
        .await
        .map_err(|e| {
            tracing::error!("PDF extraction task aborted: {}", e);
            PipelineError::Extraction(panic_message(e))
        })?
        .map_err(|e| {
            tracing::warn!("PDF text extraction failed: {}", e);
            PipelineError::Extraction(e)
        })?;

    let page_count = pages.len();
    let text = join_pages(pages);
    let processing_time = start.elapsed().as_millis() as u64;

    tracing::info!(
        "PDF extraction completed in {}ms, {} pages, {} characters",
        processing_time,
        page_count,
        text.len()
    );

    Ok(ExtractionResult {
        text,
        pages: page_count,
        processing_time_ms: processing_time,
    })
}

/// Concatenate per-page text without a separator.
pub fn join_pages(pages: Vec<String>) -> String {
    pages.concat()
}

fn panic_message(err: tokio::task::JoinError) -> String {
    if !err.is_panic() {
        return "extraction task was cancelled".to_string();
    }
    let payload = err.into_panic();
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "the PDF could not be read".to_string()
    }
}

// Only the file name goes into logs, never the workspace path.
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_are_joined_in_order() {
        let pages = vec!["one ".to_string(), "two ".to_string(), "three".to_string()];
        assert_eq!(join_pages(pages), "one two three");
    }

    #[tokio::test]
    async fn garbage_bytes_fail_extraction() {
        let processor = PdfProcessor::new();
        let err = processor
            .extract_from_bytes(b"definitely not a pdf".to_vec())
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::Extraction(_)));
    }
}
