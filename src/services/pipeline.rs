use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tracing::info;

use crate::error::ErrorKind;
use crate::models::Upload;
use crate::services::markdown::{ConversionError, MarkdownConverter};
use crate::services::pdf_processor::PdfProcessor;
use crate::services::workspace::Workspace;

/// Failure of one step of the extract-convert pipeline. Each variant keeps
/// the message of the error that caused it.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("{0}")]
    Extraction(String),

    #[error("{0}")]
    Conversion(String),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::Extraction(_) => ErrorKind::ExtractionFailure,
            PipelineError::Conversion(_) => ErrorKind::ConversionFailure,
            PipelineError::Io(_) => ErrorKind::IoFailure,
        }
    }
}

impl From<ConversionError> for PipelineError {
    fn from(err: ConversionError) -> Self {
        PipelineError::Conversion(err.0)
    }
}

/// Markdown written into a workspace, ready to be streamed back.
#[derive(Debug)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub file_name: String,
    pub pages: usize,
}

/// Extraction followed by Markdown conversion. One attempt, no retries.
#[derive(Clone)]
pub struct ConversionPipeline {
    processor: PdfProcessor,
    converter: Arc<dyn MarkdownConverter>,
}

impl ConversionPipeline {
    pub fn new(processor: PdfProcessor, converter: Arc<dyn MarkdownConverter>) -> Self {
        Self { processor, converter }
    }

    pub fn converter_name(&self) -> &'static str {
        self.converter.name()
    }

    /// Convert an in-memory PDF, touching no filesystem state.
    pub async fn convert_bytes(&self, content: Vec<u8>) -> Result<String, PipelineError> {
        let extraction = self.processor.extract_from_bytes(content).await?;
        let markdown = self.converter.convert(&extraction.text)?;
        info!(
            pages = extraction.pages,
            markdown_length = markdown.len(),
            "In-memory conversion finished"
        );
        Ok(markdown)
    }

    /// Save `upload` into `workspace`, convert it and write `<stem>.md` next
    /// to it.
    pub async fn convert_into(
        &self,
        upload: &Upload,
        workspace: &Workspace,
    ) -> Result<GeneratedFile, PipelineError> {
        let start = Instant::now();
        let input_path = workspace.file(&upload.base_name());
        let file_name = upload.markdown_name();
        // input and output must not collide, e.g. an upload called "notes.md"
        let output_path = if workspace.file(&file_name) == input_path {
            workspace.file(&format!("converted-{}", file_name))
        } else {
            workspace.file(&file_name)
        };

        tokio::fs::write(&input_path, &upload.content).await?;
        tracing::debug!(file_size = upload.size(), "Upload saved to workspace");

        let extraction = self.processor.extract_from_path(&input_path).await?;
        let markdown = self.converter.convert(&extraction.text)?;

        tokio::fs::write(&output_path, markdown.as_bytes()).await?;

        info!(
            file_name = %file_name,
            pages = extraction.pages,
            markdown_length = markdown.len(),
            processing_time_ms = start.elapsed().as_millis() as u64,
            "Markdown file generated"
        );

        Ok(GeneratedFile {
            path: output_path,
            file_name,
            pages: extraction.pages,
        })
    }
}
