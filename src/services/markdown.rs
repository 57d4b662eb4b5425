use thiserror::Error;

/// Turns extracted text into Markdown.
///
/// The text is handed over as-is and may contain markup; implementations
/// decide how to interpret it.
pub trait MarkdownConverter: Send + Sync {
    fn convert(&self, text: &str) -> Result<String, ConversionError>;

    /// Short identifier reported by the health endpoint.
    fn name(&self) -> &'static str;
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ConversionError(pub String);

/// Converter backed by `html2md`: the text is parsed as an HTML fragment.
#[derive(Debug, Clone, Default)]
pub struct HtmlToMarkdown;

impl HtmlToMarkdown {
    pub fn new() -> Self {
        Self
    }
}

impl MarkdownConverter for HtmlToMarkdown {
    fn convert(&self, text: &str) -> Result<String, ConversionError> {
        if text.trim().is_empty() {
            return Ok(String::new());
        }
        let markdown = html2md::parse_html(text);
        tracing::debug!(
            input_length = text.len(),
            markdown_length = markdown.len(),
            "Converted text to Markdown"
        );
        Ok(markdown)
    }

    fn name(&self) -> &'static str {
        "html2md"
    }
}
