use std::path::Path;

/// A file received in the `file` field of a multipart form.
#[derive(Debug, Clone)]
pub struct Upload {
    /// Client-supplied filename. Empty when the form was submitted with no
    /// file selected.
    pub filename: String,
    pub content: Vec<u8>,
}

impl Upload {
    pub fn new(filename: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content,
        }
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }

    pub fn has_filename(&self) -> bool {
        !self.filename.is_empty()
    }

    /// Final path component of the client filename. Browsers on some
    /// platforms send full paths, and nothing outside the workspace may be
    /// addressed through it.
    pub fn base_name(&self) -> String {
        let normalized = self.filename.replace('\\', "/");
        Path::new(&normalized)
            .file_name()
            .and_then(|name| name.to_str())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| "upload.pdf".to_string())
    }

    /// Output filename: the input name with its extension replaced by `.md`.
    pub fn markdown_name(&self) -> String {
        markdown_file_name(&self.base_name())
    }
}

/// Replace the extension of `file_name` with `.md`, adding one when absent.
pub fn markdown_file_name(file_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(file_name);
    format!("{}.md", stem)
}
