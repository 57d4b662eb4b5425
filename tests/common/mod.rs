//! Shared fixtures: real PDFs built with lopdf, multipart bodies and
//! application state rooted in throwaway directories.
#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use pdf2md_web::services::{ConversionError, MarkdownConverter};
use pdf2md_web::{AppState, Config};
use tempfile::TempDir;

pub const BOUNDARY: &str = "pdf2md-test-boundary";

/// A PDF with one page per entry of `pages`, each showing that text.
pub fn build_pdf(pages: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![72.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

pub fn corrupt_pdf() -> Vec<u8> {
    b"%PDF-1.5\nthis is not really a pdf document\n%%EOF".to_vec()
}

/// Multipart body with a single part. `filename: None` omits the
/// parameter entirely. Returns the content type and the body.
pub fn multipart_part(field: &str, filename: Option<&str>, content: &[u8]) -> (String, Vec<u8>) {
    multipart_form(&[(field, filename, content)])
}

/// Multipart body with the given `(field, filename, content)` parts in order.
pub fn multipart_form(parts: &[(&str, Option<&str>, &[u8])]) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    for (field, filename, content) in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match filename {
            Some(name) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/pdf\r\n\r\n",
                    field, name
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", field).as_bytes(),
            ),
        }
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    (format!("multipart/form-data; boundary={}", BOUNDARY), body)
}

pub fn multipart_file(filename: &str, content: &[u8]) -> (String, Vec<u8>) {
    multipart_part("file", Some(filename), content)
}

/// Directories backing one test app: the workspace root and the static dir.
pub struct TestDirs {
    pub workspaces: TempDir,
    pub assets: TempDir,
}

impl TestDirs {
    pub fn new() -> Self {
        let assets = TempDir::new().unwrap();
        std::fs::write(assets.path().join("index.html"), "<h1>PDF para Markdown</h1>").unwrap();
        std::fs::write(assets.path().join("style.css"), "body { margin: 0; }").unwrap();
        Self {
            workspaces: TempDir::new().unwrap(),
            assets,
        }
    }

    pub fn config(&self) -> Config {
        Config {
            static_dir: self.assets.path().to_path_buf(),
            workspace_dir: Some(self.workspaces.path().to_path_buf()),
            ..Config::default()
        }
    }

    pub fn state(&self) -> AppState {
        AppState::new(self.config())
    }

    pub fn workspace_count(&self) -> usize {
        count_entries(self.workspaces.path())
    }
}

pub fn count_entries(dir: &Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}

/// Converter that always fails, for exercising the conversion error path.
pub struct FailingConverter;

impl MarkdownConverter for FailingConverter {
    fn convert(&self, _text: &str) -> Result<String, ConversionError> {
        Err(ConversionError("converter exploded".to_string()))
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

pub fn failing_state(dirs: &TestDirs) -> AppState {
    AppState::with_converter(dirs.config(), Arc::new(FailingConverter))
}
