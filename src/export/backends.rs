//! Built-in renderers for each export format.

use crate::error::Result;
use crate::parser::parse;
use crate::render::{to_docx, to_json, to_pdf, to_text, JsonFormat, RenderOptions, SnapshotBuilder};

use super::{DocumentRenderer, ExportFormat, ExportRequest};

/// Paginated PDF renderer.
#[derive(Debug, Clone, Default)]
pub struct PdfBackend {
    _private: (),
}

impl PdfBackend {
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentRenderer for PdfBackend {
    fn format(&self) -> ExportFormat {
        ExportFormat::Pdf
    }

    fn name(&self) -> &str {
        "paginated"
    }

    fn render(&self, request: &ExportRequest, options: &RenderOptions) -> Result<Vec<u8>> {
        let doc = parse(&request.text);
        to_pdf(&doc, &request.metadata, options)
    }
}

/// Flowed DOCX renderer.
#[derive(Debug, Clone, Default)]
pub struct DocxBackend {
    _private: (),
}

impl DocxBackend {
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentRenderer for DocxBackend {
    fn format(&self) -> ExportFormat {
        ExportFormat::Docx
    }

    fn name(&self) -> &str {
        "flowed"
    }

    fn render(&self, request: &ExportRequest, options: &RenderOptions) -> Result<Vec<u8>> {
        let doc = parse(&request.text);
        to_docx(&doc, &request.metadata, options)
    }
}

/// Canonical JSON snapshot renderer.
///
/// The report's generation time comes from the request metadata.
#[derive(Debug, Clone, Default)]
pub struct SnapshotBackend {
    format: JsonFormat,
}

impl SnapshotBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use compact JSON output.
    pub fn compact(mut self) -> Self {
        self.format = JsonFormat::Compact;
        self
    }
}

impl DocumentRenderer for SnapshotBackend {
    fn format(&self) -> ExportFormat {
        ExportFormat::Json
    }

    fn name(&self) -> &str {
        "snapshot"
    }

    fn render(&self, request: &ExportRequest, _options: &RenderOptions) -> Result<Vec<u8>> {
        let snapshot = SnapshotBuilder::new()
            .generated_at(request.metadata.generated_at)
            .build(&request.record, &request.text);
        Ok(to_json(&snapshot, self.format)?.into_bytes())
    }
}

/// Raw text renderer.
#[derive(Debug, Clone, Default)]
pub struct TextBackend {
    _private: (),
}

impl TextBackend {
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentRenderer for TextBackend {
    fn format(&self) -> ExportFormat {
        ExportFormat::Text
    }

    fn name(&self) -> &str {
        "raw"
    }

    fn render(&self, request: &ExportRequest, _options: &RenderOptions) -> Result<Vec<u8>> {
        Ok(to_text(&request.text))
    }
}
