//! # prd-export
//!
//! Document export engine for generated product requirements reports.
//!
//! Report text is parsed line by line into a flat block list, which is then
//! rendered to a paginated PDF or a flowed DOCX. A canonical JSON snapshot
//! of the project record and a raw text passthrough round out the formats.
//!
//! ## Quick Start
//!
//! ```
//! use prd_export::{export_document, Metadata};
//!
//! let text = "# Overview\n\nA shared task tracker.\n- Fast\n- Offline";
//! let result = export_document("pdf", text, Metadata::new("TaskFlow", "1.0"));
//!
//! let artifact = result.into_result()?;
//! assert_eq!(artifact.mime_type, "application/pdf");
//! # Ok::<(), prd_export::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Line parser**: headings, bullets, numbered items, bold lines, rules
//! - **Paginated output**: PDF with banner, manual page breaks and page footers
//! - **Flowed output**: DOCX with heading styles and bullet numbering
//! - **Snapshot**: canonical JSON of the full project record
//! - **Parallel export**: every format at once with Rayon

pub mod error;
pub mod export;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use error::{Error, Result};
pub use export::{
    export_document, DocumentRenderer, ExportArtifact, ExportFormat, ExportRequest, ExportResult,
    Exporter, RendererRegistry,
};
pub use model::{Block, Document, DocumentStats, FontSizes, Metadata, ProjectRecord};
pub use parser::{parse, strip_inline};
pub use render::{
    build_snapshot, JsonFormat, PageSize, RenderOptions, RenderResult, RenderStats, Snapshot,
    BRANDING_FOOTER,
};

/// Render report text to PDF bytes with default options.
///
/// # Example
///
/// ```
/// use prd_export::{to_pdf, Metadata};
///
/// let bytes = to_pdf("# Title\nBody", &Metadata::new("TaskFlow", "1.0"))?;
/// assert!(bytes.starts_with(b"%PDF-"));
/// # Ok::<(), prd_export::Error>(())
/// ```
pub fn to_pdf(text: &str, metadata: &Metadata) -> Result<Vec<u8>> {
    render::to_pdf(&parse(text), metadata, &RenderOptions::default())
}

/// Render report text to DOCX bytes with default options.
pub fn to_docx(text: &str, metadata: &Metadata) -> Result<Vec<u8>> {
    render::to_docx(&parse(text), metadata, &RenderOptions::default())
}

/// Build a pretty-printed JSON snapshot of a project record.
///
/// # Example
///
/// ```
/// use prd_export::{to_json, ProjectRecord};
///
/// let record = ProjectRecord::from_json(r#"{"appName":"TaskFlow"}"#).unwrap();
/// let json = to_json(&record, "# Report")?;
/// assert!(json.contains("\"name\": \"TaskFlow\""));
/// # Ok::<(), prd_export::Error>(())
/// ```
pub fn to_json(record: &ProjectRecord, text: &str) -> Result<String> {
    render::to_json(&build_snapshot(record, text), JsonFormat::Pretty)
}

/// Builder for parsing a report once and rendering it to several formats.
///
/// # Example
///
/// ```
/// use prd_export::{Metadata, PageSize, PrdExport};
///
/// let parsed = PrdExport::new()
///     .with_metadata(Metadata::new("TaskFlow", "2.0"))
///     .with_page_size(PageSize::Letter)
///     .parse("# Goals\n- Ship");
///
/// let pdf = parsed.to_pdf()?;
/// let docx = parsed.to_docx()?;
/// assert!(pdf.starts_with(b"%PDF-"));
/// assert!(docx.starts_with(b"PK"));
/// # Ok::<(), prd_export::Error>(())
/// ```
pub struct PrdExport {
    metadata: Metadata,
    render_options: RenderOptions,
}

impl PrdExport {
    /// Create a new builder with default metadata and options.
    pub fn new() -> Self {
        Self {
            metadata: Metadata::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Set the cover and footer metadata.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Replace all render options.
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    /// Set the page size.
    pub fn with_page_size(mut self, size: PageSize) -> Self {
        self.render_options = self.render_options.with_page_size(size);
        self
    }

    /// Set the document title shown in the banner.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_title(title);
        self
    }

    /// Disable content stream compression.
    pub fn uncompressed(mut self) -> Self {
        self.render_options = self.render_options.with_compression(false);
        self
    }

    /// Parse report text.
    pub fn parse(self, text: &str) -> PrdExportResult {
        PrdExportResult {
            document: parse(text),
            metadata: self.metadata,
            render_options: self.render_options,
        }
    }
}

impl Default for PrdExport {
    fn default() -> Self {
        Self::new()
    }
}

/// A parsed report ready for rendering.
pub struct PrdExportResult {
    /// The parsed document
    pub document: Document,
    /// Metadata to render with
    pub metadata: Metadata,
    render_options: RenderOptions,
}

impl PrdExportResult {
    /// Render to PDF.
    pub fn to_pdf(&self) -> Result<Vec<u8>> {
        render::to_pdf(&self.document, &self.metadata, &self.render_options)
    }

    /// Render to PDF with page statistics.
    pub fn to_pdf_with_stats(&self) -> Result<RenderResult> {
        render::to_pdf_with_stats(&self.document, &self.metadata, &self.render_options)
    }

    /// Render to DOCX.
    pub fn to_docx(&self) -> Result<Vec<u8>> {
        render::to_docx(&self.document, &self.metadata, &self.render_options)
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Block statistics.
    pub fn stats(&self) -> DocumentStats {
        self.document.stats()
    }
}
