//! Rendering module for converting documents to the export formats.

pub mod docx;
mod options;
pub mod pdf;
mod result;
pub mod snapshot;
mod text;

pub use docx::{to_docx, to_docx_with_stats, DocxRenderer, FlowElement};
pub use options::{
    Palette, PageGeometry, PageSize, RenderOptions, Rgb, Typography, BRANDING_FOOTER,
    DEFAULT_TITLE,
};
pub use pdf::{to_pdf, to_pdf_with_stats, PdfRenderer};
pub use result::{RenderResult, RenderStats};
pub use snapshot::{
    build_snapshot, to_json, JsonFormat, Snapshot, SnapshotBuilder, CHART_PALETTE_LEN,
    SNAPSHOT_GENERATOR, SNAPSHOT_VERSION,
};
pub use text::to_text;
