//! Paginated (fixed-layout) PDF rendering.
//!
//! Rendering runs in three steps: lay out content with manual page breaks,
//! stamp footers once the page count is known, then serialize.

mod font;
mod layout;
mod writer;

pub use font::{encode_win_ansi, text_width, wrap_text, FontWeight};
pub use layout::{layout_document, DrawOp, LaidOutPage, Pagination};

use crate::error::Result;
use crate::model::{Document, Metadata};

use super::{RenderOptions, RenderResult, RenderStats};

/// Render a document to PDF bytes.
pub fn to_pdf(doc: &Document, meta: &Metadata, options: &RenderOptions) -> Result<Vec<u8>> {
    PdfRenderer::new(options.clone()).render(doc, meta)
}

/// Render a document to PDF with page and block statistics.
pub fn to_pdf_with_stats(
    doc: &Document,
    meta: &Metadata,
    options: &RenderOptions,
) -> Result<RenderResult> {
    PdfRenderer::new(options.clone()).render_with_stats(doc, meta)
}

/// Paginated renderer.
#[derive(Debug, Clone, Default)]
pub struct PdfRenderer {
    options: RenderOptions,
}

impl PdfRenderer {
    /// Create a new PDF renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Renderer options.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Lay out pages with footers, without serializing.
    pub fn paginate(&self, doc: &Document, meta: &Metadata) -> Result<Pagination> {
        layout_document(doc, meta, &self.options)
    }

    /// Render a document to PDF bytes.
    pub fn render(&self, doc: &Document, meta: &Metadata) -> Result<Vec<u8>> {
        let pagination = self.paginate(doc, meta)?;
        writer::write_pdf(&pagination, meta, &self.options)
    }

    /// Render a document to PDF with statistics.
    pub fn render_with_stats(&self, doc: &Document, meta: &Metadata) -> Result<RenderResult> {
        let pagination = self.paginate(doc, meta)?;
        let content = writer::write_pdf(&pagination, meta, &self.options)?;

        let stats = RenderStats::for_document(doc.stats())
            .with_pages(
                pagination.page_count(),
                pagination.placed_block_count() as u32,
            )
            .with_bytes(content.len());

        Ok(RenderResult::new(content, meta.clone(), stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn test_to_pdf() {
        let doc = parse("# Title\n\nBody");
        let bytes = to_pdf(&doc, &Metadata::new("App", "1"), &RenderOptions::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_render_with_stats() {
        let doc = parse("# Title\n- a\n- b");
        let result = to_pdf_with_stats(&doc, &Metadata::new("App", "1"), &RenderOptions::default())
            .unwrap();

        assert_eq!(result.stats.page_count, 1);
        assert_eq!(result.stats.document.block_count, 3);
        assert!(result.stats.is_complete());
        assert_eq!(result.stats.byte_count, result.content_len() as u64);
    }
}
