//! Flowed (reflowable) DOCX rendering.
//!
//! Blocks map one-to-one onto WordprocessingML paragraphs; the consuming
//! word processor does all line breaking and pagination.

mod package;

use serde::Serialize;

use crate::error::Result;
use crate::model::{Block, Document, Metadata};
use crate::parser::strip_inline;

use super::options::Rgb;
use super::{RenderOptions, RenderResult, RenderStats};

/// Render a document to DOCX bytes.
pub fn to_docx(doc: &Document, meta: &Metadata, options: &RenderOptions) -> Result<Vec<u8>> {
    DocxRenderer::new(options.clone()).render(doc, meta)
}

/// Render a document to DOCX with statistics.
pub fn to_docx_with_stats(
    doc: &Document,
    meta: &Metadata,
    options: &RenderOptions,
) -> Result<RenderResult> {
    let renderer = DocxRenderer::new(options.clone());
    let content = renderer.render(doc, meta)?;
    let stats = RenderStats::for_document(doc.stats())
        .with_pages(1, doc.len() as u32)
        .with_bytes(content.len());
    Ok(RenderResult::new(content, meta.clone(), stats))
}

/// One element of the flowed document body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "text", rename_all = "snake_case")]
pub enum FlowElement {
    /// Document title
    Title(String),
    /// Generation details under the title
    Meta(String),
    /// Heading paragraph, level 1-4
    Heading(u8, String),
    /// Body paragraph
    Body(String),
    /// Bold body paragraph
    Bold(String),
    /// Single-level bulleted list item
    ListItem(String),
    /// Empty paragraph
    Empty,
    /// Horizontal rule
    Rule,
    /// Branding footer paragraph
    Footer(String),
}

/// Flowed renderer.
#[derive(Debug, Clone, Default)]
pub struct DocxRenderer {
    options: RenderOptions,
}

impl DocxRenderer {
    /// Create a new DOCX renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Build the element list: title, metadata and rule, one element per
    /// block, then a closing rule and the footer.
    pub fn elements(&self, doc: &Document, meta: &Metadata) -> Vec<FlowElement> {
        let mut elements = Vec::with_capacity(doc.len() + 5);

        elements.push(FlowElement::Title(self.options.title.clone()));
        elements.push(FlowElement::Meta(meta_line(meta)));
        elements.push(FlowElement::Rule);

        elements.extend(doc.iter().map(block_element));

        elements.push(FlowElement::Rule);
        elements.push(FlowElement::Footer(self.options.branding.clone()));
        elements
    }

    /// Render a document to DOCX bytes.
    pub fn render(&self, doc: &Document, meta: &Metadata) -> Result<Vec<u8>> {
        let primary = self.options.palette.primary_for(meta)?;
        let rule = Rgb::from_hex(&self.options.palette.rule)?;
        let footer = Rgb::from_hex(&self.options.palette.footer)?;

        let elements = self.elements(doc, meta);
        log::debug!("Writing {} flowed elements", elements.len());

        let theme = package::Theme {
            primary,
            rule,
            footer,
        };
        package::write_docx(&elements, meta, &self.options, &theme)
    }
}

fn block_element(block: &Block) -> FlowElement {
    match block {
        Block::Heading { level, text } => FlowElement::Heading(*level, strip_inline(text)),
        Block::Paragraph { text } => FlowElement::Body(strip_inline(text)),
        Block::BoldLine { text } => FlowElement::Bold(strip_inline(text)),
        Block::Bullet { text } => FlowElement::ListItem(strip_inline(text)),
        // literal marker keeps numbering stable when the document is edited
        Block::NumberedItem { text } => FlowElement::Body(strip_inline(text)),
        Block::Separator => FlowElement::Rule,
        Block::Blank => FlowElement::Empty,
    }
}

fn meta_line(meta: &Metadata) -> String {
    let mut parts = vec![format!(
        "Generated by {} on {}",
        meta.subtitle(),
        meta.generated_date()
    )];
    parts.extend(meta.extra_lines());
    parts.join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::parser::parse;

    fn meta() -> Metadata {
        Metadata::new("TaskFlow", "2.1")
    }

    #[test]
    fn test_elements_frame_blocks() {
        let doc = parse("# Title\n\nSome body text.\n- item one\n- item two\n---\n**Bold note**");
        let renderer = DocxRenderer::default();
        let elements = renderer.elements(&doc, &meta());

        assert_eq!(elements.len(), 7 + 5);
        assert_eq!(
            elements[3..10].to_vec(),
            vec![
                FlowElement::Heading(1, "Title".into()),
                FlowElement::Empty,
                FlowElement::Body("Some body text.".into()),
                FlowElement::ListItem("item one".into()),
                FlowElement::ListItem("item two".into()),
                FlowElement::Rule,
                FlowElement::Bold("Bold note".into()),
            ]
        );
        assert!(matches!(elements[0], FlowElement::Title(_)));
        assert!(matches!(elements[1], FlowElement::Meta(_)));
        assert_eq!(elements[2], FlowElement::Rule);
        assert_eq!(elements[10], FlowElement::Rule);
        assert_eq!(
            elements[11],
            FlowElement::Footer(crate::render::BRANDING_FOOTER.to_string())
        );
    }

    #[test]
    fn test_numbered_item_keeps_marker() {
        let doc = parse("3. Ship it");
        let elements = DocxRenderer::default().elements(&doc, &meta());
        assert_eq!(elements[3], FlowElement::Body("3. Ship it".into()));
    }

    #[test]
    fn test_meta_line() {
        let meta = meta().with_field("Owner", "Dana");
        let line = meta_line(&meta);
        assert!(line.starts_with("Generated by TaskFlow v2.1 on "));
        assert!(line.ends_with(" | Owner: Dana"));
    }

    #[test]
    fn test_invalid_accent_fails() {
        let meta = meta().with_accent_color("#XYZ");
        let result = DocxRenderer::default().render(&Document::new(), &meta);
        assert!(matches!(result, Err(Error::InvalidColor(_))));
    }

    #[test]
    fn test_render_produces_zip() {
        let bytes = to_docx(&parse("# Hi"), &meta(), &RenderOptions::default()).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }
}
