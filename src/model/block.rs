//! Block-level types.

use serde::{Deserialize, Serialize};

use crate::parser::strip_inline;

/// One classified line of input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// Heading, level 1-4, marker removed
    Heading {
        /// Heading level (1-4)
        level: u8,
        /// Heading text
        text: String,
    },

    /// Plain body text
    Paragraph {
        /// Paragraph text (inline markup retained)
        text: String,
    },

    /// Unordered list item, marker removed
    Bullet {
        /// Item text
        text: String,
    },

    /// Numbered list item; the `N. ` marker stays in the text
    NumberedItem {
        /// Item text including its marker
        text: String,
    },

    /// A line that is entirely emphasized; `**` markers retained
    BoldLine {
        /// Line text including its markers
        text: String,
    },

    /// Horizontal rule
    Separator,

    /// Empty line
    Blank,
}

impl Block {
    /// Create a heading block.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Block::Heading {
            level: level.clamp(1, 4),
            text: text.into(),
        }
    }

    /// Create a paragraph block.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph { text: text.into() }
    }

    /// Create a bullet block.
    pub fn bullet(text: impl Into<String>) -> Self {
        Block::Bullet { text: text.into() }
    }

    /// Create a numbered item block.
    pub fn numbered(text: impl Into<String>) -> Self {
        Block::NumberedItem { text: text.into() }
    }

    /// Create a bold line block.
    pub fn bold_line(text: impl Into<String>) -> Self {
        Block::BoldLine { text: text.into() }
    }

    /// Raw text carried by the block, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Block::Heading { text, .. }
            | Block::Paragraph { text }
            | Block::Bullet { text }
            | Block::NumberedItem { text }
            | Block::BoldLine { text } => Some(text),
            Block::Separator | Block::Blank => None,
        }
    }

    /// Text with inline markup removed. Empty for separators and blanks.
    pub fn plain_text(&self) -> String {
        self.text().map(strip_inline).unwrap_or_default()
    }

    /// Check if this is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self, Block::Heading { .. })
    }

    /// Check if this is a list item (bulleted or numbered).
    pub fn is_list_item(&self) -> bool {
        matches!(self, Block::Bullet { .. } | Block::NumberedItem { .. })
    }

    /// Short kind name, used in logs and statistics.
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Heading { .. } => "heading",
            Block::Paragraph { .. } => "paragraph",
            Block::Bullet { .. } => "bullet",
            Block::NumberedItem { .. } => "numbered_item",
            Block::BoldLine { .. } => "bold_line",
            Block::Separator => "separator",
            Block::Blank => "blank",
        }
    }
}

/// A parsed report: one block per source line, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Blocks in source order
    pub blocks: Vec<Block>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self { blocks: Vec::new() }
    }

    /// Create a document from blocks.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the document has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Iterate over blocks.
    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    /// Get the block slice.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// First level-1 heading, stripped of inline markup.
    pub fn title(&self) -> Option<String> {
        self.blocks.iter().find_map(|block| match block {
            Block::Heading { level: 1, text } => Some(strip_inline(text)),
            _ => None,
        })
    }

    /// Count blocks by kind.
    pub fn stats(&self) -> DocumentStats {
        let mut stats = DocumentStats {
            block_count: self.blocks.len() as u32,
            ..Default::default()
        };

        for block in &self.blocks {
            match block {
                Block::Heading { .. } => stats.heading_count += 1,
                Block::Paragraph { .. } | Block::BoldLine { .. } => stats.paragraph_count += 1,
                Block::Bullet { .. } | Block::NumberedItem { .. } => stats.list_item_count += 1,
                Block::Separator => stats.separator_count += 1,
                Block::Blank => stats.blank_count += 1,
            }
            stats.word_count += block.plain_text().split_whitespace().count() as u32;
        }

        stats
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

/// Block counts for a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStats {
    /// Total number of blocks
    pub block_count: u32,

    /// Headings of any level
    pub heading_count: u32,

    /// Paragraphs and bold lines
    pub paragraph_count: u32,

    /// Bulleted and numbered items
    pub list_item_count: u32,

    /// Horizontal rules
    pub separator_count: u32,

    /// Blank lines
    pub blank_count: u32,

    /// Approximate word count of the stripped text
    pub word_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_level_clamped() {
        assert_eq!(Block::heading(9, "x"), Block::Heading { level: 4, text: "x".into() });
        assert_eq!(Block::heading(0, "x"), Block::Heading { level: 1, text: "x".into() });
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(Block::bold_line("**Note**").plain_text(), "Note");
        assert_eq!(Block::Separator.plain_text(), "");
    }

    #[test]
    fn test_document_stats() {
        let doc = Document::from_blocks(vec![
            Block::heading(1, "Title"),
            Block::Blank,
            Block::paragraph("Two words"),
            Block::bullet("one"),
            Block::numbered("1. two"),
            Block::Separator,
        ]);

        let stats = doc.stats();
        assert_eq!(stats.block_count, 6);
        assert_eq!(stats.heading_count, 1);
        assert_eq!(stats.paragraph_count, 1);
        assert_eq!(stats.list_item_count, 2);
        assert_eq!(stats.separator_count, 1);
        assert_eq!(stats.blank_count, 1);
        assert_eq!(stats.word_count, 6);
    }

    #[test]
    fn test_document_title() {
        let doc = Document::from_blocks(vec![
            Block::paragraph("intro"),
            Block::heading(2, "Sub"),
            Block::heading(1, "**Main**"),
        ]);
        assert_eq!(doc.title(), Some("Main".to_string()));
        assert_eq!(Document::new().title(), None);
    }
}
