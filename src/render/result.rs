//! Rendering result with metadata and statistics.

use crate::model::{DocumentStats, Metadata};
use serde::{Deserialize, Serialize};

/// Result of rendering a document, including output bytes and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered output (PDF, DOCX, etc.)
    #[serde(skip)]
    pub content: Vec<u8>,

    /// Metadata the document was rendered with
    pub metadata: Metadata,

    /// Render statistics
    pub stats: RenderStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: Vec<u8>, metadata: Metadata, stats: RenderStats) -> Self {
        Self {
            content,
            metadata,
            stats,
        }
    }

    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Statistics collected while rendering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderStats {
    /// Pages produced (1 for flowed output, which has no fixed pages)
    pub page_count: u32,

    /// Blocks placed in the output
    pub placed_block_count: u32,

    /// Block counts of the source document
    pub document: DocumentStats,

    /// Output size in bytes
    pub byte_count: u64,
}

impl RenderStats {
    /// Create statistics for a document.
    pub fn for_document(document: DocumentStats) -> Self {
        Self {
            document,
            ..Default::default()
        }
    }

    /// Set page and placement counts.
    pub fn with_pages(mut self, page_count: u32, placed_block_count: u32) -> Self {
        self.page_count = page_count;
        self.placed_block_count = placed_block_count;
        self
    }

    /// Record the output size.
    pub fn with_bytes(mut self, byte_count: usize) -> Self {
        self.byte_count = byte_count as u64;
        self
    }

    /// Check that every source block was placed.
    pub fn is_complete(&self) -> bool {
        self.placed_block_count == self.document.block_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_builder() {
        let doc_stats = DocumentStats {
            block_count: 3,
            ..Default::default()
        };
        let stats = RenderStats::for_document(doc_stats)
            .with_pages(2, 3)
            .with_bytes(1024);

        assert_eq!(stats.page_count, 2);
        assert_eq!(stats.byte_count, 1024);
        assert!(stats.is_complete());
        assert!(!RenderStats::for_document(doc_stats).is_complete());
    }
}
