//! Line classifier producing the block IR.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::{Block, Document};

/// Heading markers, deepest first so `#### ` wins over `# `.
const HEADING_MARKERS: [(&str, u8); 4] = [("#### ", 4), ("### ", 3), ("## ", 2), ("# ", 1)];

/// Two-character bullet markers.
const BULLET_MARKERS: [&str; 3] = ["- ", "• ", "* "];

/// Parse report text into a document using the shared parser.
pub fn parse(text: &str) -> Document {
    static PARSER: OnceLock<BlockParser> = OnceLock::new();
    PARSER.get_or_init(BlockParser::new).parse(text)
}

/// Classifies each input line into exactly one [`Block`].
///
/// Classification looks only at the line itself, so the same text always
/// produces the same document.
#[derive(Debug, Clone)]
pub struct BlockParser {
    numbered_regex: Regex,
}

impl BlockParser {
    /// Create a parser with its pattern compiled.
    pub fn new() -> Self {
        Self {
            numbered_regex: Regex::new(r"^[0-9]+\.\s").unwrap(),
        }
    }

    /// Parse text into a document, one block per `'\n'`-separated line.
    pub fn parse(&self, text: &str) -> Document {
        let blocks = text.split('\n').map(|line| self.parse_line(line)).collect();
        Document::from_blocks(blocks)
    }

    /// Classify a single line.
    pub fn parse_line(&self, line: &str) -> Block {
        let line = line.strip_suffix('\r').unwrap_or(line);

        for (marker, level) in HEADING_MARKERS {
            if let Some(rest) = line.strip_prefix(marker) {
                return Block::Heading {
                    level,
                    text: rest.trim().to_string(),
                };
            }
        }

        for marker in BULLET_MARKERS {
            if let Some(rest) = line.strip_prefix(marker) {
                return Block::Bullet {
                    text: rest.trim().to_string(),
                };
            }
        }

        if self.numbered_regex.is_match(line) {
            return Block::NumberedItem {
                text: line.trim().to_string(),
            };
        }

        let trimmed = line.trim();

        if trimmed == "---" {
            return Block::Separator;
        }

        if trimmed.starts_with("**") && trimmed.ends_with("**") {
            return Block::BoldLine {
                text: trimmed.to_string(),
            };
        }

        if trimmed.is_empty() {
            Block::Blank
        } else {
            Block::Paragraph {
                text: trimmed.to_string(),
            }
        }
    }
}

impl Default for BlockParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings() {
        let parser = BlockParser::new();
        assert_eq!(parser.parse_line("# Title"), Block::heading(1, "Title"));
        assert_eq!(parser.parse_line("## Goals"), Block::heading(2, "Goals"));
        assert_eq!(parser.parse_line("### Scope"), Block::heading(3, "Scope"));
        assert_eq!(parser.parse_line("#### Notes "), Block::heading(4, "Notes"));
    }

    #[test]
    fn test_deep_heading_is_paragraph() {
        let parser = BlockParser::new();
        assert_eq!(parser.parse_line("##### Deep"), Block::paragraph("##### Deep"));
        assert_eq!(parser.parse_line("#NoSpace"), Block::paragraph("#NoSpace"));
    }

    #[test]
    fn test_bullets() {
        let parser = BlockParser::new();
        assert_eq!(parser.parse_line("- one"), Block::bullet("one"));
        assert_eq!(parser.parse_line("• two"), Block::bullet("two"));
        assert_eq!(parser.parse_line("* three"), Block::bullet("three"));
        // indented markers are not bullets
        assert_eq!(parser.parse_line("  - nested"), Block::paragraph("- nested"));
    }

    #[test]
    fn test_numbered_keeps_marker() {
        let parser = BlockParser::new();
        assert_eq!(parser.parse_line("1. First"), Block::numbered("1. First"));
        assert_eq!(parser.parse_line("12. Twelfth"), Block::numbered("12. Twelfth"));
        assert_eq!(parser.parse_line("1.5 million"), Block::paragraph("1.5 million"));
    }

    #[test]
    fn test_separator() {
        let parser = BlockParser::new();
        assert_eq!(parser.parse_line("---"), Block::Separator);
        assert_eq!(parser.parse_line("  ---  "), Block::Separator);
        assert_eq!(parser.parse_line("----"), Block::paragraph("----"));
    }

    #[test]
    fn test_bold_line_keeps_markers() {
        let parser = BlockParser::new();
        assert_eq!(parser.parse_line("**Note**"), Block::bold_line("**Note**"));
        assert_eq!(parser.parse_line("  **Note**  "), Block::bold_line("**Note**"));
        assert_eq!(
            parser.parse_line("**Key:** value"),
            Block::paragraph("**Key:** value")
        );
    }

    #[test]
    fn test_bullet_wins_over_bold() {
        // "* " prefix is checked before the bold-line rule
        let parser = BlockParser::new();
        assert_eq!(parser.parse_line("* **x**"), Block::bullet("**x**"));
    }

    #[test]
    fn test_blank_lines() {
        let parser = BlockParser::new();
        assert_eq!(parser.parse_line(""), Block::Blank);
        assert_eq!(parser.parse_line("   \t"), Block::Blank);
        assert_eq!(parser.parse_line("\r"), Block::Blank);
    }

    #[test]
    fn test_line_count_matches_split() {
        assert_eq!(parse("").len(), 1);
        assert_eq!(parse("a\n").len(), 2);
        assert_eq!(parse("a\r\nb\r\n").len(), 3);
    }

    #[test]
    fn test_sample_document() {
        let doc = parse("# Title\n\nSome body text.\n- item one\n- item two\n---\n**Bold note**");
        assert_eq!(
            doc.blocks,
            vec![
                Block::heading(1, "Title"),
                Block::Blank,
                Block::paragraph("Some body text."),
                Block::bullet("item one"),
                Block::bullet("item two"),
                Block::Separator,
                Block::bold_line("**Bold note**"),
            ]
        );
    }
}
