//! Inline markup removal for renderers that draw plain text.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

/// Strip bold, italic, inline code and link markup using the shared stripper.
pub fn strip_inline(text: &str) -> String {
    static STRIPPER: OnceLock<InlineStripper> = OnceLock::new();
    STRIPPER.get_or_init(InlineStripper::new).strip(text)
}

/// Removes emphasis, code and link markup from a line.
///
/// Bold runs are removed before italic ones since both use `*`.
#[derive(Debug, Clone)]
pub struct InlineStripper {
    bold_regex: Regex,
    italic_regex: Regex,
    code_regex: Regex,
    link_regex: Regex,
}

impl InlineStripper {
    /// Create a stripper with its patterns compiled.
    pub fn new() -> Self {
        Self {
            bold_regex: Regex::new(r"\*\*(.+?)\*\*").unwrap(),
            italic_regex: Regex::new(r"\*(.+?)\*").unwrap(),
            code_regex: Regex::new(r"`(.+?)`").unwrap(),
            link_regex: Regex::new(r"\[([^\]]+)\]\([^)]+\)").unwrap(),
        }
    }

    /// Strip markup until the text no longer changes.
    ///
    /// Each pass that changes the text makes it strictly shorter, so the loop
    /// ends, and the result is a fixpoint: stripping it again is a no-op.
    pub fn strip(&self, text: &str) -> String {
        let mut current = text.to_string();
        loop {
            let next = match self.strip_once(&current) {
                Cow::Borrowed(_) => None,
                Cow::Owned(s) => Some(s),
            };
            match next {
                Some(s) => current = s,
                None => return current,
            }
        }
    }

    /// One pass: bold, italic, code, links.
    fn strip_once<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let passes = [
            &self.bold_regex,
            &self.italic_regex,
            &self.code_regex,
            &self.link_regex,
        ];

        let mut out = Cow::Borrowed(text);
        for re in passes {
            let replaced = match re.replace_all(&out, "$1") {
                Cow::Owned(s) => Some(s),
                Cow::Borrowed(_) => None,
            };
            if let Some(s) = replaced {
                out = Cow::Owned(s);
            }
        }
        out
    }
}

impl Default for InlineStripper {
    fn default() -> Self {
        Self::new()
    }
}
