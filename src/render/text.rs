//! Raw text passthrough.

/// Export the report text unchanged as UTF-8 bytes.
pub fn to_text(text: &str) -> Vec<u8> {
    text.as_bytes().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_text_is_verbatim() {
        let text = "# Title\r\n\n**keep** the *markers*\n";
        assert_eq!(to_text(text), text.as_bytes());
    }
}
