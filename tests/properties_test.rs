//! Property tests for the parser and inline stripper.

use proptest::prelude::*;

use prd_export::render::pdf::PdfRenderer;
use prd_export::{parse, strip_inline, Block, Metadata};

/// Lines built from the markers the parser cares about.
fn report_line() -> impl Strategy<Value = String> {
    prop_oneof![
        "[#]{1,5} [a-zA-Z ]{0,20}",
        "[-*•] [a-zA-Z *`\\[\\]()]{0,30}",
        "[0-9]{1,3}\\. [a-z ]{0,20}",
        Just("---".to_string()),
        "\\*\\*[a-z ]{0,15}\\*\\*",
        "[ \t]{0,3}",
        "[a-zA-Z0-9 *_`\\[\\]()#.\r-]{0,60}",
    ]
}

fn report() -> impl Strategy<Value = String> {
    prop::collection::vec(report_line(), 0..40).prop_map(|lines| lines.join("\n"))
}

proptest! {
    #[test]
    fn parse_yields_one_block_per_line(text in any::<String>()) {
        let doc = parse(&text);
        prop_assert_eq!(doc.len(), text.split('\n').count());
    }

    #[test]
    fn parse_is_deterministic(text in report()) {
        prop_assert_eq!(parse(&text), parse(&text));
    }

    #[test]
    fn heading_levels_in_range(text in report()) {
        for block in parse(&text).iter() {
            if let Block::Heading { level, .. } = block {
                prop_assert!((1..=4).contains(level));
            }
        }
    }

    #[test]
    fn strip_is_idempotent(text in any::<String>()) {
        let once = strip_inline(&text);
        prop_assert_eq!(strip_inline(&once), once.clone());
    }

    #[test]
    fn strip_never_grows(text in "[a-z*`\\[\\]() ]{0,80}") {
        prop_assert!(strip_inline(&text).len() <= text.len());
    }

    #[test]
    fn pagination_places_every_block(text in report()) {
        let doc = parse(&text);
        let pagination = PdfRenderer::default()
            .paginate(&doc, &Metadata::new("App", "1"))
            .unwrap();

        let placed: Vec<usize> = pagination.pages.iter().flat_map(|p| p.blocks.clone()).collect();
        prop_assert_eq!(placed, (0..doc.len()).collect::<Vec<_>>());

        let total = pagination.page_count();
        for (i, page) in pagination.pages.iter().enumerate() {
            let expected = format!("Page {} of {}", i + 1, total);
            prop_assert_eq!(page.footer.as_deref(), Some(expected.as_str()));
        }
    }
}

#[test]
fn bold_is_stripped_before_italic() {
    assert_eq!(strip_inline("**bold** and *italic*"), "bold and italic");
    assert_eq!(strip_inline("***both***"), "both");
}
