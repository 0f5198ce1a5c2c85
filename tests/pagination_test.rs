//! Integration tests for paginated layout and PDF output.

use lopdf::content::Content;

use prd_export::render::pdf::{DrawOp, PdfRenderer};
use prd_export::{parse, Metadata, PageSize, RenderOptions, BRANDING_FOOTER};

const SCENARIO: &str = "# Title\n\nSome body text.\n- item one\n- item two\n---\n**Bold note**";

fn long_report(sections: usize) -> String {
    let mut text = String::new();
    for i in 0..sections {
        text.push_str(&format!("## Section {}\n", i + 1));
        text.push_str(
            "This paragraph describes a requirement in enough detail to wrap across \
             several lines of the page, which makes pagination kick in quickly.\n",
        );
        text.push_str("- first point\n- second point\n1. numbered step\n\n");
    }
    text
}

fn meta() -> Metadata {
    Metadata::new("TaskFlow", "2.1")
}

#[test]
fn test_scenario_single_page() {
    let doc = parse(SCENARIO);
    assert_eq!(doc.len(), 7);

    let pagination = PdfRenderer::default().paginate(&doc, &meta()).unwrap();
    assert_eq!(pagination.page_count(), 1);
    assert_eq!(pagination.banner_count(), 1);
    assert_eq!(pagination.pages[0].footer.as_deref(), Some("Page 1 of 1"));
    assert_eq!(pagination.pages[0].blocks, (0..7).collect::<Vec<_>>());
}

#[test]
fn test_every_block_placed_exactly_once_in_order() {
    let doc = parse(&long_report(40));
    let pagination = PdfRenderer::default().paginate(&doc, &meta()).unwrap();

    assert!(pagination.page_count() > 1);

    let placed: Vec<usize> = pagination
        .pages
        .iter()
        .flat_map(|p| p.blocks.iter().copied())
        .collect();
    assert_eq!(placed, (0..doc.len()).collect::<Vec<_>>());
}

#[test]
fn test_footer_on_every_page() {
    let doc = parse(&long_report(40));
    let pagination = PdfRenderer::default().paginate(&doc, &meta()).unwrap();
    let total = pagination.page_count();

    for (i, page) in pagination.pages.iter().enumerate() {
        let expected = format!("Page {} of {}", i + 1, total);
        assert_eq!(page.footer.as_deref(), Some(expected.as_str()));
        assert_eq!(page.texts().filter(|t| *t == expected).count(), 1);
        assert_eq!(page.texts().filter(|t| *t == BRANDING_FOOTER).count(), 1);
    }
}

#[test]
fn test_banner_only_on_first_page() {
    let doc = parse(&long_report(40));
    let pagination = PdfRenderer::default().paginate(&doc, &meta()).unwrap();

    assert!(pagination.pages[0].has_banner);
    assert!(pagination.pages[1..].iter().all(|p| !p.has_banner));
    assert_eq!(pagination.banner_count(), 1);

    let first_fill = pagination.pages[0]
        .ops
        .iter()
        .any(|op| matches!(op, DrawOp::FillRect { .. }));
    assert!(first_fill);
}

#[test]
fn test_content_stays_above_footer_area() {
    let options = RenderOptions::default();
    let limit = options.page.height - options.page.margin;
    let doc = parse(&long_report(30));
    let pagination = PdfRenderer::new(options).paginate(&doc, &meta()).unwrap();

    for page in &pagination.pages {
        let footer = page.footer.clone().unwrap();
        for op in &page.ops {
            if let DrawOp::Text { y, text, .. } = op {
                if *text != footer && text != BRANDING_FOOTER {
                    assert!(*y <= limit, "{:?} at {} below {}", text, y, limit);
                }
            }
        }
    }
}

#[test]
fn test_letter_needs_at_least_as_many_pages_as_a4() {
    let doc = parse(&long_report(40));
    let a4 = PdfRenderer::default().paginate(&doc, &meta()).unwrap();
    let letter = PdfRenderer::new(RenderOptions::default().with_page_size(PageSize::Letter))
        .paginate(&doc, &meta())
        .unwrap();

    assert_eq!(letter.width, 612.0);
    assert!(letter.page_count() >= a4.page_count());
}

#[test]
fn test_pdf_page_count_matches_pagination() {
    let doc = parse(&long_report(25));
    let renderer = PdfRenderer::new(RenderOptions::default().with_compression(false));
    let pages = renderer.paginate(&doc, &meta()).unwrap().page_count();
    let bytes = renderer.render(&doc, &meta()).unwrap();

    let pdf = lopdf::Document::load_mem(&bytes).unwrap();
    let page_ids: Vec<_> = pdf.get_pages().into_values().collect();
    assert_eq!(page_ids.len() as u32, pages);

    let last_page = pdf.get_page_content(*page_ids.last().unwrap()).unwrap();
    let shown: Vec<Vec<u8>> = Content::decode(&last_page)
        .unwrap()
        .operations
        .into_iter()
        .filter(|op| op.operator == "Tj")
        .filter_map(|op| op.operands.first().and_then(|o| o.as_str().ok()).map(<[u8]>::to_vec))
        .collect();
    let expected = format!("Page {} of {}", pages, pages);
    assert!(shown.contains(&expected.into_bytes()));
}

#[test]
fn test_render_with_stats_is_complete() {
    let doc = parse(&long_report(10));
    let result = PdfRenderer::default().render_with_stats(&doc, &meta()).unwrap();

    assert!(result.stats.is_complete());
    assert_eq!(result.stats.document.block_count as usize, doc.len());
    assert_eq!(result.content.len() as u64, result.stats.byte_count);
}
