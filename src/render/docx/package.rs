//! WordprocessingML package writer.

use std::io::{Cursor, Write};

use quick_xml::escape::escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::Result;
use crate::model::Metadata;
use crate::render::options::{RenderOptions, Rgb};

use super::FlowElement;

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Bullet numbering definition id in numbering.xml.
const BULLET_NUM_ID: &str = "1";

/// Colors resolved before packaging.
pub(super) struct Theme {
    pub primary: Rgb,
    pub rule: Rgb,
    pub footer: Rgb,
}

type XmlWriter = Writer<Cursor<Vec<u8>>>;

/// Zip every package part into a DOCX byte buffer.
pub(super) fn write_docx(
    elements: &[FlowElement],
    meta: &Metadata,
    options: &RenderOptions,
    theme: &Theme,
) -> Result<Vec<u8>> {
    let document = document_xml(elements, options, theme)?;
    let styles = styles_xml(options, theme);
    let core = core_xml(meta, options);

    let parts: [(&str, &[u8]); 8] = [
        ("[Content_Types].xml", CONTENT_TYPES.as_bytes()),
        ("_rels/.rels", ROOT_RELS.as_bytes()),
        ("word/document.xml", &document),
        ("word/styles.xml", styles.as_bytes()),
        ("word/numbering.xml", NUMBERING.as_bytes()),
        ("word/_rels/document.xml.rels", DOCUMENT_RELS.as_bytes()),
        ("docProps/core.xml", core.as_bytes()),
        ("docProps/app.xml", APP.as_bytes()),
    ];

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let file_options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, data) in parts {
        zip.start_file(name, file_options)?;
        zip.write_all(data)?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

fn document_xml(elements: &[FlowElement], options: &RenderOptions, theme: &Theme) -> Result<Vec<u8>> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

    let mut root = BytesStart::new("w:document");
    root.push_attribute(("xmlns:w", W_NS));
    root.push_attribute(("xmlns:r", R_NS));
    writer.write_event(Event::Start(root))?;
    writer.write_event(Event::Start(BytesStart::new("w:body")))?;

    for element in elements {
        write_element(&mut writer, element, theme)?;
    }

    write_section(&mut writer, options)?;

    writer.write_event(Event::End(BytesEnd::new("w:body")))?;
    writer.write_event(Event::End(BytesEnd::new("w:document")))?;
    Ok(writer.into_inner().into_inner())
}

/// Paragraph and run properties for one element.
#[derive(Default)]
struct Para<'a> {
    style: Option<&'a str>,
    bullet: bool,
    border: bool,
    bold: bool,
    color: Option<String>,
}

fn write_element(writer: &mut XmlWriter, element: &FlowElement, theme: &Theme) -> Result<()> {
    match element {
        FlowElement::Title(text) => paragraph(
            writer,
            &Para {
                style: Some("Title"),
                ..Default::default()
            },
            text,
        ),
        FlowElement::Meta(text) => paragraph(
            writer,
            &Para {
                style: Some("Subtitle"),
                ..Default::default()
            },
            text,
        ),
        FlowElement::Heading(level, text) => {
            let style = format!("Heading{}", (*level).clamp(1, 4));
            paragraph(
                writer,
                &Para {
                    style: Some(style.as_str()),
                    ..Default::default()
                },
                text,
            )
        }
        FlowElement::Body(text) => paragraph(writer, &Para::default(), text),
        FlowElement::Bold(text) => paragraph(
            writer,
            &Para {
                bold: true,
                ..Default::default()
            },
            text,
        ),
        FlowElement::ListItem(text) => paragraph(
            writer,
            &Para {
                style: Some("ListParagraph"),
                bullet: true,
                ..Default::default()
            },
            text,
        ),
        FlowElement::Empty => {
            writer.write_event(Event::Empty(BytesStart::new("w:p")))?;
            Ok(())
        }
        FlowElement::Rule => paragraph(
            writer,
            &Para {
                border: true,
                color: Some(theme.rule.to_hex()),
                ..Default::default()
            },
            "",
        ),
        FlowElement::Footer(text) => paragraph(
            writer,
            &Para {
                style: Some("Footer"),
                color: Some(theme.footer.to_hex()),
                ..Default::default()
            },
            text,
        ),
    }
}

fn paragraph(writer: &mut XmlWriter, para: &Para<'_>, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("w:p")))?;

    if para.style.is_some() || para.bullet || para.border {
        writer.write_event(Event::Start(BytesStart::new("w:pPr")))?;
        if let Some(style) = para.style {
            empty_with_val(writer, "w:pStyle", style)?;
        }
        if para.bullet {
            writer.write_event(Event::Start(BytesStart::new("w:numPr")))?;
            empty_with_val(writer, "w:ilvl", "0")?;
            empty_with_val(writer, "w:numId", BULLET_NUM_ID)?;
            writer.write_event(Event::End(BytesEnd::new("w:numPr")))?;
        }
        if para.border {
            let color = para.color.as_deref().unwrap_or("auto");
            writer.write_event(Event::Start(BytesStart::new("w:pBdr")))?;
            writer.write_event(Event::Empty(BytesStart::new("w:bottom").with_attributes([
                ("w:val", "single"),
                ("w:sz", "6"),
                ("w:space", "1"),
                ("w:color", color),
            ])))?;
            writer.write_event(Event::End(BytesEnd::new("w:pBdr")))?;
        }
        writer.write_event(Event::End(BytesEnd::new("w:pPr")))?;
    }

    if !text.is_empty() {
        writer.write_event(Event::Start(BytesStart::new("w:r")))?;
        let run_color = if para.border { None } else { para.color.as_deref() };
        if para.bold || run_color.is_some() {
            writer.write_event(Event::Start(BytesStart::new("w:rPr")))?;
            if para.bold {
                writer.write_event(Event::Empty(BytesStart::new("w:b")))?;
            }
            if let Some(color) = run_color {
                empty_with_val(writer, "w:color", color)?;
            }
            writer.write_event(Event::End(BytesEnd::new("w:rPr")))?;
        }
        writer.write_event(Event::Start(
            BytesStart::new("w:t").with_attributes([("xml:space", "preserve")]),
        ))?;
        let text = xml_safe(text);
        writer.write_event(Event::Text(BytesText::new(&text)))?;
        writer.write_event(Event::End(BytesEnd::new("w:t")))?;
        writer.write_event(Event::End(BytesEnd::new("w:r")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("w:p")))?;
    Ok(())
}

fn empty_with_val(writer: &mut XmlWriter, name: &str, value: &str) -> Result<()> {
    writer.write_event(Event::Empty(
        BytesStart::new(name).with_attributes([("w:val", value)]),
    ))?;
    Ok(())
}

/// Page size and margins in twentieths of a point.
fn write_section(writer: &mut XmlWriter, options: &RenderOptions) -> Result<()> {
    let twips = |pt: f32| ((pt * 20.0).round() as i64).to_string();
    let width = twips(options.page.width);
    let height = twips(options.page.height);
    let margin = twips(options.page.margin);

    writer.write_event(Event::Start(BytesStart::new("w:sectPr")))?;
    writer.write_event(Event::Empty(
        BytesStart::new("w:pgSz").with_attributes([("w:w", width.as_str()), ("w:h", height.as_str())]),
    ))?;
    writer.write_event(Event::Empty(BytesStart::new("w:pgMar").with_attributes([
        ("w:top", margin.as_str()),
        ("w:right", margin.as_str()),
        ("w:bottom", margin.as_str()),
        ("w:left", margin.as_str()),
        ("w:header", "708"),
        ("w:footer", "708"),
        ("w:gutter", "0"),
    ])))?;
    writer.write_event(Event::End(BytesEnd::new("w:sectPr")))?;
    Ok(())
}

/// Keep only XML 1.0 `Char` code points, minus the remaining C1 controls.
fn xml_safe(text: &str) -> String {
    text.chars().filter(|&c| is_xml_char(c)).collect()
}

fn is_xml_char(c: char) -> bool {
    match c {
        '\t' | '\n' | '\r' => true,
        '\u{FFFE}' | '\u{FFFF}' => false,
        _ => !c.is_control(),
    }
}

/// Half-point size for w:sz.
fn half_points(pt: f32) -> u32 {
    (pt * 2.0).round() as u32
}

fn styles_xml(options: &RenderOptions, theme: &Theme) -> String {
    let t = &options.typography;
    let primary = theme.primary.to_hex();
    let neutral = Rgb::from_hex(&options.palette.neutral)
        .map(|c| c.to_hex())
        .unwrap_or_else(|_| "374151".to_string());

    let mut headings = String::new();
    for level in 1..=4u8 {
        let color = if level <= 2 { &primary } else { &neutral };
        headings.push_str(&format!(
            r#"<w:style w:type="paragraph" w:styleId="Heading{level}"><w:name w:val="heading {level}"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:keepNext/><w:spacing w:before="240" w:after="80"/><w:outlineLvl w:val="{outline}"/></w:pPr><w:rPr><w:b/><w:color w:val="{color}"/><w:sz w:val="{size}"/></w:rPr></w:style>"#,
            level = level,
            outline = level - 1,
            color = color,
            size = half_points(t.heading_size(level)),
        ));
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="{ns}"><w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="Helvetica" w:hAnsi="Helvetica" w:cs="Helvetica"/><w:sz w:val="{body}"/></w:rPr></w:rPrDefault><w:pPrDefault><w:pPr><w:spacing w:after="80" w:line="{line}" w:lineRule="auto"/></w:pPr></w:pPrDefault></w:docDefaults><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style><w:style w:type="paragraph" w:styleId="Title"><w:name w:val="Title"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:rPr><w:b/><w:color w:val="{primary}"/><w:sz w:val="{title}"/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="Subtitle"><w:name w:val="Subtitle"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:rPr><w:color w:val="{neutral}"/><w:sz w:val="{subtitle}"/></w:rPr></w:style>{headings}<w:style w:type="paragraph" w:styleId="ListParagraph"><w:name w:val="List Paragraph"/><w:basedOn w:val="Normal"/><w:qFormat/><w:pPr><w:ind w:left="{indent}"/></w:pPr></w:style><w:style w:type="paragraph" w:styleId="Footer"><w:name w:val="footer"/><w:basedOn w:val="Normal"/><w:pPr><w:jc w:val="center"/></w:pPr><w:rPr><w:sz w:val="{footer}"/></w:rPr></w:style></w:styles>"#,
        ns = W_NS,
        body = half_points(t.body_size),
        line = (t.line_height_factor * 240.0).round() as u32,
        primary = primary,
        neutral = neutral,
        title = half_points(t.title_size),
        subtitle = half_points(t.subtitle_size),
        headings = headings,
        indent = (t.list_indent * 20.0 * 2.0).round() as u32,
        footer = half_points(t.footer_size),
    )
}

fn core_xml(meta: &Metadata, options: &RenderOptions) -> String {
    let created = meta.generated_at.format("%Y-%m-%dT%H:%M:%SZ");
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"><dc:title>{title}</dc:title><dc:subject>{subject}</dc:subject><dc:creator>{creator}</dc:creator><dcterms:created xsi:type="dcterms:W3CDTF">{created}</dcterms:created><dcterms:modified xsi:type="dcterms:W3CDTF">{created}</dcterms:modified></cp:coreProperties>"#,
        title = escape(xml_safe(&options.title).as_str()),
        subject = escape(xml_safe(&meta.subtitle()).as_str()),
        creator = escape(xml_safe(meta.display_name()).as_str()),
        created = created,
    )
}

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/><Override PartName="/word/numbering.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml"/><Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/><Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/><Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/></Relationships>"#;

const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering" Target="numbering.xml"/></Relationships>"#;

const NUMBERING: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:abstractNum w:abstractNumId="0"><w:multiLevelType w:val="singleLevel"/><w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="bullet"/><w:lvlText w:val="•"/><w:lvlJc w:val="left"/><w:pPr><w:ind w:left="720" w:hanging="360"/></w:pPr></w:lvl></w:abstractNum><w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num></w:numbering>"#;

const APP: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties"><Application>prd-export "#,
    env!("CARGO_PKG_VERSION"),
    r#"</Application></Properties>"#
);

#[cfg(test)]
mod tests {
    use super::*;

    fn theme() -> Theme {
        Theme {
            primary: Rgb::from_hex("#2563EB").unwrap(),
            rule: Rgb::from_hex("#D1D5DB").unwrap(),
            footer: Rgb::from_hex("#6B7280").unwrap(),
        }
    }

    fn body(elements: &[FlowElement]) -> String {
        let bytes = document_xml(elements, &RenderOptions::default(), &theme()).unwrap();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_text_is_escaped() {
        let xml = body(&[FlowElement::Body("a < b & \"c\"".into())]);
        assert!(xml.contains("a &lt; b &amp; "));
        assert!(!xml.contains("a < b"));
    }

    #[test]
    fn test_heading_style() {
        let xml = body(&[FlowElement::Heading(2, "Goals".into())]);
        assert!(xml.contains(r#"<w:pStyle w:val="Heading2"/>"#));
        assert!(xml.contains(">Goals</w:t>"));
    }

    #[test]
    fn test_list_item_numbering() {
        let xml = body(&[FlowElement::ListItem("one".into())]);
        assert!(xml.contains(r#"<w:numId w:val="1"/>"#));
    }

    #[test]
    fn test_rule_is_bottom_border() {
        let xml = body(&[FlowElement::Rule]);
        assert!(xml.contains("<w:pBdr><w:bottom"));
        assert!(xml.contains(r#"w:color="D1D5DB""#));
    }

    #[test]
    fn test_control_characters_dropped() {
        assert_eq!(xml_safe("a\u{0}b\u{1b}c\td"), "abc\td");
    }

    #[test]
    fn test_noncharacters_dropped() {
        let xml = body(&[FlowElement::Body("bad \u{FFFF} char \u{FFFE}".into())]);
        assert!(xml.contains(">bad  char </w:t>"));
        assert!(!xml.contains('\u{FFFF}'));
        assert!(!xml.contains('\u{FFFE}'));
        assert_eq!(xml_safe("\u{FFFD}\u{1F600}"), "\u{FFFD}\u{1F600}");
    }

    #[test]
    fn test_section_uses_page_geometry() {
        let xml = body(&[]);
        assert!(xml.contains(r#"<w:pgSz w:w="11906" w:h="16838"/>"#));
    }

    #[test]
    fn test_styles_carry_primary_color() {
        let styles = styles_xml(&RenderOptions::default(), &theme());
        assert!(styles.contains(r#"w:styleId="Heading1""#));
        assert!(styles.contains(r#"<w:color w:val="2563EB"/>"#));
    }
}
