//! PDF serialization of laid-out pages.

use chrono::{DateTime, Utc};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document as LopdfDocument, Object, Stream, StringFormat};

use crate::error::Result;
use crate::model::Metadata;
use crate::render::options::{RenderOptions, Rgb};

use super::font::{encode_win_ansi, FontWeight};
use super::layout::{DrawOp, Pagination};

/// Serialize a pagination into PDF 1.4 bytes.
pub(crate) fn write_pdf(
    pagination: &Pagination,
    meta: &Metadata,
    options: &RenderOptions,
) -> Result<Vec<u8>> {
    let mut doc = LopdfDocument::with_version("1.4");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(font_dictionary(FontWeight::Regular));
    let bold_id = doc.add_object(font_dictionary(FontWeight::Bold));
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FontWeight::Regular.resource_name() => regular_id,
            FontWeight::Bold.resource_name() => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pagination.pages.len());
    for page in &pagination.pages {
        let content = Content {
            operations: page_operations(&page.ops, pagination.height),
        };
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => Object::Integer(page_count),
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                real(pagination.width),
                real(pagination.height),
            ],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(info_dictionary(meta, options));
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    if options.compress {
        doc.compress();
    }

    let mut buf = Vec::new();
    doc.save_to(&mut buf)?;
    Ok(buf)
}

fn font_dictionary(weight: FontWeight) -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => weight.base_font(),
        "Encoding" => "WinAnsiEncoding",
    }
}

fn info_dictionary(meta: &Metadata, options: &RenderOptions) -> Dictionary {
    dictionary! {
        "Title" => text_string(&options.title),
        "Author" => text_string(meta.display_name()),
        "Creator" => text_string(&meta.subtitle()),
        "Producer" => text_string(concat!("prd-export ", env!("CARGO_PKG_VERSION"))),
        "CreationDate" => text_string(&pdf_date(&meta.generated_at)),
    }
}

fn pdf_date(at: &DateTime<Utc>) -> String {
    at.format("D:%Y%m%d%H%M%SZ").to_string()
}

/// Literal string in WinAnsi, matching the fonts' encoding.
fn text_string(text: &str) -> Object {
    Object::String(encode_win_ansi(text), StringFormat::Literal)
}

fn real(value: f32) -> Object {
    Object::Real(value.into())
}

fn rgb(color: &Rgb) -> Vec<Object> {
    vec![real(color.r), real(color.g), real(color.b)]
}

/// Operators for one page; `height` flips top-down y to PDF space.
fn page_operations(ops: &[DrawOp], height: f32) -> Vec<Operation> {
    let mut operations = Vec::new();

    for op in ops {
        match op {
            DrawOp::FillRect {
                x,
                y,
                width,
                height: h,
                color,
            } => {
                operations.push(Operation::new("rg", rgb(color)));
                operations.push(Operation::new(
                    "re",
                    vec![real(*x), real(height - y - h), real(*width), real(*h)],
                ));
                operations.push(Operation::new("f", vec![]));
            }
            DrawOp::Rule {
                x1,
                x2,
                y,
                thickness,
                color,
            } => {
                let py = height - y;
                operations.push(Operation::new("RG", rgb(color)));
                operations.push(Operation::new("w", vec![real(*thickness)]));
                operations.push(Operation::new("m", vec![real(*x1), real(py)]));
                operations.push(Operation::new("l", vec![real(*x2), real(py)]));
                operations.push(Operation::new("S", vec![]));
            }
            DrawOp::Text {
                x,
                y,
                size,
                weight,
                color,
                text,
            } => {
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new(
                    "Tf",
                    vec![weight.resource_name().into(), real(*size)],
                ));
                operations.push(Operation::new("rg", rgb(color)));
                operations.push(Operation::new("Td", vec![real(*x), real(height - y)]));
                operations.push(Operation::new("Tj", vec![text_string(text)]));
                operations.push(Operation::new("ET", vec![]));
            }
        }
    }
    operations
}
