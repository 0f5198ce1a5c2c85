//! Two-stage page layout.
//!
//! Stage one walks the blocks with a vertical cursor, moving whole blocks to
//! a new page when they do not fit. Stage two runs once the page count is
//! final and stamps every page with its footer.
//!
//! Coordinates are in points, measured from the top-left corner of the page.

use crate::error::Result;
use crate::model::{Block, Document, Metadata};
use crate::parser::strip_inline;
use crate::render::options::{RenderOptions, Rgb};

use super::font::{text_width, wrap_text, FontWeight};

/// Bullet glyph drawn before list items.
const BULLET_GLYPH: &str = "•";

/// Banner baselines (title, subtitle, detail line) as fractions of its height.
const BANNER_BASELINES: [f32; 3] = [0.37, 0.58, 0.75];

/// A drawing instruction on a laid-out page.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// A single line of text; `y` is the baseline.
    Text {
        x: f32,
        y: f32,
        size: f32,
        weight: FontWeight,
        color: Rgb,
        text: String,
    },
    /// A horizontal rule.
    Rule {
        x1: f32,
        x2: f32,
        y: f32,
        thickness: f32,
        color: Rgb,
    },
    /// A filled rectangle; `y` is its top edge.
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
    },
}

impl DrawOp {
    /// Text carried by a text op.
    pub fn text(&self) -> Option<&str> {
        match self {
            DrawOp::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}

/// One finished page.
#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutPage {
    /// Page number (1-indexed)
    pub number: u32,

    /// Drawing operations in paint order
    pub ops: Vec<DrawOp>,

    /// Indices of the document blocks placed on this page
    pub blocks: Vec<usize>,

    /// Whether the title banner was drawn on this page
    pub has_banner: bool,

    /// Page label stamped in stage two (`Page i of N`)
    pub footer: Option<String>,
}

impl LaidOutPage {
    fn new(number: u32) -> Self {
        Self {
            number,
            ops: Vec::new(),
            blocks: Vec::new(),
            has_banner: false,
            footer: None,
        }
    }

    /// All text drawn on the page, in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(DrawOp::text)
    }
}

/// The laid-out document.
#[derive(Debug, Clone, PartialEq)]
pub struct Pagination {
    /// Pages in order
    pub pages: Vec<LaidOutPage>,

    /// Page width in points
    pub width: f32,

    /// Page height in points
    pub height: f32,
}

impl Pagination {
    /// Number of pages.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Total blocks placed across all pages.
    pub fn placed_block_count(&self) -> usize {
        self.pages.iter().map(|p| p.blocks.len()).sum()
    }

    /// Number of pages carrying the banner.
    pub fn banner_count(&self) -> usize {
        self.pages.iter().filter(|p| p.has_banner).count()
    }
}

/// Resolved colors for one render.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Colors {
    pub primary: Rgb,
    pub neutral: Rgb,
    pub body: Rgb,
    pub rule: Rgb,
    pub footer: Rgb,
    pub banner_text: Rgb,
}

impl Colors {
    /// Parse the palette; the metadata accent color, if set, replaces the primary.
    pub fn resolve(options: &RenderOptions, meta: &Metadata) -> Result<Self> {
        let palette = &options.palette;
        let primary = palette.primary_for(meta)?;

        Ok(Self {
            primary,
            neutral: Rgb::from_hex(&palette.neutral)?,
            body: Rgb::from_hex(&palette.body)?,
            rule: Rgb::from_hex(&palette.rule)?,
            footer: Rgb::from_hex(&palette.footer)?,
            banner_text: Rgb::from_hex(&palette.banner_text)?,
        })
    }
}

/// Lay out a document: content pass, then footer pass.
pub fn layout_document(
    doc: &Document,
    meta: &Metadata,
    options: &RenderOptions,
) -> Result<Pagination> {
    options.page.validate()?;
    let colors = Colors::resolve(options, meta)?;

    let mut pagination = Paginator::new(options, colors).run(doc, meta);
    stamp_footers(&mut pagination, options, colors);

    log::debug!(
        "Laid out {} blocks on {} page(s)",
        pagination.placed_block_count(),
        pagination.page_count()
    );
    Ok(pagination)
}

/// A block measured for placement.
struct Measured {
    lines: Vec<String>,
    size: f32,
    line_height: f32,
    weight: FontWeight,
    color: Rgb,
    /// Space above the first line
    gap: f32,
    height: f32,
}

/// Stage one: place blocks with a running cursor.
struct Paginator<'a> {
    options: &'a RenderOptions,
    colors: Colors,
    pages: Vec<LaidOutPage>,
    cursor: f32,
    /// True while nothing has been placed since the last page break
    at_page_top: bool,
}

impl<'a> Paginator<'a> {
    fn new(options: &'a RenderOptions, colors: Colors) -> Self {
        Self {
            options,
            colors,
            pages: vec![LaidOutPage::new(1)],
            cursor: options.page.margin,
            at_page_top: true,
        }
    }

    fn run(mut self, doc: &Document, meta: &Metadata) -> Pagination {
        self.draw_banner(meta);

        for (index, block) in doc.iter().enumerate() {
            self.place(index, block);
        }

        Pagination {
            pages: self.pages,
            width: self.options.page.width,
            height: self.options.page.height,
        }
    }

    fn current(&mut self) -> &mut LaidOutPage {
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn new_page(&mut self) {
        let number = self.pages.len() as u32 + 1;
        self.pages.push(LaidOutPage::new(number));
        self.cursor = self.options.page.margin;
        self.at_page_top = true;
    }

    fn draw_banner(&mut self, meta: &Metadata) {
        let page = self.options.page;
        let t = self.options.typography;
        let colors = self.colors;
        let title = self.options.title.clone();
        let [title_y, subtitle_y, detail_y] = BANNER_BASELINES.map(|f| t.banner_height * f);

        let mut ops = vec![
            DrawOp::FillRect {
                x: 0.0,
                y: 0.0,
                width: page.width,
                height: t.banner_height,
                color: colors.primary,
            },
            DrawOp::Text {
                x: page.margin,
                y: title_y,
                size: t.title_size,
                weight: FontWeight::Bold,
                color: colors.banner_text,
                text: title,
            },
            DrawOp::Text {
                x: page.margin,
                y: subtitle_y,
                size: t.subtitle_size,
                weight: FontWeight::Regular,
                color: colors.banner_text,
                text: meta.subtitle(),
            },
        ];

        let mut details = vec![format!("Generated {}", meta.generated_date())];
        details.extend(meta.extra_lines());
        let detail_size = t.footer_size + 1.0;
        let detail_line = wrap_text(
            &details.join("   |   "),
            page.content_width(),
            detail_size,
            FontWeight::Regular,
        )
        .into_iter()
        .next()
        .unwrap_or_default();
        ops.push(DrawOp::Text {
            x: page.margin,
            y: detail_y,
            size: detail_size,
            weight: FontWeight::Regular,
            color: colors.banner_text,
            text: detail_line,
        });

        let first = self.current();
        first.ops.extend(ops);
        first.has_banner = true;

        self.cursor = t.banner_height + page.margin * 0.5;
        self.at_page_top = false;
    }

    fn measure(&self, block: &Block) -> Measured {
        let t = self.options.typography;
        let width = self.options.page.content_width();
        let list_width = width - t.list_indent;
        let body_lh = t.line_height();
        let c = self.colors;

        let body = |text: &str, weight: FontWeight, wrap_width: f32| {
            let lines = wrap_text(&strip_inline(text), wrap_width, t.body_size, weight);
            let height = lines.len() as f32 * body_lh + t.block_spacing;
            Measured {
                lines,
                size: t.body_size,
                line_height: body_lh,
                weight,
                color: c.body,
                gap: 0.0,
                height,
            }
        };

        match block {
            Block::Heading { level, text } => {
                let size = t.heading_size(*level);
                let line_height = size * t.line_height_factor;
                let lines = wrap_text(&strip_inline(text), width, size, FontWeight::Bold);
                let gap = size * t.heading_gap;
                let color = if *level <= 2 { c.primary } else { c.neutral };
                Measured {
                    height: gap + lines.len() as f32 * line_height,
                    lines,
                    size,
                    line_height,
                    weight: FontWeight::Bold,
                    color,
                    gap,
                }
            }
            Block::Paragraph { text } => body(text, FontWeight::Regular, width),
            Block::BoldLine { text } => body(text, FontWeight::Bold, width),
            Block::Bullet { text } | Block::NumberedItem { text } => {
                body(text, FontWeight::Regular, list_width)
            }
            Block::Separator => Measured {
                lines: Vec::new(),
                size: 0.0,
                line_height: 0.0,
                weight: FontWeight::Regular,
                color: c.rule,
                gap: 0.0,
                height: t.separator_height,
            },
            Block::Blank => Measured {
                lines: Vec::new(),
                size: 0.0,
                line_height: 0.0,
                weight: FontWeight::Regular,
                color: c.body,
                gap: 0.0,
                height: t.blank_height,
            },
        }
    }

    fn place(&mut self, index: usize, block: &Block) {
        let measured = self.measure(block);
        let bottom = self.options.page.content_bottom();

        if self.cursor + measured.height > bottom && !self.at_page_top {
            log::debug!(
                "Page break before block {} ({}) at cursor {:.1}",
                index,
                block.kind(),
                self.cursor
            );
            self.new_page();
        }
        if self.cursor + measured.height > bottom {
            log::warn!(
                "Block {} ({}) is taller than a page ({:.1}pt); placing it anyway",
                index,
                block.kind(),
                measured.height
            );
        }

        let margin = self.options.page.margin;
        let t = self.options.typography;
        let top = self.cursor + measured.gap;
        let mut ops = Vec::new();

        match block {
            Block::Separator => {
                ops.push(DrawOp::Rule {
                    x1: margin,
                    x2: self.options.page.width - margin,
                    y: self.cursor + measured.height / 2.0,
                    thickness: 0.75,
                    color: measured.color,
                });
            }
            Block::Blank => {}
            _ => {
                let text_x = if block.is_list_item() {
                    margin + t.list_indent
                } else {
                    margin
                };

                if let Block::Bullet { .. } = block {
                    ops.push(DrawOp::Text {
                        x: margin + t.list_indent * 0.35,
                        y: top + measured.size,
                        size: measured.size,
                        weight: FontWeight::Regular,
                        color: measured.color,
                        text: BULLET_GLYPH.to_string(),
                    });
                }

                for (i, line) in measured.lines.iter().enumerate() {
                    if line.is_empty() {
                        continue;
                    }
                    ops.push(DrawOp::Text {
                        x: text_x,
                        y: top + i as f32 * measured.line_height + measured.size,
                        size: measured.size,
                        weight: measured.weight,
                        color: measured.color,
                        text: line.clone(),
                    });
                }
            }
        }

        let page = self.current();
        page.ops.extend(ops);
        page.blocks.push(index);

        self.cursor += measured.height;
        self.at_page_top = false;
    }
}

/// Stage two: stamp `branding` and `Page i of N` on every page.
fn stamp_footers(pagination: &mut Pagination, options: &RenderOptions, colors: Colors) {
    let page = options.page;
    let size = options.typography.footer_size;
    let total = pagination.pages.len();
    let rule_y = page.height - page.margin * 0.65;
    let baseline = page.height - page.margin * 0.4;

    for laid_out in &mut pagination.pages {
        let label = format!("Page {} of {}", laid_out.number, total);
        let label_x = page.width - page.margin - text_width(&label, size, FontWeight::Regular);

        laid_out.ops.push(DrawOp::Rule {
            x1: page.margin,
            x2: page.width - page.margin,
            y: rule_y,
            thickness: 0.5,
            color: colors.rule,
        });
        laid_out.ops.push(DrawOp::Text {
            x: page.margin,
            y: baseline,
            size,
            weight: FontWeight::Regular,
            color: colors.footer,
            text: options.branding.clone(),
        });
        laid_out.ops.push(DrawOp::Text {
            x: label_x,
            y: baseline,
            size,
            weight: FontWeight::Regular,
            color: colors.footer,
            text: label.clone(),
        });
        laid_out.footer = Some(label);
    }
}
