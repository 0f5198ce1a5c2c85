//! Rendering options and configuration.
//!
//! All geometry and style constants live here and are passed into each
//! renderer explicitly, so renderers hold no global state.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::Metadata;

/// Footer text stamped by both document renderers.
pub const BRANDING_FOOTER: &str = "Generated with PRD Generator";

/// Default document title shown in the banner and the flowed title paragraph.
pub const DEFAULT_TITLE: &str = "Product Requirements Document";

/// Options shared by the paginated and flowed renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Document title
    pub title: String,

    /// Footer branding text
    pub branding: String,

    /// Page geometry in points
    pub page: PageGeometry,

    /// Font sizes and vertical rhythm
    pub typography: Typography,

    /// Colors
    pub palette: Palette,

    /// Flate-compress PDF content streams
    pub compress: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the footer branding text.
    pub fn with_branding(mut self, branding: impl Into<String>) -> Self {
        self.branding = branding.into();
        self
    }

    /// Use a standard page size, keeping the current margin.
    pub fn with_page_size(mut self, size: PageSize) -> Self {
        let (width, height) = size.dimensions_pt();
        self.page.width = width;
        self.page.height = height;
        self
    }

    /// Set the page margin in points.
    pub fn with_margin(mut self, margin: f32) -> Self {
        self.page.margin = margin;
        self
    }

    /// Set the primary (banner and heading) color.
    pub fn with_primary_color(mut self, color: impl Into<String>) -> Self {
        self.palette.primary = color.into();
        self
    }

    /// Enable or disable content stream compression.
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Load options from JSON; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Other(format!("Invalid render options: {}", e)))
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            branding: BRANDING_FOOTER.to_string(),
            page: PageGeometry::default(),
            typography: Typography::default(),
            palette: Palette::default(),
            compress: true,
        }
    }
}

/// Standard page sizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    /// A4 paper size (210 x 297 mm)
    #[default]
    A4,
    /// US Letter size (8.5 x 11 inches)
    Letter,
}

impl PageSize {
    /// Page dimensions in points (width, height).
    pub fn dimensions_pt(&self) -> (f32, f32) {
        match self {
            PageSize::A4 => (595.28, 841.89),
            PageSize::Letter => (612.0, 792.0),
        }
    }

    /// Parse a page size name (`a4`, `letter`).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a4" => Some(PageSize::A4),
            "letter" | "us-letter" => Some(PageSize::Letter),
            _ => None,
        }
    }
}

/// Page geometry in points (1/72 inch).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl PageGeometry {
    /// Usable width between the left and right margins.
    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    /// Lowest y (top-down) a block may reach before a page break.
    pub fn content_bottom(&self) -> f32 {
        self.height - self.margin
    }

    /// Check the geometry leaves room for content.
    pub fn validate(&self) -> Result<()> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(Error::Layout(format!(
                "page size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.margin < 0.0 || self.content_width() <= 0.0 || self.content_bottom() <= self.margin
        {
            return Err(Error::Layout(format!(
                "margin {} leaves no room for content on a {}x{} page",
                self.margin, self.width, self.height
            )));
        }
        Ok(())
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        let (width, height) = PageSize::A4.dimensions_pt();
        Self {
            width,
            height,
            // 20 mm
            margin: 56.69,
        }
    }
}

/// Font sizes (points) and vertical rhythm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Typography {
    pub body_size: f32,
    /// Line height as a multiple of font size
    pub line_height_factor: f32,
    /// Sizes for heading levels 1-4
    pub heading_sizes: [f32; 4],
    /// Space above a heading, as a multiple of its font size
    pub heading_gap: f32,
    /// Space after paragraphs and list items
    pub block_spacing: f32,
    /// Left indent for list items
    pub list_indent: f32,
    pub separator_height: f32,
    pub blank_height: f32,
    pub banner_height: f32,
    pub title_size: f32,
    pub subtitle_size: f32,
    pub footer_size: f32,
}

impl Typography {
    /// Line height for body text.
    pub fn line_height(&self) -> f32 {
        self.body_size * self.line_height_factor
    }

    /// Font size for a heading level; levels outside 1-4 are clamped.
    pub fn heading_size(&self, level: u8) -> f32 {
        let index = level.clamp(1, 4) as usize - 1;
        self.heading_sizes[index]
    }
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            body_size: 11.0,
            line_height_factor: 1.4,
            heading_sizes: [20.0, 16.0, 13.0, 12.0],
            heading_gap: 0.6,
            block_spacing: 4.0,
            list_indent: 16.0,
            separator_height: 14.0,
            blank_height: 8.0,
            banner_height: 118.0,
            title_size: 24.0,
            subtitle_size: 12.0,
            footer_size: 8.0,
        }
    }
}

/// Colors as `#RRGGBB` strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Banner fill and level 1-2 headings
    pub primary: String,
    /// Level 3-4 headings
    pub neutral: String,
    pub body: String,
    pub rule: String,
    pub footer: String,
    pub banner_text: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: "#2563EB".to_string(),
            neutral: "#374151".to_string(),
            body: "#1F2937".to_string(),
            rule: "#D1D5DB".to_string(),
            footer: "#6B7280".to_string(),
            banner_text: "#FFFFFF".to_string(),
        }
    }
}

impl Palette {
    /// Primary color for a render; a set accent color replaces the palette's.
    pub fn primary_for(&self, meta: &Metadata) -> Result<Rgb> {
        Rgb::from_hex(meta.accent().unwrap_or(&self.primary))
    }
}

/// An RGB color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    /// Parse `#RRGGBB` or `#RGB` (leading `#` optional).
    pub fn from_hex(value: &str) -> Result<Self> {
        let hex = value.trim().trim_start_matches('#');
        let invalid = || Error::InvalidColor(value.to_string());

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let (r, g, b) = match hex.len() {
            6 => (
                u8::from_str_radix(&hex[0..2], 16).map_err(|_| invalid())?,
                u8::from_str_radix(&hex[2..4], 16).map_err(|_| invalid())?,
                u8::from_str_radix(&hex[4..6], 16).map_err(|_| invalid())?,
            ),
            3 => {
                let expand = |i: usize| {
                    u8::from_str_radix(&hex[i..i + 1], 16)
                        .map(|v| v * 17)
                        .map_err(|_| invalid())
                };
                (expand(0)?, expand(1)?, expand(2)?)
            }
            _ => return Err(invalid()),
        };

        Ok(Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        })
    }

    /// Uppercase `RRGGBB` without `#`, as used by WordprocessingML.
    pub fn to_hex(&self) -> String {
        let c = |v: f32| (v * 255.0).round().clamp(0.0, 255.0) as u8;
        format!("{:02X}{:02X}{:02X}", c(self.r), c(self.g), c(self.b))
    }
}
