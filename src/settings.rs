//! Print settings
//!
//! Owned and persisted by the host application; the core only reads
//! them. `PrintSettings::default()` is the one canonical fallback —
//! components reference it, never redefine their own literals.

use serde::{Deserialize, Serialize};

/// Text alignment for a printed section
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    #[default]
    Center,
    Right,
}

impl Align {
    /// ESC a parameter byte
    pub fn escpos_mode(&self) -> u8 {
        match self {
            Align::Left => 0x00,
            Align::Center => 0x01,
            Align::Right => 0x02,
        }
    }
}

/// Column widths for the item table, in character cells
///
/// The amount column takes whatever remains of the line width.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnPlan {
    pub s_no: usize,
    pub name: usize,
    pub qty: usize,
    pub rate: usize,
}

impl Default for ColumnPlan {
    fn default() -> Self {
        Self {
            s_no: 4,
            name: 24,
            qty: 6,
            rate: 8,
        }
    }
}

/// User layout settings consumed by the encoder
///
/// `font_family`, `font_size`, `line_height` and `zoom` are advisory
/// for an on-screen preview; they never reach the byte stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintSettings {
    /// Paper width in character cells (48 for 80mm paper)
    pub line_width: usize,
    pub columns: ColumnPlan,
    pub header_align: Align,
    /// Glyph repeated to form separator lines
    pub separator: char,
    /// Blank lines fed before the cut
    pub feed_lines: u8,
    /// Path to an optional logo image
    pub logo_path: Option<String>,
    /// Raster width for the logo, in dots
    pub logo_width: u32,
    /// Bold the labels of the order-info block
    pub bold_labels: bool,
    /// Bold the values of the order-info block
    pub bold_values: bool,
    pub font_family: String,
    pub font_size: u16,
    pub line_height: f32,
    pub zoom: f32,
}

impl Default for PrintSettings {
    fn default() -> Self {
        Self {
            line_width: 48,
            columns: ColumnPlan::default(),
            header_align: Align::Center,
            separator: '-',
            feed_lines: 5,
            logo_path: None,
            logo_width: 384,
            bold_labels: true,
            bold_values: false,
            font_family: "monospace".to_string(),
            font_size: 12,
            line_height: 1.2,
            zoom: 1.0,
        }
    }
}
