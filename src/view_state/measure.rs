//! Text measurement capability.
//!
//! The layout engine never measures glyphs itself; the host supplies a
//! [`TextMeasure`] backed by its rendering engine. Two measurers ship with
//! the crate: [`MonospaceMeasure`] (terminal-style column widths via
//! `unicode-width`) and [`FixedAdvanceMeasure`] (one constant advance per
//! character, handy for deterministic geometry).

use unicode_width::UnicodeWidthStr;

/// Font family used when the host does not specify one.
pub const DEFAULT_FONT_FAMILY: &str = "\"Microsoft YaHei\", Arial, sans-serif";

/// Font selection passed to the measurer.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    /// CSS-style family list.
    pub family: String,
    /// Font size in pixels.
    pub size_px: f64,
}

impl FontSpec {
    /// Font of the given size in the default family.
    pub fn new(size_px: f64) -> Self {
        Self {
            family: DEFAULT_FONT_FAMILY.to_string(),
            size_px,
        }
    }
}

/// `measureText(font, string) -> width` capability.
///
/// Implementations must be deterministic: the same font and string always
/// measure the same. Both surfaces derive line breaks from it.
pub trait TextMeasure: Send + Sync {
    /// Advance width of `text` rendered in `font`, in pixels.
    fn measure(&self, font: &FontSpec, text: &str) -> f64;
}

/// Column-based measurer: each display column is `advance_em` of the font size.
///
/// Wide (CJK) characters occupy two columns, so with the default half-em
/// advance they measure one full em.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasure {
    /// Width of one display column as a fraction of the font size.
    pub advance_em: f64,
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        Self { advance_em: 0.5 }
    }
}

impl TextMeasure for MonospaceMeasure {
    fn measure(&self, font: &FontSpec, text: &str) -> f64 {
        text.width() as f64 * self.advance_em * font.size_px
    }
}

/// Measurer giving every character the same pixel advance, whatever the font.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvanceMeasure {
    /// Advance of one character in pixels.
    pub advance_px: f64,
}

impl FixedAdvanceMeasure {
    /// Create a measurer with the given per-character advance.
    pub fn new(advance_px: f64) -> Self {
        Self { advance_px }
    }
}

impl TextMeasure for FixedAdvanceMeasure {
    fn measure(&self, _font: &FontSpec, text: &str) -> f64 {
        text.chars().count() as f64 * self.advance_px
    }
}
