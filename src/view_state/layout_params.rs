//! Global layout parameters for invalidation tracking.

use super::types::ViewportDimensions;
use crate::model::PresentationStyle;

/// Gap after each verse block, as a fraction of the font size.
pub const BLOCK_GAP_RATIO: f64 = 0.2;
/// Title font size relative to the verse font size.
pub const TITLE_FONT_RATIO: f64 = 0.7;
/// Bottom margin of the title band, as a fraction of the viewport height.
pub const TITLE_MARGIN_RATIO: f64 = 0.01;
/// Horizontal padding on each side, as a fraction of the viewport width.
pub const PADDING_X_RATIO: f64 = 0.06;
/// Blank lines appended below the last verse.
pub const TRAILING_PAD_LINES: f64 = 3.0;

/// Every input that affects block geometry, apart from the content itself.
///
/// Used for invalidation: if the current params differ from the params of
/// the cached layout, a full relayout is needed. Colors are not included;
/// they never move a line break.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    /// Surface canvas.
    pub viewport: ViewportDimensions,
    /// Font size as a percentage of viewport height.
    pub font_size_fraction: f64,
    /// Line height as a multiple of the font size.
    pub line_height_multiplier: f64,
    /// Whether the title band is pinned above the scroll region.
    pub fixed_title: bool,
}

impl LayoutParams {
    /// Create new layout params.
    pub fn new(
        viewport: ViewportDimensions,
        font_size_fraction: f64,
        line_height_multiplier: f64,
        fixed_title: bool,
    ) -> Self {
        Self {
            viewport,
            font_size_fraction,
            line_height_multiplier,
            fixed_title,
        }
    }

    /// Params for `viewport` under the geometry-relevant fields of `style`.
    pub fn from_style(viewport: ViewportDimensions, style: &PresentationStyle) -> Self {
        Self::new(
            viewport,
            style.font_size_fraction,
            style.line_height_multiplier,
            style.fixed_title,
        )
    }

    /// Font size in pixels.
    pub fn font_size_px(&self) -> f64 {
        self.font_size_fraction / 100.0 * self.viewport.height
    }

    /// Height of one wrapped line in pixels.
    pub fn line_height(&self) -> f64 {
        self.font_size_px() * self.line_height_multiplier
    }

    /// Vertical gap after each block.
    pub fn block_gap(&self) -> f64 {
        self.font_size_px() * BLOCK_GAP_RATIO
    }

    /// Title font size in pixels.
    pub fn title_font_size_px(&self) -> f64 {
        self.font_size_px() * TITLE_FONT_RATIO
    }

    /// Height of the title band, pinned or not.
    pub fn title_height(&self) -> f64 {
        self.title_font_size_px() * self.line_height_multiplier
            + self.viewport.height * TITLE_MARGIN_RATIO
    }

    /// Title band height excluded from the scroll region (0 when unpinned).
    pub fn pinned_title_height(&self) -> f64 {
        if self.fixed_title {
            self.title_height()
        } else {
            0.0
        }
    }

    /// Title band height that scrolls with content (0 when pinned).
    pub fn unpinned_title_height(&self) -> f64 {
        if self.fixed_title {
            0.0
        } else {
            self.title_height()
        }
    }

    /// Horizontal padding on each side.
    pub fn padding_x(&self) -> f64 {
        self.viewport.width * PADDING_X_RATIO
    }

    /// Width available to a line before the wrap safety margin.
    pub fn max_width_px(&self) -> f64 {
        (self.viewport.width - 2.0 * self.padding_x()).floor()
    }

    /// Visible height of the scrolling area.
    pub fn scroll_region_height(&self) -> f64 {
        (self.viewport.height - self.pinned_title_height()).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(fixed_title: bool) -> LayoutParams {
        LayoutParams::new(ViewportDimensions::new(1600.0, 900.0), 8.0, 1.6, fixed_title)
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn font_size_is_percentage_of_height() {
        assert!(approx(params(true).font_size_px(), 72.0));
    }

    #[test]
    fn derived_metrics_match_ratios() {
        let p = params(true);
        assert!(approx(p.line_height(), 115.2));
        assert!(approx(p.block_gap(), 14.4));
        // 72 × 0.7 × 1.6 + 9
        assert!(approx(p.title_height(), 89.64));
        assert!(approx(p.padding_x(), 96.0));
        assert_eq!(p.max_width_px(), 1408.0);
    }

    #[test]
    fn pinned_title_shrinks_scroll_region() {
        let pinned = params(true);
        assert!(approx(pinned.scroll_region_height(), 900.0 - 89.64));
        assert_eq!(pinned.unpinned_title_height(), 0.0);

        let scrolling = params(false);
        assert_eq!(scrolling.scroll_region_height(), 900.0);
        assert_eq!(scrolling.pinned_title_height(), 0.0);
    }

    #[test]
    fn max_width_is_floored() {
        let p = LayoutParams::new(ViewportDimensions::new(1001.0, 600.0), 8.0, 1.6, true);
        // 1001 − 120.12 = 880.88
        assert_eq!(p.max_width_px(), 880.0);
    }

    #[test]
    fn equality_tracks_geometry_inputs() {
        assert_eq!(params(true), params(true));
        assert_ne!(params(true), params(false));
        let mut bigger = params(true);
        bigger.font_size_fraction = 9.0;
        assert_ne!(params(true), bigger);
    }

    #[test]
    fn from_style_copies_geometry_fields() {
        let style = PresentationStyle::default();
        let p = LayoutParams::from_style(ViewportDimensions::new(800.0, 600.0), &style);
        assert_eq!(p.font_size_fraction, style.font_size_fraction);
        assert_eq!(p.line_height_multiplier, style.line_height_multiplier);
        assert_eq!(p.fixed_title, style.fixed_title);
    }
}
