//! Scroll position model.
//!
//! Each surface scrolls in its own pixels; only the normalized percent is
//! exchanged, so surfaces with different canvases stay at the same relative
//! position.

/// Largest valid offset: `max(0, total − viewport)`.
pub fn max_scroll(total_height: f64, viewport_height: f64) -> f64 {
    let max = total_height - viewport_height;
    if max > 0.0 {
        max
    } else {
        0.0
    }
}

/// Clamp `offset` into `[0, max]`; NaN becomes 0.
pub fn clamp_offset(offset: f64, max: f64) -> f64 {
    if offset.is_nan() || offset <= 0.0 {
        0.0
    } else if offset >= max {
        max.max(0.0)
    } else {
        offset
    }
}

/// Normalized position in `[0, 1]`; 0 when nothing can scroll.
pub fn to_percent(offset: f64, total_height: f64, viewport_height: f64) -> f64 {
    let max = max_scroll(total_height, viewport_height);
    if max > 0.0 {
        clamp_offset(offset, max) / max
    } else {
        0.0
    }
}

/// Pixel offset for a normalized position; the inverse of [`to_percent`].
pub fn to_pixels(percent: f64, total_height: f64, viewport_height: f64) -> f64 {
    let max = max_scroll(total_height, viewport_height);
    let percent = if percent.is_nan() { 0.0 } else { percent.clamp(0.0, 1.0) };
    percent * max
}

/// Scroll state owned by one surface.
///
/// # Invariants
/// - `0 <= offset <= max`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollState {
    offset: f64,
    max: f64,
}

impl ScrollState {
    /// State at the top of an unscrollable document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current offset in pixels.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Current maximum offset in pixels.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Current position as a percent of the scrollable range.
    pub fn percent(&self) -> f64 {
        if self.max > 0.0 {
            self.offset / self.max
        } else {
            0.0
        }
    }

    /// Update the scrollable range after relayout; re-clamps the offset.
    pub fn set_max(&mut self, max: f64) {
        self.max = if max.is_nan() { 0.0 } else { max.max(0.0) };
        self.offset = clamp_offset(self.offset, self.max);
    }

    /// Move to `offset`, clamped. Returns the applied offset.
    pub fn set_offset(&mut self, offset: f64) -> f64 {
        self.offset = clamp_offset(offset, self.max);
        self.offset
    }

    /// Move by `delta` pixels, clamped. Returns the applied offset.
    pub fn scroll_by(&mut self, delta: f64) -> f64 {
        self.set_offset(self.offset + delta)
    }

    /// Move to a normalized position. Returns the applied offset.
    pub fn set_percent(&mut self, percent: f64) -> f64 {
        let percent = if percent.is_nan() { 0.0 } else { percent.clamp(0.0, 1.0) };
        self.set_offset(percent * self.max)
    }

    /// Jump to the top.
    pub fn reset(&mut self) {
        self.offset = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_scroll_never_negative() {
        assert_eq!(max_scroll(1000.0, 400.0), 600.0);
        assert_eq!(max_scroll(300.0, 400.0), 0.0);
        assert_eq!(max_scroll(f64::NAN, 400.0), 0.0);
    }

    #[test]
    fn percent_of_unscrollable_document_is_zero() {
        assert_eq!(to_percent(50.0, 300.0, 400.0), 0.0);
        assert_eq!(to_pixels(0.7, 300.0, 400.0), 0.0);
    }

    #[test]
    fn percent_and_pixels_are_inverse() {
        let p = to_percent(150.0, 1000.0, 400.0);
        assert_eq!(p, 0.25);
        assert_eq!(to_pixels(p, 1000.0, 400.0), 150.0);
    }

    #[test]
    fn offsets_are_clamped_before_use() {
        assert_eq!(to_percent(-10.0, 1000.0, 400.0), 0.0);
        assert_eq!(to_percent(9999.0, 1000.0, 400.0), 1.0);
        assert_eq!(to_percent(f64::NAN, 1000.0, 400.0), 0.0);
        assert_eq!(to_pixels(f64::NAN, 1000.0, 400.0), 0.0);
        assert_eq!(to_pixels(1.5, 1000.0, 400.0), 600.0);
    }

    #[test]
    fn state_reclamps_when_range_shrinks() {
        let mut state = ScrollState::new();
        state.set_max(600.0);
        state.set_offset(500.0);
        state.set_max(200.0);
        assert_eq!(state.offset(), 200.0);
        assert_eq!(state.percent(), 1.0);
    }

    #[test]
    fn scroll_by_clamps_at_both_ends() {
        let mut state = ScrollState::new();
        state.set_max(100.0);
        assert_eq!(state.scroll_by(-5.0), 0.0);
        assert_eq!(state.scroll_by(40.0), 40.0);
        assert_eq!(state.scroll_by(1000.0), 100.0);
    }

    #[test]
    fn set_percent_maps_onto_range() {
        let mut state = ScrollState::new();
        state.set_max(800.0);
        assert_eq!(state.set_percent(0.5), 400.0);
        assert_eq!(state.set_percent(f64::NAN), 0.0);
        state.reset();
        assert_eq!(state.offset(), 0.0);
    }
}
