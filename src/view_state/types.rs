//! Core view-state value types

/// Canvas dimensions in CSS pixels, as reported by the host.
///
/// Each surface owns its own; they may differ in size and aspect.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportDimensions {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl ViewportDimensions {
    /// Create new viewport dimensions.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when either side is zero, negative or not a number.
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}
