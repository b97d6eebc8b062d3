//! Easing curves and progress.

/// An easing curve mapping linear progress in `[0, 1]` to eased progress.
pub type EasingFn = fn(f64) -> f64;

/// Cubic ease-out: `1 − (1 − p)³`. Used by scroll tweens.
pub fn ease_out_cubic(p: f64) -> f64 {
    1.0 - (1.0 - p).powi(3)
}

/// Quadratic ease-in-out. Used by highlight blends.
pub fn ease_in_out_quad(p: f64) -> f64 {
    if p < 0.5 {
        2.0 * p * p
    } else {
        1.0 - (-2.0 * p + 2.0).powi(2) / 2.0
    }
}

/// Linear progress of an animation started at `start`, clamped to `[0, 1]`.
///
/// A non-positive or NaN duration counts as already complete, as does a
/// `now` that is NaN.
pub fn progress(start: f64, now: f64, duration: f64) -> f64 {
    if !(duration > 0.0) {
        return 1.0;
    }
    let p = (now - start) / duration;
    if p.is_nan() {
        1.0
    } else {
        p.clamp(0.0, 1.0)
    }
}
