//! Double-press detection and paragraph navigation.

use crate::model::KeyPress;

/// Two presses of the same key closer than this (strictly) are a double-press.
pub const DOUBLE_PRESS_WINDOW_MS: f64 = 400.0;

/// Verses per paragraph for paragraph jumps.
pub const PARAGRAPH_SIZE: usize = 10;

/// Tracks the last key press to recognise double-presses.
///
/// Every press restarts the window, so a third quick press counts as a
/// double-press again.
#[derive(Debug, Clone, Default)]
pub struct DoublePressDetector {
    last: Option<(KeyPress, f64)>,
}

impl DoublePressDetector {
    /// Detector with no press recorded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press at `now`; true when it completes a double-press.
    pub fn register(&mut self, key: &KeyPress, now: f64) -> bool {
        let is_double = self
            .last
            .as_ref()
            .is_some_and(|(last_key, at)| last_key == key && now - at < DOUBLE_PRESS_WINDOW_MS);
        self.last = Some((key.clone(), now));
        is_double
    }

    /// Forget the last press.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Start of the paragraph before the one holding `index`.
pub fn previous_paragraph_start(index: usize) -> usize {
    let previous = (index / PARAGRAPH_SIZE).saturating_sub(1);
    let start = previous * PARAGRAPH_SIZE;
    if start == index && previous > 0 {
        (previous - 1) * PARAGRAPH_SIZE
    } else {
        start
    }
}

/// Start of the paragraph after the one holding `index`, if the passage reaches it.
pub fn next_paragraph_start(index: usize, verse_count: usize) -> Option<usize> {
    let start = (index / PARAGRAPH_SIZE + 1) * PARAGRAPH_SIZE;
    (start < verse_count).then_some(start)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_key_inside_window_is_double() {
        let mut d = DoublePressDetector::new();
        let down = KeyPress::plain("ArrowDown");
        assert!(!d.register(&down, 1000.0));
        assert!(d.register(&down, 1399.0));
    }

    #[test]
    fn window_is_strict() {
        let mut d = DoublePressDetector::new();
        let down = KeyPress::plain("ArrowDown");
        d.register(&down, 0.0);
        assert!(!d.register(&down, 400.0));
    }

    #[test]
    fn different_key_breaks_the_pair() {
        let mut d = DoublePressDetector::new();
        d.register(&KeyPress::plain("ArrowDown"), 0.0);
        assert!(!d.register(&KeyPress::plain("ArrowUp"), 100.0));
        assert!(d.register(&KeyPress::plain("ArrowUp"), 200.0));
    }

    #[test]
    fn each_press_restarts_the_window() {
        let mut d = DoublePressDetector::new();
        let up = KeyPress::plain("ArrowUp");
        d.register(&up, 0.0);
        assert!(d.register(&up, 300.0));
        assert!(d.register(&up, 600.0));
        d.reset();
        assert!(!d.register(&up, 700.0));
    }

    #[test]
    fn previous_paragraph_goes_back_one_block() {
        assert_eq!(previous_paragraph_start(0), 0);
        assert_eq!(previous_paragraph_start(7), 0);
        assert_eq!(previous_paragraph_start(15), 0);
        assert_eq!(previous_paragraph_start(20), 10);
        assert_eq!(previous_paragraph_start(35), 20);
    }

    #[test]
    fn next_paragraph_requires_the_verse_to_exist() {
        assert_eq!(next_paragraph_start(3, 25), Some(10));
        assert_eq!(next_paragraph_start(19, 25), Some(20));
        assert_eq!(next_paragraph_start(22, 25), None);
        assert_eq!(next_paragraph_start(5, 10), None);
    }
}
