//! Greedy character-granular line wrapping.
//!
//! Breaks may fall between any two characters: verse text is largely CJK,
//! where word-boundary wrapping does not apply.

use super::measure::{FontSpec, TextMeasure};

/// Fraction of the available width a line may fill before it breaks.
///
/// Both surfaces must apply the same ratio so that slightly different
/// rendering backends still agree on line counts.
pub const WRAP_SAFETY_RATIO: f64 = 0.98;

/// Wrap `text` into lines no wider than `0.98 × max_width_px`.
///
/// Before a character is added, the candidate line (current line plus that
/// character) is measured; if it exceeds the limit and the current line is
/// non-empty, the current line is committed and the character starts a new
/// one.
///
/// Never fails:
/// - a single character wider than the limit becomes its own line,
/// - empty text yields one empty line,
/// - a non-positive width degrades to one character per line.
///
/// Concatenating the returned lines always reproduces `text` exactly.
pub fn wrap(text: &str, font: &FontSpec, max_width_px: f64, measure: &dyn TextMeasure) -> Vec<String> {
    let limit = max_width_px * WRAP_SAFETY_RATIO;
    let mut lines = Vec::new();
    let mut line = String::new();

    for ch in text.chars() {
        let had_content = !line.is_empty();
        line.push(ch);
        if had_content && measure.measure(font, &line) > limit {
            line.truncate(line.len() - ch.len_utf8());
            lines.push(std::mem::take(&mut line));
            line.push(ch);
        }
    }

    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}
