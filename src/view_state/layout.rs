//! Verse block layout.
//!
//! Both surfaces run this same code against their own canvas, so the only
//! state that crosses the wire is content, style and a normalized scroll
//! percent.

use super::height_index::HeightIndex;
use super::layout_params::{LayoutParams, TRAILING_PAD_LINES};
use super::measure::{FontSpec, TextMeasure};
use super::wrap::wrap;
use crate::model::{ContentPayload, Verse};

/// Geometry of one verse block.
///
/// # Invariants
/// - `height == wrapped_lines.len() × lineHeight`
/// - `top_offset` is in content space: 0 is the top of the scrollable area.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutBlock {
    /// Index of the verse within the content payload.
    pub verse_index: usize,
    /// Wrapped lines of `"{n}. {text}"`; never empty.
    pub wrapped_lines: Vec<String>,
    /// Distance from the top of content space to the block's first line.
    pub top_offset: f64,
    /// Block height in pixels, excluding the trailing gap.
    pub height: f64,
}

impl LayoutBlock {
    /// Number of wrapped lines.
    pub fn line_count(&self) -> usize {
        self.wrapped_lines.len()
    }

    /// Content-space y just below the last line.
    pub fn bottom(&self) -> f64 {
        self.top_offset + self.height
    }

    /// True when `y` falls inside the block (top inclusive, bottom exclusive).
    pub fn contains(&self, y: f64) -> bool {
        self.top_offset <= y && y < self.bottom()
    }
}

/// Laid-out passage for one surface.
#[derive(Debug, Clone)]
pub struct Layout {
    params: LayoutParams,
    font: FontSpec,
    title: Option<String>,
    blocks: Vec<LayoutBlock>,
    line_counts: HeightIndex,
}

impl Layout {
    /// Layout with no content: zero height, nothing to hit.
    pub fn empty(params: LayoutParams) -> Self {
        Self {
            params,
            font: FontSpec::new(params.font_size_px()),
            title: None,
            blocks: Vec::new(),
            line_counts: HeightIndex::new(0),
        }
    }

    /// Wrap every verse of `content` and position the blocks.
    pub fn compute(content: &ContentPayload, params: LayoutParams, measure: &dyn TextMeasure) -> Self {
        let mut layout = Self::empty(params);
        layout.title = Some(content.title());
        layout.blocks.reserve(content.len());
        layout.line_counts = HeightIndex::new(content.len());
        for verse in &content.verses {
            layout.push_block(verse, measure);
        }
        tracing::debug!(
            verses = layout.blocks.len(),
            lines = layout.line_counts.total(),
            total_height = layout.total_height(),
            "layout computed"
        );
        layout
    }

    /// Lay out one more verse below the last block, in O(log n).
    pub fn append_verse(&mut self, verse: &Verse, title: String, measure: &dyn TextMeasure) {
        self.title = Some(title);
        self.push_block(verse, measure);
    }

    fn push_block(&mut self, verse: &Verse, measure: &dyn TextMeasure) {
        let verse_index = self.blocks.len();
        let wrapped_lines = wrap(&verse.block_text(), &self.font, self.params.max_width_px(), measure);
        let line_count = wrapped_lines.len();
        let top_offset = self.block_top_from_index(verse_index);
        self.line_counts.push(line_count);
        self.blocks.push(LayoutBlock {
            verse_index,
            wrapped_lines,
            top_offset,
            height: line_count as f64 * self.params.line_height(),
        });
    }

    /// `top(i) = unpinnedTitle + linesBefore(i) × lineHeight + i × gap`
    fn block_top_from_index(&self, index: usize) -> f64 {
        self.params.unpinned_title_height()
            + self.line_counts.sum_before(index) as f64 * self.params.line_height()
            + index as f64 * self.params.block_gap()
    }

    /// Parameters this layout was computed with.
    pub fn params(&self) -> &LayoutParams {
        &self.params
    }

    /// Font used for verse text.
    pub fn font(&self) -> &FontSpec {
        &self.font
    }

    /// Title text, when content is present.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// All blocks in verse order.
    pub fn blocks(&self) -> &[LayoutBlock] {
        &self.blocks
    }

    /// Block for verse `index`.
    pub fn block(&self, index: usize) -> Option<&LayoutBlock> {
        self.blocks.get(index)
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// True when no verse is laid out.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Total wrapped lines across all blocks.
    pub fn total_lines(&self) -> usize {
        self.line_counts.total()
    }

    /// Height of the whole scrollable content, trailing pad included.
    ///
    /// Zero when no content is held.
    pub fn total_height(&self) -> f64 {
        if self.title.is_none() {
            return 0.0;
        }
        let p = &self.params;
        p.unpinned_title_height()
            + self.total_lines() as f64 * p.line_height()
            + self.blocks.len() as f64 * p.block_gap()
            + TRAILING_PAD_LINES * p.line_height()
    }

    /// Visible height of the scrolling area.
    pub fn scroll_region_height(&self) -> f64 {
        self.params.scroll_region_height()
    }

    /// Largest valid scroll offset.
    pub fn max_scroll(&self) -> f64 {
        super::scroll::max_scroll(self.total_height(), self.scroll_region_height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ContentMeta;
    use crate::view_state::measure::FixedAdvanceMeasure;
    use crate::view_state::types::ViewportDimensions;

    fn content(texts: &[&str]) -> ContentPayload {
        let verses: Vec<Verse> = texts
            .iter()
            .enumerate()
            .map(|(i, t)| Verse::new(i as u32 + 1, *t))
            .collect();
        ContentPayload::new(
            ContentMeta {
                book_code: "JHN".to_string(),
                book_name: "John".to_string(),
                chapter_number: 3,
                range: [1, verses.len() as u32],
            },
            verses,
        )
    }

    // 1000×1000, font 10% → 100px font, 1.5 → 150px lines, 20px gap,
    // max width floor(1000 − 120) = 880, wrap limit 862.4.
    fn params(fixed_title: bool) -> LayoutParams {
        LayoutParams::new(ViewportDimensions::new(1000.0, 1000.0), 10.0, 1.5, fixed_title)
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    const MEASURE: FixedAdvanceMeasure = FixedAdvanceMeasure { advance_px: 100.0 };

    #[test]
    fn blocks_follow_lines_and_gaps() {
        // "1. A" = 4 chars = 400px: one line. "2. " + 10 chars = 13 chars: 2 lines.
        let layout = Layout::compute(&content(&["A", "BBBBBBBBBB", "C"]), params(true), &MEASURE);

        assert_eq!(layout.len(), 3);
        assert_eq!(layout.block(0).map(LayoutBlock::line_count), Some(1));
        assert_eq!(layout.block(1).map(LayoutBlock::line_count), Some(2));

        let tops: Vec<f64> = layout.blocks().iter().map(|b| b.top_offset).collect();
        assert!(approx(tops[0], 0.0));
        assert!(approx(tops[1], 150.0 + 20.0));
        assert!(approx(tops[2], 450.0 + 40.0));
        assert!(approx(layout.block(1).map(|b| b.height).unwrap_or_default(), 300.0));
    }

    #[test]
    fn total_height_includes_gaps_and_trailing_pad() {
        let layout = Layout::compute(&content(&["A", "B"]), params(true), &MEASURE);
        // 2 lines × 150 + 2 × 20 + 3 × 150
        assert!(approx(layout.total_height(), 300.0 + 40.0 + 450.0));
    }

    #[test]
    fn unpinned_title_pushes_blocks_down() {
        let p = params(false);
        let layout = Layout::compute(&content(&["A"]), p, &MEASURE);
        let title = p.title_height();
        assert!(approx(layout.blocks()[0].top_offset, title));
        assert!(approx(layout.total_height(), title + 150.0 + 20.0 + 450.0));
    }

    #[test]
    fn empty_layout_has_no_height() {
        let layout = Layout::empty(params(true));
        assert!(layout.is_empty());
        assert_eq!(layout.total_height(), 0.0);
        assert_eq!(layout.max_scroll(), 0.0);
        assert_eq!(layout.title(), None);
    }

    #[test]
    fn payload_without_verses_keeps_title_and_pad() {
        let layout = Layout::compute(&content(&[]), params(true), &MEASURE);
        assert_eq!(layout.title(), Some("John 3:1-0"));
        assert!(approx(layout.total_height(), 450.0));
    }

    #[test]
    fn append_matches_full_recompute() {
        let mut passage = content(&["A", "BBBBBBBBBB"]);
        let layout = Layout::compute(&passage, params(true), &MEASURE);
        let verse = Verse::new(3, "CCCCCCCCCCCCCCCCCCCC");
        passage.append_verse(verse.clone());
        let mut appended = layout;
        appended.append_verse(&verse, passage.title(), &MEASURE);
        let full = Layout::compute(&passage, params(true), &MEASURE);

        assert_eq!(appended.blocks(), full.blocks());
        assert!(approx(appended.total_height(), full.total_height()));
        assert_eq!(appended.title(), Some("John 3:1-3"));
    }

    #[test]
    fn block_contains_is_half_open() {
        let layout = Layout::compute(&content(&["A"]), params(true), &MEASURE);
        let block = &layout.blocks()[0];
        assert!(block.contains(0.0));
        assert!(block.contains(149.9));
        assert!(!block.contains(150.0));
        assert!(!block.contains(-0.1));
    }
}
