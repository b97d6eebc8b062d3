//! Per-surface presentation state.
//!
//! Both the operator and the mirror own one [`SurfaceState`]. It holds the
//! current passage, the style, the canvas size and everything derived from
//! them: layout, scroll range, highlight and the two animation channels.
//! Layout is recomputed eagerly whenever one of its inputs changes, so the
//! accessors never observe stale geometry.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::animation::{AnimationController, BlendStep, CancelToken, FrameUpdate};
use crate::model::{Color, ContentPayload, PresentationStyle, Rgba, SettingKey, StyleError, Verse};
use crate::view_state::{
    hit_test, scroll_target_for_verse, HitTestResult, Layout, LayoutParams, ScrollState,
    TextMeasure, ViewportDimensions,
};

/// Opacity of the highlight background at full intensity.
pub const HIGHLIGHT_BACKGROUND_ALPHA: f64 = 0.3;

/// How incoming content was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentChange {
    /// Passage replaced; scroll and highlight reset.
    Replaced,
    /// Verses appended at the tail; scroll and highlight kept.
    Appended,
}

/// Colors of one verse block at a given instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerseColors {
    /// Highlight tint behind the block, absent when the verse is not lit.
    pub background: Option<Rgba>,
    /// Text color.
    pub text: Color,
}

/// State of one presentation surface.
pub struct SurfaceState {
    content: Option<ContentPayload>,
    content_revision: u64,
    style: PresentationStyle,
    viewport: ViewportDimensions,
    layout: Layout,
    scroll: ScrollState,
    active_index: Option<usize>,
    animations: AnimationController,
    measure: Arc<dyn TextMeasure>,
}

impl fmt::Debug for SurfaceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurfaceState")
            .field("content_revision", &self.content_revision)
            .field("verses", &self.verse_count())
            .field("viewport", &self.viewport)
            .field("scroll", &self.scroll)
            .field("active_index", &self.active_index)
            .field("animations", &self.animations)
            .finish_non_exhaustive()
    }
}

impl SurfaceState {
    /// Empty surface.
    pub fn new(
        style: PresentationStyle,
        viewport: ViewportDimensions,
        measure: Arc<dyn TextMeasure>,
    ) -> Self {
        Self {
            content: None,
            content_revision: 0,
            layout: Layout::empty(LayoutParams::from_style(viewport, &style)),
            style,
            viewport,
            scroll: ScrollState::new(),
            active_index: None,
            animations: AnimationController::new(),
            measure,
        }
    }

    // ===== Accessors =====

    /// Current passage.
    pub fn content(&self) -> Option<&ContentPayload> {
        self.content.as_ref()
    }

    /// Bumped on every content replacement or append.
    pub fn content_revision(&self) -> u64 {
        self.content_revision
    }

    /// Number of verses held.
    pub fn verse_count(&self) -> usize {
        self.content.as_ref().map_or(0, ContentPayload::len)
    }

    /// Current style.
    pub fn style(&self) -> &PresentationStyle {
        &self.style
    }

    /// Canvas size.
    pub fn viewport(&self) -> ViewportDimensions {
        self.viewport
    }

    /// Layout for the current content, style and canvas.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Scroll position.
    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    /// Scroll offset in pixels.
    pub fn scroll_offset(&self) -> f64 {
        self.scroll.offset()
    }

    /// Scroll position as a fraction of the scrollable range.
    pub fn scroll_percent(&self) -> f64 {
        self.scroll.percent()
    }

    /// Settled highlight; an in-flight blend has not landed yet.
    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    /// Where the highlight is heading: the in-flight blend target, else the active index.
    pub fn highlight_target(&self) -> Option<usize> {
        match self.animations.highlight_channel().tween() {
            Some(tween) => tween.to,
            None => self.active_index,
        }
    }

    /// Animation channels.
    pub fn animations(&self) -> &AnimationController {
        &self.animations
    }

    /// True while either animation channel runs.
    pub fn is_animating(&self) -> bool {
        self.animations.is_animating()
    }

    /// Measurer used for wrapping.
    pub fn measure(&self) -> &dyn TextMeasure {
        self.measure.as_ref()
    }

    fn index_in_range(&self, index: usize) -> bool {
        index < self.verse_count()
    }

    // ===== Content =====

    /// Replace the passage; scroll and highlight reset, animations stop.
    pub fn replace_content(&mut self, content: ContentPayload) {
        tracing::info!(
            book = %content.meta.book_name,
            chapter = content.meta.chapter_number,
            verses = content.len(),
            "content replaced"
        );
        self.animations.cancel_all();
        self.content = Some(content);
        self.content_revision += 1;
        self.active_index = None;
        self.scroll.reset();
        self.relayout();
    }

    /// Apply incoming content, tail-appending when it extends the current passage.
    pub fn receive_content(&mut self, content: ContentPayload) -> ContentChange {
        let extends = self
            .content
            .as_ref()
            .is_some_and(|current| current.is_extended_by(&content));
        if extends {
            self.extend_content(content);
            ContentChange::Appended
        } else {
            self.replace_content(content);
            ContentChange::Replaced
        }
    }

    /// Lay out the verses `content` holds beyond the current passage.
    ///
    /// Only the tail blocks are wrapped; scroll offset, highlight and running
    /// animations are kept.
    fn extend_content(&mut self, content: ContentPayload) {
        let held = self.verse_count();
        let title = content.title();
        for verse in content.verses.iter().skip(held) {
            self.layout.append_verse(verse, title.clone(), self.measure.as_ref());
        }
        tracing::info!(
            from = held,
            to = content.len(),
            range_end = content.meta.range[1],
            "content extended"
        );
        self.content = Some(content);
        self.content_revision += 1;
        self.scroll.set_max(self.layout.max_scroll());
    }

    /// Push one verse at the tail of the current passage.
    ///
    /// Returns `false` when no passage is held.
    pub fn append_verse(&mut self, verse: Verse) -> bool {
        let Some(content) = self.content.as_mut() else {
            return false;
        };
        content.append_verse(verse.clone());
        let title = content.title();
        self.layout.append_verse(&verse, title, self.measure.as_ref());
        self.content_revision += 1;
        self.scroll.set_max(self.layout.max_scroll());
        true
    }

    // ===== Geometry and style =====

    /// Resize the canvas. Returns `false` when the size did not change.
    pub fn set_viewport(&mut self, viewport: ViewportDimensions) -> bool {
        if viewport == self.viewport {
            return false;
        }
        self.viewport = viewport;
        self.relayout();
        true
    }

    /// Replace the whole style, relaying out only when geometry changed.
    ///
    /// # Errors
    ///
    /// `InvalidValue` when a size or speed is not positive; the style is unchanged.
    pub fn set_style(&mut self, style: PresentationStyle) -> Result<(), StyleError> {
        style.validate()?;
        let before = LayoutParams::from_style(self.viewport, &self.style);
        let after = LayoutParams::from_style(self.viewport, &style);
        self.style = style;
        if before != after {
            self.relayout();
        }
        Ok(())
    }

    /// Patch one style field by wire name.
    ///
    /// Returns whether the layout was recomputed.
    ///
    /// # Errors
    ///
    /// `UnknownKey` or `InvalidValue`/`InvalidColor`; the style is unchanged.
    pub fn apply_setting(&mut self, key: &str, value: &serde_json::Value) -> Result<bool, StyleError> {
        let key: SettingKey = key.parse()?;
        self.style.apply_setting(key, value)?;
        if key.affects_layout() {
            self.relayout();
        }
        Ok(key.affects_layout())
    }

    /// Set the font size fraction and relayout.
    ///
    /// # Errors
    ///
    /// `InvalidValue` for non-positive or non-finite sizes.
    pub fn set_font_size(&mut self, size: f64) -> Result<(), StyleError> {
        self.style.set_font_size_fraction(size)?;
        self.relayout();
        Ok(())
    }

    /// Recompute the layout from content, style and canvas; re-clamps scroll.
    pub fn relayout(&mut self) {
        let params = LayoutParams::from_style(self.viewport, &self.style);
        self.layout = match &self.content {
            Some(content) => Layout::compute(content, params, self.measure.as_ref()),
            None => Layout::empty(params),
        };
        self.scroll.set_max(self.layout.max_scroll());
    }

    // ===== Scroll =====

    /// Scroll by `delta` pixels, stopping any scroll tween. Returns the new offset.
    pub fn scroll_by(&mut self, delta: f64) -> f64 {
        self.animations.cancel_scroll();
        self.scroll.scroll_by(delta)
    }

    /// Jump to a normalized position. Returns the new offset.
    pub fn set_scroll_percent(&mut self, percent: f64) -> f64 {
        self.scroll.set_percent(percent)
    }

    /// Jump to a pixel offset. Returns the applied offset.
    pub fn set_scroll_offset(&mut self, offset: f64) -> f64 {
        self.scroll.set_offset(offset)
    }

    /// Offset that brings verse `index` to a third of the scroll region.
    pub fn scroll_target_for(&self, index: usize) -> f64 {
        scroll_target_for_verse(index, &self.layout, self.layout.scroll_region_height())
    }

    /// Tween the scroll offset to `target`.
    ///
    /// No-op without content.
    pub fn start_scroll_to(&mut self, now: f64, target: f64) -> Option<CancelToken> {
        self.content.as_ref()?;
        let target = self.scroll.max().min(target.max(0.0));
        Some(self.animations.start_scroll(now, self.scroll.offset(), target))
    }

    // ===== Highlight =====

    /// Set the highlight immediately, cancelling any blend.
    ///
    /// Out-of-range indices are rejected with a warning and change nothing.
    pub fn set_highlight(&mut self, index: Option<usize>) -> bool {
        if let Some(i) = index.filter(|i| !self.index_in_range(*i)) {
            tracing::warn!(index = i, verses = self.verse_count(), "highlight index out of range");
            return false;
        }
        self.animations.cancel_highlight();
        self.active_index = index;
        true
    }

    /// Cross-fade the highlight from `from` to `to`.
    ///
    /// No-op without content or when `to` is out of range. An out-of-range
    /// `from` fades in from nothing.
    pub fn start_highlight_blend(
        &mut self,
        now: f64,
        from: Option<usize>,
        to: Option<usize>,
    ) -> Option<CancelToken> {
        self.content.as_ref()?;
        if let Some(i) = to.filter(|i| !self.index_in_range(*i)) {
            tracing::warn!(index = i, verses = self.verse_count(), "blend target out of range");
            return None;
        }
        let from = from.filter(|i| self.index_in_range(*i));
        Some(self.animations.start_highlight(now, from, to))
    }

    /// Verse under a click at canvas y.
    pub fn hit_test(&self, click_y: f64) -> HitTestResult {
        hit_test(click_y, self.scroll.offset(), &self.layout)
    }

    /// Verse index under a click at canvas y.
    pub fn verse_at(&self, click_y: f64) -> Option<usize> {
        self.hit_test(click_y).verse_index()
    }

    // ===== Frames =====

    /// Advance both animation channels to `now` and apply their output.
    pub fn tick(&mut self, now: f64) -> FrameUpdate {
        let update = self.animations.tick(now);
        if let Some(step) = update.scroll {
            self.scroll.set_offset(step.offset());
        }
        if let Some(BlendStep::Finished(to)) = update.highlight {
            self.active_index = to.filter(|i| self.index_in_range(*i));
        }
        update
    }

    /// Highlight intensity of verse `index` at `now`, in `[0, 1]`.
    pub fn highlight_intensity(&self, index: usize, now: f64) -> f64 {
        match self.animations.blend_at(now) {
            Some(frame) => frame.intensity(index),
            None if self.active_index == Some(index) => 1.0,
            None => 0.0,
        }
    }

    /// Colors of verse `index` at `now`.
    pub fn verse_colors(&self, index: usize, now: f64) -> VerseColors {
        let intensity = self.highlight_intensity(index, now);
        if intensity <= 0.0 {
            return VerseColors {
                background: None,
                text: self.style.text_color,
            };
        }
        VerseColors {
            background: Some(
                self.style
                    .highlight_background_color
                    .with_alpha(HIGHLIGHT_BACKGROUND_ALPHA * intensity),
            ),
            text: self.style.text_color.lerp(self.style.highlight_text_color, intensity),
        }
    }

    /// Serializable summary of the surface.
    pub fn snapshot(&self) -> SurfaceSnapshot {
        let params = self.layout.params();
        SurfaceSnapshot {
            width: self.viewport.width,
            height: self.viewport.height,
            title: self.layout.title().map(str::to_string),
            verse_count: self.verse_count(),
            range: self.content.as_ref().map(|c| c.meta.range),
            active_index: self.active_index,
            scroll_offset: self.scroll.offset(),
            scroll_percent: self.scroll.percent(),
            max_scroll: self.scroll.max(),
            total_height: self.layout.total_height(),
            font_size_px: params.font_size_px(),
            line_height: params.line_height(),
            animating: self.is_animating(),
            blocks: self
                .layout
                .blocks()
                .iter()
                .map(|block| BlockSnapshot {
                    verse_index: block.verse_index,
                    top: block.top_offset,
                    height: block.height,
                    lines: block.wrapped_lines.clone(),
                })
                .collect(),
        }
    }
}

/// Surface state as printed by `versecast replay`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceSnapshot {
    /// Canvas width.
    pub width: f64,
    /// Canvas height.
    pub height: f64,
    /// Title line.
    pub title: Option<String>,
    /// Verses held.
    pub verse_count: usize,
    /// Verse range of the passage.
    pub range: Option<[u32; 2]>,
    /// Settled highlight.
    pub active_index: Option<usize>,
    /// Scroll offset in pixels.
    pub scroll_offset: f64,
    /// Scroll position in `[0, 1]`.
    pub scroll_percent: f64,
    /// Largest offset.
    pub max_scroll: f64,
    /// Content height including trailing pad.
    pub total_height: f64,
    /// Verse font size.
    pub font_size_px: f64,
    /// Line height.
    pub line_height: f64,
    /// Whether an animation is in flight.
    pub animating: bool,
    /// Block geometry.
    pub blocks: Vec<BlockSnapshot>,
}

/// One laid-out block in a [`SurfaceSnapshot`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockSnapshot {
    /// Verse index.
    pub verse_index: usize,
    /// Content-space top.
    pub top: f64,
    /// Block height.
    pub height: f64,
    /// Wrapped lines.
    pub lines: Vec<String>,
}

#[cfg(test)]
#[path = "surface_tests.rs"]
mod tests;
