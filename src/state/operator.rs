//! Operator surface: the interactive side of the presentation.
//!
//! Every user action mutates the local [`SurfaceState`] first and then queues
//! the deltas the mirror needs in an outbox. The host drains the outbox with
//! [`OperatorSurface::take_messages`] and forwards it over whatever channel
//! connects the two surfaces.

use std::sync::Arc;

use super::key_press::{next_paragraph_start, previous_paragraph_start, DoublePressDetector};
use super::surface::SurfaceState;
use crate::animation::{BlendStep, FrameUpdate};
use crate::config::KeyBindings;
use crate::lookup::{BookSuggestion, VerseLookup};
use crate::model::{KeyAction, KeyPress, LookupError, PresentationStyle, StyleError};
use crate::sync::{HighlightPayload, SettingChange, SyncMessage};
use crate::view_state::{TextMeasure, ViewportDimensions};

/// The operator's surface plus its lookup service, key map and outbox.
pub struct OperatorSurface {
    state: SurfaceState,
    lookup: Arc<dyn VerseLookup>,
    bindings: KeyBindings,
    detector: DoublePressDetector,
    outbox: Vec<SyncMessage>,
    last_sent_percent: f64,
}

impl std::fmt::Debug for OperatorSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperatorSurface")
            .field("state", &self.state)
            .field("pending", &self.outbox.len())
            .finish_non_exhaustive()
    }
}

impl OperatorSurface {
    /// Operator with no content.
    pub fn new(
        style: PresentationStyle,
        viewport: ViewportDimensions,
        measure: Arc<dyn TextMeasure>,
        lookup: Arc<dyn VerseLookup>,
        bindings: KeyBindings,
    ) -> Self {
        Self {
            state: SurfaceState::new(style, viewport, measure),
            lookup,
            bindings,
            detector: DoublePressDetector::new(),
            outbox: Vec::new(),
            last_sent_percent: 0.0,
        }
    }

    /// Local surface state.
    pub fn state(&self) -> &SurfaceState {
        &self.state
    }

    /// Key map in effect.
    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Messages queued since the last drain.
    pub fn pending_messages(&self) -> &[SyncMessage] {
        &self.outbox
    }

    /// Drain queued messages in emission order.
    pub fn take_messages(&mut self) -> Vec<SyncMessage> {
        std::mem::take(&mut self.outbox)
    }

    fn emit(&mut self, message: SyncMessage) {
        tracing::debug!(kind = message.kind(), "queued for mirror");
        self.outbox.push(message);
    }

    fn emit_scroll(&mut self) {
        let percent = self.state.scroll_percent();
        self.last_sent_percent = percent;
        self.emit(SyncMessage::Scroll(percent));
    }

    fn emit_scroll_if_changed(&mut self) {
        if self.state.scroll_percent() != self.last_sent_percent {
            self.emit_scroll();
        }
    }

    // ===== Search =====

    /// Resolve `reference` and show it.
    ///
    /// # Errors
    ///
    /// The lookup error; the current passage stays on both surfaces.
    pub fn search(&mut self, reference: &str) -> Result<(), LookupError> {
        let content = self
            .lookup
            .lookup(reference)
            .inspect_err(|err| tracing::warn!(reference, error = %err, "search failed"))?;
        self.state.replace_content(content.clone());
        self.last_sent_percent = 0.0;
        self.emit(SyncMessage::Content(content));
        Ok(())
    }

    /// Book codes for autocomplete.
    pub fn suggest_books(&self, prefix: &str) -> Vec<BookSuggestion> {
        self.lookup.suggest_books(prefix)
    }

    // ===== Pointer =====

    /// Mouse wheel: scroll by `delta_y × scrollSpeed`, stopping any tween.
    pub fn wheel(&mut self, delta_y: f64) {
        if self.state.content().is_none() {
            return;
        }
        self.state.scroll_by(delta_y * self.state.style().scroll_speed);
        self.emit_scroll();
    }

    /// Click at canvas y.
    ///
    /// Clicking the highlighted verse clears it, clicking another verse
    /// highlights it and scrolls to it, clicking anywhere else clears.
    pub fn click(&mut self, click_y: f64, now: f64) {
        if self.state.content().is_none() {
            return;
        }
        match self.state.verse_at(click_y) {
            Some(index) if self.state.highlight_target() != Some(index) => {
                self.highlight_now(Some(index), now);
            }
            _ => self.highlight_now(None, now),
        }
    }

    // ===== Keys =====

    /// Handle a key press. Returns the action it was bound to, if any.
    pub fn key(&mut self, key: &KeyPress, now: f64) -> Option<KeyAction> {
        if self.state.content().is_none() {
            return None;
        }
        let is_double = self.detector.register(key, now);
        let action = self.bindings.get(key)?;
        tracing::debug!(?action, is_double, "key action");

        let count = self.state.verse_count();
        let current = self.state.highlight_target();
        match action {
            KeyAction::NextVerse if is_double => {
                // End of chapter is already logged; nothing else to do.
                let _ = self.append_next_verse(now);
            }
            KeyAction::NextVerse => {
                let next = match current {
                    None => 0,
                    Some(i) => i + 1,
                };
                if next < count {
                    self.highlight_animated(next, now);
                }
            }
            KeyAction::PrevVerse if is_double => self.jump_previous_paragraph(now),
            KeyAction::PrevVerse => match current {
                Some(i) if i > 0 => self.highlight_animated(i - 1, now),
                None if count > 0 => self.highlight_animated(count - 1, now),
                _ => {}
            },
            KeyAction::ClearHighlight => self.highlight_now(None, now),
            KeyAction::PrevParagraph => self.jump_previous_paragraph(now),
            KeyAction::NextParagraph => self.jump_next_paragraph(now),
        }
        Some(action)
    }

    fn jump_previous_paragraph(&mut self, now: f64) {
        if let Some(current) = self.state.highlight_target() {
            let start = previous_paragraph_start(current);
            if start != current {
                self.highlight_animated(start, now);
            }
        }
    }

    fn jump_next_paragraph(&mut self, now: f64) {
        if let Some(current) = self.state.highlight_target() {
            if let Some(start) = next_paragraph_start(current, self.state.verse_count()) {
                self.highlight_animated(start, now);
            }
        }
    }

    // ===== Highlight =====

    /// Set the highlight instantly; a verse also gets a scroll tween.
    fn highlight_now(&mut self, index: Option<usize>, now: f64) {
        if !self.state.set_highlight(index) {
            return;
        }
        self.emit(SyncMessage::Highlight(HighlightPayload::set(index)));
        if let Some(i) = index {
            let target = self.state.scroll_target_for(i);
            self.state.start_scroll_to(now, target);
        }
    }

    /// Blend from the current highlight target to `index`.
    fn highlight_animated(&mut self, index: usize, now: f64) {
        let from = self.state.highlight_target();
        if self.state.start_highlight_blend(now, from, Some(index)).is_some() {
            self.emit(SyncMessage::Highlight(HighlightPayload::blend(from, Some(index))));
        }
    }

    /// Fetch the verse after the last one shown and append it.
    ///
    /// Broadcasts the grown passage, then moves the highlight to the new
    /// verse: blended from the current one, or set instantly with a scroll
    /// tween when nothing was highlighted.
    ///
    /// # Errors
    ///
    /// The lookup error, typically `OutOfRange` at the end of the chapter.
    /// State is unchanged.
    pub fn append_next_verse(&mut self, now: f64) -> Result<(), LookupError> {
        let Some(content) = self.state.content() else {
            return Ok(());
        };
        let book_code = content.meta.book_code.clone();
        let chapter = content.meta.chapter_number;
        let after = content.max_sequence_number().unwrap_or(0);

        let verse = self
            .lookup
            .next_verse(&book_code, chapter, after)
            .inspect_err(|err| {
                tracing::info!(book = %book_code, chapter, after, error = %err, "no verse to append");
            })?;

        let current = self.state.highlight_target();
        self.state.append_verse(verse);
        if let Some(content) = self.state.content().cloned() {
            self.emit(SyncMessage::Content(content));
        }

        let new_index = self.state.verse_count().saturating_sub(1);
        match current {
            Some(_) => self.highlight_animated(new_index, now),
            None => self.highlight_now(Some(new_index), now),
        }
        Ok(())
    }

    // ===== Style =====

    /// Patch one style field and forward it.
    ///
    /// # Errors
    ///
    /// The style error; nothing is sent.
    pub fn set_setting(&mut self, key: &str, value: serde_json::Value) -> Result<(), StyleError> {
        self.state.apply_setting(key, &value)?;
        self.emit(SyncMessage::SettingChanged(SettingChange {
            key: key.to_string(),
            value,
        }));
        self.emit_scroll_if_changed();
        Ok(())
    }

    /// Change the font size fraction and forward it.
    ///
    /// # Errors
    ///
    /// `InvalidValue` for non-positive sizes; nothing is sent.
    pub fn set_font_size(&mut self, size: f64) -> Result<(), StyleError> {
        self.state.set_font_size(size)?;
        self.emit(SyncMessage::FontSize(size));
        self.emit_scroll_if_changed();
        Ok(())
    }

    /// Replace the whole style and forward it.
    ///
    /// # Errors
    ///
    /// `InvalidValue` for a non-positive size or speed; nothing is sent.
    pub fn set_style(&mut self, style: PresentationStyle) -> Result<(), StyleError> {
        self.state.set_style(style.clone())?;
        self.emit(SyncMessage::SettingsBatch(style));
        self.emit_scroll_if_changed();
        Ok(())
    }

    // ===== Host events =====

    /// Canvas resized. The relative scroll position is kept.
    pub fn resize(&mut self, viewport: ViewportDimensions) {
        let percent = self.state.scroll_percent();
        if self.state.set_viewport(viewport) {
            self.state.set_scroll_percent(percent);
            self.emit_scroll_if_changed();
        }
    }

    /// Advance animations to `now`.
    ///
    /// Each scroll-tween frame broadcasts its percent. A blend that lands on
    /// a verse starts a scroll tween toward it.
    pub fn tick(&mut self, now: f64) -> FrameUpdate {
        let update = self.state.tick(now);
        if update.scroll.is_some() {
            self.emit_scroll();
        }
        if let Some(BlendStep::Finished(Some(index))) = update.highlight {
            let target = self.state.scroll_target_for(index);
            self.state.start_scroll_to(now, target);
        }
        update
    }

    /// True while an animation is in flight.
    pub fn is_animating(&self) -> bool {
        self.state.is_animating()
    }
}

#[cfg(test)]
#[path = "operator_tests.rs"]
mod tests;
