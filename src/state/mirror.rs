//! Mirror surface: the passive, audience-facing side.
//!
//! The mirror never talks back. It applies each [`SyncMessage`] to its own
//! [`SurfaceState`] and reproduces the geometry with its own canvas size, so
//! scroll position crosses the wire only as a percent. Messages it cannot
//! honour are logged and dropped.

use std::sync::Arc;

use super::surface::{SurfaceSnapshot, SurfaceState};
use crate::animation::FrameUpdate;
use crate::model::PresentationStyle;
use crate::sync::{from_wire_index, HighlightPayload, SyncMessage};
use crate::view_state::{TextMeasure, ViewportDimensions};

/// The mirror's surface plus the last scroll percent it was told.
#[derive(Debug)]
pub struct MirrorSurface {
    state: SurfaceState,
    last_percent: f64,
}

impl MirrorSurface {
    /// Mirror with no content.
    pub fn new(
        style: PresentationStyle,
        viewport: ViewportDimensions,
        measure: Arc<dyn TextMeasure>,
    ) -> Self {
        Self {
            state: SurfaceState::new(style, viewport, measure),
            last_percent: 0.0,
        }
    }

    /// Local surface state.
    pub fn state(&self) -> &SurfaceState {
        &self.state
    }

    /// Last scroll percent received.
    pub fn last_percent(&self) -> f64 {
        self.last_percent
    }

    /// Apply one message at time `now`.
    ///
    /// Returns `false` when the message was rejected and left state unchanged.
    pub fn apply(&mut self, message: SyncMessage, now: f64) -> bool {
        tracing::debug!(kind = message.kind(), "mirror received");
        match message {
            SyncMessage::Content(content) => {
                // An append keeps the pixel offset, so the percent shifts with the new range.
                self.state.receive_content(content);
                self.last_percent = self.state.scroll_percent();
                true
            }
            SyncMessage::Scroll(percent) => {
                self.last_percent = if percent.is_nan() { 0.0 } else { percent.clamp(0.0, 1.0) };
                self.state.set_scroll_percent(self.last_percent);
                true
            }
            SyncMessage::Highlight(payload) => self.apply_highlight(payload, now),
            SyncMessage::FontSize(size) => match self.state.set_font_size(size) {
                Ok(()) => {
                    self.restore_percent();
                    true
                }
                Err(err) => {
                    tracing::warn!(size, error = %err, "ignoring font size");
                    false
                }
            },
            SyncMessage::SettingChanged(change) => {
                match self.state.apply_setting(&change.key, &change.value) {
                    Ok(relaid) => {
                        if relaid {
                            self.restore_percent();
                        }
                        true
                    }
                    Err(err) => {
                        tracing::warn!(key = %change.key, error = %err, "ignoring setting");
                        false
                    }
                }
            }
            SyncMessage::SettingsBatch(style) => match self.state.set_style(style) {
                Ok(()) => {
                    self.restore_percent();
                    true
                }
                Err(err) => {
                    tracing::warn!(error = %err, "ignoring settings batch");
                    false
                }
            },
        }
    }

    fn apply_highlight(&mut self, payload: HighlightPayload, now: f64) -> bool {
        match payload {
            HighlightPayload::Index(index) => self.state.set_highlight(from_wire_index(index)),
            HighlightPayload::Blend {
                from_index,
                to_index,
                animate: true,
            } => self
                .state
                .start_highlight_blend(now, from_wire_index(from_index), from_wire_index(to_index))
                .is_some(),
            HighlightPayload::Blend { to_index, .. } => {
                self.state.set_highlight(from_wire_index(to_index))
            }
        }
    }

    fn restore_percent(&mut self) {
        self.state.set_scroll_percent(self.last_percent);
    }

    /// Canvas resized; the last received percent is re-applied.
    pub fn resize(&mut self, viewport: ViewportDimensions) {
        if self.state.set_viewport(viewport) {
            self.restore_percent();
        }
    }

    /// Advance the highlight blend to `now`.
    pub fn tick(&mut self, now: f64) -> FrameUpdate {
        self.state.tick(now)
    }

    /// Serializable summary.
    pub fn snapshot(&self) -> SurfaceSnapshot {
        self.state.snapshot()
    }
}

#[cfg(test)]
#[path = "mirror_tests.rs"]
mod tests;
