//! Per-surface animation controller.
//!
//! Owns the scroll-tween and highlight-blend channels of one surface. Time is
//! never read from the system here: callers pass `now` (milliseconds by
//! convention), obtained from a [`Clock`] at the edge of the program.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use super::channel::{AnimationChannel, AnimationKind, CancelToken, Frame};
use super::easing::{ease_in_out_quad, ease_out_cubic};

/// Scroll tween duration in milliseconds.
pub const SCROLL_DURATION_MS: f64 = 300.0;
/// Highlight blend duration in milliseconds.
pub const HIGHLIGHT_DURATION_MS: f64 = 300.0;

/// Source of the current time in milliseconds.
pub trait Clock: Send + Sync {
    /// Current time. Must never decrease.
    fn now(&self) -> f64;
}

/// Wall clock: milliseconds since the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Clock starting at 0 now.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Manually driven clock. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    bits: Arc<AtomicU64>,
}

impl ManualClock {
    /// Clock reading `start`.
    pub fn new(start: f64) -> Self {
        Self {
            bits: Arc::new(AtomicU64::new(start.to_bits())),
        }
    }

    /// Jump to `now`.
    pub fn set(&self, now: f64) {
        self.bits.store(now.to_bits(), Ordering::SeqCst);
    }

    /// Move forward by `delta`.
    pub fn advance(&self, delta: f64) {
        self.set(self.now() + delta);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::SeqCst))
    }
}

/// Snapshot of a blend in flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendFrame {
    /// Verse losing the highlight.
    pub from: Option<usize>,
    /// Verse gaining the highlight.
    pub to: Option<usize>,
    /// Eased progress in `[0, 1]`.
    pub eased: f64,
}

impl BlendFrame {
    /// Highlight intensity of verse `index`: `eased` for the target,
    /// `1 − eased` for the source, 0 otherwise.
    pub fn intensity(&self, index: usize) -> f64 {
        if self.to == Some(index) {
            if self.from == Some(index) {
                1.0
            } else {
                self.eased
            }
        } else if self.from == Some(index) {
            1.0 - self.eased
        } else {
            0.0
        }
    }
}

/// Scroll channel outcome of a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollStep {
    /// Offset moved toward the target.
    Moved(f64),
    /// Offset snapped to the target; the tween is over.
    Finished(f64),
}

impl ScrollStep {
    /// Offset to apply.
    pub fn offset(&self) -> f64 {
        match self {
            Self::Moved(offset) | Self::Finished(offset) => *offset,
        }
    }
}

/// Highlight channel outcome of a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BlendStep {
    /// Blend still in flight.
    Blending(BlendFrame),
    /// Blend complete; the new active index.
    Finished(Option<usize>),
}

/// Everything that changed in one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameUpdate {
    /// Scroll channel change, if it was running.
    pub scroll: Option<ScrollStep>,
    /// Highlight channel change, if it was running.
    pub highlight: Option<BlendStep>,
}

impl FrameUpdate {
    /// True when neither channel produced anything.
    pub fn is_empty(&self) -> bool {
        self.scroll.is_none() && self.highlight.is_none()
    }
}

/// Both animation channels of one surface.
#[derive(Debug, Clone)]
pub struct AnimationController {
    scroll: AnimationChannel<f64>,
    highlight: AnimationChannel<Option<usize>>,
}

impl Default for AnimationController {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationController {
    /// Controller with both channels idle.
    pub fn new() -> Self {
        Self {
            scroll: AnimationChannel::new(AnimationKind::Scroll, SCROLL_DURATION_MS, ease_out_cubic),
            highlight: AnimationChannel::new(
                AnimationKind::HighlightBlend,
                HIGHLIGHT_DURATION_MS,
                ease_in_out_quad,
            ),
        }
    }

    /// Start a scroll tween from `from` to `to`, cancelling any in flight.
    pub fn start_scroll(&mut self, now: f64, from: f64, to: f64) -> CancelToken {
        tracing::debug!(from, to, "scroll tween started");
        self.scroll.start(now, from, to)
    }

    /// Start a highlight blend, cancelling any in flight.
    pub fn start_highlight(&mut self, now: f64, from: Option<usize>, to: Option<usize>) -> CancelToken {
        tracing::debug!(?from, ?to, "highlight blend started");
        self.highlight.start(now, from, to)
    }

    /// Cancel the scroll tween, if any.
    pub fn cancel_scroll(&mut self) {
        self.scroll.cancel();
    }

    /// Cancel the highlight blend, if any.
    pub fn cancel_highlight(&mut self) {
        self.highlight.cancel();
    }

    /// Cancel both channels.
    pub fn cancel_all(&mut self) {
        self.cancel_scroll();
        self.cancel_highlight();
    }

    /// Token of the current scroll frame subscription.
    pub fn scroll_token(&self) -> CancelToken {
        self.scroll.token()
    }

    /// Token of the current highlight frame subscription.
    pub fn highlight_token(&self) -> CancelToken {
        self.highlight.token()
    }

    /// Scroll channel.
    pub fn scroll_channel(&self) -> &AnimationChannel<f64> {
        &self.scroll
    }

    /// Highlight channel.
    pub fn highlight_channel(&self) -> &AnimationChannel<Option<usize>> {
        &self.highlight
    }

    /// True while a scroll tween is in flight.
    pub fn is_scrolling(&self) -> bool {
        self.scroll.is_running()
    }

    /// True while a highlight blend is in flight.
    pub fn is_blending(&self) -> bool {
        self.highlight.is_running()
    }

    /// True while either channel runs.
    pub fn is_animating(&self) -> bool {
        self.is_scrolling() || self.is_blending()
    }

    /// The in-flight blend as seen at `now`, for rendering.
    pub fn blend_at(&self, now: f64) -> Option<BlendFrame> {
        let tween = self.highlight.tween()?;
        let eased = self.highlight.eased_at(now)?;
        Some(BlendFrame {
            from: tween.from,
            to: tween.to,
            eased,
        })
    }

    /// Service a scroll frame scheduled with `token`.
    pub fn scroll_frame(&mut self, token: CancelToken, now: f64) -> Option<ScrollStep> {
        match self.scroll.frame(token, now) {
            Frame::Stale => None,
            Frame::Running { from, to, eased } => Some(ScrollStep::Moved(from + (to - from) * eased)),
            Frame::Finished { to, .. } => Some(ScrollStep::Finished(to)),
        }
    }

    /// Service a highlight frame scheduled with `token`.
    pub fn highlight_frame(&mut self, token: CancelToken, now: f64) -> Option<BlendStep> {
        match self.highlight.frame(token, now) {
            Frame::Stale => None,
            Frame::Running { from, to, eased } => Some(BlendStep::Blending(BlendFrame {
                from,
                to,
                eased,
            })),
            Frame::Finished { to, .. } => Some(BlendStep::Finished(to)),
        }
    }

    /// Service the current frame of both channels.
    pub fn tick(&mut self, now: f64) -> FrameUpdate {
        FrameUpdate {
            scroll: self.scroll_frame(self.scroll_token(), now),
            highlight: self.highlight_frame(self.highlight_token(), now),
        }
    }
}
