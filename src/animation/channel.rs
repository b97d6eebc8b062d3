//! One animation channel: an explicit `Idle | Running | Cancelled` machine.
//!
//! Each start bumps the channel generation; the generation is the
//! [`CancelToken`] handed to the frame callback. A frame carrying any other
//! token is stale and does nothing, which is how a superseded animation's
//! pending frame gets torn down.

use super::easing::{progress, EasingFn};

/// Identifies one started animation on one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CancelToken(u64);

impl CancelToken {
    /// Raw generation number.
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Which property a channel animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationKind {
    /// Scroll offset tween.
    Scroll,
    /// Highlight cross-fade between two verses.
    HighlightBlend,
}

/// A running interpolation between two values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween<T> {
    /// Time the tween started.
    pub start_time: f64,
    /// Duration in time units.
    pub duration: f64,
    /// Starting value.
    pub from: T,
    /// Target value.
    pub to: T,
    /// Token the tween was started with.
    pub token: CancelToken,
}

/// Channel state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChannelState<T> {
    /// Nothing has run, or the last tween completed.
    Idle,
    /// A tween is in flight.
    Running(Tween<T>),
    /// The last tween was cancelled before completing.
    Cancelled,
}

/// Result of servicing one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Frame<T> {
    /// Token no longer current, or nothing running: no effect.
    Stale,
    /// Tween still in flight at the given eased progress.
    Running {
        /// Starting value.
        from: T,
        /// Target value.
        to: T,
        /// Eased progress in `[0, 1)`.
        eased: f64,
    },
    /// Tween reached its end this frame; the channel is idle again.
    Finished {
        /// Starting value.
        from: T,
        /// Target value, to be applied exactly.
        to: T,
    },
}

/// A single-kind animation channel.
#[derive(Debug, Clone)]
pub struct AnimationChannel<T> {
    kind: AnimationKind,
    easing: EasingFn,
    duration: f64,
    generation: u64,
    state: ChannelState<T>,
}

impl<T: Copy> AnimationChannel<T> {
    /// Idle channel of `kind` with a fixed duration and easing curve.
    pub fn new(kind: AnimationKind, duration: f64, easing: EasingFn) -> Self {
        Self {
            kind,
            easing,
            duration,
            generation: 0,
            state: ChannelState::Idle,
        }
    }

    /// Kind animated by this channel.
    pub fn kind(&self) -> AnimationKind {
        self.kind
    }

    /// Current state.
    pub fn state(&self) -> &ChannelState<T> {
        &self.state
    }

    /// Token a frame must carry to be current.
    pub fn token(&self) -> CancelToken {
        CancelToken(self.generation)
    }

    /// True while a tween is in flight.
    pub fn is_running(&self) -> bool {
        matches!(self.state, ChannelState::Running(_))
    }

    /// The in-flight tween, if any.
    pub fn tween(&self) -> Option<&Tween<T>> {
        match &self.state {
            ChannelState::Running(tween) => Some(tween),
            _ => None,
        }
    }

    /// Start a tween at `now`, superseding any in-flight one.
    pub fn start(&mut self, now: f64, from: T, to: T) -> CancelToken {
        self.generation += 1;
        let token = self.token();
        self.state = ChannelState::Running(Tween {
            start_time: now,
            duration: self.duration,
            from,
            to,
            token,
        });
        token
    }

    /// Cancel the in-flight tween. Idempotent; invalidates pending frames.
    pub fn cancel(&mut self) {
        if self.is_running() {
            self.generation += 1;
            self.state = ChannelState::Cancelled;
        }
    }

    /// Eased progress of the in-flight tween at `now`, without advancing it.
    pub fn eased_at(&self, now: f64) -> Option<f64> {
        self.tween()
            .map(|tween| (self.easing)(progress(tween.start_time, now, tween.duration)))
    }

    /// Service a frame scheduled with `token` at time `now`.
    pub fn frame(&mut self, token: CancelToken, now: f64) -> Frame<T> {
        if token != self.token() {
            return Frame::Stale;
        }
        let ChannelState::Running(tween) = self.state else {
            return Frame::Stale;
        };

        let p = progress(tween.start_time, now, tween.duration);
        if p >= 1.0 {
            self.state = ChannelState::Idle;
            Frame::Finished {
                from: tween.from,
                to: tween.to,
            }
        } else {
            Frame::Running {
                from: tween.from,
                to: tween.to,
                eased: (self.easing)(p),
            }
        }
    }
}
