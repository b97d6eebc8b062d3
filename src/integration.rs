//! Wiring between the two surfaces.
//!
//! [`Presentation`] owns an operator, a mirror and the `mpsc` channel between
//! them. Hosts feed input into the operator, then call [`Presentation::pump`]
//! or [`Presentation::tick`] to move queued messages across and advance both
//! surfaces. [`replay`] drives a lone mirror from a recorded stream.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use crate::animation::{Clock, SystemClock};
use crate::config::KeyBindings;
use crate::lookup::VerseLookup;
use crate::model::PresentationStyle;
use crate::state::{MirrorSurface, OperatorSurface};
use crate::sync::{RecordedMessage, SyncMessage};
use crate::view_state::{TextMeasure, ViewportDimensions};

/// An operator and a mirror joined by an ordered channel.
pub struct Presentation {
    operator: OperatorSurface,
    mirror: MirrorSurface,
    sender: Sender<SyncMessage>,
    receiver: Receiver<SyncMessage>,
    recording: Option<Vec<RecordedMessage>>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for Presentation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Presentation")
            .field("operator", &self.operator)
            .field("mirror", &self.mirror)
            .field("recording", &self.recording.as_ref().map(Vec::len))
            .finish_non_exhaustive()
    }
}

impl Presentation {
    /// Both surfaces start from `style` with their own canvas sizes.
    pub fn new(
        style: PresentationStyle,
        operator_viewport: ViewportDimensions,
        mirror_viewport: ViewportDimensions,
        measure: Arc<dyn TextMeasure>,
        lookup: Arc<dyn VerseLookup>,
        bindings: KeyBindings,
    ) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            operator: OperatorSurface::new(
                style.clone(),
                operator_viewport,
                Arc::clone(&measure),
                lookup,
                bindings,
            ),
            mirror: MirrorSurface::new(style, mirror_viewport, measure),
            sender,
            receiver,
            recording: None,
            clock: Arc::new(SystemClock::new()),
        }
    }

    /// Read time from `clock` instead of the wall clock.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Current time on the presentation clock.
    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    /// Keep a copy of every message sent from now on.
    pub fn start_recording(&mut self) {
        self.recording.get_or_insert_with(Vec::new);
    }

    /// Messages recorded so far; recording stops.
    pub fn take_recording(&mut self) -> Vec<RecordedMessage> {
        self.recording.take().unwrap_or_default()
    }

    /// Operator surface.
    pub fn operator(&self) -> &OperatorSurface {
        &self.operator
    }

    /// Operator surface, for feeding input.
    pub fn operator_mut(&mut self) -> &mut OperatorSurface {
        &mut self.operator
    }

    /// Mirror surface.
    pub fn mirror(&self) -> &MirrorSurface {
        &self.mirror
    }

    /// Mirror canvas resized.
    pub fn resize_mirror(&mut self, viewport: ViewportDimensions) {
        self.mirror.resize(viewport);
    }

    /// Send everything the operator queued and apply it on the mirror.
    ///
    /// Returns the number of messages delivered.
    pub fn pump(&mut self, now: f64) -> usize {
        for message in self.operator.take_messages() {
            if let Some(recording) = self.recording.as_mut() {
                recording.push(RecordedMessage {
                    at: now,
                    message: message.clone(),
                });
            }
            if self.sender.send(message).is_err() {
                tracing::warn!("mirror channel closed");
                break;
            }
        }

        let mut delivered = 0;
        while let Ok(message) = self.receiver.try_recv() {
            self.mirror.apply(message, now);
            delivered += 1;
        }
        delivered
    }

    /// One frame: advance the operator, deliver its messages, advance the mirror.
    pub fn tick(&mut self, now: f64) -> usize {
        self.operator.tick(now);
        let delivered = self.pump(now);
        self.mirror.tick(now);
        delivered
    }

    /// [`Presentation::tick`] at the clock's current time.
    pub fn frame(&mut self) -> usize {
        let now = self.clock.now();
        self.tick(now)
    }

    /// True while either surface is animating.
    pub fn is_animating(&self) -> bool {
        self.operator.is_animating() || self.mirror.state().is_animating()
    }
}

/// Apply every message sent at or before `until`, then advance the mirror to
/// `until`. Without a cut-off the whole stream is applied and the mirror is
/// advanced to the last message time.
///
/// Returns the number of messages applied.
pub fn replay(mirror: &mut MirrorSurface, messages: &[RecordedMessage], until: Option<f64>) -> usize {
    let mut applied = 0;
    let mut clock = 0.0_f64;
    for recorded in messages {
        if until.is_some_and(|limit| recorded.at > limit) {
            break;
        }
        clock = clock.max(recorded.at);
        mirror.tick(clock);
        mirror.apply(recorded.message.clone(), clock);
        applied += 1;
    }
    mirror.tick(until.unwrap_or(clock));
    tracing::info!(applied, total = messages.len(), "stream replayed");
    applied
}
