//! Frame-driven animations with injected time.
//!
//! - `easing`: easing curves and progress
//! - `channel`: one `Idle | Running | Cancelled` tween channel with cancel tokens
//! - `controller`: the scroll and highlight channels of one surface, plus clocks

pub mod channel;
pub mod controller;
pub mod easing;

pub use channel::{AnimationChannel, AnimationKind, CancelToken, ChannelState, Frame, Tween};
pub use controller::{
    AnimationController, BlendFrame, BlendStep, Clock, FrameUpdate, ManualClock, ScrollStep,
    SystemClock, HIGHLIGHT_DURATION_MS, SCROLL_DURATION_MS,
};
