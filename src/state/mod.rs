//! Surface state machines.
//!
//! Both surfaces are plain values driven by explicit calls: input events,
//! received messages and `tick(now)` frames. Nothing here touches a window,
//! a clock or a channel, so every transition is testable in isolation.

pub mod key_press;
pub mod mirror;
pub mod operator;
pub mod surface;

pub use key_press::{
    next_paragraph_start, previous_paragraph_start, DoublePressDetector, DOUBLE_PRESS_WINDOW_MS,
    PARAGRAPH_SIZE,
};
pub use mirror::MirrorSurface;
pub use operator::OperatorSurface;
pub use surface::{
    BlockSnapshot, ContentChange, SurfaceSnapshot, SurfaceState, VerseColors,
    HIGHLIGHT_BACKGROUND_ALPHA,
};
