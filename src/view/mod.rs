//! Rendering (impure shell boundary)
//!
//! Surfaces never draw directly. A frame is described as a [`DisplayList`]
//! which the host replays on its canvas, or which is printed as text by the
//! CLI and snapshot tests.

pub mod frame;

pub use frame::{frame_to_text, render, DisplayList, DrawOp, HIGHLIGHT_INFLATE_PX, TITLE_COLOR};
