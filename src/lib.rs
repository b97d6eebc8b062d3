//! versecast: dual-surface verse presentation engine
//!
//! An operator surface looks up passages, scrolls and highlights verses; a
//! mirror surface (the projector) reproduces the same view on its own canvas
//! from a one-way stream of messages.
//!
//! The crate follows a Pure Core / Impure Shell split: geometry, animation
//! and both surface state machines are plain values driven by explicit
//! input and injected time. Hosts own the window, the clock and the channel.

pub mod animation;
pub mod config;
pub mod logging;
pub mod lookup;
pub mod model;
pub mod state;
pub mod sync;
pub mod view;
pub mod view_state;

// Surface wiring and stream replay
pub mod integration;
