//! Domain model types (pure).
//!
//! All types in this module are pure data shared by both surfaces.

pub mod error;
pub mod key_action;
pub mod style;
pub mod verse;

// Re-export for convenience
pub use error::{AppError, CodecError, LookupError, StyleError};
pub use key_action::{InvalidKeyPress, KeyAction, KeyPress, Modifiers};
pub use style::{Color, PresentationStyle, Rgba, SettingKey};
pub use verse::{ContentMeta, ContentPayload, Verse};
