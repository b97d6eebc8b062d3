//! Surface synchronization protocol.
//!
//! The operator emits [`SyncMessage`]s; the mirror applies them. Messages are
//! one-directional, ordered and never coalesced. [`codec`] turns them into
//! JSON lines for recording and replay.

pub mod codec;
pub mod message;

pub use codec::{decode_message, decode_stream, encode_message, RecordedMessage};
pub use message::{from_wire_index, to_wire_index, HighlightPayload, SettingChange, SyncMessage, WireIndex};
