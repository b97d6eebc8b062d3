//! Operator → mirror messages.
//!
//! Wire form is `{"type": <name>, "payload": <payload>}` with camelCase
//! field names; these names are shared with any other surface implementation
//! and must not change.

use serde::{Deserialize, Serialize};

use crate::model::{ContentPayload, PresentationStyle};

/// Verse index on the wire, where `-1` means "none".
pub type WireIndex = i64;

/// Convert an in-memory highlight to its wire index.
pub fn to_wire_index(index: Option<usize>) -> WireIndex {
    index.map_or(-1, |i| i as WireIndex)
}

/// Convert a wire index to an in-memory highlight; any negative value is none.
pub fn from_wire_index(index: WireIndex) -> Option<usize> {
    usize::try_from(index).ok()
}

/// Payload of a `highlight` message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HighlightPayload {
    /// Set the highlight immediately (`-1` clears it).
    Index(WireIndex),
    /// Cross-fade from one verse to another.
    Blend {
        /// Verse losing the highlight (`-1` = none).
        #[serde(rename = "fromIndex")]
        from_index: WireIndex,
        /// Verse gaining the highlight (`-1` = none).
        #[serde(rename = "toIndex")]
        to_index: WireIndex,
        /// Always `true` on the wire.
        animate: bool,
    },
}

impl HighlightPayload {
    /// Immediate highlight.
    pub fn set(index: Option<usize>) -> Self {
        Self::Index(to_wire_index(index))
    }

    /// Animated highlight change.
    pub fn blend(from: Option<usize>, to: Option<usize>) -> Self {
        Self::Blend {
            from_index: to_wire_index(from),
            to_index: to_wire_index(to),
            animate: true,
        }
    }

    /// Index the highlight ends on.
    pub fn target(&self) -> WireIndex {
        match self {
            Self::Index(index) => *index,
            Self::Blend { to_index, .. } => *to_index,
        }
    }
}

/// Payload of a `settingChanged` message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingChange {
    /// Style field name, e.g. `"textColor"`.
    pub key: String,
    /// New value, typed per key.
    pub value: serde_json::Value,
}

/// A message from the operator surface to the mirror.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum SyncMessage {
    /// Replace or tail-append the passage.
    Content(ContentPayload),
    /// Scroll to a normalized percent in `[0, 1]`.
    Scroll(f64),
    /// Set or blend the highlight.
    Highlight(HighlightPayload),
    /// New font size fraction.
    FontSize(f64),
    /// Patch one style field.
    SettingChanged(SettingChange),
    /// Replace the whole style.
    SettingsBatch(PresentationStyle),
}

impl SyncMessage {
    /// Wire name of the message type.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Content(_) => "content",
            Self::Scroll(_) => "scroll",
            Self::Highlight(_) => "highlight",
            Self::FontSize(_) => "fontSize",
            Self::SettingChanged(_) => "settingChanged",
            Self::SettingsBatch(_) => "settingsBatch",
        }
    }
}
