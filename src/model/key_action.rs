//! Domain-level keyboard actions independent of key bindings.

use std::fmt;
use std::str::FromStr;

/// Operator actions that can be mapped to configurable key bindings.
///
/// These represent intent, not specific keys. The mapping from [`KeyPress`]
/// to `KeyAction` is handled by [`KeyBindings`](crate::config::KeyBindings).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Highlight the previous verse; double-press jumps to the previous paragraph. Default: ArrowUp
    PrevVerse,
    /// Highlight the next verse; double-press appends the next verse. Default: ArrowDown
    NextVerse,
    /// Clear the highlight. Default: Escape
    ClearHighlight,
    /// Jump to the start of the previous paragraph. Default: PageUp
    PrevParagraph,
    /// Jump to the start of the next paragraph. Default: PageDown
    NextParagraph,
}

/// Modifier flags held during a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    /// Control key.
    pub control: bool,
    /// Shift key.
    pub shift: bool,
    /// Alt / Option key.
    pub alt: bool,
    /// Meta / Command / Super key.
    pub meta: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Self = Self {
        control: false,
        shift: false,
        alt: false,
        meta: false,
    };
}

/// A key press as delivered by the host: logical key name plus modifiers.
///
/// Key names follow the DOM `KeyboardEvent.key` vocabulary (`ArrowUp`,
/// `Escape`, `F9`, `a`, ...). The textual form used in configuration is
/// `"Control+Shift+Space"`: modifiers first, key last, joined by `+`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPress {
    /// Logical key name.
    pub key: String,
    /// Held modifiers.
    pub modifiers: Modifiers,
}

impl KeyPress {
    /// Key press without modifiers.
    pub fn plain(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            modifiers: Modifiers::NONE,
        }
    }

    /// Key press with modifiers.
    pub fn with_modifiers(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
        }
    }
}

/// Error parsing a key press description.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid key binding '{0}'")]
pub struct InvalidKeyPress(pub String);

impl FromStr for KeyPress {
    type Err = InvalidKeyPress;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidKeyPress(s.to_string());
        let mut parts: Vec<&str> = s.split('+').map(str::trim).collect();
        // "Control++" binds the plus key itself.
        if s.ends_with("++") {
            parts.truncate(parts.len().saturating_sub(2));
            parts.push("+");
        }
        let key = parts.pop().filter(|k| !k.is_empty()).ok_or_else(invalid)?;

        let mut modifiers = Modifiers::NONE;
        for part in parts {
            match part.to_ascii_lowercase().as_str() {
                "control" | "ctrl" => modifiers.control = true,
                "shift" => modifiers.shift = true,
                "alt" | "option" => modifiers.alt = true,
                "meta" | "cmd" | "command" | "super" => modifiers.meta = true,
                _ => return Err(invalid()),
            }
        }

        let key = match key {
            "Space" | "space" => " ",
            other => other,
        };
        Ok(KeyPress::with_modifiers(key, modifiers))
    }
}

impl fmt::Display for KeyPress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.modifiers;
        for (held, name) in [
            (m.control, "Control"),
            (m.alt, "Alt"),
            (m.shift, "Shift"),
            (m.meta, "Meta"),
        ] {
            if held {
                write!(f, "{name}+")?;
            }
        }
        match self.key.as_str() {
            " " => f.write_str("Space"),
            key => f.write_str(key),
        }
    }
}
