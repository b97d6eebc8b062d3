//! Keyboard bindings configuration.

use crate::model::key_action::{InvalidKeyPress, KeyAction, KeyPress};
use serde::Deserialize;
use std::collections::HashMap;

/// Maps key presses to operator actions.
///
/// Provides the default arrow/page bindings with option to override each
/// action via configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    bindings: HashMap<KeyPress, KeyAction>,
}

/// `[keys]` section of the config file: one optional key string per action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyBindingsConfig {
    /// Binding for [`KeyAction::PrevVerse`].
    pub prev_verse: Option<String>,
    /// Binding for [`KeyAction::NextVerse`].
    pub next_verse: Option<String>,
    /// Binding for [`KeyAction::ClearHighlight`].
    pub clear_highlight: Option<String>,
    /// Binding for [`KeyAction::PrevParagraph`].
    pub prev_paragraph: Option<String>,
    /// Binding for [`KeyAction::NextParagraph`].
    pub next_paragraph: Option<String>,
}

impl KeyBindings {
    /// Look up the action for a key press.
    pub fn get(&self, key: &KeyPress) -> Option<KeyAction> {
        self.bindings.get(key).copied()
    }

    /// Bind `key` to `action`, replacing whatever `action` was bound to before.
    pub fn rebind(&mut self, action: KeyAction, key: KeyPress) {
        self.bindings.retain(|_, bound| *bound != action);
        self.bindings.insert(key, action);
    }

    /// Key currently bound to `action`.
    pub fn key_for(&self, action: KeyAction) -> Option<&KeyPress> {
        self.bindings
            .iter()
            .find(|(_, bound)| **bound == action)
            .map(|(key, _)| key)
    }

    /// Defaults overridden by the configured key strings.
    ///
    /// # Errors
    ///
    /// Returns the first key string that does not parse.
    pub fn from_config(config: &KeyBindingsConfig) -> Result<Self, InvalidKeyPress> {
        let mut bindings = Self::default();
        let overrides = [
            (KeyAction::PrevVerse, &config.prev_verse),
            (KeyAction::NextVerse, &config.next_verse),
            (KeyAction::ClearHighlight, &config.clear_highlight),
            (KeyAction::PrevParagraph, &config.prev_paragraph),
            (KeyAction::NextParagraph, &config.next_paragraph),
        ];
        for (action, raw) in overrides {
            if let Some(raw) = raw {
                bindings.rebind(action, raw.parse()?);
            }
        }
        Ok(bindings)
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let bindings = [
            ("ArrowUp", KeyAction::PrevVerse),
            ("ArrowDown", KeyAction::NextVerse),
            ("Escape", KeyAction::ClearHighlight),
            ("PageUp", KeyAction::PrevParagraph),
            ("PageDown", KeyAction::NextParagraph),
        ]
        .into_iter()
        .map(|(key, action)| (KeyPress::plain(key), action))
        .collect();

        Self { bindings }
    }
}
