//! Host-independent key events.
//!
//! Hosts translate their native keyboard events into [`Key`] once per event.
//! `Key::from_dom_event` is the reference mapping from DOM `KeyboardEvent`
//! `code`/`key` pairs; other hosts must produce the same values.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KeyName {
    Ascii,
    Return,
    Esc,
    Backspace,
    Delete,
    Space,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Key {
    pub character: String,
    pub name: KeyName,
    #[serde(default)]
    pub shift_pressed: bool,
    #[serde(default)]
    pub ctrl_pressed: bool,
    #[serde(default)]
    pub is_numpad_key: bool,
}

impl Key {
    pub fn new(character: impl Into<String>, name: KeyName) -> Self {
        Self {
            character: character.into(),
            name,
            shift_pressed: false,
            ctrl_pressed: false,
            is_numpad_key: false,
        }
    }

    /// A printable key carrying `ch`.
    pub fn ascii(ch: char) -> Self {
        Self::new(ch.to_string(), KeyName::Ascii)
    }

    /// A named key with no printable character.
    pub fn named(name: KeyName) -> Self {
        Self::new(String::new(), name)
    }

    pub fn with_shift(mut self) -> Self {
        self.shift_pressed = true;
        self
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl_pressed = true;
        self
    }

    pub fn with_numpad(mut self) -> Self {
        self.is_numpad_key = true;
        self
    }

    /// The single printable character of an `Ascii` key.
    pub fn ascii_char(&self) -> Option<char> {
        if self.name != KeyName::Ascii {
            return None;
        }
        let mut chars = self.character.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }

    /// True for a bare modifier press reported as its own event.
    pub fn is_shift_only(&self) -> bool {
        self.name == KeyName::Unknown && self.character == "Shift"
    }

    /// Normalize a DOM `KeyboardEvent` given its `code` and `key` values.
    pub fn from_dom_event(code: &str, key: &str, shift: bool, ctrl: bool) -> Self {
        let mut is_numpad_key = false;
        let name = match code {
            "ArrowLeft" => KeyName::Left,
            "ArrowRight" => KeyName::Right,
            "ArrowUp" => KeyName::Up,
            "ArrowDown" => KeyName::Down,
            "Home" => KeyName::Home,
            "End" => KeyName::End,
            "Backspace" => KeyName::Backspace,
            "Delete" => KeyName::Delete,
            "NumpadEnter" | "Enter" => KeyName::Return,
            "Escape" => KeyName::Esc,
            "Space" => KeyName::Space,
            "Tab" => KeyName::Tab,
            "PageUp" => KeyName::PageUp,
            "PageDown" => KeyName::PageDown,
            "NumpadAdd" | "NumpadSubtract" | "NumpadMultiply" | "NumpadDivide"
            | "NumpadDecimal" => {
                is_numpad_key = true;
                KeyName::Ascii
            }
            "Numpad0" | "Numpad1" | "Numpad2" | "Numpad3" | "Numpad4" | "Numpad5"
            | "Numpad6" | "Numpad7" | "Numpad8" | "Numpad9" => {
                if key.chars().count() == 1 {
                    is_numpad_key = true;
                    KeyName::Ascii
                } else {
                    // NumLock off: the key value names the navigation key.
                    match key {
                        "ArrowLeft" => KeyName::Left,
                        "ArrowRight" => KeyName::Right,
                        "ArrowUp" => KeyName::Up,
                        "ArrowDown" => KeyName::Down,
                        "Home" => KeyName::Home,
                        "End" => KeyName::End,
                        "PageUp" => KeyName::PageUp,
                        "PageDown" => KeyName::PageDown,
                        _ => KeyName::Unknown,
                    }
                }
            }
            _ if key.chars().count() == 1 => KeyName::Ascii,
            _ => KeyName::Unknown,
        };
        Self {
            character: key.to_string(),
            name,
            shift_pressed: shift,
            ctrl_pressed: ctrl,
            is_numpad_key,
        }
    }
}
