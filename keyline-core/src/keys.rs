// Copyright (C) 2025 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

use serde::Deserialize;
use std::fmt;

pub trait Bindings {
    fn keystroke(&self, stroke: &KeyStroke, platform: Platform) -> KeyAction;
}

/// An enumeration of our logical actions caused by keystrokes.
/// Anything that resolves to `Unbound` falls through to the host's default text input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum KeyAction {
    /// Announce a save; the buffer is untouched
    Save,
    /// Undo last committed snapshot
    Undo,
    /// Redo last undone snapshot
    Redo,
    /// Remove one indent unit from the start of the line
    Outdent,
    /// Insert one indent unit at the caret
    Indent,
    /// Insert a newline, carrying the current line's indentation
    Enter,
    /// Add or remove the line comment prefix
    ToggleComment,
    /// First half of the chord
    ChordLead,
    /// Second half of the chord; only meaningful while the chord is armed
    ChordFollow,
    /// Unbound/unmapped key
    Unbound,
}

/// The keys we distinguish. Hosts translate their physical key codes into these.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum LogicalKey {
    Left,
    Right,
    Up,
    Down,
    PageUp,
    PageDown,
    Function(u8),
    AlphaNumeric(char),
    Backspace,
    Enter,
    Home,
    End,
    Insert,
    Tab,
    Delete,
    Esc,
    Unmapped,
}

impl LogicalKey {
    /// The key name a browser would report for this key. The event log formats these.
    pub fn key_name(&self) -> String {
        match self {
            LogicalKey::Left => "ArrowLeft".to_string(),
            LogicalKey::Right => "ArrowRight".to_string(),
            LogicalKey::Up => "ArrowUp".to_string(),
            LogicalKey::Down => "ArrowDown".to_string(),
            LogicalKey::PageUp => "PageUp".to_string(),
            LogicalKey::PageDown => "PageDown".to_string(),
            LogicalKey::Function(f) => format!("F{f}"),
            LogicalKey::AlphaNumeric(a) => a.to_string(),
            LogicalKey::Backspace => "Backspace".to_string(),
            LogicalKey::Enter => "Enter".to_string(),
            LogicalKey::Home => "Home".to_string(),
            LogicalKey::End => "End".to_string(),
            LogicalKey::Insert => "Insert".to_string(),
            LogicalKey::Tab => "Tab".to_string(),
            LogicalKey::Delete => "Delete".to_string(),
            LogicalKey::Esc => "Escape".to_string(),
            LogicalKey::Unmapped => "Unidentified".to_string(),
        }
    }

    /// Short form for the status line, e.g. `⏎`, `Tab`, `k`
    pub fn as_display_string(&self) -> String {
        let s = match self {
            LogicalKey::Left => "←",
            LogicalKey::Right => "→",
            LogicalKey::Up => "↑",
            LogicalKey::Down => "↓",
            LogicalKey::PageUp => "PgUp",
            LogicalKey::PageDown => "PgDn",
            LogicalKey::Function(f) => return format!("F{f}"),
            LogicalKey::AlphaNumeric(' ') => "SPC",
            LogicalKey::AlphaNumeric(a) => return a.to_string(),
            LogicalKey::Backspace => "⌫",
            LogicalKey::Enter => "⏎",
            LogicalKey::Home => "Home",
            LogicalKey::End => "End",
            LogicalKey::Insert => "Ins",
            LogicalKey::Tab => "Tab",
            LogicalKey::Delete => "Del",
            LogicalKey::Esc => "Esc",
            LogicalKey::Unmapped => "Unmapped",
        };
        s.to_string()
    }

    fn is_char_ignore_case(&self, ch: char) -> bool {
        matches!(self, LogicalKey::AlphaNumeric(a) if a.eq_ignore_ascii_case(&ch))
    }
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash)]
pub struct Modifiers {
    pub control: bool,
    /// Command on macOS, the Windows/Super key elsewhere
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        control: false,
        meta: false,
        shift: false,
        alt: false,
    };

    pub fn control() -> Self {
        Modifiers {
            control: true,
            ..Self::NONE
        }
    }

    pub fn meta() -> Self {
        Modifiers {
            meta: true,
            ..Self::NONE
        }
    }

    pub fn shift() -> Self {
        Modifiers {
            shift: true,
            ..Self::NONE
        }
    }

    pub fn with_shift(self) -> Self {
        Modifiers {
            shift: true,
            ..self
        }
    }

    /// Whether the platform's shortcut modifier is held
    pub fn primary(&self, platform: Platform) -> bool {
        match platform {
            Platform::Mac => self.meta,
            Platform::Other => self.control,
        }
    }
}

/// Which modifier acts as the shortcut key: Command on macOS, Control elsewhere.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Mac,
    #[default]
    Other,
}

impl Platform {
    pub fn detect() -> Self {
        if cfg!(target_os = "macos") {
            Platform::Mac
        } else {
            Platform::Other
        }
    }

    pub fn primary_modifier(&self) -> Modifiers {
        match self {
            Platform::Mac => Modifiers::meta(),
            Platform::Other => Modifiers::control(),
        }
    }
}

/// One key press with the modifiers held at the time
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct KeyStroke {
    pub key: LogicalKey,
    pub modifiers: Modifiers,
}

impl KeyStroke {
    pub fn new(key: LogicalKey, modifiers: Modifiers) -> Self {
        KeyStroke { key, modifiers }
    }

    pub fn plain(key: LogicalKey) -> Self {
        Self::new(key, Modifiers::NONE)
    }

    pub fn char(ch: char) -> Self {
        Self::plain(LogicalKey::AlphaNumeric(ch))
    }

    /// `ch` with the platform's shortcut modifier held
    pub fn primary(ch: char, platform: Platform) -> Self {
        Self::new(LogicalKey::AlphaNumeric(ch), platform.primary_modifier())
    }
}

impl fmt::Display for KeyStroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // emacs-like short form.  i.e. C-k, S-Tab, s-/
        if self.modifiers.control {
            f.write_str("C-")?;
        }
        if self.modifiers.alt {
            f.write_str("M-")?;
        }
        if self.modifiers.meta {
            f.write_str("s-")?;
        }
        if self.modifiers.shift {
            f.write_str("S-")?;
        }
        f.write_str(&self.key.as_display_string())
    }
}

/// The fixed keymap. Earlier rules win.
pub struct DefaultBindings {}

impl Bindings for DefaultBindings {
    fn keystroke(&self, stroke: &KeyStroke, platform: Platform) -> KeyAction {
        let primary = stroke.modifiers.primary(platform);
        let shift = stroke.modifiers.shift;
        let key = &stroke.key;

        if primary && key.is_char_ignore_case('s') {
            return KeyAction::Save;
        }
        // Undo is the exact lowercase key; a shifted Z is redo.
        if primary && !shift && *key == LogicalKey::AlphaNumeric('z') {
            return KeyAction::Undo;
        }
        if primary && shift && key.is_char_ignore_case('z') {
            return KeyAction::Redo;
        }
        // Tab and Enter take over regardless of the shortcut modifier.
        if *key == LogicalKey::Tab {
            return if shift {
                KeyAction::Outdent
            } else {
                KeyAction::Indent
            };
        }
        if *key == LogicalKey::Enter {
            return KeyAction::Enter;
        }
        if primary && *key == LogicalKey::AlphaNumeric('/') {
            return KeyAction::ToggleComment;
        }
        if primary && key.is_char_ignore_case('k') {
            return KeyAction::ChordLead;
        }
        if primary && key.is_char_ignore_case('c') {
            return KeyAction::ChordFollow;
        }
        KeyAction::Unbound
    }
}
