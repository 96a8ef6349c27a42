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

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use keyline_core::{KeyStroke, LogicalKey, Modifiers, RawEventKind};

pub fn crossterm_modifiers_translate(modifiers: KeyModifiers) -> Modifiers {
    Modifiers {
        control: modifiers.contains(KeyModifiers::CONTROL),
        meta: modifiers.intersects(KeyModifiers::SUPER | KeyModifiers::META),
        shift: modifiers.contains(KeyModifiers::SHIFT),
        alt: modifiers.contains(KeyModifiers::ALT),
    }
}

pub fn crossterm_key_translate(ck: &KeyCode, modifiers: KeyModifiers) -> LogicalKey {
    match ck {
        KeyCode::Backspace => LogicalKey::Backspace,
        KeyCode::Enter => LogicalKey::Enter,
        KeyCode::Left => LogicalKey::Left,
        KeyCode::Right => LogicalKey::Right,
        KeyCode::Up => LogicalKey::Up,
        KeyCode::Down => LogicalKey::Down,
        KeyCode::Home => LogicalKey::Home,
        KeyCode::End => LogicalKey::End,
        KeyCode::PageUp => LogicalKey::PageUp,
        KeyCode::PageDown => LogicalKey::PageDown,
        KeyCode::Tab | KeyCode::BackTab => LogicalKey::Tab,
        KeyCode::Delete => LogicalKey::Delete,
        KeyCode::Insert => LogicalKey::Insert,
        KeyCode::F(f) => LogicalKey::Function(*f),
        KeyCode::Char(c) => {
            // Without keyboard enhancement, Ctrl+/ arrives as 0x1F (Unit Separator)
            if modifiers.contains(KeyModifiers::CONTROL) && *c == '\x1f' {
                LogicalKey::AlphaNumeric('/')
            } else {
                LogicalKey::AlphaNumeric(*c)
            }
        }
        KeyCode::Esc => LogicalKey::Esc,
        _ => LogicalKey::Unmapped,
    }
}

/// The stroke for a crossterm key event. BackTab becomes Shift+Tab.
pub fn keystroke_from_event(event: &KeyEvent) -> KeyStroke {
    let key = crossterm_key_translate(&event.code, event.modifiers);
    let mut modifiers = crossterm_modifiers_translate(event.modifiers);
    if event.code == KeyCode::BackTab {
        modifiers.shift = true;
    }
    KeyStroke::new(key, modifiers)
}

pub fn raw_event_kind(kind: KeyEventKind) -> RawEventKind {
    match kind {
        KeyEventKind::Release => RawEventKind::KeyUp,
        KeyEventKind::Press | KeyEventKind::Repeat => RawEventKind::KeyDown,
    }
}

/// Ctrl+Q leaves the program
pub fn is_quit(event: &KeyEvent) -> bool {
    event.kind != KeyEventKind::Release
        && event.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(event.code, KeyCode::Char('q') | KeyCode::Char('Q'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyline_core::{Bindings, DefaultBindings, KeyAction, Platform};

    fn action(event: KeyEvent) -> KeyAction {
        DefaultBindings {}.keystroke(&keystroke_from_event(&event), Platform::Other)
    }

    #[test]
    fn test_backtab_is_outdent() {
        let event = KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT);
        assert_eq!(action(event), KeyAction::Outdent);
        let event = KeyEvent::new(KeyCode::BackTab, KeyModifiers::NONE);
        assert_eq!(action(event), KeyAction::Outdent);
    }

    #[test]
    fn test_ctrl_slash_control_char() {
        let event = KeyEvent::new(KeyCode::Char('\x1f'), KeyModifiers::CONTROL);
        assert_eq!(action(event), KeyAction::ToggleComment);
        let event = KeyEvent::new(KeyCode::Char('/'), KeyModifiers::CONTROL);
        assert_eq!(action(event), KeyAction::ToggleComment);
    }

    #[test]
    fn test_shifted_redo() {
        let event = KeyEvent::new(KeyCode::Char('Z'), KeyModifiers::CONTROL | KeyModifiers::SHIFT);
        assert_eq!(action(event), KeyAction::Redo);
    }

    #[test]
    fn test_super_maps_to_meta() {
        let stroke = keystroke_from_event(&KeyEvent::new(KeyCode::Char('s'), KeyModifiers::SUPER));
        assert!(stroke.modifiers.meta);
        assert!(!stroke.modifiers.control);
        assert_eq!(
            DefaultBindings {}.keystroke(&stroke, Platform::Mac),
            KeyAction::Save
        );
    }

    #[test]
    fn test_quit() {
        assert!(is_quit(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL)));
        assert!(!is_quit(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_release_is_keyup() {
        assert_eq!(raw_event_kind(KeyEventKind::Release), RawEventKind::KeyUp);
        assert_eq!(raw_event_kind(KeyEventKind::Repeat), RawEventKind::KeyDown);
    }
}
