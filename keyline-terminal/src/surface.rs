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

//! A plain multi-line text field with the default behaviour of a browser
//! textarea: printable keys insert, Backspace/Delete erase, arrows move the
//! caret. The editor only sees the result of these as text changes.

use keyline_core::lines::{self, line_end, line_start};
use keyline_core::{KeyStroke, LogicalKey};
use ropey::Rope;

/// What the surface did with a key it handled by itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultEffect {
    /// The text changed
    Input,
    /// Only the caret moved
    Moved,
    Nothing,
}

#[derive(Debug, Clone, Default)]
pub struct TextSurface {
    text: Rope,
    caret: usize,
}

impl TextSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rope(text: Rope) -> Self {
        let caret = text.len_chars();
        TextSurface { text, caret }
    }

    pub fn text(&self) -> &Rope {
        &self.text
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Replace the whole value. Like assigning a textarea's value, this leaves
    /// the caret at the end.
    pub fn set_text(&mut self, text: Rope) {
        self.caret = text.len_chars();
        self.text = text;
    }

    pub fn set_caret(&mut self, pos: usize) {
        self.caret = pos.min(self.text.len_chars());
    }

    /// Zero-based (line, column) of the caret, in chars
    pub fn caret_line_col(&self) -> (usize, usize) {
        let line = self
            .text
            .slice(..self.caret)
            .chars()
            .filter(|c| *c == '\n')
            .count();
        (line, self.caret - line_start(&self.text, self.caret))
    }

    /// Number of '\n'-separated lines; an empty surface has one
    pub fn line_count(&self) -> usize {
        self.text.chars().filter(|c| *c == '\n').count() + 1
    }

    /// Char offset where line `index` begins
    pub fn line_offset(&self, index: usize) -> Option<usize> {
        if index == 0 {
            return Some(0);
        }
        let mut seen = 0;
        for (pos, c) in self.text.chars().enumerate() {
            if c == '\n' {
                seen += 1;
                if seen == index {
                    return Some(pos + 1);
                }
            }
        }
        None
    }

    /// Text of line `index` without its newline
    pub fn line_text(&self, index: usize) -> Option<String> {
        let start = self.line_offset(index)?;
        Some(lines::line_text(&self.text, start).to_string())
    }

    pub fn insert_str(&mut self, s: &str) -> DefaultEffect {
        if s.is_empty() {
            return DefaultEffect::Nothing;
        }
        self.text.insert(self.caret, s);
        self.caret += s.chars().count();
        DefaultEffect::Input
    }

    /// Apply the default handling for a key the editor let through.
    pub fn apply_default(&mut self, stroke: &KeyStroke) -> DefaultEffect {
        let m = stroke.modifiers;
        match stroke.key {
            LogicalKey::AlphaNumeric(c) if !(m.control || m.meta || m.alt) => {
                self.text.insert_char(self.caret, c);
                self.caret += 1;
                DefaultEffect::Input
            }
            LogicalKey::Enter => self.insert_str("\n"),
            LogicalKey::Backspace if self.caret > 0 => {
                self.text.remove(self.caret - 1..self.caret);
                self.caret -= 1;
                DefaultEffect::Input
            }
            LogicalKey::Delete if self.caret < self.text.len_chars() => {
                self.text.remove(self.caret..self.caret + 1);
                DefaultEffect::Input
            }
            LogicalKey::Left => self.move_to(self.caret.saturating_sub(1)),
            LogicalKey::Right => self.move_to(self.caret + 1),
            LogicalKey::Home => self.move_to(line_start(&self.text, self.caret)),
            LogicalKey::End => self.move_to(line_end(&self.text, self.caret)),
            LogicalKey::Up => self.move_vertically(-1),
            LogicalKey::Down => self.move_vertically(1),
            _ => DefaultEffect::Nothing,
        }
    }

    fn move_to(&mut self, pos: usize) -> DefaultEffect {
        let pos = pos.min(self.text.len_chars());
        if pos == self.caret {
            DefaultEffect::Nothing
        } else {
            self.caret = pos;
            DefaultEffect::Moved
        }
    }

    fn move_vertically(&mut self, delta: isize) -> DefaultEffect {
        let (line, col) = self.caret_line_col();
        let Some(target) = line.checked_add_signed(delta) else {
            return DefaultEffect::Nothing;
        };
        let Some(start) = self.line_offset(target) else {
            return DefaultEffect::Nothing;
        };
        let end = line_end(&self.text, start);
        self.move_to((start + col).min(end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyline_core::Modifiers;

    fn surface(text: &str, caret: usize) -> TextSurface {
        let mut s = TextSurface::from_rope(Rope::from_str(text));
        s.set_caret(caret);
        s
    }

    #[test]
    fn test_typing_inserts_at_caret() {
        let mut s = surface("ac", 1);
        assert_eq!(s.apply_default(&KeyStroke::char('b')), DefaultEffect::Input);
        assert_eq!(s.text().to_string(), "abc");
        assert_eq!(s.caret(), 2);
    }

    #[test]
    fn test_modified_chars_are_not_inserted() {
        let mut s = surface("", 0);
        let stroke = KeyStroke::new(LogicalKey::AlphaNumeric('x'), Modifiers::control());
        assert_eq!(s.apply_default(&stroke), DefaultEffect::Nothing);
        assert_eq!(s.text().len_chars(), 0);
    }

    #[test]
    fn test_backspace_and_delete() {
        let mut s = surface("abc", 1);
        assert_eq!(s.apply_default(&KeyStroke::plain(LogicalKey::Backspace)), DefaultEffect::Input);
        assert_eq!(s.text().to_string(), "bc");
        assert_eq!(s.caret(), 0);
        assert_eq!(s.apply_default(&KeyStroke::plain(LogicalKey::Backspace)), DefaultEffect::Nothing);
        assert_eq!(s.apply_default(&KeyStroke::plain(LogicalKey::Delete)), DefaultEffect::Input);
        assert_eq!(s.text().to_string(), "c");
    }

    #[test]
    fn test_set_text_moves_caret_to_end() {
        let mut s = surface("abc", 0);
        s.set_text(Rope::from_str("hello"));
        assert_eq!(s.caret(), 5);
        s.set_caret(99);
        assert_eq!(s.caret(), 5);
    }

    #[test]
    fn test_vertical_movement_clamps_column() {
        let mut s = surface("long line\nab\nlonger", 7);
        assert_eq!(s.apply_default(&KeyStroke::plain(LogicalKey::Down)), DefaultEffect::Moved);
        assert_eq!(s.caret_line_col(), (1, 2));
        s.apply_default(&KeyStroke::plain(LogicalKey::Down));
        assert_eq!(s.caret_line_col(), (2, 2));
        assert_eq!(s.apply_default(&KeyStroke::plain(LogicalKey::Down)), DefaultEffect::Nothing);
    }

    #[test]
    fn test_home_end() {
        let mut s = surface("one\ntwo", 5);
        s.apply_default(&KeyStroke::plain(LogicalKey::End));
        assert_eq!(s.caret(), 7);
        s.apply_default(&KeyStroke::plain(LogicalKey::Home));
        assert_eq!(s.caret(), 4);
        s.set_caret(1);
        s.apply_default(&KeyStroke::plain(LogicalKey::End));
        assert_eq!(s.caret(), 3);
    }

    #[test]
    fn test_only_newline_breaks_lines() {
        let mut s = surface("a\rb\u{2028}c\nd", 0);
        assert_eq!(s.line_count(), 2);
        assert_eq!(s.line_text(0).as_deref(), Some("a\rb\u{2028}c"));
        assert_eq!(s.line_text(1).as_deref(), Some("d"));
        assert_eq!(s.line_text(2), None);

        s.apply_default(&KeyStroke::plain(LogicalKey::End));
        assert_eq!(s.caret(), 5);
        s.apply_default(&KeyStroke::plain(LogicalKey::Down));
        assert_eq!(s.caret_line_col(), (1, 1));
    }

    #[test]
    fn test_paste() {
        let mut s = surface("", 0);
        assert_eq!(s.insert_str("two\nlines"), DefaultEffect::Input);
        assert_eq!(s.caret(), 9);
        assert_eq!(s.insert_str(""), DefaultEffect::Nothing);
    }
}
