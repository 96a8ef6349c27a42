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

//! Line boundary helpers over a buffer and a caret position.
//!
//! All positions are char offsets. Only `'\n'` terminates a line. Every
//! function clamps `pos` to the buffer length, so they are total over any
//! caret the host hands us.

use ropey::{Rope, RopeSlice};

/// Offset just past the nearest newline at or before `pos - 1`, or 0 if there is none.
pub fn line_start(text: &Rope, pos: usize) -> usize {
    let pos = pos.min(text.len_chars());
    let mut start = pos;
    let mut chars = text.chars_at(pos);
    while let Some(ch) = chars.prev() {
        if ch == '\n' {
            break;
        }
        start -= 1;
    }
    start
}

/// Offset of the next newline at or after `pos`, or the end of the buffer.
pub fn line_end(text: &Rope, pos: usize) -> usize {
    let pos = pos.min(text.len_chars());
    let mut end = pos;
    for ch in text.chars_at(pos) {
        if ch == '\n' {
            break;
        }
        end += 1;
    }
    end
}

/// The full line surrounding `pos`, without its terminating newline.
pub fn line_text(text: &Rope, pos: usize) -> RopeSlice<'_> {
    text.slice(line_start(text, pos)..line_end(text, pos))
}

/// Number of leading space characters. Tabs do not count.
pub fn leading_spaces(line: RopeSlice<'_>) -> usize {
    line.chars().take_while(|ch| *ch == ' ').count()
}

pub fn starts_with(line: RopeSlice<'_>, prefix: &str) -> bool {
    let prefix_len = prefix.chars().count();
    line.len_chars() >= prefix_len && line.chars().take(prefix_len).eq(prefix.chars())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_line_start_at_zero() {
        let text = Rope::from_str("hello\nworld");
        assert_eq!(line_start(&text, 0), 0);
        assert_eq!(line_start(&Rope::new(), 0), 0);
    }

    #[test]
    fn test_line_start_second_line() {
        let text = Rope::from_str("hello\nworld");
        assert_eq!(line_start(&text, 6), 6);
        assert_eq!(line_start(&text, 9), 6);
        assert_eq!(line_start(&text, 11), 6);
    }

    #[test]
    fn test_line_start_on_newline() {
        // The caret sitting just before the newline still belongs to the first line.
        let text = Rope::from_str("ab\ncd");
        assert_eq!(line_start(&text, 2), 0);
        assert_eq!(line_start(&text, 3), 3);
    }

    #[test]
    fn test_line_end() {
        let text = Rope::from_str("one\ntwo\nthree");
        assert_eq!(line_end(&text, 0), 3);
        assert_eq!(line_end(&text, 3), 3);
        assert_eq!(line_end(&text, 4), 7);
        assert_eq!(line_end(&text, 10), 13);
    }

    #[test]
    fn test_line_text() {
        let text = Rope::from_str("  fn main() {\n    body\n}");
        assert_eq!(line_text(&text, 5).to_string(), "  fn main() {");
        assert_eq!(line_text(&text, 16).to_string(), "    body");
        assert_eq!(line_text(&text, text.len_chars()).to_string(), "}");
    }

    #[test]
    fn test_line_text_empty_lines() {
        let text = Rope::from_str("a\n\nb");
        assert_eq!(line_text(&text, 2).to_string(), "");
        assert_eq!(line_text(&Rope::new(), 0).to_string(), "");
    }

    #[test]
    fn test_out_of_range_pos_is_clamped() {
        let text = Rope::from_str("abc\ndef");
        assert_eq!(line_start(&text, 100), 4);
        assert_eq!(line_end(&text, 100), 7);
    }

    #[test]
    fn test_multibyte_chars_use_char_offsets() {
        let text = Rope::from_str("héllo\nwörld");
        assert_eq!(line_start(&text, 8), 6);
        assert_eq!(line_text(&text, 8).to_string(), "wörld");
    }

    #[test]
    fn test_leading_spaces() {
        let text = Rope::from_str("    x\n\tabc");
        assert_eq!(leading_spaces(line_text(&text, 0)), 4);
        assert_eq!(leading_spaces(line_text(&text, 7)), 0);
    }

    #[test]
    fn test_starts_with() {
        let text = Rope::from_str("// note");
        assert!(starts_with(text.slice(..), "// "));
        assert!(!starts_with(text.slice(..2), "// "));
        assert!(starts_with(text.slice(..), ""));
    }

    proptest! {
        #[test]
        fn prop_line_start_is_bounded_and_follows_newline(s in "[a-c \n]{0,40}", seed in 0usize..64) {
            let text = Rope::from_str(&s);
            let pos = seed % (text.len_chars() + 1);
            let start = line_start(&text, pos);
            prop_assert!(start <= pos);
            if start > 0 {
                prop_assert_eq!(text.char(start - 1), '\n');
            }
        }

        #[test]
        fn prop_line_text_has_no_newline(s in "[a-c \n]{0,40}", seed in 0usize..64) {
            let text = Rope::from_str(&s);
            let pos = seed % (text.len_chars() + 1);
            prop_assert!(!line_text(&text, pos).chars().any(|ch| ch == '\n'));
        }
    }
}
