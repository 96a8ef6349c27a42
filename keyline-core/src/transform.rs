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

//! Line-oriented text transforms applied by the key dispatcher.
//!
//! Each transform takes the current buffer and caret and produces a fresh
//! buffer. The input rope is never modified; cloning a rope is cheap since
//! the tree is shared until the edit.

use crate::lines::{leading_spaces, line_start, line_text, starts_with};
use ropey::Rope;

/// Result of a transform: the new buffer and, optionally, where the caret should go
/// once the host has rendered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transform {
    pub text: Rope,
    pub caret: Option<usize>,
}

/// Insert `width` spaces at the caret.
pub fn indent(text: &Rope, pos: usize, width: usize) -> Transform {
    let pos = pos.min(text.len_chars());
    let mut updated = text.clone();
    updated.insert(pos, &" ".repeat(width));
    Transform {
        text: updated,
        caret: Some(pos + width),
    }
}

/// Remove `width` spaces from the start of the caret's line.
/// Returns `None` when the line does not begin with that many spaces.
pub fn outdent(text: &Rope, pos: usize, width: usize) -> Option<Transform> {
    let pos = pos.min(text.len_chars());
    let start = line_start(text, pos);
    if leading_spaces(line_text(text, pos)) < width {
        return None;
    }

    let mut updated = text.clone();
    updated.remove(start..start + width);
    // A caret inside the removed run lands on the line start rather than the previous line.
    Some(Transform {
        text: updated,
        caret: Some(pos.saturating_sub(width).max(start)),
    })
}

/// Split the line at the caret, carrying the line's leading spaces onto the new line.
pub fn newline_with_indent(text: &Rope, pos: usize) -> Transform {
    let pos = pos.min(text.len_chars());
    let indent = leading_spaces(line_text(text, pos));

    let mut inserted = String::with_capacity(indent + 1);
    inserted.push('\n');
    inserted.push_str(&" ".repeat(indent));

    let mut updated = text.clone();
    updated.insert(pos, &inserted);
    Transform {
        text: updated,
        caret: Some(pos + 1 + indent),
    }
}

/// Remove `prefix` from the start of the caret's line, or prepend it if absent.
/// The caret is left for the host to place.
pub fn toggle_comment(text: &Rope, pos: usize, prefix: &str) -> Transform {
    let pos = pos.min(text.len_chars());
    let start = line_start(text, pos);
    let commented = starts_with(line_text(text, pos), prefix);

    let mut updated = text.clone();
    if commented {
        updated.remove(start..start + prefix.chars().count());
    } else {
        updated.insert(start, prefix);
    }
    Transform {
        text: updated,
        caret: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_at_end() {
        let text = Rope::from_str("hello");
        let t = indent(&text, 5, 2);
        assert_eq!(t.text.to_string(), "hello  ");
        assert_eq!(t.caret, Some(7));
    }

    #[test]
    fn test_indent_mid_line() {
        let text = Rope::from_str("ab\ncd");
        let t = indent(&text, 4, 2);
        assert_eq!(t.text.to_string(), "ab\nc  d");
        assert_eq!(t.caret, Some(6));
    }

    #[test]
    fn test_outdent_removes_two_spaces_from_line_start() {
        let text = Rope::from_str("one\n    two");
        let t = outdent(&text, 11, 2).unwrap();
        assert_eq!(t.text.to_string(), "one\n  two");
        assert_eq!(t.caret, Some(9));
    }

    #[test]
    fn test_outdent_without_prefix_is_noop() {
        let text = Rope::from_str("one\n two");
        assert!(outdent(&text, 7, 2).is_none());
        assert!(outdent(&Rope::new(), 0, 2).is_none());
    }

    #[test]
    fn test_outdent_caret_inside_indent_stays_on_line() {
        let text = Rope::from_str("x\n  y");
        let t = outdent(&text, 3, 2).unwrap();
        assert_eq!(t.text.to_string(), "x\ny");
        assert_eq!(t.caret, Some(2));
    }

    #[test]
    fn test_indent_then_outdent_round_trip() {
        let text = Rope::from_str("first\nsecond\nthird");
        let pos = 6;
        let indented = indent(&text, pos, 2);
        let restored = outdent(&indented.text, indented.caret.unwrap(), 2).unwrap();
        assert_eq!(restored.text, text);
        assert_eq!(restored.caret, Some(pos));
    }

    #[test]
    fn test_newline_carries_indent() {
        let text = Rope::from_str("    let x = 1;");
        let t = newline_with_indent(&text, 14);
        assert_eq!(t.text.to_string(), "    let x = 1;\n    ");
        assert_eq!(t.caret, Some(19));
    }

    #[test]
    fn test_newline_without_indent() {
        let text = Rope::from_str("abc");
        let t = newline_with_indent(&text, 1);
        assert_eq!(t.text.to_string(), "a\nbc");
        assert_eq!(t.caret, Some(2));
    }

    #[test]
    fn test_newline_on_empty_buffer() {
        let t = newline_with_indent(&Rope::new(), 0);
        assert_eq!(t.text.to_string(), "\n");
        assert_eq!(t.caret, Some(1));
    }

    #[test]
    fn test_toggle_comment_adds_prefix() {
        let text = Rope::from_str("a\nlet x;\nb");
        let t = toggle_comment(&text, 4, "// ");
        assert_eq!(t.text.to_string(), "a\n// let x;\nb");
        assert_eq!(t.caret, None);
    }

    #[test]
    fn test_toggle_comment_removes_prefix() {
        let text = Rope::from_str("// done");
        let t = toggle_comment(&text, 7, "// ");
        assert_eq!(t.text.to_string(), "done");
    }

    #[test]
    fn test_toggle_comment_requires_trailing_space() {
        let text = Rope::from_str("//x");
        let t = toggle_comment(&text, 0, "// ");
        assert_eq!(t.text.to_string(), "// //x");
    }

    #[test]
    fn test_toggle_comment_is_involution() {
        let text = Rope::from_str("  indented\nplain\n");
        for pos in [0, 5, 11, 14, 17] {
            let once = toggle_comment(&text, pos, "// ");
            let twice = toggle_comment(&once.text, pos, "// ");
            assert_eq!(twice.text, text, "pos {pos}");
        }
    }
}
