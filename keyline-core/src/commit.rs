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

//! Decides when raw typing becomes an undo step.
//!
//! Single-character edits coalesce until a word or line boundary is typed;
//! anything that moves the length by more than one character in a single
//! event (paste, cut, multi-char delete) commits straight away.

use ropey::Rope;

/// Why the policy decided to commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitReason {
    /// The buffer now ends with a space
    Space,
    /// The buffer now ends with a newline
    Newline,
    /// The length moved by more than one char since the last commit
    BulkChange,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CommitPolicy;

impl CommitPolicy {
    pub fn evaluate(&self, last_committed_len: usize, value: &Rope) -> Option<CommitReason> {
        let len = value.len_chars();
        match len.checked_sub(1).map(|last| value.char(last)) {
            Some(' ') => return Some(CommitReason::Space),
            Some('\n') => return Some(CommitReason::Newline),
            _ => {}
        }

        if len.abs_diff(last_committed_len) > 1 {
            Some(CommitReason::BulkChange)
        } else {
            None
        }
    }

    pub fn should_commit(&self, last_committed_len: usize, value: &Rope) -> bool {
        self.evaluate(last_committed_len, value).is_some()
    }
}
