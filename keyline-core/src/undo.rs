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

//! Undo/Redo history over whole-buffer snapshots
//!
//! The history is a linear two-stack model. The undo stack holds committed
//! snapshots, oldest first, and always keeps the floor snapshot (the buffer
//! the editor started with). Its top is the most recent commit, which is not
//! necessarily the live buffer: typing between commit boundaries is held back
//! by the commit policy.
//!
//! Committing after an undo discards the redo stack; there is no undo-tree.

use ropey::Rope;
use tracing::debug;

pub struct History {
    /// Committed snapshots. Never empty.
    undo_stack: Vec<Rope>,
    /// Snapshots popped by undo, most recent last
    redo_stack: Vec<Rope>,
    /// Char length of the buffer at the last commit that was actually pushed
    last_committed_len: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(Rope::new())
    }
}

impl History {
    /// Create a history whose floor snapshot is `floor`
    pub fn new(floor: Rope) -> Self {
        let last_committed_len = floor.len_chars();
        Self {
            undo_stack: vec![floor],
            redo_stack: Vec::new(),
            last_committed_len,
        }
    }

    /// Record `value` as a new snapshot. Consecutive duplicates are ignored.
    /// Returns true if a snapshot was pushed.
    pub fn commit(&mut self, value: &Rope) -> bool {
        if self.current() == value {
            return false;
        }

        self.undo_stack.push(value.clone());
        self.redo_stack.clear();
        self.last_committed_len = value.len_chars();
        debug!(
            depth = self.undo_stack.len(),
            len = self.last_committed_len,
            "history commit"
        );
        true
    }

    /// Step back one snapshot, returning the snapshot that is now active.
    /// The floor snapshot is never popped.
    pub fn undo(&mut self) -> Option<Rope> {
        if self.undo_stack.len() <= 1 {
            return None;
        }

        let popped = self.undo_stack.pop()?;
        self.redo_stack.push(popped);
        debug!(
            depth = self.undo_stack.len(),
            redo = self.redo_stack.len(),
            "history undo"
        );
        Some(self.current().clone())
    }

    /// Re-apply the most recently undone snapshot and return it
    pub fn redo(&mut self) -> Option<Rope> {
        let value = self.redo_stack.pop()?;
        self.undo_stack.push(value.clone());
        debug!(
            depth = self.undo_stack.len(),
            redo = self.redo_stack.len(),
            "history redo"
        );
        Some(value)
    }

    /// The snapshot at the top of the undo stack
    pub fn current(&self) -> &Rope {
        // The floor is never popped, so the stack always has a top.
        &self.undo_stack[self.undo_stack.len() - 1]
    }

    pub fn last_committed_len(&self) -> usize {
        self.last_committed_len
    }

    pub fn can_undo(&self) -> bool {
        self.undo_stack.len() > 1
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Undo stack depth, floor included
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }
}
