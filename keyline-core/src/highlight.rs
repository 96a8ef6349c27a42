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

//! Debounced highlight hook. Counts edit bursts that have settled for the
//! quiet period, not individual edits.

use std::time::{Duration, Instant};
use tracing::debug;

pub const DEFAULT_HIGHLIGHT_DELAY_MS: u64 = 200;

#[derive(Debug, Clone)]
pub struct HighlightDebouncer {
    delay: Duration,
    deadline: Option<Instant>,
    count: u64,
}

impl Default for HighlightDebouncer {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_HIGHLIGHT_DELAY_MS))
    }
}

impl HighlightDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
            count: 0,
        }
    }

    /// Note an edit: any pending firing is replaced by one `delay` from now.
    pub fn touch(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Fire if the quiet period has elapsed. Returns true when it fired.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.count += 1;
                debug!(count = self.count, "highlight settled");
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn count(&self) -> u64 {
        self.count
    }
}
