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

//! Two-step chord tracking: a lead stroke arms the chord, a follow stroke
//! within the timeout completes it.
//!
//! The chord only leaves `AwaitingFollow` through a matching follow stroke or
//! the deadline passing. Strokes in between do not disarm it.

use std::time::{Duration, Instant};
use tracing::debug;

pub const DEFAULT_CHORD_TIMEOUT_MS: u64 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChordState {
    Idle,
    AwaitingFollow { deadline: Instant },
}

#[derive(Debug, Clone)]
pub struct Chord {
    state: ChordState,
    timeout: Duration,
}

impl Default for Chord {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_CHORD_TIMEOUT_MS))
    }
}

impl Chord {
    pub fn new(timeout: Duration) -> Self {
        Chord {
            state: ChordState::Idle,
            timeout,
        }
    }

    pub fn state(&self) -> ChordState {
        self.state
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Arm the chord. A lead while already armed restarts the deadline.
    pub fn lead(&mut self, now: Instant) {
        let deadline = now + self.timeout;
        debug!(timeout_ms = self.timeout.as_millis() as u64, "chord armed");
        self.state = ChordState::AwaitingFollow { deadline };
    }

    /// Complete the chord. Returns true if it was armed and still within its deadline.
    pub fn follow(&mut self, now: Instant) -> bool {
        self.expire(now);
        match self.state {
            ChordState::AwaitingFollow { .. } => {
                self.state = ChordState::Idle;
                debug!("chord completed");
                true
            }
            ChordState::Idle => false,
        }
    }

    /// Drop back to idle if the deadline has been reached. Returns true if it expired.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.state {
            ChordState::AwaitingFollow { deadline } if now >= deadline => {
                self.state = ChordState::Idle;
                debug!("chord timed out");
                true
            }
            _ => false,
        }
    }

    /// Disarm without completing
    pub fn cancel(&mut self) {
        self.state = ChordState::Idle;
    }

    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            ChordState::AwaitingFollow { deadline } => Some(deadline),
            ChordState::Idle => None,
        }
    }

    pub fn is_awaiting(&self, now: Instant) -> bool {
        matches!(self.state, ChordState::AwaitingFollow { deadline } if now < deadline)
    }
}
