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

//! The editing engine: owns the buffer, the history, the chord and the
//! highlight timer, and decides what each key press and each raw text change
//! does to them.
//!
//! The host surface drives it with two kinds of events:
//! - `key_event` for every key press, before the surface applies its own
//!   default behaviour. A `Consumed` result means the default must be
//!   suppressed and the returned actions applied instead.
//! - `input` for every change the surface made to its text by itself
//!   (typing, deleting, pasting).
//!
//! Timers are deadlines against the editor's clock. `tick` fires whatever is
//! due, and every entry point fires due timers before doing anything else.

use crate::chord::{Chord, ChordState};
use crate::clock::{Clock, SystemClock};
use crate::commit::{CommitPolicy, CommitReason};
use crate::config::EditorConfig;
use crate::highlight::HighlightDebouncer;
use crate::keys::{Bindings, DefaultBindings, KeyAction, KeyStroke, Platform};
use crate::notify::{Notification, Notifier};
use crate::transform::{self, Transform};
use crate::undo::History;
use crate::SubscriberId;
use ropey::Rope;
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, trace, warn};

/// What the host must do after a consumed key, in order.
///
/// `SetCaret` always follows the `SetBuffer` it belongs to and must be applied
/// only after the surface has rendered that buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostAction {
    /// Replace the surface's text
    SetBuffer(Rope),
    /// Place the caret at this char offset
    SetCaret(usize),
}

/// Result of key processing - controls whether the host's default handling runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyResult {
    /// The editor handled the key; suppress the default and apply these actions
    Consumed(Vec<HostAction>),
    /// The editor didn't handle the key at all
    Ignored,
}

impl KeyResult {
    pub fn is_consumed(&self) -> bool {
        matches!(self, KeyResult::Consumed(_))
    }

    pub fn actions(&self) -> &[HostAction] {
        match self {
            KeyResult::Consumed(actions) => actions,
            KeyResult::Ignored => &[],
        }
    }
}

/// Snapshot for inspection tools
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorState {
    pub content: String,
    pub history_size: usize,
}

pub struct Editor {
    buffer: Rope,
    history: History,
    commit_policy: CommitPolicy,
    chord: Chord,
    highlight: HighlightDebouncer,
    notifier: Notifier,
    bindings: Box<dyn Bindings>,
    platform: Platform,
    config: EditorConfig,
    clock: Box<dyn Clock>,
}

impl Editor {
    /// An empty editor with default settings for `platform`
    pub fn new(platform: Platform) -> Self {
        Self::with_config(EditorConfig {
            platform: Some(platform),
            ..EditorConfig::default()
        })
    }

    pub fn with_config(config: EditorConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }

    pub fn with_clock(config: EditorConfig, clock: impl Clock + 'static) -> Self {
        Self {
            buffer: Rope::new(),
            history: History::default(),
            commit_policy: CommitPolicy,
            chord: Chord::new(config.chord_timeout()),
            highlight: HighlightDebouncer::new(config.highlight_delay()),
            notifier: Notifier::new(),
            bindings: Box::new(DefaultBindings {}),
            platform: config.platform(),
            config,
            clock: Box::new(clock),
        }
    }

    pub fn with_bindings(mut self, bindings: Box<dyn Bindings>) -> Self {
        self.bindings = bindings;
        self
    }

    /// Replace the buffer and start a fresh history with it as the floor
    pub fn load_str(&mut self, text: &str) {
        self.buffer = Rope::from_str(text);
        self.history = History::new(self.buffer.clone());
    }

    pub fn buffer(&self) -> &Rope {
        &self.buffer
    }

    pub fn content(&self) -> String {
        self.buffer.to_string()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut Notifier {
        &mut self.notifier
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&Notification) + 'static) -> SubscriberId {
        self.notifier.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.notifier.unsubscribe(id)
    }

    pub fn state(&self) -> EditorState {
        EditorState {
            content: self.content(),
            history_size: self.history.undo_count(),
        }
    }

    /// Number of settled edit bursts, including one whose quiet period has
    /// just run out but hasn't been ticked yet
    pub fn highlight_call_count(&self) -> u64 {
        let due = matches!(self.highlight.deadline(), Some(d) if self.clock.now() >= d);
        self.highlight.count() + u64::from(due)
    }

    pub fn chord_state(&self) -> ChordState {
        if self.chord.is_awaiting(self.clock.now()) {
            self.chord.state()
        } else {
            ChordState::Idle
        }
    }

    pub fn chord_pending(&self) -> bool {
        self.chord.is_awaiting(self.clock.now())
    }

    /// The earliest pending timer, if any. Hosts should `tick` no later than this.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.chord.deadline(), self.highlight.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Fire any due timers. Returns true if anything observable changed.
    pub fn tick(&mut self) -> bool {
        let now = self.clock.now();
        self.fire_timers(now)
    }

    fn fire_timers(&mut self, now: Instant) -> bool {
        let expired = self.chord.expire(now);
        let highlighted = self.highlight.poll(now);
        expired || highlighted
    }

    fn clamp_caret(&self, caret: usize) -> usize {
        let len = self.buffer.len_chars();
        if caret > len {
            warn!(caret, len, "caret outside buffer, clamping");
            len
        } else {
            caret
        }
    }

    pub fn key_event(&mut self, stroke: &KeyStroke, caret: usize) -> KeyResult {
        let now = self.clock.now();
        self.fire_timers(now);
        let caret = self.clamp_caret(caret);

        let action = self.bindings.keystroke(stroke, self.platform);
        debug!(%stroke, ?action, caret, "key event");

        match action {
            KeyAction::Save => {
                self.notifier.emit(Notification::Save);
                KeyResult::Consumed(vec![])
            }
            KeyAction::Undo => {
                let restored = self.history.undo();
                self.adopt(restored)
            }
            KeyAction::Redo => {
                let restored = self.history.redo();
                self.adopt(restored)
            }
            KeyAction::Outdent => {
                match transform::outdent(&self.buffer, caret, self.config.indent_width) {
                    Some(t) => self.apply(t),
                    None => KeyResult::Consumed(vec![]),
                }
            }
            KeyAction::Indent => {
                let t = transform::indent(&self.buffer, caret, self.config.indent_width);
                self.apply(t)
            }
            KeyAction::Enter => {
                let t = transform::newline_with_indent(&self.buffer, caret);
                self.apply(t)
            }
            KeyAction::ToggleComment => {
                let t = transform::toggle_comment(&self.buffer, caret, &self.config.comment_prefix);
                self.apply(t)
            }
            KeyAction::ChordLead => {
                self.chord.lead(now);
                KeyResult::Consumed(vec![])
            }
            KeyAction::ChordFollow => {
                if self.chord.follow(now) {
                    self.notifier.emit(Notification::ChordSuccess);
                    KeyResult::Consumed(vec![])
                } else {
                    KeyResult::Ignored
                }
            }
            KeyAction::Unbound => KeyResult::Ignored,
        }
    }

    /// The surface changed its text by itself. Runs the commit policy and restarts
    /// the highlight timer. Returns why a commit was attempted, if it was.
    pub fn input(&mut self, value: impl Into<Rope>) -> Option<CommitReason> {
        let now = self.clock.now();
        self.fire_timers(now);

        self.buffer = value.into();
        let reason = self
            .commit_policy
            .evaluate(self.history.last_committed_len(), &self.buffer);
        match reason {
            Some(reason) => {
                let pushed = self.history.commit(&self.buffer);
                debug!(?reason, pushed, "input commit");
            }
            None => trace!(len = self.buffer.len_chars(), "input deferred"),
        }

        self.highlight.touch(now);
        reason
    }

    /// Stop all timers and drop every subscriber. The buffer and history remain readable.
    pub fn dispose(&mut self) {
        self.chord.cancel();
        self.highlight.cancel();
        self.notifier.clear();
        debug!("editor disposed");
    }

    fn adopt(&mut self, restored: Option<Rope>) -> KeyResult {
        match restored {
            Some(value) => {
                self.buffer = value.clone();
                KeyResult::Consumed(vec![HostAction::SetBuffer(value)])
            }
            None => KeyResult::Consumed(vec![]),
        }
    }

    fn apply(&mut self, transform: Transform) -> KeyResult {
        self.buffer = transform.text;
        self.history.commit(&self.buffer);

        let mut actions = vec![HostAction::SetBuffer(self.buffer.clone())];
        if let Some(caret) = transform.caret {
            actions.push(HostAction::SetCaret(caret));
        }
        KeyResult::Consumed(actions)
    }
}
