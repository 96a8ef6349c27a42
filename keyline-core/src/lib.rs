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

//! Keyboard-driven editing engine for a plain text surface: indentation,
//! line comments, snapshot undo/redo, a two-stroke chord, save notifications
//! and a settle timer for highlighting. Hosts feed it key presses and text
//! changes and apply the actions it returns.

use slotmap::new_key_type;

pub mod chord;
pub mod clock;
pub mod commit;
pub mod config;
pub mod editor;
pub mod error;
pub mod event_log;
pub mod highlight;
pub mod keys;
pub mod lines;
pub mod notify;
pub mod transform;
pub mod undo;

new_key_type! {
    pub struct SubscriberId;
}

pub use chord::{Chord, ChordState};
pub use clock::{Clock, ManualClock, SystemClock};
pub use commit::{CommitPolicy, CommitReason};
pub use config::EditorConfig;
pub use editor::{Editor, EditorState, HostAction, KeyResult};
pub use error::{Error, Result};
pub use event_log::{EventLog, RawEventKind};
pub use highlight::HighlightDebouncer;
pub use keys::{Bindings, DefaultBindings, KeyAction, KeyStroke, LogicalKey, Modifiers, Platform};
pub use notify::{Notification, Notifier};
pub use undo::History;
