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

//! Append-only log of raw surface events and editor notifications, for a
//! human watching what the keyboard is doing.

use crate::editor::Editor;
use crate::keys::LogicalKey;
use crate::notify::Notification;
use crate::SubscriberId;
use std::fmt;
use tokio::sync::mpsc::UnboundedReceiver;

/// The raw event categories a host surface reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawEventKind {
    KeyDown,
    KeyUp,
    Input,
    CompositionStart,
    CompositionUpdate,
    CompositionEnd,
}

impl RawEventKind {
    pub const ALL: [RawEventKind; 6] = [
        RawEventKind::KeyDown,
        RawEventKind::KeyUp,
        RawEventKind::Input,
        RawEventKind::CompositionStart,
        RawEventKind::CompositionUpdate,
        RawEventKind::CompositionEnd,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RawEventKind::KeyDown => "keydown",
            RawEventKind::KeyUp => "keyup",
            RawEventKind::Input => "input",
            RawEventKind::CompositionStart => "compositionstart",
            RawEventKind::CompositionUpdate => "compositionupdate",
            RawEventKind::CompositionEnd => "compositionend",
        }
    }
}

impl fmt::Display for RawEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render a key name for the log. Whitespace and erasure keys get bracketed names.
pub fn format_key(key: Option<&str>) -> String {
    match key {
        Some(" ") => "[SPACE]".to_string(),
        Some("Enter") => "[ENTER]".to_string(),
        Some("Backspace") => "[BACKSPACE]".to_string(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

#[derive(Default)]
pub struct EventLog {
    entries: Vec<String>,
    subscription: Option<(SubscriberId, UnboundedReceiver<Notification>)>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start receiving the editor's notifications. Re-attaching replaces the old subscription.
    pub fn attach(&mut self, editor: &mut Editor) {
        self.detach(editor);
        self.subscription = Some(editor.notifier_mut().subscribe_channel());
    }

    pub fn detach(&mut self, editor: &mut Editor) {
        if let Some((id, _)) = self.subscription.take() {
            editor.notifier_mut().unsubscribe(id);
        }
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    /// Log a raw event. Input events usually carry no key.
    pub fn record(&mut self, kind: RawEventKind, key: Option<&str>) {
        self.entries.push(format!("{kind} | key={}", format_key(key)));
    }

    pub fn record_key(&mut self, kind: RawEventKind, key: &LogicalKey) {
        self.record(kind, Some(&key.key_name()));
    }

    pub fn record_notification(&mut self, notification: &Notification) {
        self.entries.push(notification.label().to_string());
    }

    /// Move any delivered notifications into the log. Returns how many were appended.
    pub fn poll_notifications(&mut self) -> usize {
        let mut pending = Vec::new();
        if let Some((_, rx)) = self.subscription.as_mut() {
            while let Ok(notification) = rx.try_recv() {
                pending.push(notification);
            }
        }
        for notification in &pending {
            self.record_notification(notification);
        }
        pending.len()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// The last `n` entries, oldest first
    pub fn tail(&self, n: usize) -> &[String] {
        &self.entries[self.entries.len().saturating_sub(n)..]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
