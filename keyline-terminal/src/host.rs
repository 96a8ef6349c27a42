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

//! Glue between a terminal key stream, the text surface and the editor.

use crate::surface::{DefaultEffect, TextSurface};
use crate::translate::{is_quit, keystroke_from_event, raw_event_kind};
use crossterm::event::KeyEvent;
use keyline_core::{Editor, EventLog, HostAction, KeyResult, RawEventKind};
use std::time::Instant;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Redraw,
    Quit,
}

pub struct Host {
    editor: Editor,
    surface: TextSurface,
    log: EventLog,
    /// Caret waiting for the next render to finish
    deferred_caret: Option<usize>,
}

impl Host {
    pub fn new(mut editor: Editor) -> Self {
        let mut log = EventLog::new();
        log.attach(&mut editor);
        let surface = TextSurface::from_rope(editor.buffer().clone());
        Host {
            editor,
            surface,
            log,
            deferred_caret: None,
        }
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn surface(&self) -> &TextSurface {
        &self.surface
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn handle_key(&mut self, event: &KeyEvent) -> Flow {
        if is_quit(event) {
            return Flow::Quit;
        }

        let stroke = keystroke_from_event(event);
        let kind = raw_event_kind(event.kind);
        self.log.record_key(kind, &stroke.key);
        if kind == RawEventKind::KeyUp {
            return Flow::Redraw;
        }

        match self.editor.key_event(&stroke, self.surface.caret()) {
            KeyResult::Consumed(actions) => self.apply_actions(actions),
            KeyResult::Ignored => {
                if self.surface.apply_default(&stroke) == DefaultEffect::Input {
                    self.text_changed();
                }
            }
        }
        self.log.poll_notifications();
        Flow::Redraw
    }

    /// Insert pasted text. Terminals send pasted line breaks as '\r' or "\r\n".
    pub fn handle_paste(&mut self, text: &str) -> Flow {
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        if self.surface.insert_str(&text) == DefaultEffect::Input {
            self.text_changed();
        }
        Flow::Redraw
    }

    /// When the next editor timer falls due, if one is pending
    pub fn next_deadline(&self) -> Option<Instant> {
        self.editor.next_deadline()
    }

    /// Fire due editor timers. Redraw if that or a late notification changed anything.
    pub fn tick(&mut self) -> Flow {
        let fired = self.editor.tick();
        let logged = self.log.poll_notifications() > 0;
        if fired || logged {
            Flow::Redraw
        } else {
            Flow::Continue
        }
    }

    /// Apply a caret held back until after rendering. Returns true if one was pending.
    pub fn apply_deferred_caret(&mut self) -> bool {
        match self.deferred_caret.take() {
            Some(pos) => {
                self.surface.set_caret(pos);
                true
            }
            None => false,
        }
    }

    pub fn teardown(&mut self) {
        self.log.detach(&mut self.editor);
        self.editor.dispose();
    }

    fn text_changed(&mut self) {
        self.log.record(RawEventKind::Input, None);
        self.editor.input(self.surface.text().clone());
    }

    fn apply_actions(&mut self, actions: Vec<HostAction>) {
        for action in actions {
            match action {
                HostAction::SetBuffer(text) => self.surface.set_text(text),
                HostAction::SetCaret(pos) => {
                    debug!(pos, "caret deferred to after render");
                    self.deferred_caret = Some(pos);
                }
            }
        }
    }
}
