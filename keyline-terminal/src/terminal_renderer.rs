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

use crate::host::{Flow, Host};
use crossterm::event::{Event, EventStream};
use crossterm::style::{Color, Print, Stylize};
use crossterm::terminal::{Clear, ClearType};
use crossterm::{cursor, queue};
use futures::{future::FutureExt, select, StreamExt};
use keyline_core::Editor;
use std::io::Write;
use std::future::Future;
use std::time::Instant;
use unicode_width::UnicodeWidthChar;

pub const LOG_PANE_HEIGHT: u16 = 8;
pub const BG_COLOR: Color = Color::Black;
pub const FG_COLOR: Color = Color::White;
pub const MODE_LINE_BG_COLOR: Color = Color::Blue;
pub const BORDER_COLOR: Color = Color::DarkGrey;
pub const FRINGE_COLOR: Color = Color::DarkGrey;
pub const NOTIFICATION_COLOR: Color = Color::Yellow;

pub const BORDER_HORIZONTAL: &str = "─";

/// Screen rows assigned to each pane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub editor_rows: u16,
    pub separator_row: u16,
    pub log_top: u16,
    pub log_rows: u16,
    pub status_row: u16,
}

impl Layout {
    pub fn for_size(rows: u16) -> Self {
        let status_row = rows.saturating_sub(1);
        let log_rows = LOG_PANE_HEIGHT.min(rows / 3);
        let separator_row = status_row.saturating_sub(log_rows + 1);
        Layout {
            editor_rows: separator_row,
            separator_row,
            log_top: separator_row + 1,
            log_rows,
            status_row,
        }
    }
}

pub fn status_line(editor: &Editor) -> String {
    let state = editor.state();
    let chord = if editor.chord_pending() {
        "waiting"
    } else {
        "idle"
    };
    format!(
        " keyline | history: {} | highlights: {} | chord: {} | C-q quit",
        state.history_size,
        editor.highlight_call_count(),
        chord
    )
}

/// Pad or cut `text` to exactly `width` terminal columns. Control characters
/// are shown as spaces so they never reach the terminal.
fn fit(text: &str, width: usize) -> String {
    let mut out = String::with_capacity(width);
    let mut used = 0;
    for c in text.chars() {
        let c = if c.is_control() { ' ' } else { c };
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push_str(&" ".repeat(width - used));
    out
}

/// Resolves when `deadline` passes, or never if there is none.
pub fn sleep_until_deadline(deadline: Option<Instant>) -> impl Future<Output = ()> {
    async move {
        match deadline {
            Some(deadline) => tokio::time::sleep_until(deadline.into()).await,
            None => futures::future::pending::<()>().await,
        }
    }
}

/// Terminal-specific renderer using crossterm
pub struct TerminalRenderer<W: Write> {
    device: W,
    columns: u16,
    layout: Layout,
    /// First buffer line shown in the editor pane
    scroll: usize,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(device: W, columns: u16, rows: u16) -> Self {
        Self {
            device,
            columns,
            layout: Layout::for_size(rows),
            scroll: 0,
        }
    }

    pub fn resize(&mut self, columns: u16, rows: u16) {
        self.columns = columns;
        self.layout = Layout::for_size(rows);
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn device(&self) -> &W {
        &self.device
    }

    fn scroll_to_caret(&mut self, host: &Host) {
        let (line, _) = host.surface().caret_line_col();
        let rows = self.layout.editor_rows.max(1) as usize;
        if line < self.scroll {
            self.scroll = line;
        } else if line >= self.scroll + rows {
            self.scroll = line + 1 - rows;
        }
    }

    fn caret_visible(&self, host: &Host) -> bool {
        let (line, _) = host.surface().caret_line_col();
        line >= self.scroll && line < self.scroll + self.layout.editor_rows as usize
    }

    pub fn render(&mut self, host: &Host) -> Result<(), std::io::Error> {
        queue!(self.device, cursor::Hide)?;
        self.scroll_to_caret(host);
        self.draw_editor_pane(host)?;
        self.draw_log_pane(host)?;
        self.draw_status_line(host.editor())?;
        self.place_cursor(host)
    }

    /// Move the terminal cursor to the surface caret, redrawing first if it scrolled out of view.
    pub fn place_cursor(&mut self, host: &Host) -> Result<(), std::io::Error> {
        if !self.caret_visible(host) && self.layout.editor_rows > 0 {
            return self.render(host);
        }
        let (line, col) = host.surface().caret_line_col();
        let x = col.min(self.columns.saturating_sub(1) as usize) as u16;
        let y = line.saturating_sub(self.scroll) as u16;
        queue!(self.device, cursor::MoveTo(x, y), cursor::Show)?;
        self.device.flush()
    }

    fn draw_editor_pane(&mut self, host: &Host) -> Result<(), std::io::Error> {
        let surface = host.surface();
        let width = self.columns as usize;
        for row in 0..self.layout.editor_rows {
            let line_idx = self.scroll + row as usize;
            queue!(
                self.device,
                cursor::MoveTo(0, row),
                Clear(ClearType::CurrentLine)
            )?;
            if let Some(line) = surface.line_text(line_idx) {
                queue!(
                    self.device,
                    Print(fit(&line, width).with(FG_COLOR).on(BG_COLOR))
                )?;
            } else {
                queue!(self.device, Print("~".with(FRINGE_COLOR)))?;
            }
        }
        Ok(())
    }

    fn draw_log_pane(&mut self, host: &Host) -> Result<(), std::io::Error> {
        let width = self.columns as usize;
        let title = " events ";
        let rule = BORDER_HORIZONTAL.repeat(width.saturating_sub(title.len() + 2));
        queue!(
            self.device,
            cursor::MoveTo(0, self.layout.separator_row),
            Clear(ClearType::CurrentLine),
            Print(format!("{BORDER_HORIZONTAL}{BORDER_HORIZONTAL}{title}{rule}").with(BORDER_COLOR))
        )?;

        let entries = host.log().tail(self.layout.log_rows as usize);
        for row in 0..self.layout.log_rows {
            queue!(
                self.device,
                cursor::MoveTo(0, self.layout.log_top + row),
                Clear(ClearType::CurrentLine)
            )?;
            if let Some(entry) = entries.get(row as usize) {
                let color = if entry.starts_with("Action:") {
                    NOTIFICATION_COLOR
                } else {
                    FG_COLOR
                };
                queue!(self.device, Print(fit(entry, width).with(color)))?;
            }
        }
        Ok(())
    }

    fn draw_status_line(&mut self, editor: &Editor) -> Result<(), std::io::Error> {
        let line = fit(&status_line(editor), self.columns as usize);
        queue!(
            self.device,
            cursor::MoveTo(0, self.layout.status_row),
            Print(line.with(FG_COLOR).on(MODE_LINE_BG_COLOR))
        )
    }
}

pub async fn event_loop_with_renderer<W: Write>(
    renderer: &mut TerminalRenderer<W>,
    host: &mut Host,
) -> Result<(), std::io::Error> {
    let mut event_stream = EventStream::new();

    renderer.render(host)?;

    loop {
        let timer = Box::pin(sleep_until_deadline(host.next_deadline()));
        let flow = select! {
            event = event_stream.next().fuse() => {
                match event {
                    Some(Ok(Event::Key(key))) => host.handle_key(&key),
                    Some(Ok(Event::Paste(text))) => host.handle_paste(&text),
                    Some(Ok(Event::Resize(width, height))) => {
                        renderer.resize(width, height);
                        Flow::Redraw
                    }
                    Some(Ok(_)) => Flow::Continue,
                    Some(Err(e)) => return Err(e),
                    None => return Ok(()),
                }
            }
            _ = timer.fuse() => host.tick(),
        };

        match flow {
            Flow::Quit => return Ok(()),
            Flow::Redraw => {
                renderer.render(host)?;
                // The caret from an edit lands only once its text is on screen
                if host.apply_deferred_caret() {
                    renderer.place_cursor(host)?;
                }
            }
            Flow::Continue => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use keyline_core::{EditorConfig, ManualClock, Platform};

    fn host() -> Host {
        let config = EditorConfig {
            platform: Some(Platform::Other),
            ..EditorConfig::default()
        };
        Host::new(Editor::with_clock(config, ManualClock::new()))
    }

    fn output(renderer: &TerminalRenderer<Vec<u8>>) -> String {
        String::from_utf8_lossy(renderer.device()).to_string()
    }

    #[test]
    fn test_layout() {
        let layout = Layout::for_size(30);
        assert_eq!(layout.status_row, 29);
        assert_eq!(layout.log_rows, 8);
        assert_eq!(layout.log_top, 21);
        assert_eq!(layout.separator_row, 20);
        assert_eq!(layout.editor_rows, 20);
    }

    #[test]
    fn test_layout_small_terminal() {
        let layout = Layout::for_size(6);
        assert_eq!(layout.log_rows, 2);
        assert_eq!(layout.editor_rows, 2);
        assert_eq!(Layout::for_size(0).editor_rows, 0);
    }

    #[test]
    fn test_status_line() {
        let host = host();
        let status = status_line(host.editor());
        assert!(status.contains("history: 1"));
        assert!(status.contains("highlights: 0"));
        assert!(status.contains("chord: idle"));
    }

    #[test]
    fn test_fit_pads_and_truncates() {
        assert_eq!(fit("ab", 4), "ab  ");
        assert_eq!(fit("abcdef", 3), "abc");
        assert_eq!(fit("a\tb", 3), "a b");
    }

    #[test]
    fn test_fit_blanks_control_chars() {
        assert_eq!(fit("a\rb\x1bc", 6), "a b c ");
    }

    #[test]
    fn test_fit_counts_wide_chars() {
        assert_eq!(fit("日本語", 5), "日本 ");
        assert_eq!(fit("日本", 4), "日本");
    }

    #[tokio::test]
    async fn test_sleep_until_past_deadline_resolves() {
        sleep_until_deadline(Some(Instant::now())).await;
    }

    #[test]
    fn test_render_pasted_carriage_returns() {
        let mut host = host();
        host.handle_paste("one\rtwo\r");
        let mut renderer = TerminalRenderer::new(Vec::new(), 20, 24);
        renderer.render(&host).unwrap();
        let out = output(&renderer);
        assert!(!out.contains('\r'));
        assert!(out.contains("one "));
        assert!(out.contains("two "));
    }

    #[test]
    fn test_render_draws_text_and_log() {
        let mut host = host();
        for c in "hello".chars() {
            host.handle_key(&KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
        host.handle_key(&KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));

        let mut renderer = TerminalRenderer::new(Vec::new(), 60, 24);
        renderer.render(&host).unwrap();
        let out = output(&renderer);
        assert!(out.contains("hello"));
        assert!(out.contains("Action: Save"));
        assert!(out.contains("keyline | history"));
    }

    #[test]
    fn test_scroll_follows_caret() {
        let mut host = host();
        host.handle_paste(&"line\n".repeat(40));
        let mut renderer = TerminalRenderer::new(Vec::new(), 40, 24);
        renderer.render(&host).unwrap();
        let rows = renderer.layout().editor_rows as usize;
        assert_eq!(renderer.scroll(), 40 + 1 - rows);
    }
}
