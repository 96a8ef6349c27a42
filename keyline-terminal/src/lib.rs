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

//! Terminal host for the keyline editor: a textarea-like surface, crossterm
//! key translation, and a three-pane renderer driven by an async event loop.

pub mod host;
pub mod surface;
pub mod terminal_renderer;
pub mod translate;

pub use host::{Flow, Host};
pub use surface::{DefaultEffect, TextSurface};
pub use terminal_renderer::{event_loop_with_renderer, TerminalRenderer};
