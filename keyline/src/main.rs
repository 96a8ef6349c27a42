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

use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::disable_raw_mode;
use keyline_core::{Editor, EditorConfig, Platform};
use keyline_terminal::{Host, TerminalRenderer};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

mod logging;

#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    config_path: Option<PathBuf>,
    help: bool,
}

fn parse_args_from(args: &[String]) -> Result<Args, String> {
    let mut parsed = Args::default();
    let mut i = 1; // Skip program name

    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                let Some(path) = args.get(i + 1) else {
                    return Err("--config requires a file path".to_string());
                };
                parsed.config_path = Some(PathBuf::from(path));
                i += 2;
            }
            "--help" | "-h" => {
                parsed.help = true;
                i += 1;
            }
            arg => return Err(format!("Unknown option '{arg}'")),
        }
    }

    Ok(parsed)
}

/// Parse command line arguments
fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    match parse_args_from(&args) {
        Ok(args) if args.help => {
            print_help();
            std::process::exit(0);
        }
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}");
            print_help();
            std::process::exit(1);
        }
    }
}

/// Most macOS terminals never pass Command through, so shortcuts use Control
/// unless the config names a platform.
fn terminal_config(mut config: EditorConfig) -> EditorConfig {
    config.platform.get_or_insert(Platform::Other);
    config
}

/// Print help message
fn print_help() {
    println!("Keyline - a small keyboard-driven text editor");
    println!();
    println!("USAGE:");
    println!("    keyline [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <FILE>  Load editor settings from a TOML file");
    println!("    -h, --help           Print this help message");
    println!();
    println!("KEYS (C = Ctrl; set platform = \"mac\" in the config to use Cmd):");
    println!("    Tab / Shift-Tab      Indent / outdent the current line");
    println!("    Enter                New line keeping indentation");
    println!("    C-/                  Toggle line comment");
    println!("    C-z / C-Shift-z      Undo / redo");
    println!("    C-s                  Save (logged only)");
    println!("    C-k then C-c         Chord (within the chord timeout)");
    println!("    C-q                  Quit");
    println!();
    println!("Set {} to adjust log filtering.", logging::LOG_ENV_VAR);
}

// Everything to run in raw_mode
async fn terminal_main<W: Write>(stdout: W, config: EditorConfig) -> Result<(), std::io::Error> {
    let (columns, rows) = crossterm::terminal::size()?;

    let mut host = Host::new(Editor::with_config(config));
    let mut renderer = TerminalRenderer::new(stdout, columns, rows);

    let result = keyline_terminal::event_loop_with_renderer(&mut renderer, &mut host).await;
    host.teardown();
    result
}

fn exit_state(device: &mut impl Write) -> Result<(), std::io::Error> {
    // Restore terminal to original state
    execute!(device, DisableBracketedPaste)?;
    execute!(device, crossterm::cursor::Show)?;
    execute!(device, PopKeyboardEnhancementFlags)?;
    device.flush()?;

    disable_raw_mode()?;

    execute!(
        device,
        crossterm::terminal::Clear(crossterm::terminal::ClearType::All)
    )?;
    let (_, height) = crossterm::terminal::size().unwrap_or((80, 24));
    execute!(device, crossterm::cursor::MoveTo(0, height))?;
    device.flush()?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), keyline_core::Error> {
    let args = parse_args();
    let logging = logging::init();

    let config = match &args.config_path {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::default(),
    };
    let config = terminal_config(config);
    info!(?config, "starting");

    // Set panic handler to clean up terminal state while preserving panic info
    std::panic::set_hook(Box::new(|panic_info| {
        let _ = exit_state(&mut std::io::stdout());
        tracing::error!(panic = %panic_info, "panic");
        eprintln!("keyline crashed:");
        eprintln!("{panic_info}");
    }));

    let mut stdout = std::io::stdout();

    // Set up terminal state
    crossterm::terminal::enable_raw_mode()?;
    execute!(
        stdout,
        PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
        )
    )?;
    execute!(stdout, EnableBracketedPaste)?;

    // Run the application
    let result = terminal_main(&mut stdout, config).await;

    // Always clean up terminal state, regardless of success or failure
    if let Err(cleanup_err) = exit_state(&mut stdout) {
        eprintln!("Warning: Failed to clean up terminal state: {cleanup_err}");
    }

    // Handle the main result
    if let Err(e) = result {
        eprintln!("Error: {e}");
        if let Some(guard) = &logging {
            eprintln!("Logs: {}", guard.log_dir().display());
        }
        return Err(e.into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("keyline")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_no_args() {
        assert_eq!(parse_args_from(&args(&[])), Ok(Args::default()));
    }

    #[test]
    fn test_config_path() {
        let parsed = parse_args_from(&args(&["--config", "k.toml"])).unwrap();
        assert_eq!(parsed.config_path, Some(PathBuf::from("k.toml")));
        assert!(!parsed.help);
    }

    #[test]
    fn test_config_requires_path() {
        assert!(parse_args_from(&args(&["-c"])).is_err());
    }

    #[test]
    fn test_unknown_option() {
        assert!(parse_args_from(&args(&["--init", "x"])).is_err());
    }

    #[test]
    fn test_terminal_defaults_to_control() {
        let config = terminal_config(EditorConfig::default());
        assert_eq!(config.platform(), Platform::Other);

        let mac = EditorConfig {
            platform: Some(Platform::Mac),
            ..EditorConfig::default()
        };
        assert_eq!(terminal_config(mac).platform(), Platform::Mac);
    }

    #[test]
    fn test_help() {
        assert!(parse_args_from(&args(&["-h"])).unwrap().help);
    }
}
