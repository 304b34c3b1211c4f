//! luxe-calc: four-function keypad calculator
//!
//! ## Usage
//!
//! ```bash
//! luxe-calc                      # Interactive keypad in the terminal
//! luxe-calc run "12 + 3 ="       # Replay keys, print display and history
//! luxe-calc run "10/0=" --json   # Same, as a JSON snapshot
//! luxe-calc --theme dark config  # Show the effective configuration
//! ```

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use luxe_calc::cli::{build_config, replay, Cli, Commands, RunArgs};
use luxe_calc::config::CalcConfig;
use luxe_calc::error::CliResult;
use luxe_calc::tui::{keypad_area, render, CalculatorApp, InputHandler};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;

    init_tracing(&config, cli.command.is_none());
    debug!(?config, "configuration loaded");

    match cli.command {
        Some(Commands::Run(args)) => run_replay(&args),
        Some(Commands::Config) => {
            println!("{}", config.to_json_pretty()?);
            Ok(())
        }
        None => run_interactive(&config),
    }
}

/// Installs the stderr subscriber. `RUST_LOG` wins over the configured
/// verbosity. The interactive keypad owns the terminal, so it only logs when
/// stderr is redirected or `RUST_LOG` asks for it.
fn init_tracing(config: &CalcConfig, interactive: bool) {
    let directive = if interactive && io::stderr().is_terminal() {
        "off"
    } else {
        config.verbosity.filter_directive()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run_replay(args: &RunArgs) -> CliResult<()> {
    let snapshot = replay(&args.keys)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!("{}", snapshot.display);
        if !snapshot.history.is_empty() {
            println!("{}", snapshot.history);
        }
    }
    Ok(())
}

/// Raw mode, alternate screen and mouse capture. Raw mode is switched back
/// off if any later step fails.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let screen = (|| {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        Terminal::new(CrosstermBackend::new(stdout))
    })();
    undo_on_error(screen, || {
        let _ = disable_raw_mode();
    })
}

/// Runs `undo` when `step` failed, then hands the result back unchanged
fn undo_on_error<T>(step: io::Result<T>, undo: impl FnOnce()) -> io::Result<T> {
    if step.is_err() {
        undo();
    }
    step
}

fn run_interactive(config: &CalcConfig) -> CliResult<()> {
    let mut terminal = setup_terminal()?;

    let result = run_app(&mut terminal, config);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    config: &CalcConfig,
) -> CliResult<()> {
    let mut app = CalculatorApp::from_config(config);
    let input_handler = InputHandler::new();
    info!(theme = ?app.theme(), "interactive session started");

    while !app.should_quit() {
        terminal.draw(|f| render(&app, f))?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                app.handle_key_action(input_handler.handle_key(key));
            }
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                let size = terminal.size()?;
                let area = keypad_area(Rect::new(0, 0, size.width, size.height));
                app.click(area, mouse.column, mouse.row);
            }
            _ => {}
        }
    }

    info!(calculations = app.tape().len(), "interactive session ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_failed_setup_restores_terminal() {
        let restored = Cell::new(false);
        let step: io::Result<()> = Err(io::Error::other("alternate screen unavailable"));
        let result = undo_on_error(step, || restored.set(true));
        assert!(result.is_err());
        assert!(restored.get());
    }

    #[test]
    fn test_successful_setup_keeps_terminal() {
        let restored = Cell::new(false);
        let result = undo_on_error(Ok(7), || restored.set(true));
        assert_eq!(result.ok(), Some(7));
        assert!(!restored.get());
    }
}
