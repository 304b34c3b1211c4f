//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::{CalcConfig, Theme, Verbosity};
use crate::core::{Action, CalculatorState, Snapshot};
use crate::error::{CliError, CliResult};

/// luxe-calc: four-function keypad calculator
#[derive(Parser, Debug)]
#[command(name = "luxe-calc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no logs)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Starting theme (overrides the config file)
    #[arg(long, global = true)]
    pub theme: Option<ThemeArg>,

    /// JSON configuration file
    #[arg(long, global = true, env = "LUXE_CALC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to run; the interactive keypad when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a key sequence headlessly and print the result
    Run(RunArgs),

    /// Show the effective configuration
    Config,
}

/// Arguments for the run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Keys to press, e.g. "12 + 3 =" ("C" clears, "<" is backspace)
    pub keys: String,

    /// Print a JSON snapshot instead of plain text
    #[arg(long)]
    pub json: bool,
}

/// Theme argument for CLI
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ThemeArg {
    /// Light background
    Light,
    /// Dark background
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => Self::Light,
            ThemeArg::Dark => Self::Dark,
        }
    }
}

/// Merges the config file (if any) with command-line overrides
pub fn build_config(cli: &Cli) -> CliResult<CalcConfig> {
    let mut config = match &cli.config {
        Some(path) => CalcConfig::load(path)?,
        None => CalcConfig::default(),
    };

    if cli.quiet {
        config.verbosity = Verbosity::Quiet;
    } else if cli.verbose > 0 {
        config.verbosity = Verbosity::from_count(cli.verbose);
    }

    if let Some(theme) = cli.theme {
        config.theme = theme.into();
    }

    Ok(config)
}

/// Parses a key sequence.
///
/// Tokens are separated by whitespace. Named keys (`Enter`, `Escape`,
/// `Backspace`, `C`, `<`) stand alone; any other token is read one character
/// at a time, so `"12+3="` and `"12 + 3 ="` are equivalent.
pub fn parse_keys(keys: &str) -> CliResult<Vec<Action>> {
    let mut actions = Vec::new();
    for token in keys.split_whitespace() {
        match token {
            "C" | "c" | "Escape" => actions.push(Action::Clear),
            "<" | "Backspace" => actions.push(Action::Backspace),
            "Enter" => actions.push(Action::Equals),
            _ => {
                for c in token.chars() {
                    let action =
                        Action::from_char(c).ok_or_else(|| CliError::invalid_key(c.to_string()))?;
                    actions.push(action);
                }
            }
        }
    }
    Ok(actions)
}

/// Replays a key sequence on a fresh calculator
pub fn replay(keys: &str) -> CliResult<Snapshot> {
    let mut state = CalculatorState::new();
    for action in parse_keys(keys)? {
        state.dispatch(action);
    }
    Ok(state.snapshot())
}
