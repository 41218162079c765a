//! Command-line interface for opstracker.
//!
//! This module provides the CLI structure for the `opstrack` binary and the
//! grammar of commands typed inside a session.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ChecklistArgs, ConfigCommand, ModuleArg, SessionArgs, SessionCommand, SessionLine,
};

use crate::logging::Verbosity;

/// opstrack - Log maintenance activities and 6S audits
///
/// Records live only for the length of a session. Export them as CSV before
/// quitting to keep them.
#[derive(Debug, Parser)]
#[command(name = "opstrack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start an interactive tracking session
    Session(SessionArgs),

    /// Print the 6S audit checklist
    Checklist(ChecklistArgs),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn cli_with(quiet: bool, verbose: u8) -> Cli {
        Cli {
            config: None,
            verbose,
            quiet,
            command: Command::Checklist(ChecklistArgs { json: false }),
        }
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "opstrack");
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(cli_with(true, 0).verbosity(), Verbosity::Quiet);
        assert_eq!(cli_with(false, 0).verbosity(), Verbosity::Normal);
        assert_eq!(cli_with(false, 1).verbosity(), Verbosity::Verbose);
        assert_eq!(cli_with(false, 3).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_session_defaults() {
        let cli = Cli::try_parse_from(["opstrack", "session"]).unwrap();
        match cli.command {
            Command::Session(args) => {
                assert!(args.module.is_none());
                assert!(args.script.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_session_with_module_and_script() {
        let cli = Cli::try_parse_from([
            "opstrack",
            "session",
            "--module",
            "audit",
            "--script",
            "audits.txt",
        ])
        .unwrap();
        match cli.command {
            Command::Session(args) => {
                assert_eq!(args.module, Some(ModuleArg::Audit));
                assert_eq!(args.script, Some(PathBuf::from("audits.txt")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_checklist_json() {
        let cli = Cli::try_parse_from(["opstrack", "checklist", "--json"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Checklist(ChecklistArgs { json: true })
        ));
    }

    #[test]
    fn test_parse_config_validate() {
        let cli = Cli::try_parse_from(["opstrack", "config", "validate", "-f", "x.toml"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Validate { file: Some(_) })
        ));
    }

    #[test]
    fn test_parse_with_config() {
        let cli =
            Cli::try_parse_from(["opstrack", "-c", "/custom/config.toml", "checklist"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["opstrack", "session", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
        let cli = Cli::try_parse_from(["opstrack", "checklist", "-q"]).unwrap();
        assert!(cli.quiet);
    }

    #[test]
    fn test_parse_unknown_module_rejected() {
        assert!(Cli::try_parse_from(["opstrack", "session", "--module", "inventory"]).is_err());
    }
}
