//! CLI command definitions.
//!
//! This module defines the top-level subcommands and the commands accepted
//! on each line of an interactive session.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::session::Module;

/// Session command arguments.
#[derive(Debug, Args)]
pub struct SessionArgs {
    /// Module selected at start (defaults to the configured one)
    #[arg(short, long, value_enum)]
    pub module: Option<ModuleArg>,

    /// Read session commands from a file instead of stdin
    #[arg(short, long, value_name = "FILE")]
    pub script: Option<PathBuf>,
}

/// Checklist command arguments.
#[derive(Debug, Args)]
pub struct ChecklistArgs {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Module argument for selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModuleArg {
    /// Equipment maintenance tracker
    Maintenance,
    /// 6S audit tracker
    Audit,
}

impl From<ModuleArg> for Module {
    fn from(arg: ModuleArg) -> Self {
        match arg {
            ModuleArg::Maintenance => Self::Maintenance,
            ModuleArg::Audit => Self::Audit,
        }
    }
}

/// One line of input inside a session.
#[derive(Debug, Parser)]
#[command(name = "opstrack", no_binary_name = true, disable_version_flag = true)]
pub struct SessionLine {
    /// The command to run
    #[command(subcommand)]
    pub command: SessionCommand,
}

/// Commands available inside a session.
#[derive(Debug, Subcommand)]
pub enum SessionCommand {
    /// Switch between the maintenance and audit modules
    Module {
        /// Module to select
        #[arg(value_enum)]
        module: ModuleArg,
    },

    /// Fill in and submit the entry form of the current module
    Add,

    /// Show the log of the current module
    Logs {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Export the log of the current module as CSV
    Export {
        /// Destination file (defaults to the configured export path)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Write the CSV to the terminal instead of a file
        #[arg(long, conflicts_with = "output")]
        stdout: bool,
    },

    /// Show the dashboard of the current module
    Dashboard {
        /// First day to include, YYYY-MM-DD (defaults to the earliest record)
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Last day to include, YYYY-MM-DD (defaults to the latest record)
        #[arg(long)]
        end: Option<NaiveDate>,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// List the 6S checklist items
    Checklist,

    /// Show record counts for this session
    Status,

    /// End the session and discard all records
    #[command(alias = "exit")]
    Quit,
}

impl SessionLine {
    /// Parse one whitespace-separated input line.
    ///
    /// # Errors
    ///
    /// Returns the clap error (including help output) if the line does not
    /// form a valid command.
    pub fn parse_line(line: &str) -> Result<SessionCommand, clap::Error> {
        Self::try_parse_from(line.split_whitespace()).map(|parsed| parsed.command)
    }
}
