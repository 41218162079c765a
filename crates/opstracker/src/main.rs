//! `opstrack` - CLI for opstracker
//!
//! This binary starts interactive tracking sessions and exposes the checklist
//! and configuration from the command line.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use anyhow::Context;
use clap::Parser;

use opstracker::cli::{ChecklistArgs, Cli, Command, ConfigCommand, SessionArgs};
use opstracker::{checklist, init_logging, Config, Module, Shell, ITEMS};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    match cli.command {
        Command::Session(args) => {
            let config = load_config(cli.config.as_deref())?;
            handle_session(&config, args)
        }
        Command::Checklist(args) => handle_checklist(&args),
        Command::Config(config_cmd) => handle_config(cli.config.as_deref(), config_cmd),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    Config::load_from(path.map(Path::to_path_buf)).with_context(|| match path {
        Some(path) => format!("loading configuration from {}", path.display()),
        None => "loading configuration".to_string(),
    })
}

fn handle_session(config: &Config, args: SessionArgs) -> anyhow::Result<()> {
    let module = args
        .module
        .map_or(config.display.default_module, Module::from);
    let stdout = io::stdout();

    if let Some(script) = args.script {
        let file = File::open(&script)
            .with_context(|| format!("opening session script {}", script.display()))?;
        Shell::new(config, module, BufReader::new(file), stdout.lock()).run()?;
    } else {
        let stdin = io::stdin();
        Shell::new(config, module, stdin.lock(), stdout.lock()).run()?;
    }
    Ok(())
}

fn handle_checklist(args: &ChecklistArgs) -> anyhow::Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(&ITEMS)?);
    } else {
        print!("{}", checklist::render_taxonomy());
    }
    Ok(())
}

fn handle_config(path: Option<&Path>, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = load_config(path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Export]");
                println!("  Directory:          {}", config.export.directory.display());
                println!("  Maintenance file:   {}", config.export.maintenance_file);
                println!("  Audit file:         {}", config.export.audit_file);
                println!();
                println!("[Display]");
                println!("  Chart width:        {}", config.display.chart_width);
                println!("  Default module:     {}", config.display.default_module);
            }
        }
        ConfigCommand::Path => {
            let path = path.map_or_else(Config::default_config_path, Path::to_path_buf);
            println!("{}", path.display());
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or_else(|| path.map(Path::to_path_buf))
                .unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
