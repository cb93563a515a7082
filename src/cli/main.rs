//! Command-line interface entry point for the progress tracker

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use progress_tracker::config::Config;
use progress_tracker::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};
use progress_tracker::{info, verbose};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag overrides config logging.level; fallback warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| config.logging.level.parse().ok())
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // CLI flag wins, otherwise use config logging.file if set
    let config_log_path = (!config.logging.file.is_empty()).then(|| PathBuf::from(&config.logging.file));
    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        if let Some(parent) = log_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let display_path = log_path.display();
        if init_file_logging(log_path) {
            verbose!("✓ File logging initialized at: {display_path}");
            info!("File logging initialized at: {display_path}");
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    match args.command.unwrap_or(Command::Track) {
        Command::Config { subcommand } => commands::config::run(subcommand, &mut config, &defaults),
        Command::Track => commands::track::run(&config),
    }
}
