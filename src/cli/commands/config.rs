//! Config command handler

use crate::args::ConfigSubcommand;
use progress_tracker::config::Config;
use progress_tracker::{error, info};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

/// Dispatch config subcommands
pub fn run(subcommand: Option<ConfigSubcommand>, config: &mut Config, defaults: &Config) -> ExitCode {
    let result = match subcommand {
        None => handle_config_get(config, None),
        Some(ConfigSubcommand::Get { key }) => handle_config_get(config, key.as_deref()),
        Some(ConfigSubcommand::Set { key, value }) => handle_config_set(config, &key, &value),
        Some(ConfigSubcommand::Unset { key }) => handle_config_unset(config, defaults, &key),
        Some(ConfigSubcommand::Reset) => {
            let stdin = io::stdin();
            handle_config_reset(&mut stdin.lock(), &mut io::stdout())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("config command failed: {message}");
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

/// Print one value, or the whole configuration when `key` is `None`
fn handle_config_get(config: &Config, key: Option<&str>) -> Result<(), String> {
    match key {
        Some(k) => {
            let value = config
                .get(k)
                .ok_or_else(|| format!("Unknown config key: '{k}'"))?;
            println!("{value}");
        }
        None => {
            println!("\n=== Configuration ===\n");
            print!("{config}");
        }
    }
    Ok(())
}

fn handle_config_set(config: &mut Config, key: &str, value: &str) -> Result<(), String> {
    config.set(key, value)?;
    config
        .save()
        .map_err(|e| format!("Failed to save config: {e}"))?;
    info!("Config key {key} set");
    println!("✓ Set {key} = {value}");
    Ok(())
}

fn handle_config_unset(config: &mut Config, defaults: &Config, key: &str) -> Result<(), String> {
    config.unset(key, defaults)?;
    config
        .save()
        .map_err(|e| format!("Failed to save config: {e}"))?;
    println!("✓ Reset {key} to default");
    Ok(())
}

/// Delete the config file after a y/yes confirmation read from `input`
fn handle_config_reset<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<(), String> {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return Ok(());
    }

    write!(output, "Are you sure you want to reset config to defaults? (y/n): ")
        .and_then(|()| output.flush())
        .map_err(|e| e.to_string())?;

    let mut response = String::new();
    input.read_line(&mut response).map_err(|e| e.to_string())?;

    if confirmed(&response) {
        Config::reset().map_err(|e| format!("Failed to remove config file: {e}"))?;
        println!("✓ Config reset to defaults");
    } else {
        println!("✗ Reset cancelled");
    }
    Ok(())
}

fn confirmed(response: &str) -> bool {
    let response = response.trim();
    response.eq_ignore_ascii_case("y") || response.eq_ignore_ascii_case("yes")
}
