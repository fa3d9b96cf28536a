//! Configuration command handlers
//!
//! Handles the `configure` subcommand for setting up memhash CLI defaults.

use crate::config::Config;
use anyhow::Result;

/// Handle the configure command
///
/// # Arguments
/// * `algorithm` - Optional digest algorithm to set as default
/// * `pid` - Optional PID to set as default target
/// * `show` - If true, show current configuration
pub fn handle(algorithm: Option<String>, pid: Option<u32>, show: bool) -> Result<()> {
    let mut config = Config::load()?;

    if show {
        show_config(&config);
        return Ok(());
    }

    if algorithm.is_none() && pid.is_none() {
        show_usage();
        return Ok(());
    }

    apply(&mut config, algorithm.as_deref(), pid)?;
    config.save()?;

    if let Ok(path) = Config::config_path() {
        println!("Config saved to: {}", path.display());
    }

    Ok(())
}

/// Apply requested changes to a config
fn apply(config: &mut Config, algorithm: Option<&str>, pid: Option<u32>) -> Result<()> {
    if let Some(name) = algorithm {
        let algorithm = config.set_algorithm(name)?;
        println!("Default algorithm: {}", algorithm);
    }

    if let Some(pid) = pid {
        config.default_pid = Some(pid);
        println!("Default PID: {}", pid);
    }

    Ok(())
}

/// Display current configuration
fn show_config(config: &Config) {
    match &config.default_algorithm {
        Some(name) => println!("Default algorithm: {}", name),
        None => println!("Default algorithm: MD5 (built-in)"),
    }

    match config.default_pid {
        Some(pid) => println!("Default PID: {}", pid),
        None => println!("No default PID configured"),
    }

    if let Ok(path) = Config::config_path() {
        println!("Config file: {}", path.display());
    }
}

/// Show usage help for the configure command
fn show_usage() {
    println!("Usage: memhash configure --algorithm NAME");
    println!("   or: memhash configure --pid PID");
    println!("   or: memhash configure --show");
}
