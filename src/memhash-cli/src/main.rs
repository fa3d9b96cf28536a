mod cli;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use config::Config;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::*;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            if let Some(hint) = hint(&e) {
                eprintln!("{}", hint);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;

    match cli.command {
        Commands::Range {
            target,
            start,
            end,
            length,
            algorithm,
            json,
        } => {
            // Validate everything before touching the target
            let algorithm = config.algorithm(algorithm.as_deref())?;
            let range =
                commands::range::resolve_range(&start, end.as_deref(), length.as_deref())?;
            let source = commands::open_target(&target, &config)?;
            commands::range::handle(source.as_ref(), range, algorithm, json)?;
        }

        Commands::Module {
            target,
            name,
            algorithm,
            json,
        } => {
            let algorithm = config.algorithm(algorithm.as_deref())?;
            let source = commands::open_target(&target, &config)?;
            commands::module::handle(source.as_ref(), &name, algorithm, json)?;
        }

        Commands::Info { target } => {
            let source = commands::open_target(&target, &config)?;
            commands::info::handle(source.as_ref())?;
        }

        Commands::Algorithms => {
            commands::algorithms::handle(config.algorithm(None)?);
        }

        Commands::Configure {
            algorithm,
            pid,
            show,
        } => {
            commands::configure::handle(algorithm, pid, show)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("memhash={level},memhash_cli={level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Operator guidance for the core's error kinds
fn hint(err: &anyhow::Error) -> Option<&'static str> {
    let core = err.chain().find_map(|e| e.downcast_ref::<memhash::Error>())?;
    match core {
        memhash::Error::UnreadableMemory { .. } => Some(
            "No fingerprint was produced. Check the mappings with `memhash info`, \
             adjust the range, or pause the target and retry.",
        ),
        memhash::Error::ProcessUnavailable(_) => {
            Some("The target is gone or detached. Re-attach and try again.")
        }
        memhash::Error::UnsupportedAlgorithm(_) => {
            Some("Run `memhash algorithms` for the supported list.")
        }
        memhash::Error::InvalidRange(_) => {
            Some("Addresses are hex; the end address is exclusive and must not be below the start.")
        }
        _ => None,
    }
}
