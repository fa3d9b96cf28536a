//! Core CLI definitions

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "memhash")]
#[command(about = "Fingerprint memory ranges of a live process or dump", long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where memory is read from
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// PID of the process to read (uses configured default if not provided)
    #[arg(short, long, env = "MEMHASH_PID")]
    pub pid: Option<u32>,

    /// Read from a memory dump file instead of a live process (takes precedence over --pid)
    #[arg(short, long)]
    pub dump: Option<PathBuf>,

    /// Maps file describing the dump's regions (defaults to <dump>.maps)
    #[arg(long, requires = "dump")]
    pub maps: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Hash a memory range
    #[command(visible_alias = "r")]
    Range {
        #[command(flatten)]
        target: TargetArgs,

        /// Start address (hex, 0x prefix optional)
        start: String,

        /// End address, exclusive (hex, 0x prefix optional)
        #[arg(required_unless_present = "length", conflicts_with = "length")]
        end: Option<String>,

        /// Number of bytes to hash (decimal, or hex with 0x prefix)
        #[arg(short = 'n', long)]
        length: Option<String>,

        /// Digest algorithm (uses configured default, else MD5)
        #[arg(short, long)]
        algorithm: Option<String>,

        /// Print JSON instead of a text line
        #[arg(long)]
        json: bool,
    },

    /// Hash each readable mapping of a loaded module
    #[command(visible_alias = "m")]
    Module {
        #[command(flatten)]
        target: TargetArgs,

        /// Module name (e.g. "libc", "kernel32", "game.exe")
        name: String,

        /// Digest algorithm (uses configured default, else MD5)
        #[arg(short, long)]
        algorithm: Option<String>,

        /// Print JSON instead of text lines
        #[arg(long)]
        json: bool,
    },

    /// Show info about the target
    Info {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// List supported digest algorithms
    Algorithms,

    /// Configure default settings
    #[command(visible_alias = "c")]
    Configure {
        /// Set default digest algorithm
        #[arg(long)]
        algorithm: Option<String>,

        /// Set default PID
        #[arg(long)]
        pid: Option<u32>,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}
