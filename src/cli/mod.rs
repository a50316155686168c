//! Command-line interface definitions.

pub mod commands;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Offline tooling for the RentFuse contract connector
#[derive(Parser, Debug)]
#[command(name = "rentfuse", version, about, long_about = None)]
pub struct Cli {
    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print debug logs
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Contract configuration file (TOML)
    #[arg(long, global = true, env = "RENTFUSE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else if self.verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode rental records from an invokefunction result
    Decode(DecodeArgs),

    /// Convert between script hash and address forms
    Address(AddressArgs),

    /// Print the effective contract configuration
    Config,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// JSON file to read; stdin when omitted
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Decode the slot as a list of rentals
    #[arg(short, long)]
    pub list: bool,

    /// Stack slot to decode
    #[arg(long, default_value_t = 0)]
    pub slot: usize,
}

#[derive(Args, Debug)]
pub struct AddressArgs {
    /// Script hash (0x-hex) or address
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

impl Verbosity {
    pub fn to_log_level(self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "debug",
        }
    }
}
