//! CLI command definitions for the `intake` binary.

pub mod commands;
pub mod config;
pub mod interview;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use intake_types::config::ProviderKind;

/// Guided, scope-limited symptom interviews in the terminal.
#[derive(Parser)]
#[command(name = "intake", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress everything except errors and the interview itself.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export spans to stdout as OpenTelemetry traces.
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one interactive interview session.
    #[command(alias = "start")]
    Interview {
        /// Model backend (openai, gemini, mistral, custom).
        #[arg(long)]
        provider: Option<ProviderKind>,

        /// Model identifier sent to the backend.
        #[arg(long)]
        model: Option<String>,

        /// Read configuration from this file instead of the data directory.
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show the resolved configuration.
    Config {
        /// Output JSON instead of TOML.
        #[arg(long)]
        json: bool,

        /// Read configuration from this file instead of the data directory.
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
