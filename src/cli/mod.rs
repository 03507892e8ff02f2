//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Relex using clap.
//! Running without a subcommand exports, so `relex 3` runs batch 3.

pub mod commands;

use clap::{Parser, Subcommand};

/// Relex - resumable paged export of report hierarchies to object storage
#[derive(Parser, Debug)]
#[command(name = "relex")]
#[command(version, about, long_about = None)]
#[command(author = "Relex Contributors")]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "relex.toml", env = "RELEX_CONFIG", global = true)]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RELEX_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Export arguments used when no subcommand is given
    #[command(flatten)]
    pub export: commands::export::ExportArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export one batch, or all batches in order
    Export(commands::export::ExportArgs),

    /// Validate configuration file and query catalog
    ValidateConfig(commands::validate::ValidateArgs),

    /// Show manifest progress per batch
    Status(commands::status::StatusArgs),
}
