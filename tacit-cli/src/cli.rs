//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Tacit CLI - implicit schema migrations from entity declarations
#[derive(Parser, Debug)]
#[command(name = "tacit")]
#[command(version)]
#[command(about = "Tacit CLI - implicit schema migrations from entity declarations", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate migrations from entity declarations
    Generate(GenerateArgs),

    /// Display version information
    Version,
}

/// Arguments for the `generate` command
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Entities to generate migrations for (all discovered entities when
    /// none are given)
    pub entities: Vec<String>,

    /// Project root containing tacit.toml (defaults to current directory)
    #[arg(short, long)]
    pub project: Option<PathBuf>,
}
