//! Tacit CLI - implicit schema migrations from entity declarations.

use clap::Parser;

use tacit_cli::cli::{Cli, Command};
use tacit_cli::commands;
use tacit_cli::error::CliResult;
use tacit_cli::output;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        output::newline();
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run() -> CliResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Generate(args) => commands::generate::run(args).await,
        Command::Version => commands::version::run().await,
    }
}
