//! `PhyreKit` CLI - Command-line interface for container extraction

pub mod commands;

use clap::Parser;
use commands::Commands;
use tracing::Level;

#[derive(Parser)]
#[command(name = "phyrekit")]
#[command(version, about = "PhyreKit: FFX/X-2 HD mesh and texture extraction", long_about = None)]
struct Cli {
    /// Log every search candidate and resolved offset
    #[arg(long, global = true, conflicts_with = "quiet")]
    debug: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Run the `PhyreKit` CLI
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.debug {
        Level::DEBUG
    } else if cli.quiet {
        Level::WARN
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    cli.command.execute(cli.debug)?;

    Ok(())
}
