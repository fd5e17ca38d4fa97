//! srxsent command-line entry point

use clap::Parser;
use srxsent_cli::commands::Commands;

/// Rule-based sentence boundary detection with SRX exception rules
#[derive(Debug, Parser)]
#[command(name = "srxsent", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = cli.command.execute() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
