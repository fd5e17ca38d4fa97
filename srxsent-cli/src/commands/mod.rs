//! CLI command implementations

use anyhow::Result;
use clap::Subcommand;

pub mod patterns;
pub mod process;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Split text files into sentences
    Process(process::ProcessArgs),

    /// Check an SRX rule file and report its exception patterns
    Validate(validate::ValidateArgs),

    /// Export the normalized exception patterns of a rule file
    Patterns(patterns::PatternsArgs),
}

impl Commands {
    /// Run the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Process(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
            Commands::Patterns(args) => args.execute(),
        }
    }
}
