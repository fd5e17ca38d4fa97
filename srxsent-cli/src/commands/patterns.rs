//! Patterns command implementation

use anyhow::{Context, Result};
use clap::Args;
use srxsent_core::rules::{embedded_source, DEFAULT_LANGUAGE_RULE};
use srxsent_core::{compile_exception_set_with, load_rules_for, load_rules_from_path, CompileOptions};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use crate::error::CliError;

/// Arguments for the patterns command
#[derive(Debug, Args)]
pub struct PatternsArgs {
    /// SRX rule file (default: embedded English rules)
    #[arg(short, long, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Language block to read
    #[arg(long, value_name = "NAME", default_value = DEFAULT_LANGUAGE_RULE)]
    pub language_rule: String,

    /// Leave out the built-in citation patterns
    #[arg(long)]
    pub no_supplementary: bool,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl PatternsArgs {
    /// Execute the patterns command
    pub fn execute(&self) -> Result<()> {
        let rules = match &self.rules {
            Some(path) => load_rules_from_path(path, &self.language_rule),
            None => load_rules_for(embedded_source(), &self.language_rule),
        }
        .map_err(|e| CliError::RuleError(e.to_string()))?;

        let exceptions = compile_exception_set_with(
            &rules,
            &CompileOptions {
                supplementary: !self.no_supplementary,
                extra_patterns: Vec::new(),
            },
        );

        let mut writer: Box<dyn Write> = match &self.output {
            Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
                format!("Failed to create output file: {}", path.display())
            })?)),
            None => Box::new(io::stdout().lock()),
        };

        let source = self
            .rules
            .as_ref()
            .map_or_else(|| "embedded rules".to_string(), |p| p.display().to_string());
        writeln!(
            writer,
            "# srxsent exception patterns: {} ({})",
            self.language_rule, source
        )?;
        exceptions.write_patterns(&mut writer)?;

        log::info!("Exported {} exception patterns", exceptions.len());
        Ok(())
    }
}
