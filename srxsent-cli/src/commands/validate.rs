//! Validate command implementation

use anyhow::Result;
use clap::Args;
use srxsent_core::rules::{select_exceptions, DEFAULT_LANGUAGE_RULE};
use srxsent_core::{compile_exception_set_with, load_rules_from_path, CompileOptions};
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// SRX rule file to validate
    #[arg(short, long, value_name = "FILE", required = true)]
    pub rules: PathBuf,

    /// Language block to read
    #[arg(long, value_name = "NAME", default_value = DEFAULT_LANGUAGE_RULE)]
    pub language_rule: String,

    /// Print every rule of the block
    #[arg(short, long)]
    pub list: bool,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        println!("Validating rule file: {}", self.rules.display());

        let rules = match load_rules_from_path(&self.rules, &self.language_rule) {
            Ok(rules) => rules,
            Err(e) => {
                println!("✗ Rule file is invalid!");
                println!("  Error: {e}");
                return Err(anyhow::anyhow!("Validation failed: {}", e));
            }
        };

        let exceptions = select_exceptions(&rules);
        let compiled = compile_exception_set_with(
            &rules,
            &CompileOptions {
                supplementary: false,
                extra_patterns: Vec::new(),
            },
        );

        println!("✓ Rule file is valid!");
        println!("  Language rule: {}", self.language_rule);
        println!("  Rules: {}", rules.len());
        println!("  Exception rules: {}", exceptions.len());
        println!("  Compiled patterns: {}", compiled.len());

        if !compiled.rejected().is_empty() {
            println!("  Rejected patterns: {}", compiled.rejected().len());
            for err in compiled.rejected() {
                // Regex errors end with a one-line summary
                let reason = err.reason.lines().last().unwrap_or_default();
                println!("    {} ({})", err.pattern, reason);
            }
        }

        if self.list {
            for rule in &rules {
                println!("  {rule}");
            }
        }

        Ok(())
    }
}
