//! Error handling for the CLI application

use std::fmt;

/// CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// No input matched the given patterns
    FileNotFound(String),
    /// Invalid file pattern
    InvalidPattern(String),
    /// Configuration file could not be used
    ConfigError(String),
    /// Rule source could not be loaded
    RuleError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileNotFound(path) => write!(f, "File not found: {path}"),
            CliError::InvalidPattern(pattern) => write!(f, "Invalid file pattern: {pattern}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::RuleError(msg) => write!(f, "Rule error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}
