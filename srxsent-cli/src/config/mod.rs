//! Configuration file support
//!
//! An optional TOML file supplies defaults for the `process` command;
//! command-line flags take precedence over it.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::CliError;

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Rule source configuration
    #[serde(default)]
    pub rules: RulesConfig,

    /// Processing configuration
    #[serde(default)]
    pub processing: ProcessingConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

impl CliConfig {
    /// Load a configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::ConfigError(format!("cannot read {}: {e}", path.display()))
        })?;
        let config = toml::from_str(&content)
            .map_err(|e| CliError::ConfigError(format!("{}: {e}", path.display())))?;
        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }
}

/// Rule-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RulesConfig {
    /// SRX rule file; the embedded English rules when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Language block to read from the rule file
    pub language_rule: String,

    /// Append the built-in citation patterns
    pub supplementary_patterns: bool,

    /// Additional exception patterns in SRX dialect
    pub extra_patterns: Vec<String>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            path: None,
            language_rule: srxsent_core::config::defaults::LANGUAGE_RULE.to_string(),
            supplementary_patterns: srxsent_core::config::defaults::SUPPLEMENTARY_PATTERNS,
            extra_patterns: Vec::new(),
        }
    }
}

/// Processing-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Punctuation preset: `default` or `multilingual`
    pub punctuation: String,

    /// Process inputs in parallel
    pub parallel: bool,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            punctuation: "multilingual".to_string(),
            parallel: false,
        }
    }
}

/// Output-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Default output format
    pub format: String,

    /// Pretty print JSON output
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
            pretty_json: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("srxsent.toml");
        fs::write(
            &path,
            r#"
[rules]
language_rule = "Generic"
extra_patterns = ['\bDept\.']

[output]
format = "json"
"#,
        )
        .unwrap();

        let config = CliConfig::from_file(&path).unwrap();
        assert_eq!(config.rules.language_rule, "Generic");
        assert_eq!(config.rules.extra_patterns, vec![r"\bDept\.".to_string()]);
        assert!(config.rules.supplementary_patterns);
        assert_eq!(config.output.format, "json");
        assert!(config.output.pretty_json);
        assert_eq!(config.processing, ProcessingConfig::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[rules]\nlanguage = \"en\"\n").unwrap();

        let err = CliConfig::from_file(&path).unwrap_err();
        assert!(err.to_string().starts_with("Configuration error:"));
    }

    #[test]
    fn test_missing_file() {
        let err = CliConfig::from_file(Path::new("/nonexistent/srxsent.toml")).unwrap_err();
        assert!(err.to_string().contains("cannot read"));
    }

    #[test]
    fn test_default_round_trips_through_toml() {
        let config = CliConfig::default();
        let text = toml::to_string(&config).unwrap();
        let parsed: CliConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
