//! Sentencizer configuration

use std::str::FromStr;

use crate::error::{Error, Result};
use crate::rules::{CompileOptions, DEFAULT_LANGUAGE_RULE};
use crate::tables::PunctTable;

/// Default configuration constants
pub mod defaults {
    /// SRX language block read from rule files
    pub const LANGUAGE_RULE: &str = super::DEFAULT_LANGUAGE_RULE;

    /// Append the hand-written citation/abbreviation patterns
    pub const SUPPLEMENTARY_PATTERNS: bool = true;

    /// Replace existing sentence annotations
    pub const OVERWRITE: bool = false;
}

/// Which characters count as sentence-final punctuation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Punctuation {
    /// `.`, `!` and `?`
    #[default]
    Default,
    /// The full multilingual table
    Multilingual,
    /// An explicit character set
    Custom(Vec<char>),
}

impl Punctuation {
    /// Build the lookup table
    pub fn table(&self) -> PunctTable {
        match self {
            Punctuation::Default => PunctTable::default(),
            Punctuation::Multilingual => PunctTable::multilingual(),
            Punctuation::Custom(chars) => PunctTable::new(chars.iter().copied()),
        }
    }
}

impl FromStr for Punctuation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "default" | "basic" => Ok(Punctuation::Default),
            "multilingual" | "full" => Ok(Punctuation::Multilingual),
            other => Err(Error::Configuration(format!(
                "unknown punctuation preset '{other}' (expected 'default' or 'multilingual')"
            ))),
        }
    }
}

/// Sentencizer configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub(crate) language_rule: String,
    pub(crate) punctuation: Punctuation,
    pub(crate) supplementary_patterns: bool,
    pub(crate) extra_patterns: Vec<String>,
    pub(crate) overwrite: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language_rule: defaults::LANGUAGE_RULE.to_string(),
            punctuation: Punctuation::default(),
            supplementary_patterns: defaults::SUPPLEMENTARY_PATTERNS,
            extra_patterns: Vec::new(),
            overwrite: defaults::OVERWRITE,
        }
    }
}

impl Config {
    /// Create a configuration builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// SRX language block name
    pub fn language_rule(&self) -> &str {
        &self.language_rule
    }

    /// Punctuation selection
    pub fn punctuation(&self) -> &Punctuation {
        &self.punctuation
    }

    /// Whether annotated documents are re-annotated
    pub fn overwrite(&self) -> bool {
        self.overwrite
    }

    /// Options for compiling the exception set
    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions {
            supplementary: self.supplementary_patterns,
            extra_patterns: self.extra_patterns.clone(),
        }
    }

    /// Validate the configuration
    pub(crate) fn validate(&self) -> Result<()> {
        if self.language_rule.trim().is_empty() {
            return Err(Error::Configuration(
                "language rule name must not be empty".into(),
            ));
        }

        if let Punctuation::Custom(chars) = &self.punctuation {
            if chars.is_empty() {
                return Err(Error::Configuration(
                    "custom punctuation set must not be empty".into(),
                ));
            }
        }

        Ok(())
    }
}

/// Fluent builder for configuration
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    language_rule: Option<String>,
    punctuation: Option<Punctuation>,
    supplementary_patterns: Option<bool>,
    extra_patterns: Vec<String>,
    overwrite: Option<bool>,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the SRX language block to read
    pub fn language_rule(mut self, name: impl Into<String>) -> Self {
        self.language_rule = Some(name.into());
        self
    }

    /// Set the punctuation selection
    pub fn punctuation(mut self, punctuation: Punctuation) -> Self {
        self.punctuation = Some(punctuation);
        self
    }

    /// Set the punctuation selection by preset name
    pub fn punctuation_preset(mut self, name: &str) -> Result<Self> {
        self.punctuation = Some(name.parse()?);
        Ok(self)
    }

    /// Enable or disable the supplementary patterns
    pub fn supplementary_patterns(mut self, enabled: bool) -> Self {
        self.supplementary_patterns = Some(enabled);
        self
    }

    /// Add an exception pattern in SRX dialect
    pub fn extra_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.extra_patterns.push(pattern.into());
        self
    }

    /// Replace existing annotations
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = Some(overwrite);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<Config> {
        let mut config = Config::default();

        if let Some(name) = self.language_rule {
            config.language_rule = name;
        }

        if let Some(punctuation) = self.punctuation {
            config.punctuation = punctuation;
        }

        if let Some(enabled) = self.supplementary_patterns {
            config.supplementary_patterns = enabled;
        }

        config.extra_patterns = self.extra_patterns;

        if let Some(overwrite) = self.overwrite {
            config.overwrite = overwrite;
        }

        config.validate()?;
        Ok(config)
    }
}
