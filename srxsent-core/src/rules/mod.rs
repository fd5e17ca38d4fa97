//! SRX segmentation rules
//!
//! Rules are read from an SRX document, reduced to the no-break exceptions
//! the predictor uses, normalized to ASCII character classes and compiled.

pub mod exceptions;
pub mod loader;
pub mod normalize;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use exceptions::{
    compile_exception_set, compile_exception_set_with, read_pattern_list, CompileOptions,
    ExceptionPattern, ExceptionSet,
};
pub use loader::{load_rules, load_rules_for, load_rules_from_path, DEFAULT_LANGUAGE_RULE};
pub use normalize::{has_ascii_letter, normalize, SUPPLEMENTARY_PATTERNS};

use crate::error::RuleSourceError;

/// English rule set shipped with the crate
const EMBEDDED_SRX: &str = include_str!("../../configs/segment.srx");

/// One `<rule>` entry of an SRX language block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleRecord {
    /// `break="yes"`
    pub breaking: bool,
    /// Text of `<beforebreak>`
    pub before_pattern: Option<String>,
    /// Text of `<afterbreak>`
    pub after_pattern: Option<String>,
}

impl RuleRecord {
    /// Create a rule record
    pub fn new(
        breaking: bool,
        before_pattern: Option<impl Into<String>>,
        after_pattern: Option<impl Into<String>>,
    ) -> Self {
        Self {
            breaking,
            before_pattern: before_pattern.map(Into::into),
            after_pattern: after_pattern.map(Into::into),
        }
    }

    /// Shorthand for a no-break rule without an after-pattern
    pub fn exception(before_pattern: impl Into<String>) -> Self {
        Self {
            breaking: false,
            before_pattern: Some(before_pattern.into()),
            after_pattern: None,
        }
    }

    /// Whether this rule is a non-breaking exception with no after context
    pub fn is_exception(&self) -> bool {
        !self.breaking && self.after_pattern.as_deref().map_or(true, str::is_empty)
    }
}

impl fmt::Display for RuleRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "breaking: {} | before: {} | after: {}",
            self.breaking,
            self.before_pattern.as_deref().unwrap_or("None"),
            self.after_pattern.as_deref().unwrap_or("None"),
        )
    }
}

/// Keep only the non-breaking rules without an after-pattern
pub fn select_exceptions(rules: &[RuleRecord]) -> Vec<RuleRecord> {
    rules.iter().filter(|r| r.is_exception()).cloned().collect()
}

/// Parse the English block of the embedded rule set
pub fn embedded_rules() -> Result<Vec<RuleRecord>, RuleSourceError> {
    load_rules(EMBEDDED_SRX)
}

/// Raw text of the embedded rule set
pub fn embedded_source() -> &'static str {
    EMBEDDED_SRX
}
