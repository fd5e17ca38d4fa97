//! Error types for rule loading, pattern compilation and configuration

use std::path::PathBuf;
use thiserror::Error;

/// Failure to obtain a usable rule set from an SRX source.
///
/// Fatal to initialization: without a rule set no exception patterns can be
/// built.
#[derive(Debug, Error)]
pub enum RuleSourceError {
    /// The source contained no data
    #[error("rule source is empty")]
    Empty,

    /// The rule file could not be read
    #[error("failed to read rule source {path}: {source}")]
    Io {
        /// Path of the rule file
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The source is not well-formed XML
    #[error("malformed rule source at byte {position}: {reason}")]
    Xml {
        /// Reader position when the error was detected
        position: usize,
        /// Parser message
        reason: String,
    },

    /// The document root is not an `<srx>` element
    #[error("rule source root is <{0}>, expected <srx>")]
    NotSrx(String),

    /// No `languagerule` with the requested name below `srx/body/languagerules`
    #[error("no language rule named '{0}' under srx/body/languagerules")]
    MissingLanguageRule(String),

    /// A `rule` element lacks a valid `break` attribute
    #[error("rule #{position} has invalid break attribute {value:?} (expected \"yes\" or \"no\")")]
    InvalidBreak {
        /// Zero-based position of the rule inside its language block
        position: usize,
        /// The attribute value, if present
        value: Option<String>,
    },
}

/// A normalized exception pattern that is not a valid regular expression.
///
/// Never fatal: the offending pattern is logged and left out of the set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to compile exception pattern {pattern:?}: {reason}")]
pub struct PatternCompileError {
    /// The normalized pattern text
    pub pattern: String,
    /// Compiler message
    pub reason: String,
}

/// Crate-level error
#[derive(Debug, Error)]
pub enum Error {
    /// Rule source could not be loaded
    #[error(transparent)]
    RuleSource(#[from] RuleSourceError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Annotation array does not match the token stream
    #[error("annotation has {actual} flags but the document has {expected} tokens")]
    AnnotationLength {
        /// Number of tokens in the document
        expected: usize,
        /// Number of flags supplied
        actual: usize,
    },

    /// I/O failure while reading or writing pattern lists
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for srxsent operations
pub type Result<T> = std::result::Result<T, Error>;
