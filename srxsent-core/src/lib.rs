//! Rule-based sentence boundary detection driven by SRX exception rules
//!
//! The crate reads the no-break rules of an SRX segmentation rule file,
//! rewrites them into an ASCII regex dialect and uses them to decide, for a
//! pre-tokenized text, which tokens start a sentence.
//!
//! # Architecture
//!
//! - **rules**: SRX loading, pattern normalization and the compiled exception set
//! - **predictor**: the single-pass boundary scan
//! - **pipeline**: a document-level component for host NLP pipelines
//!
//! # Example
//!
//! ```rust
//! use srxsent_core::{Config, Document, PipelineComponent, Sentencizer};
//!
//! let sentencizer = Sentencizer::with_embedded_rules(&Config::default()).unwrap();
//!
//! let doc = Document::from_words(["Dr", ".", "Smith", "arrived", "today", ".", "He", "left", "."]);
//! let doc = sentencizer.process(doc);
//!
//! assert_eq!(doc.sentences().len(), 2);
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod pipeline;
pub mod predictor;
pub mod rules;
pub mod tables;

pub use config::{Config, ConfigBuilder, Punctuation};
pub use document::{Document, Sentence, Token};
pub use error::{Error, PatternCompileError, Result, RuleSourceError};
pub use pipeline::{PipelineComponent, Sentencizer};
pub use predictor::BoundaryPredictor;
pub use rules::{
    compile_exception_set, compile_exception_set_with, load_rules, load_rules_for,
    load_rules_from_path, normalize, CompileOptions, ExceptionSet, RuleRecord,
};
pub use tables::PunctTable;
