//! Output formatting module

use anyhow::Result;

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Start the sentences of a new input
    fn begin_document(&mut self, source: &str) -> Result<()>;

    /// Format and output a single sentence; `offset` is its byte offset in
    /// the input text
    fn format_sentence(&mut self, sentence: &str, offset: usize) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;
