//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use std::io::Write;

/// Plain text formatter - outputs one sentence per line
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn begin_document(&mut self, _source: &str) -> Result<()> {
        Ok(())
    }

    fn format_sentence(&mut self, sentence: &str, _offset: usize) -> Result<()> {
        // Internal line breaks would split a sentence over several lines
        let line = sentence.split_whitespace().collect::<Vec<_>>().join(" ");
        writeln!(self.writer, "{line}")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
