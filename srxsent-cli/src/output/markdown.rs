//! Markdown output formatter

use super::OutputFormatter;
use anyhow::Result;
use std::io::Write;

/// Markdown formatter - outputs a numbered list of sentences per input
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    sentence_count: usize,
    document_count: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            sentence_count: 0,
            document_count: 0,
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for MarkdownFormatter<W> {
    fn begin_document(&mut self, source: &str) -> Result<()> {
        if self.document_count > 0 {
            writeln!(self.writer)?;
        }
        self.document_count += 1;
        writeln!(self.writer, "## {source}")?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn format_sentence(&mut self, sentence: &str, _offset: usize) -> Result<()> {
        self.sentence_count += 1;
        let line = sentence.split_whitespace().collect::<Vec<_>>().join(" ");
        writeln!(self.writer, "{}. {}", self.sentence_count, line)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "---")?;
        writeln!(self.writer, "*Total sentences: {}*", self.sentence_count)?;
        self.writer.flush()?;
        Ok(())
    }
}
