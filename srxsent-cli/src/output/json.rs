//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// JSON formatter - outputs one object per input with its sentences
pub struct JsonFormatter<W: Write> {
    writer: W,
    pretty: bool,
    documents: Vec<DocumentData>,
}

/// Sentences of one input
#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentData {
    /// Input name
    pub source: String,
    /// Sentences in document order
    pub sentences: Vec<SentenceData>,
}

/// Data structure for JSON output
#[derive(Debug, Serialize, Deserialize)]
pub struct SentenceData {
    /// The sentence text
    pub text: String,
    /// Byte offset in the input text
    pub offset: usize,
    /// Length of the sentence in bytes
    pub length: usize,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W, pretty: bool) -> Self {
        Self {
            writer,
            pretty,
            documents: Vec::new(),
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn begin_document(&mut self, source: &str) -> Result<()> {
        self.documents.push(DocumentData {
            source: source.to_string(),
            sentences: Vec::new(),
        });
        Ok(())
    }

    fn format_sentence(&mut self, sentence: &str, offset: usize) -> Result<()> {
        if self.documents.is_empty() {
            self.begin_document("")?;
        }
        if let Some(document) = self.documents.last_mut() {
            document.sentences.push(SentenceData {
                text: sentence.to_string(),
                offset,
                length: sentence.len(),
            });
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &self.documents)?;
        } else {
            serde_json::to_writer(&mut self.writer, &self.documents)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_structure() {
        let mut buffer = Vec::new();
        {
            let mut formatter = JsonFormatter::new(&mut buffer, false);
            formatter.begin_document("a.txt").unwrap();
            formatter.format_sentence("Dr. Smith left.", 0).unwrap();
            formatter.format_sentence("Bye.", 16).unwrap();
            formatter.finish().unwrap();
        }

        let parsed: Vec<DocumentData> = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].source, "a.txt");
        assert_eq!(parsed[0].sentences[1].text, "Bye.");
        assert_eq!(parsed[0].sentences[1].offset, 16);
        assert_eq!(parsed[0].sentences[0].length, 15);
    }
}
