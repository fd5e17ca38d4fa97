//! Reading input text

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use super::InputSource;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Reader for UTF-8 input
pub struct FileReader;

impl FileReader {
    /// Read a file as UTF-8 text
    pub fn read_text(path: &Path) -> Result<String> {
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
        decode(bytes).with_context(|| format!("File is not valid UTF-8: {}", path.display()))
    }

    /// Read all of standard input
    pub fn read_stdin() -> Result<String> {
        let mut bytes = Vec::new();
        io::stdin()
            .lock()
            .read_to_end(&mut bytes)
            .context("Failed to read standard input")?;
        decode(bytes).context("Standard input is not valid UTF-8")
    }

    /// Read any input source
    pub fn read_source(source: &InputSource) -> Result<String> {
        match source {
            InputSource::Stdin => Self::read_stdin(),
            InputSource::File(path) => Self::read_text(path),
        }
    }
}

/// Decode UTF-8, dropping a leading byte-order mark
fn decode(mut bytes: Vec<u8>) -> Result<String> {
    if bytes.starts_with(UTF8_BOM) {
        bytes.drain(..UTF8_BOM.len());
    }
    Ok(String::from_utf8(bytes)?)
}
