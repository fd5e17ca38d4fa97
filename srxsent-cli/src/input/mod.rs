//! Input handling module

pub mod file_reader;
pub mod glob_resolver;

use std::fmt;
use std::path::PathBuf;

pub use file_reader::FileReader;
pub use glob_resolver::resolve_patterns;

/// Where a document is read from
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum InputSource {
    /// Standard input, named `-` on the command line
    Stdin,
    /// A file on disk
    File(PathBuf),
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Stdin => write!(f, "<stdin>"),
            InputSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}
