//! Static lookup tables

pub mod punctuation;

pub use punctuation::{PunctTable, DEFAULT_PUNCT_CHARS, SENTENCE_FINAL_CHARS};
