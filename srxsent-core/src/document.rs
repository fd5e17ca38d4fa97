//! Token stream and sentence annotation

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A token supplied by an external tokenizer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Token text
    pub text: String,
    /// Whitespace following the token in the source text
    #[serde(default)]
    pub whitespace: String,
    /// Position within the document, starting at 0
    pub index: usize,
}

impl Token {
    /// Create a token without trailing whitespace
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            whitespace: String::new(),
            index,
        }
    }

    /// Set the trailing whitespace
    pub fn with_whitespace(mut self, whitespace: impl Into<String>) -> Self {
        self.whitespace = whitespace.into();
        self
    }
}

/// Concatenate token text, keeping the whitespace between tokens but not
/// after the last one.
pub(crate) fn join_tokens(tokens: &[Token]) -> String {
    let mut text = String::new();
    if let Some((last, rest)) = tokens.split_last() {
        for token in rest {
            text.push_str(&token.text);
            text.push_str(&token.whitespace);
        }
        text.push_str(&last.text);
    }
    text
}

/// A sentence as a half-open range of token indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// First token
    pub start: usize,
    /// One past the last token
    pub end: usize,
}

impl Sentence {
    /// Number of tokens in the sentence
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the range covers no tokens
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// An ordered token stream with an optional sentence-start annotation.
///
/// Deserialization goes through [`Document::from_tokens`], so indices are
/// always contiguous and an annotation always has one flag per token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDocument")]
pub struct Document {
    tokens: Vec<Token>,
    sentence_starts: Option<Vec<bool>>,
}

/// Serialized form of [`Document`], checked on conversion
#[derive(Deserialize)]
struct RawDocument {
    tokens: Vec<Token>,
    #[serde(default)]
    sentence_starts: Option<Vec<bool>>,
}

impl TryFrom<RawDocument> for Document {
    type Error = Error;

    fn try_from(raw: RawDocument) -> Result<Self> {
        let mut doc = Document::from_tokens(raw.tokens);
        if let Some(starts) = raw.sentence_starts {
            doc.set_sentence_starts(starts)?;
        }
        Ok(doc)
    }
}

impl Document {
    /// Create an unannotated document.
    ///
    /// Token indices are reassigned to their positions so they are contiguous
    /// from 0.
    pub fn from_tokens(mut tokens: Vec<Token>) -> Self {
        for (i, token) in tokens.iter_mut().enumerate() {
            token.index = i;
        }
        Self {
            tokens,
            sentence_starts: None,
        }
    }

    /// Create a document from bare token texts with no whitespace
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens = words
            .into_iter()
            .enumerate()
            .map(|(i, word)| Token::new(i, word))
            .collect();
        Self::from_tokens(tokens)
    }

    /// The token stream
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Number of tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the document has no tokens
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Sentence-start flags, one per token, if the document is annotated
    pub fn sentence_starts(&self) -> Option<&[bool]> {
        self.sentence_starts.as_deref()
    }

    /// Whether sentence starts have been set
    pub fn is_annotated(&self) -> bool {
        self.sentence_starts.is_some()
    }

    /// Set the sentence-start flags; must have one flag per token
    pub fn set_sentence_starts(&mut self, starts: Vec<bool>) -> Result<()> {
        if starts.len() != self.tokens.len() {
            return Err(Error::AnnotationLength {
                expected: self.tokens.len(),
                actual: starts.len(),
            });
        }
        self.sentence_starts = Some(starts);
        Ok(())
    }

    /// Full text, including all whitespace
    pub fn text(&self) -> String {
        self.tokens
            .iter()
            .flat_map(|t| [t.text.as_str(), t.whitespace.as_str()])
            .collect()
    }

    /// Byte offset of token `index` in [`Self::text`]
    pub fn offset_of(&self, index: usize) -> usize {
        self.tokens
            .iter()
            .take(index)
            .map(|t| t.text.len() + t.whitespace.len())
            .sum()
    }

    /// Sentences in document order.
    ///
    /// An unannotated, non-empty document is a single sentence.
    pub fn sentences(&self) -> Vec<Sentence> {
        let len = self.tokens.len();
        let starts: Vec<usize> = match &self.sentence_starts {
            Some(flags) => flags
                .iter()
                .enumerate()
                .filter(|&(i, &flag)| flag || i == 0)
                .map(|(i, _)| i)
                .collect(),
            None if len > 0 => vec![0],
            None => Vec::new(),
        };

        starts
            .iter()
            .enumerate()
            .map(|(n, &start)| Sentence {
                start,
                end: starts.get(n + 1).copied().unwrap_or(len),
            })
            .collect()
    }

    /// Text of a sentence without its trailing whitespace
    pub fn sentence_text(&self, sentence: &Sentence) -> String {
        join_tokens(&self.tokens[sentence.start..sentence.end])
    }
}
