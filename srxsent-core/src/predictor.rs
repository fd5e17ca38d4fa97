//! Exception-aware sentence boundary prediction
//!
//! A single left-to-right scan over the token stream. A boundary is never
//! placed on the punctuation mark itself: it is placed on the first token of
//! the following sentence, so the scan keeps the start of the sentence being
//! built and closes it when the next one begins.
//!
//! A punctuation mark matched by an exception pattern exempts the token right
//! after it from starting a sentence. A newline token after a period always
//! starts one.

use std::sync::Arc;

use crate::document::{join_tokens, Token};
use crate::rules::ExceptionSet;
use crate::tables::PunctTable;

/// Tokens examined after the punctuation mark
const LOOKAHEAD: usize = 2;

/// Scan state carried across tokens
#[derive(Debug, Default)]
struct ScanState {
    /// First token of the sentence being built
    start: usize,
    /// The previous token was terminal punctuation
    seen_terminal: bool,
    /// Token exempted by the last matched exception
    marked: Option<usize>,
}

/// Predicts sentence starts for a token stream
#[derive(Debug, Clone)]
pub struct BoundaryPredictor {
    exceptions: Arc<ExceptionSet>,
    punct: PunctTable,
}

impl BoundaryPredictor {
    /// Create a predictor over a shared exception set
    pub fn new(exceptions: Arc<ExceptionSet>, punct: PunctTable) -> Self {
        Self { exceptions, punct }
    }

    /// The exception patterns in use
    pub fn exceptions(&self) -> &ExceptionSet {
        &self.exceptions
    }

    /// The punctuation table in use
    pub fn punctuation(&self) -> &PunctTable {
        &self.punct
    }

    /// Flag, for every token, whether it starts a sentence.
    ///
    /// The result has one entry per token; the first token always starts a
    /// sentence. Tokens are addressed by position in `tokens`; their
    /// `index` fields are not consulted.
    pub fn predict(&self, tokens: &[Token]) -> Vec<bool> {
        let mut starts = vec![false; tokens.len()];
        if tokens.is_empty() {
            return starts;
        }
        starts[0] = true;

        let mut state = ScanState::default();
        for (i, token) in tokens.iter().enumerate() {
            let is_punct = self.punct.contains_token(&token.text);
            let mut in_exception = false;

            if is_punct
                && i > 0
                && i + LOOKAHEAD + 1 < tokens.len()
                && self.is_in_exceptions(tokens, i)
            {
                in_exception = true;
                state.marked = Some(i + 1);
            }

            let continues_after_terminal = state.seen_terminal
                && !is_punct
                && !in_exception
                && state.marked != Some(i);

            if continues_after_terminal || is_new_paragraph(tokens, i) {
                starts[state.start] = true;
                state.start = i;
                state.seen_terminal = false;
            } else {
                state.seen_terminal = is_punct;
            }
        }

        if state.start < tokens.len() {
            starts[state.start] = true;
        }
        starts
    }

    /// Whether the punctuation at `i` belongs to an exception.
    ///
    /// The window runs from the token before the mark through two tokens
    /// after it. Match offsets are counted from the window's first token; a
    /// match only counts when that count stays below `i`, i.e. when it is
    /// anchored on the token before the mark.
    fn is_in_exceptions(&self, tokens: &[Token], i: usize) -> bool {
        let window_start = i - 1;
        let text = join_tokens(&tokens[window_start..=i + LOOKAHEAD]);

        self.exceptions.iter().any(|pattern| match pattern.find(&text) {
            Some(found) if window_start + found.start() < i => {
                log::trace!(
                    "exception {:?} matched {:?} in window {:?}",
                    pattern.as_str(),
                    found.as_str(),
                    text
                );
                true
            }
            _ => false,
        })
    }
}

/// A newline token directly after a period
fn is_new_paragraph(tokens: &[Token], i: usize) -> bool {
    i > 0 && tokens[i].text.contains('\n') && tokens[i - 1].text == "."
}
