//! Whitespace and punctuation tokenizer
//!
//! Produces the token stream the sentencizer consumes. Tokenization is
//! lossless: joining every token's text and trailing whitespace gives back
//! the input. A single space after a token is stored as its trailing
//! whitespace; other whitespace containing a newline becomes a token of its
//! own so paragraph breaks stay visible to the predictor.

use srxsent_core::tables::SENTENCE_FINAL_CHARS;
use srxsent_core::{Document, Token};

const LEADING: &[char] = &['(', '[', '{', '"', '\'', '“', '‘', '«'];
const TRAILING: &[char] = &[
    '.', ',', '!', '?', ';', ':', ')', ']', '}', '"', '\'', '”', '’', '»',
];

/// Tokenize `text` into an unannotated document
pub fn tokenize(text: &str) -> Document {
    let mut tokens: Vec<Token> = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        let ws_len = rest
            .find(|c: char| !c.is_whitespace())
            .unwrap_or(rest.len());

        if ws_len > 0 {
            push_whitespace(&mut tokens, &rest[..ws_len]);
            rest = &rest[ws_len..];
            continue;
        }

        let word_len = rest.find(char::is_whitespace).unwrap_or(rest.len());
        for piece in split_final_marks(&rest[..word_len]) {
            split_affixes(&mut tokens, piece);
        }
        rest = &rest[word_len..];
    }

    Document::from_tokens(tokens)
}

/// Attach a whitespace run to the previous token or make it a token
fn push_whitespace(tokens: &mut Vec<Token>, run: &str) {
    let Some(last) = tokens.last_mut().filter(|t| t.whitespace.is_empty()) else {
        tokens.push(Token::new(0, run));
        return;
    };

    let remainder = match run.strip_prefix(' ') {
        Some(remainder) => {
            last.whitespace.push(' ');
            remainder
        }
        None => run,
    };

    if remainder.is_empty() {
        return;
    }
    if remainder.contains('\n') {
        tokens.push(Token::new(0, remainder));
    } else {
        last.whitespace.push_str(remainder);
    }
}

/// Split a word at non-ASCII sentence-final marks, keeping each mark
fn split_final_marks(word: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;

    for (i, c) in word.char_indices() {
        if !c.is_ascii() && SENTENCE_FINAL_CHARS.contains(&c) {
            if start < i {
                pieces.push(&word[start..i]);
            }
            let end = i + c.len_utf8();
            pieces.push(&word[i..end]);
            start = end;
        }
    }
    if start < word.len() {
        pieces.push(&word[start..]);
    }
    pieces
}

/// Push `word` as tokens, splitting off leading and trailing punctuation
fn split_affixes(tokens: &mut Vec<Token>, word: &str) {
    let mut core = word;

    while let Some(c) = core.chars().next().filter(|c| LEADING.contains(c)) {
        tokens.push(Token::new(0, c.to_string()));
        core = &core[c.len_utf8()..];
    }

    let mut trailing = Vec::new();
    while let Some(c) = core
        .chars()
        .next_back()
        .filter(|c| TRAILING.contains(c) || SENTENCE_FINAL_CHARS.contains(c))
    {
        trailing.push(c);
        core = &core[..core.len() - c.len_utf8()];
    }

    if !core.is_empty() {
        tokens.push(Token::new(0, core));
    }
    tokens.extend(trailing.into_iter().rev().map(|c| Token::new(0, c.to_string())));
}
