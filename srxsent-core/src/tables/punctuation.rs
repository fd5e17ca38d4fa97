//! Sentence-final punctuation lookup
//!
//! A token is treated as terminal punctuation when its whole text is a single
//! character from the table. Lookup is O(1) with an ASCII fast path.

use std::collections::HashSet;

/// Sentence-final characters across scripts.
pub const SENTENCE_FINAL_CHARS: &[char] = &[
    '!', '.', '?', '։', '؟', '۔', '܀', '܁', '܂', '߹', '।', '॥', '၊', '။', '።', '፧',
    '፨', '᙮', '᜵', '᜶', '᠃', '᠉', '᥄', '᥅', '᪨', '᪩', '᪪', '᪫', '᭚', '᭛', '᭞', '᭟',
    '᰻', '᰼', '᱾', '᱿', '‼', '‽', '⁇', '⁈', '⁉', '⸮', '⸼', '꓿', '꘎', '꘏', '꛳', '꛷',
    '꡶', '꡷', '꣎', '꣏', '꤯', '꧈', '꧉', '꩝', '꩞', '꩟', '꫰', '꫱', '꯫', '﹒', '﹖', '﹗',
    '！', '．', '？', '𐩖', '𐩗', '𑁇', '𑁈', '𑂾', '𑂿', '𑃀', '𑃁', '𑅁', '𑅂', '𑅃', '𑇅', '𑇆',
    '𑇍', '𑇞', '𑇟', '𑈸', '𑈹', '𑈻', '𑈼', '𑊩', '𑑋', '𑑌', '𑗂', '𑗃', '𑗉', '𑗊', '𑗋', '𑗌',
    '𑗍', '𑗎', '𑗏', '𑗐', '𑗑', '𑗒', '𑗓', '𑗔', '𑗕', '𑗖', '𑗗', '𑙁', '𑙂', '𑜼', '𑜽', '𑜾',
    '𑩂', '𑩃', '𑪛', '𑪜', '𑱁', '𑱂', '𖩮', '𖩯', '𖫵', '𖬷', '𖬸', '𖭄', '𛲟', '𝪈', '｡', '。',
];

/// Fallback set used when no explicit punctuation is supplied.
pub const DEFAULT_PUNCT_CHARS: &[char] = &['.', '!', '?'];

/// Fast punctuation lookup table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PunctTable {
    /// ASCII lookup table for chars 0-127
    ascii_table: [bool; 128],
    /// HashSet for non-ASCII punctuation
    non_ascii: HashSet<char>,
}

impl PunctTable {
    /// Create from a list of punctuation characters
    pub fn new<I>(chars: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        let mut ascii_table = [false; 128];
        let mut non_ascii = HashSet::new();

        for ch in chars {
            if ch.is_ascii() {
                ascii_table[ch as usize] = true;
            } else {
                non_ascii.insert(ch);
            }
        }

        Self {
            ascii_table,
            non_ascii,
        }
    }

    /// The full multilingual table
    pub fn multilingual() -> Self {
        Self::new(SENTENCE_FINAL_CHARS.iter().copied())
    }

    /// Check if a character is sentence-final - hot path
    #[inline]
    pub fn contains(&self, ch: char) -> bool {
        if ch.is_ascii() {
            self.ascii_table[ch as usize]
        } else {
            self.non_ascii.contains(&ch)
        }
    }

    /// Check if a token's text is exactly one punctuation character
    #[inline]
    pub fn contains_token(&self, text: &str) -> bool {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => self.contains(ch),
            _ => false,
        }
    }

    /// Number of characters in the table
    pub fn len(&self) -> usize {
        self.ascii_table.iter().filter(|&&set| set).count() + self.non_ascii.len()
    }

    /// Whether the table has no characters
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for PunctTable {
    fn default() -> Self {
        Self::new(DEFAULT_PUNCT_CHARS.iter().copied())
    }
}
