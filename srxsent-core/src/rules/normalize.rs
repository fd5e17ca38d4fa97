//! Rewrites SRX before-patterns into the ASCII dialect the matcher compiles
//!
//! SRX rule files use Unicode general-category escapes and inline flags.
//! These are replaced by literal substitution, in a fixed order, with ASCII
//! character classes.

const ASCII_UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const ASCII_LOWER: &str = "abcdefghijklmnopqrstuvwxyz";

/// Hand-written exceptions for citation and abbreviation forms.
///
/// Multi-token forms are also listed split up ("et." and "al.") because the
/// exception window always starts at the token before the mark.
pub const SUPPLEMENTARY_PATTERNS: &[&str] = &[
    r"[eE]t\.? [aA]l[\.,]?",
    r"[fF]ig\.?|f+\.",
    r"[iI]bid\.",
    r"[cC]it\.",
    r"[eE]sp\.,?",
    r"[bB]tw\.,?",
    r"[eE]t\.,?",
    r"[aA]l\.,?",
];

/// Replace the portable escapes of an SRX before-pattern.
///
/// Order matters: `\p{Lu}` and `\p{Ll}` must be rewritten before `\p{L}`,
/// and no replacement produces text an earlier one would match.
pub fn normalize(before_pattern: &str) -> String {
    let upper = format!("[{ASCII_UPPER}]");
    let lower = format!("[{ASCII_LOWER}]");
    let letter = format!("[{ASCII_UPPER}{ASCII_LOWER}]");

    before_pattern
        .replace(r"\p{Lu}", &upper)
        .replace(r"\p{Ll}", &lower)
        .replace("(?iu)", "")
        .replace(r"\p{L}", &letter)
        .replace(r"\p{N}", r"\d")
        .replace(r"\u00A0", r"\s")
        .replace(r"\p{Ps}", r"[\({\[]")
        .replace(r"\p{Pe}", r"[\)\}\]]")
}

/// Whether the pattern text contains an ASCII letter anywhere.
///
/// Patterns without one are too broad to be exceptions and are dropped.
pub fn has_ascii_letter(pattern: &str) -> bool {
    pattern.chars().any(|c| c.is_ascii_alphabetic())
}
