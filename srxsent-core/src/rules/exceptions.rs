//! Compiled no-break exception patterns
//!
//! Patterns compile with `fancy_regex`, so SRX rules written with look-around
//! or backreferences are honored. Patterns without those features run on the
//! plain `regex` engine underneath.

use std::collections::HashSet;
use std::fmt;
use std::io::{BufRead, Write};

use fancy_regex::{Match, Regex, RegexBuilder};

use super::normalize::{has_ascii_letter, normalize, SUPPLEMENTARY_PATTERNS};
use super::RuleRecord;
use crate::error::{PatternCompileError, Result};

/// Upper bound on the compiled size of a single pattern
const PATTERN_SIZE_LIMIT: usize = 1 << 20;

/// Backtracking steps allowed per search before giving up
const BACKTRACK_LIMIT: usize = 100_000;

/// A normalized pattern and its compiled form
#[derive(Clone)]
pub struct ExceptionPattern {
    source: String,
    regex: Regex,
}

impl ExceptionPattern {
    /// Compile an already-normalized pattern
    pub fn compile(pattern: &str) -> std::result::Result<Self, PatternCompileError> {
        let regex = RegexBuilder::new(pattern)
            .delegate_size_limit(PATTERN_SIZE_LIMIT)
            .backtrack_limit(BACKTRACK_LIMIT)
            .build()
            .map_err(|e| PatternCompileError {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// The normalized pattern text
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Leftmost match in `text`.
    ///
    /// A search that exhausts the backtrack limit counts as no match.
    pub fn find<'t>(&self, text: &'t str) -> Option<Match<'t>> {
        match self.regex.find(text) {
            Ok(found) => found,
            Err(err) => {
                log::debug!("pattern {:?} gave up on {:?}: {err}", self.source, text);
                None
            }
        }
    }
}

impl fmt::Debug for ExceptionPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ExceptionPattern").field(&self.source).finish()
    }
}

/// Options for [`compile_exception_set_with`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// Append [`SUPPLEMENTARY_PATTERNS`]
    pub supplementary: bool,
    /// Additional patterns, normalized like rule patterns
    pub extra_patterns: Vec<String>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            supplementary: true,
            extra_patterns: Vec::new(),
        }
    }
}

/// Deduplicated set of compiled exception patterns.
///
/// Built once and shared read-only by every prediction. Patterns keep their
/// insertion order.
#[derive(Debug, Clone, Default)]
pub struct ExceptionSet {
    patterns: Vec<ExceptionPattern>,
    rejected: Vec<PatternCompileError>,
}

impl ExceptionSet {
    /// Compile normalized pattern strings.
    ///
    /// Patterns without an ASCII letter and duplicates are dropped. Patterns
    /// that fail to compile are logged and recorded in [`Self::rejected`].
    pub fn from_patterns<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut set = Self::default();

        for pattern in patterns {
            let pattern = pattern.as_ref();
            if !has_ascii_letter(pattern) || !seen.insert(pattern.to_string()) {
                continue;
            }

            match ExceptionPattern::compile(pattern) {
                Ok(compiled) => set.patterns.push(compiled),
                Err(err) => {
                    log::warn!("{err}; pattern skipped");
                    set.rejected.push(err);
                }
            }
        }

        log::debug!(
            "compiled {} exception patterns ({} rejected)",
            set.patterns.len(),
            set.rejected.len()
        );
        set
    }

    /// Read a pattern list written by [`Self::write_patterns`]
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        Ok(Self::from_patterns(read_pattern_list(reader)?))
    }

    /// Write one normalized pattern per line
    pub fn write_patterns<W: Write>(&self, mut writer: W) -> Result<()> {
        for pattern in &self.patterns {
            writeln!(writer, "{}", pattern.as_str())?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Iterate over the compiled patterns
    pub fn iter(&self) -> impl Iterator<Item = &ExceptionPattern> {
        self.patterns.iter()
    }

    /// Whether a pattern with this exact text was compiled
    pub fn contains(&self, pattern: &str) -> bool {
        self.patterns.iter().any(|p| p.as_str() == pattern)
    }

    /// Patterns that failed to compile
    pub fn rejected(&self) -> &[PatternCompileError] {
        &self.rejected
    }

    /// Number of compiled patterns
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether no pattern compiled
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Patterns of a list written by [`ExceptionSet::write_patterns`], skipping
/// blank lines and `#` comments
pub fn read_pattern_list<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut patterns = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        patterns.push(line);
    }
    Ok(patterns)
}

/// Compile the exception rules of `rules` with the supplementary patterns
pub fn compile_exception_set(rules: &[RuleRecord]) -> ExceptionSet {
    compile_exception_set_with(rules, &CompileOptions::default())
}

/// Compile the exception rules of `rules`.
///
/// Rules that break or carry an after-pattern never contribute, whatever
/// their before-pattern.
pub fn compile_exception_set_with(rules: &[RuleRecord], options: &CompileOptions) -> ExceptionSet {
    let mut patterns: Vec<String> = rules
        .iter()
        .filter(|rule| rule.is_exception())
        .filter_map(|rule| rule.before_pattern.as_deref())
        .map(normalize)
        .collect();

    if options.supplementary {
        patterns.extend(SUPPLEMENTARY_PATTERNS.iter().map(|p| p.to_string()));
    }
    patterns.extend(options.extra_patterns.iter().map(|p| normalize(p)));

    ExceptionSet::from_patterns(patterns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_normalizes_and_supplements() {
        let rules = vec![RuleRecord::exception(r"\b\p{Lu}\.")];
        let set = compile_exception_set(&rules);

        assert!(set.contains(r"\b[ABCDEFGHIJKLMNOPQRSTUVWXYZ]\."));
        assert!(set.contains(r"[iI]bid\."));
        assert_eq!(set.len(), 1 + SUPPLEMENTARY_PATTERNS.len());
    }

    #[test]
    fn test_uppercase_class_matches_only_uppercase() {
        let set = compile_exception_set_with(
            &[RuleRecord::exception(r"^\p{Lu}$")],
            &CompileOptions {
                supplementary: false,
                extra_patterns: Vec::new(),
            },
        );
        let pattern = set.iter().next().unwrap();

        assert!(pattern.find("Q").is_some());
        assert!(pattern.find("q").is_none());
        assert!(pattern.find("7").is_none());
    }

    #[test]
    fn test_breaking_and_after_rules_excluded() {
        let rules = vec![
            RuleRecord::new(true, Some(r"\bDr\."), None::<String>),
            RuleRecord::new(false, Some(r"\bMr\."), Some(r"\s")),
        ];
        let set = compile_exception_set_with(
            &rules,
            &CompileOptions {
                supplementary: false,
                extra_patterns: Vec::new(),
            },
        );

        assert!(set.is_empty());
        assert!(!set.contains(r"\bDr\."));
    }

    #[test]
    fn test_duplicates_and_letterless_dropped() {
        let set = ExceptionSet::from_patterns([r"\bDr\.", r"\bDr\.", r"\.\.\.", r"[aA]l\.,?"]);
        assert_eq!(set.len(), 2);
        assert!(set.rejected().is_empty());
    }

    #[test]
    fn test_invalid_pattern_skipped() {
        let set = ExceptionSet::from_patterns([r"\bDr\.", r"\bMr\.(", r"\bvs\.", r"[abc"]);

        assert_eq!(set.len(), 2);
        assert_eq!(set.rejected().len(), 2);
        assert_eq!(set.rejected()[0].pattern, r"\bMr\.(");
        assert_eq!(set.rejected()[1].pattern, "[abc");
    }

    #[test]
    fn test_look_around_and_backreferences_compile() {
        let set = ExceptionSet::from_patterns([r"(?<=Mr)\.", r"\bDr\.(?=\s)", r"\b(\w)\1\."]);

        assert_eq!(set.len(), 3);
        assert!(set.rejected().is_empty());

        let mut patterns = set.iter();
        assert_eq!(patterns.next().unwrap().find("Mr. X").unwrap().start(), 2);
        assert!(patterns.next().unwrap().find("Dr.X").is_none());
        assert!(patterns.next().unwrap().find("see pp. 4").is_some());
    }

    #[test]
    fn test_normalized_look_behind_rule_compiles() {
        let set = compile_exception_set_with(
            &[RuleRecord::exception(r"(?<![\p{L}])Dr\.")],
            &CompileOptions {
                supplementary: false,
                extra_patterns: Vec::new(),
            },
        );

        assert_eq!(set.len(), 1);
        assert!(set.rejected().is_empty());
        let pattern = set.iter().next().unwrap();
        assert_eq!(pattern.find("Dr.Smith").unwrap().start(), 0);
        assert!(pattern.find("ADr.Smith").is_none());
    }

    #[test]
    fn test_extra_patterns_are_normalized() {
        let options = CompileOptions {
            supplementary: false,
            extra_patterns: vec![r"\bDept\.\u00A0".to_string()],
        };
        let set = compile_exception_set_with(&[], &options);
        assert!(set.contains(r"\bDept\.\s"));
    }

    #[test]
    fn test_pattern_list_round_trip() {
        let set = ExceptionSet::from_patterns([r"\bDr\.", r"[cC]it\."]);

        let mut buffer = Vec::new();
        set.write_patterns(&mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer.clone()).unwrap(), "\\bDr\\.\n[cC]it\\.\n");

        let with_comments = format!("# exported\n\n{}", String::from_utf8(buffer).unwrap());
        let reloaded = ExceptionSet::from_reader(with_comments.as_bytes()).unwrap();
        assert_eq!(reloaded.len(), 2);
        assert!(reloaded.contains(r"[cC]it\."));
    }
}
