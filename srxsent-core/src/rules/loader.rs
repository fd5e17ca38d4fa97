//! SRX rule source loader
//!
//! Walks `srx/body/languagerules/languagerule[@languagerulename]/rule` and
//! turns each rule into a [`RuleRecord`]. Only the named language block is
//! read; the header, map rules and other languages are skipped.

use std::fs;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use super::RuleRecord;
use crate::error::RuleSourceError;

/// Language block read when none is named
pub const DEFAULT_LANGUAGE_RULE: &str = "English";

/// Load the English rules from SRX text
pub fn load_rules(source: &str) -> Result<Vec<RuleRecord>, RuleSourceError> {
    load_rules_for(source, DEFAULT_LANGUAGE_RULE)
}

/// Load an SRX file and return the rules of `language_rule`
pub fn load_rules_from_path(
    path: impl AsRef<Path>,
    language_rule: &str,
) -> Result<Vec<RuleRecord>, RuleSourceError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| RuleSourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("loaded rule source {} ({} bytes)", path.display(), source.len());
    load_rules_for(&source, language_rule)
}

/// Which pattern child of a rule is being read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Before,
    After,
}

/// A `<rule>` whose children are still being read
#[derive(Debug, Default)]
struct PendingRule {
    breaking: bool,
    before: Option<String>,
    after: Option<String>,
    field: Option<Field>,
}

impl PendingRule {
    fn push_text(&mut self, text: &str) {
        let slot = match self.field {
            Some(Field::Before) => &mut self.before,
            Some(Field::After) => &mut self.after,
            None => return,
        };
        slot.get_or_insert_with(String::new).push_str(text);
    }

    fn finish(self) -> RuleRecord {
        RuleRecord {
            breaking: self.breaking,
            before_pattern: self.before.filter(|p| !p.is_empty()),
            after_pattern: self.after.filter(|p| !p.is_empty()),
        }
    }
}

/// Load the rules of the language block named `language_rule`
pub fn load_rules_for(
    source: &str,
    language_rule: &str,
) -> Result<Vec<RuleRecord>, RuleSourceError> {
    if source.trim().is_empty() {
        return Err(RuleSourceError::Empty);
    }

    let mut reader = Reader::from_str(source);
    reader.trim_text(false);

    let mut path: Vec<Vec<u8>> = Vec::new();
    let mut found = false;
    let mut in_target = false;
    let mut pending: Option<PendingRule> = None;
    let mut rules = Vec::new();

    loop {
        let event = reader.read_event().map_err(|e| RuleSourceError::Xml {
            position: reader.buffer_position(),
            reason: e.to_string(),
        })?;

        match event {
            Event::Start(e) => {
                let name = e.local_name().as_ref().to_vec();
                check_root(&path, &name)?;
                if is_language_block(&path, &name) && language_name(&e)? == language_rule {
                    found = true;
                    in_target = true;
                } else if in_target {
                    open_rule_element(&e, &name, rules.len(), &mut pending)?;
                }
                path.push(name);
            }
            Event::Empty(e) => {
                let name = e.local_name().as_ref().to_vec();
                check_root(&path, &name)?;
                if is_language_block(&path, &name) && language_name(&e)? == language_rule {
                    // An empty language block has no rules
                    found = true;
                } else if in_target {
                    open_rule_element(&e, &name, rules.len(), &mut pending)?;
                    if name == b"rule" {
                        if let Some(rule) = pending.take() {
                            rules.push(rule.finish());
                        }
                    } else if let Some(rule) = pending.as_mut() {
                        rule.field = None;
                    }
                }
            }
            Event::Text(t) => {
                if let Some(rule) = pending.as_mut() {
                    let text = t.unescape().map_err(|e| RuleSourceError::Xml {
                        position: reader.buffer_position(),
                        reason: e.to_string(),
                    })?;
                    rule.push_text(&text);
                }
            }
            Event::CData(c) => {
                if let Some(rule) = pending.as_mut() {
                    rule.push_text(&String::from_utf8_lossy(&c.into_inner()));
                }
            }
            Event::End(e) => {
                let name = e.local_name().as_ref().to_vec();
                path.pop();
                if in_target {
                    match name.as_slice() {
                        b"rule" => {
                            if let Some(rule) = pending.take() {
                                rules.push(rule.finish());
                            }
                        }
                        b"beforebreak" | b"afterbreak" => {
                            if let Some(rule) = pending.as_mut() {
                                rule.field = None;
                            }
                        }
                        b"languagerule" if path.len() == 3 => in_target = false,
                        _ => {}
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !found {
        return Err(RuleSourceError::MissingLanguageRule(language_rule.to_string()));
    }

    log::debug!(
        "read {} rules from language block '{}'",
        rules.len(),
        language_rule
    );
    Ok(rules)
}

/// Reject documents whose root element is not `srx`
fn check_root(path: &[Vec<u8>], name: &[u8]) -> Result<(), RuleSourceError> {
    if path.is_empty() && name != b"srx" {
        return Err(RuleSourceError::NotSrx(
            String::from_utf8_lossy(name).into_owned(),
        ));
    }
    Ok(())
}

/// `languagerule` directly below `srx/body/languagerules`
fn is_language_block(path: &[Vec<u8>], name: &[u8]) -> bool {
    name == b"languagerule"
        && path.len() == 3
        && path[0] == b"srx"
        && path[1] == b"body"
        && path[2] == b"languagerules"
}

fn language_name(e: &BytesStart<'_>) -> Result<String, RuleSourceError> {
    attribute(e, b"languagerulename").map(Option::unwrap_or_default)
}

fn attribute(e: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>, RuleSourceError> {
    for attr in e.attributes() {
        let attr = attr.map_err(|err| RuleSourceError::Xml {
            position: 0,
            reason: err.to_string(),
        })?;
        if attr.key.local_name().as_ref() == key {
            let value = attr.unescape_value().map_err(|err| RuleSourceError::Xml {
                position: 0,
                reason: err.to_string(),
            })?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// Handle `<rule>`, `<beforebreak>` and `<afterbreak>` inside the target block
fn open_rule_element(
    e: &BytesStart<'_>,
    name: &[u8],
    position: usize,
    pending: &mut Option<PendingRule>,
) -> Result<(), RuleSourceError> {
    match name {
        b"rule" => {
            let value = attribute(e, b"break")?;
            let breaking = match value.as_deref() {
                Some("yes") => true,
                Some("no") => false,
                _ => return Err(RuleSourceError::InvalidBreak { position, value }),
            };
            *pending = Some(PendingRule {
                breaking,
                ..PendingRule::default()
            });
        }
        b"beforebreak" => {
            if let Some(rule) = pending.as_mut() {
                rule.field = Some(Field::Before);
            }
        }
        b"afterbreak" => {
            if let Some(rule) = pending.as_mut() {
                rule.field = Some(Field::After);
            }
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<srx xmlns="http://www.lisa.org/srx20" version="2.0">
  <header segmentsubflows="yes" cascade="yes"/>
  <body>
    <languagerules>
      <languagerule languagerulename="Generic">
        <rule break="yes">
          <beforebreak>[\.\?!]+</beforebreak>
          <afterbreak>\s</afterbreak>
        </rule>
      </languagerule>
      <languagerule languagerulename="English">
        <rule break="no">
          <beforebreak>\b(?:Mr|Dr)\.</beforebreak>
          <afterbreak></afterbreak>
        </rule>
        <rule break="no">
          <beforebreak>\bNo\.</beforebreak>
          <afterbreak>\s\p{N}</afterbreak>
        </rule>
        <rule break="yes">
          <beforebreak>[\.\?!]+</beforebreak>
          <afterbreak>\s+\p{Lu}</afterbreak>
        </rule>
        <rule break="no">
          <beforebreak>\bA&amp;B\.</beforebreak>
        </rule>
      </languagerule>
    </languagerules>
    <maprules>
      <languagemap languagepattern="(?i)en.*" languagerulename="English"/>
    </maprules>
  </body>
</srx>"#;

    #[test]
    fn test_load_english_block() {
        let rules = load_rules(SAMPLE).unwrap();

        assert_eq!(rules.len(), 4);
        assert_eq!(rules[0], RuleRecord::exception(r"\b(?:Mr|Dr)\."));
        assert_eq!(rules[1].after_pattern.as_deref(), Some(r"\s\p{N}"));
        assert!(rules[2].breaking);
        // Entities are unescaped, missing children are None
        assert_eq!(rules[3].before_pattern.as_deref(), Some(r"\bA&B\."));
        assert_eq!(rules[3].after_pattern, None);
    }

    #[test]
    fn test_load_other_block() {
        let rules = load_rules_for(SAMPLE, "Generic").unwrap();
        assert_eq!(rules.len(), 1);
        assert!(rules[0].breaking);
    }

    #[test]
    fn test_missing_language_block() {
        match load_rules_for(SAMPLE, "Polish") {
            Err(RuleSourceError::MissingLanguageRule(name)) => assert_eq!(name, "Polish"),
            other => panic!("Expected MissingLanguageRule, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_source() {
        assert!(matches!(load_rules("  \n"), Err(RuleSourceError::Empty)));
    }

    #[test]
    fn test_wrong_root() {
        let result = load_rules("<rules><rule break=\"no\"/></rules>");
        assert!(matches!(result, Err(RuleSourceError::NotSrx(root)) if root == "rules"));
    }

    #[test]
    fn test_malformed_xml() {
        let source = "<srx><body><languagerules></body></srx>";
        assert!(matches!(
            load_rules(source),
            Err(RuleSourceError::Xml { .. })
        ));
    }

    #[test]
    fn test_invalid_break_attribute() {
        let source = r#"<srx><body><languagerules>
            <languagerule languagerulename="English">
              <rule break="no"><beforebreak>\bDr\.</beforebreak></rule>
              <rule><beforebreak>\bMr\.</beforebreak></rule>
            </languagerule>
        </languagerules></body></srx>"#;

        match load_rules(source) {
            Err(RuleSourceError::InvalidBreak { position, value }) => {
                assert_eq!(position, 1);
                assert_eq!(value, None);
            }
            other => panic!("Expected InvalidBreak, got {other:?}"),
        }
    }

    #[test]
    fn test_cdata_pattern() {
        let source = r#"<srx><body><languagerules>
            <languagerule languagerulename="English">
              <rule break="no"><beforebreak><![CDATA[\b(?:e\.g|i\.e)\.]]></beforebreak><afterbreak/></rule>
            </languagerule>
        </languagerules></body></srx>"#;

        let rules = load_rules(source).unwrap();
        assert_eq!(rules, vec![RuleRecord::exception(r"\b(?:e\.g|i\.e)\.")]);
    }

    #[test]
    fn test_load_from_missing_file() {
        let result = load_rules_from_path("/nonexistent/segment.srx", DEFAULT_LANGUAGE_RULE);
        assert!(matches!(result, Err(RuleSourceError::Io { .. })));
    }
}
