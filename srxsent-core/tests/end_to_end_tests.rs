//! End-to-end tests from rule source to sentence annotation

use std::sync::Arc;

use srxsent_core::{
    compile_exception_set, compile_exception_set_with, load_rules, BoundaryPredictor,
    CompileOptions, Config, Document, PipelineComponent, PunctTable, Punctuation, RuleRecord,
    Sentencizer, Token,
};

/// Build a document from text/whitespace pairs
fn doc(pairs: &[(&str, &str)]) -> Document {
    Document::from_tokens(
        pairs
            .iter()
            .map(|(text, ws)| Token::new(0, *text).with_whitespace(*ws))
            .collect(),
    )
}

fn embedded() -> Sentencizer {
    Sentencizer::with_embedded_rules(&Config::default()).unwrap()
}

#[test]
fn test_title_abbreviation_keeps_sentence_together() {
    let doc = doc(&[
        ("Dr", ""),
        (".", " "),
        ("Smith", " "),
        ("arrived", " "),
        ("today", ""),
        (".", " "),
        ("He", " "),
        ("left", ""),
        (".", ""),
    ]);

    let doc = embedded().process(doc);
    let sentences = doc.sentences();

    assert_eq!(sentences.len(), 2);
    assert_eq!(doc.sentence_text(&sentences[0]), "Dr. Smith arrived today.");
    assert_eq!(doc.sentence_text(&sentences[1]), "He left.");
}

#[test]
fn test_citation_forms() {
    let doc = doc(&[
        ("As", " "),
        ("shown", " "),
        ("in", " "),
        ("Fig", ""),
        (".", " "),
        ("2", " "),
        ("and", " "),
        ("by", " "),
        ("Smith", " "),
        ("et", " "),
        ("al", ""),
        (".", " "),
        ("in", " "),
        ("their", " "),
        ("work", ""),
        (".", ""),
    ]);

    let doc = embedded().process(doc);
    assert_eq!(doc.sentences().len(), 1);
}

#[test]
fn test_paragraph_break_starts_sentence() {
    let doc = doc(&[
        ("See", " "),
        ("Dr", ""),
        (".", ""),
        ("\n\n", ""),
        ("Title", " "),
        ("here", ""),
    ]);

    let doc = embedded().process(doc);
    let starts = doc.sentence_starts().unwrap();

    assert_eq!(starts, &[true, false, false, true, false, false]);
}

#[test]
fn test_without_exceptions_every_period_splits() {
    let predictor = BoundaryPredictor::new(Arc::default(), PunctTable::default());
    let doc = Document::from_words(["Dr", ".", "Smith", "arrived", "today", "."]);

    assert_eq!(
        predictor.predict(doc.tokens()),
        vec![true, false, true, false, false, false]
    );
}

#[test]
fn test_srx_source_to_predictions() {
    let srx = r#"<?xml version="1.0" encoding="UTF-8"?>
<srx version="2.0">
  <header/>
  <body>
    <languagerules>
      <languagerule languagerulename="English">
        <rule break="no"><beforebreak>\bProf\.</beforebreak></rule>
        <rule break="no"><beforebreak>\bMr\.</beforebreak><afterbreak>\s</afterbreak></rule>
        <rule break="yes"><beforebreak>\bDr\.</beforebreak></rule>
      </languagerule>
    </languagerules>
  </body>
</srx>"#;

    let rules = load_rules(srx).unwrap();
    assert_eq!(rules.len(), 3);

    let set = compile_exception_set_with(
        &rules,
        &CompileOptions {
            supplementary: false,
            extra_patterns: Vec::new(),
        },
    );
    assert_eq!(set.len(), 1);
    assert!(set.contains(r"\bProf\."));

    let predictor = BoundaryPredictor::new(Arc::new(set), PunctTable::default());
    let words = ["Prof", ".", "Ada", "met", "Mr", ".", "Ng", "and", "Dr", ".", "Li", "here", "."];
    let doc = Document::from_words(words);
    let starts = predictor.predict(doc.tokens());

    assert!(!starts[2], "Prof. is an exception");
    assert!(starts[6], "rules with after-patterns are ignored");
    assert!(starts[10], "breaking rules are ignored");
}

#[test]
fn test_rule_records_from_embedded_source() {
    let rules = srxsent_core::rules::embedded_rules().unwrap();
    let exceptions = srxsent_core::rules::select_exceptions(&rules);

    assert!(exceptions.len() < rules.len());
    assert!(exceptions.iter().all(RuleRecord::is_exception));

    let set = compile_exception_set(&rules);
    assert!(set.rejected().is_empty());
    assert!(set.contains(r"\b[ABCDEFGHIJKLMNOPQRSTUVWXYZ]\."));
    assert!(!set.contains(r"\.\.\."));
}

#[test]
fn test_multilingual_configuration() {
    let config = Config::builder()
        .punctuation(Punctuation::Multilingual)
        .build()
        .unwrap();
    let sentencizer = Sentencizer::with_embedded_rules(&config).unwrap();

    let doc = Document::from_words(["今日は", "晴れ", "。", "明日は", "雨", "。"]);
    let doc = sentencizer.process(doc);

    assert_eq!(doc.sentences().len(), 2);
}

#[test]
fn test_generic_language_block() {
    let config = Config::builder().language_rule("Generic").build().unwrap();
    let sentencizer = Sentencizer::with_embedded_rules(&config).unwrap();

    // Generic block has no title abbreviations
    let doc = Document::from_words(["Dr", ".", "Smith", "arrived", "today", "."]);
    let doc = sentencizer.process(doc);

    assert_eq!(doc.sentences().len(), 2);
}
