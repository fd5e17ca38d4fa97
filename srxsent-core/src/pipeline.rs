//! Pipeline component wrapping the boundary predictor

use std::sync::Arc;

use crate::config::Config;
use crate::document::Document;
use crate::error::Result;
use crate::predictor::BoundaryPredictor;
use crate::rules::{self, compile_exception_set_with, load_rules_for, ExceptionSet};

/// A per-document step of a host NLP pipeline
pub trait PipelineComponent: Send + Sync {
    /// Component name used by the host for registration
    fn name(&self) -> &str;

    /// Annotate a document and hand it back
    fn process(&self, doc: Document) -> Document;
}

/// Sentence segmentation component
#[derive(Debug, Clone)]
pub struct Sentencizer {
    predictor: BoundaryPredictor,
    overwrite: bool,
}

impl Sentencizer {
    /// Registered component name
    pub const NAME: &'static str = "srx_sentencizer";

    /// Wrap a predictor
    pub fn new(predictor: BoundaryPredictor, overwrite: bool) -> Self {
        Self {
            predictor,
            overwrite,
        }
    }

    /// Build from SRX text and a configuration
    pub fn from_config(config: &Config, rules_source: &str) -> Result<Self> {
        let rules = load_rules_for(rules_source, config.language_rule())?;
        let exceptions = compile_exception_set_with(&rules, &config.compile_options());
        Ok(Self::with_exceptions(config, Arc::new(exceptions)))
    }

    /// Build from the embedded English rule set
    pub fn with_embedded_rules(config: &Config) -> Result<Self> {
        Self::from_config(config, rules::embedded_source())
    }

    /// Build around an already compiled exception set
    pub fn with_exceptions(config: &Config, exceptions: Arc<ExceptionSet>) -> Self {
        let predictor = BoundaryPredictor::new(exceptions, config.punctuation().table());
        Self::new(predictor, config.overwrite())
    }

    /// The wrapped predictor
    pub fn predictor(&self) -> &BoundaryPredictor {
        &self.predictor
    }

    /// Predict sentence starts for several documents
    #[cfg(feature = "parallel")]
    pub fn predict_batch(&self, docs: &[Document]) -> Vec<Vec<bool>> {
        use rayon::prelude::*;

        docs.par_iter()
            .map(|doc| self.predictor.predict(doc.tokens()))
            .collect()
    }

    /// Predict sentence starts for several documents
    #[cfg(not(feature = "parallel"))]
    pub fn predict_batch(&self, docs: &[Document]) -> Vec<Vec<bool>> {
        docs.iter()
            .map(|doc| self.predictor.predict(doc.tokens()))
            .collect()
    }
}

impl PipelineComponent for Sentencizer {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn process(&self, mut doc: Document) -> Document {
        if doc.is_annotated() && !self.overwrite {
            log::debug!("document already annotated; keeping existing sentence starts");
            return doc;
        }

        let starts = self.predictor.predict(doc.tokens());
        if let Err(err) = doc.set_sentence_starts(starts) {
            log::error!("failed to annotate document: {err}");
        }
        doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::PunctTable;

    fn sentencizer(overwrite: bool) -> Sentencizer {
        let exceptions = Arc::new(ExceptionSet::from_patterns([r"\bDr\."]));
        Sentencizer::new(
            BoundaryPredictor::new(exceptions, PunctTable::default()),
            overwrite,
        )
    }

    #[test]
    fn test_process_annotates() {
        let doc = Document::from_words(["Dr", ".", "Smith", "left", ".", "Bye", "."]);
        let doc = sentencizer(false).process(doc);

        assert_eq!(
            doc.sentence_starts(),
            Some(&[true, false, false, false, false, true, false][..])
        );
        assert_eq!(doc.sentences().len(), 2);
    }

    #[test]
    fn test_existing_annotation_kept_without_overwrite() {
        let mut doc = Document::from_words(["a", ".", "b"]);
        doc.set_sentence_starts(vec![true, true, true]).unwrap();

        let kept = sentencizer(false).process(doc.clone());
        assert_eq!(kept.sentence_starts(), Some(&[true, true, true][..]));

        let replaced = sentencizer(true).process(doc);
        assert_eq!(replaced.sentence_starts(), Some(&[true, false, true][..]));
    }

    #[test]
    fn test_component_name() {
        let component: Box<dyn PipelineComponent> = Box::new(sentencizer(false));
        assert_eq!(component.name(), "srx_sentencizer");
    }

    #[test]
    fn test_predict_batch() {
        let docs = vec![
            Document::from_words(["One", ".", "Two", "."]),
            Document::default(),
        ];
        let batch = sentencizer(false).predict_batch(&docs);
        assert_eq!(batch, vec![vec![true, false, true, false], vec![]]);
    }

    #[test]
    fn test_from_config_with_embedded_rules() {
        let sentencizer = Sentencizer::with_embedded_rules(&Config::default()).unwrap();
        assert!(!sentencizer.predictor().exceptions().is_empty());
    }

    #[test]
    fn test_from_config_missing_language() {
        let config = Config::builder().language_rule("Klingon").build().unwrap();
        assert!(Sentencizer::with_embedded_rules(&config).is_err());
    }
}
