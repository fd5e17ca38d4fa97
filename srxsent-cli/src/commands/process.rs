//! Process command implementation

use anyhow::{Context, Result};
use clap::Args;
use rayon::prelude::*;
use srxsent_core::rules::read_pattern_list;
use srxsent_core::{
    normalize, Config, Document, ExceptionSet, PipelineComponent, Punctuation, Sentencizer,
};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::{resolve_patterns, FileReader, InputSource};
use crate::output::{JsonFormatter, MarkdownFormatter, OutputFormatter, TextFormatter};
use crate::progress::ProgressReporter;
use crate::tokenizer::tokenize;

/// Arguments for the process command
#[derive(Debug, Args)]
pub struct ProcessArgs {
    /// Input files or patterns (supports glob, `-` for stdin)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format [default: text]
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// SRX rule file (default: embedded English rules)
    #[arg(short, long, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Language block to read from the rule file [default: English]
    #[arg(long, value_name = "NAME")]
    pub language_rule: Option<String>,

    /// Exception pattern list written by `srxsent patterns`
    #[arg(long, value_name = "FILE", conflicts_with_all = ["rules", "language_rule"])]
    pub patterns: Option<PathBuf>,

    /// Sentence-final punctuation set [default: multilingual]
    #[arg(long, value_enum)]
    pub punctuation: Option<PunctuationPreset>,

    /// Process input files in parallel
    #[arg(short, long)]
    pub parallel: bool,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text with one sentence per line
    Text,
    /// JSON array of inputs with their sentences
    Json,
    /// Markdown formatted output
    Markdown,
}

/// Punctuation presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PunctuationPreset {
    /// `.`, `!` and `?`
    Default,
    /// Sentence-final marks of all scripts
    Multilingual,
}

impl From<PunctuationPreset> for Punctuation {
    fn from(preset: PunctuationPreset) -> Self {
        match preset {
            PunctuationPreset::Default => Punctuation::Default,
            PunctuationPreset::Multilingual => Punctuation::Multilingual,
        }
    }
}

impl ProcessArgs {
    /// Execute the process command
    pub fn execute(&self) -> Result<()> {
        self.init_logging()?;

        log::info!("Starting text processing");
        log::debug!("Arguments: {:?}", self);

        let file_config = match &self.config {
            Some(path) => CliConfig::from_file(path)?,
            None => CliConfig::default(),
        };

        let sentencizer = self.build_sentencizer(&file_config)?;
        let sources = resolve_patterns(&self.input)?;

        let format = match self.format {
            Some(format) => format,
            None => {
                <OutputFormat as clap::ValueEnum>::from_str(&file_config.output.format, true)
                    .map_err(|e| CliError::ConfigError(format!("output format: {e}")))?
            }
        };
        let mut formatter = self.create_formatter(format, file_config.output.pretty_json)?;

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_files(sources.len() as u64);

        let annotate_one = |source: &InputSource| -> Result<(String, Document)> {
            let text = FileReader::read_source(source)?;
            let doc = sentencizer.process(tokenize(&text));
            let name = source.to_string();
            log::debug!("{name}: {} tokens", doc.len());
            progress.file_completed(&name);
            Ok((name, doc))
        };

        let documents = if self.parallel || file_config.processing.parallel {
            sources
                .par_iter()
                .map(annotate_one)
                .collect::<Result<Vec<_>>>()?
        } else {
            sources
                .iter()
                .map(annotate_one)
                .collect::<Result<Vec<_>>>()?
        };

        let mut total = 0;
        for (name, doc) in &documents {
            formatter.begin_document(name)?;
            total += write_sentences(formatter.as_mut(), doc)?;
        }
        formatter.finish()?;
        progress.finish();

        log::info!(
            "Wrote {} sentences from {} input(s)",
            total,
            documents.len()
        );
        Ok(())
    }

    /// Build the sentencizer from flags, falling back to the config file
    fn build_sentencizer(&self, file_config: &CliConfig) -> Result<Sentencizer> {
        let punctuation = match self.punctuation {
            Some(preset) => preset.into(),
            None => file_config.processing.punctuation.parse::<Punctuation>()?,
        };
        let language_rule = self
            .language_rule
            .clone()
            .unwrap_or_else(|| file_config.rules.language_rule.clone());

        let mut builder = Config::builder()
            .language_rule(language_rule)
            .punctuation(punctuation)
            .supplementary_patterns(file_config.rules.supplementary_patterns);
        for pattern in &file_config.rules.extra_patterns {
            builder = builder.extra_pattern(pattern.clone());
        }
        let config = builder.build()?;

        if let Some(path) = &self.patterns {
            let file = File::open(path)
                .with_context(|| format!("Failed to open pattern file: {}", path.display()))?;
            let mut patterns = read_pattern_list(BufReader::new(file))
                .with_context(|| format!("Failed to read pattern file: {}", path.display()))?;
            // Exported lists are already normalized; config extras are not
            patterns.extend(file_config.rules.extra_patterns.iter().map(|p| normalize(p)));

            let exceptions = ExceptionSet::from_patterns(patterns);
            log::info!(
                "Loaded {} exception patterns from {}",
                exceptions.len(),
                path.display()
            );
            return Ok(Sentencizer::with_exceptions(&config, Arc::new(exceptions)));
        }

        let sentencizer = match self.rules.as_ref().or(file_config.rules.path.as_ref()) {
            Some(path) => {
                let source = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read rule file: {}", path.display()))?;
                Sentencizer::from_config(&config, &source)
            }
            None => Sentencizer::with_embedded_rules(&config),
        }
        .map_err(|e| CliError::RuleError(e.to_string()))?;

        log::info!(
            "Compiled {} exception patterns for '{}'",
            sentencizer.predictor().exceptions().len(),
            config.language_rule()
        );
        Ok(sentencizer)
    }

    fn create_formatter(
        &self,
        format: OutputFormat,
        pretty_json: bool,
    ) -> Result<Box<dyn OutputFormatter>> {
        let writer: Box<dyn Write + Send + Sync> = match &self.output {
            Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
                format!("Failed to create output file: {}", path.display())
            })?)),
            None => Box::new(io::stdout()),
        };

        Ok(match format {
            OutputFormat::Text => Box::new(TextFormatter::new(writer)),
            OutputFormat::Json => Box::new(JsonFormatter::new(writer, pretty_json)),
            OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer)),
        })
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) -> Result<()> {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            // A logger may already be installed when run more than once in-process
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }

        Ok(())
    }
}

/// Write the non-blank sentences of `doc`; returns how many were written
fn write_sentences(formatter: &mut dyn OutputFormatter, doc: &Document) -> Result<usize> {
    let mut count = 0;
    for sentence in doc.sentences() {
        let raw = doc.sentence_text(&sentence);
        let text = raw.trim();
        if text.is_empty() {
            continue;
        }

        let leading = raw.len() - raw.trim_start().len();
        formatter.format_sentence(text, doc.offset_of(sentence.start) + leading)?;
        count += 1;
    }
    Ok(count)
}
