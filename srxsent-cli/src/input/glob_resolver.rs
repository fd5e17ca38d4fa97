//! File pattern resolution using glob

use anyhow::Result;
use glob::glob;

use super::InputSource;
use crate::error::CliError;

/// Resolve file patterns to input sources; `-` stands for standard input
pub fn resolve_patterns(patterns: &[String]) -> Result<Vec<InputSource>> {
    let mut files = Vec::new();
    let mut stdin = false;

    for pattern in patterns {
        if pattern == "-" {
            stdin = true;
            continue;
        }

        let paths = glob(pattern).map_err(|_| CliError::InvalidPattern(pattern.clone()))?;
        for path in paths.flatten() {
            if path.is_file() {
                files.push(path);
            }
        }
    }

    files.sort();
    files.dedup();

    let mut sources: Vec<InputSource> = files.into_iter().map(InputSource::File).collect();
    if stdin {
        sources.insert(0, InputSource::Stdin);
    }

    if sources.is_empty() {
        return Err(CliError::FileNotFound(patterns.join(", ")).into());
    }

    log::debug!("resolved {} input(s)", sources.len());
    Ok(sources)
}
