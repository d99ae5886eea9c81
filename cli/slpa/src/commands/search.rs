//! `slpa search`: query the corpus by transcription.

use std::path::Path;

use anyhow::{Context, Result};
use slpa_core::{Corpus, HandConfig, Transcription};

use crate::manifest::SlpaManifest;

/// Glosses matching `code` in configuration `config`, or in any of the four
/// when `config` is `None`. Results keep corpus order.
pub(crate) fn find(
    manifest: &SlpaManifest,
    corpus_path: &Path,
    code: &str,
    config: Option<usize>,
) -> Result<Vec<String>> {
    let options = manifest.transcription_options()?;
    let query = Transcription::parse(code, &options).context("parsing query code")?;
    let corpus = Corpus::load(corpus_path)
        .with_context(|| format!("loading corpus {}", corpus_path.display()))?;

    let targets: Vec<HandConfig> = match config {
        Some(n) => vec![HandConfig::from_number(n)
            .with_context(|| format!("config must be between 1 and 4, got {n}"))?],
        None => HandConfig::ALL.to_vec(),
    };

    let hits = corpus
        .iter()
        .filter(|sign| {
            targets
                .iter()
                .any(|&hc| sign.transcription(hc).matches(&query))
        })
        .map(|sign| sign.gloss.clone())
        .collect();
    Ok(hits)
}

pub fn run(
    manifest: &SlpaManifest,
    corpus_path: &Path,
    code: &str,
    config: Option<usize>,
) -> Result<()> {
    let hits = find(manifest, corpus_path, code, config)?;
    if hits.is_empty() {
        eprintln!("no matching signs");
    }
    for gloss in hits {
        println!("{gloss}");
    }
    Ok(())
}
