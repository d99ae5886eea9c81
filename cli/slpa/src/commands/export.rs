//! `slpa export`: corpus to CSV.

use std::path::Path;

use anyhow::{Context, Result};
use slpa_core::{export, Corpus};

use super::emit;
use crate::manifest::SlpaManifest;

/// Load the corpus at `corpus_path` and render it as CSV.
pub(crate) fn render(manifest: &SlpaManifest, corpus_path: &Path) -> Result<String> {
    let corpus = Corpus::load(corpus_path)
        .with_context(|| format!("loading corpus {}", corpus_path.display()))?;

    for sign in corpus.iter() {
        if let Err(e) = sign.features.validate(&manifest.features) {
            tracing::warn!(gloss = %sign.gloss, "{e}");
        }
    }

    let csv = export::export_string(&corpus, &manifest.export)?;
    tracing::info!(signs = corpus.len(), "exported corpus");
    Ok(csv)
}

pub fn run(manifest: &SlpaManifest, corpus_path: &Path, output: Option<&Path>) -> Result<()> {
    emit(&render(manifest, corpus_path)?, output)
}
