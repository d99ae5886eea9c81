//! `slpa reliability`: compare one word between two annotators.

use std::path::Path;

use anyhow::{Context, Result};
use slpa_core::HandConfig;
use slpa_reliability::{compare_word, read_sheet, SectionSelector};

use super::OutputFormat;
use crate::manifest::SlpaManifest;

pub(crate) fn render(
    manifest: &SlpaManifest,
    first: &Path,
    second: &Path,
    word: &str,
    config: usize,
    section: usize,
    format: OutputFormat,
) -> Result<String> {
    let which = HandConfig::from_number(config)
        .with_context(|| format!("config must be between 1 and 4, got {config}"))?;
    let selector = SectionSelector::from_number(section)?;

    let a = read_sheet(first)?;
    let b = read_sheet(second)?;
    let report = compare_word(&a, &b, word, which, selector, &manifest.reliability)?;

    Ok(match format {
        OutputFormat::Text => report.to_string(),
        OutputFormat::Json => serde_json::to_string_pretty(&report)? + "\n",
    })
}

#[allow(clippy::too_many_arguments)]
pub fn run(
    manifest: &SlpaManifest,
    first: &Path,
    second: &Path,
    word: &str,
    config: usize,
    section: usize,
    format: OutputFormat,
) -> Result<()> {
    print!(
        "{}",
        render(manifest, first, second, word, config, section, format)?
    );
    Ok(())
}
