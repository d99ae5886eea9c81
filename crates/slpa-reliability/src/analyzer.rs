//! Pairwise agreement between two annotators.
//!
//! For a word and configuration/hand, both transcriptions are restricted to a
//! section's slots. Any position where either side holds the wildcard `*` is
//! dropped from both vectors so they stay aligned; the score is the share of
//! remaining positions that hold the same symbol. Sections are always scored
//! independently, never pooled.

use serde::{Deserialize, Serialize};
use slpa_core::schema;
use slpa_core::{HandConfig, Transcription};
use tracing::{debug, info};

use crate::error::{ReliabilityError, Result};
use crate::reader::{AnnotatorSheet, WILDCARD};
use crate::report::{BatchReport, WordReport};
use crate::section::{Section, SectionSelector};

/// Analysis settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ReliabilityOptions {
    /// Mask the six constant slots with the wildcard before comparing.
    pub exclude_constants: bool,
}

impl Default for ReliabilityOptions {
    fn default() -> Self {
        Self {
            exclude_constants: true,
        }
    }
}

/// Matched and compared position counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Agreement {
    pub matched: usize,
    pub compared: usize,
    /// `None` when no positions were left to compare.
    pub percent: Option<f64>,
}

impl Agreement {
    pub fn new(matched: usize, compared: usize) -> Self {
        let percent = (compared > 0).then(|| matched as f64 / compared as f64 * 100.0);
        Self {
            matched,
            compared,
            percent,
        }
    }
}

/// One section's score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SectionScore {
    pub section: usize,
    pub name: &'static str,
    #[serde(flatten)]
    pub agreement: Agreement,
}

/// Section values in slot order, constants masked when requested.
pub fn extract<'a>(
    t: &'a Transcription,
    slots: &[usize],
    options: &ReliabilityOptions,
) -> Vec<&'a str> {
    slots
        .iter()
        .map(|&n| {
            if options.exclude_constants && schema::is_constant(n) {
                WILDCARD
            } else {
                t.value(n)
            }
        })
        .collect()
}

/// Drop every position where either side is the wildcard.
pub fn remove_wildcard_pairs<'a>(a: &[&'a str], b: &[&'a str]) -> Vec<(&'a str, &'a str)> {
    a.iter()
        .zip(b)
        .filter(|(x, y)| **x != WILDCARD && **y != WILDCARD)
        .map(|(x, y)| (*x, *y))
        .collect()
}

/// Agreement over two aligned value vectors.
pub fn agreement(a: &[&str], b: &[&str]) -> Agreement {
    let pairs = remove_wildcard_pairs(a, b);
    let matched = pairs.iter().filter(|(x, y)| x == y).count();
    Agreement::new(matched, pairs.len())
}

/// Score one section.
pub fn score_section(
    first: &Transcription,
    second: &Transcription,
    section: &Section,
    options: &ReliabilityOptions,
) -> SectionScore {
    let slots = section.slots();
    let a = extract(first, &slots, options);
    let b = extract(second, &slots, options);
    SectionScore {
        section: section.number,
        name: section.name,
        agreement: agreement(&a, &b),
    }
}

/// Score every section the selector names.
pub fn compare(
    first: &Transcription,
    second: &Transcription,
    selector: SectionSelector,
    options: &ReliabilityOptions,
) -> Vec<SectionScore> {
    selector
        .sections()
        .iter()
        .map(|s| score_section(first, second, s, options))
        .collect()
}

/// Compare one word across two sheets. Word lookup ignores case.
pub fn compare_word(
    first: &AnnotatorSheet,
    second: &AnnotatorSheet,
    word: &str,
    which: HandConfig,
    selector: SectionSelector,
    options: &ReliabilityOptions,
) -> Result<WordReport> {
    let not_found = || ReliabilityError::NotFound {
        word: word.trim().to_uppercase(),
    };
    let a = first.transcription(word, which).ok_or_else(not_found)?;
    let b = second.transcription(word, which).ok_or_else(not_found)?;

    let scores = compare(a, b, selector, options);
    debug!(word, config = %which, section = selector.number(), "compared word");
    Ok(WordReport {
        word: word.trim().to_uppercase(),
        config: which,
        scores,
    })
}

/// Compare every shared word, in all four configurations, over all 19 sections.
///
/// Words present in only one sheet are recorded as skipped.
pub fn compare_sheets(
    base: &AnnotatorSheet,
    other: &AnnotatorSheet,
    options: &ReliabilityOptions,
) -> BatchReport {
    let mut report = BatchReport::default();

    for word in base.words() {
        if !other.contains(word) {
            report.skipped.push(word.to_string());
            continue;
        }
        for which in HandConfig::ALL {
            match compare_word(base, other, word, which, SectionSelector::AllSummary, options) {
                Ok(entry) => report.entries.push(entry),
                Err(e) => report.skipped.push(format!("{word} ({e})")),
            }
        }
    }
    report
        .skipped
        .extend(other.words().filter(|w| !base.contains(w)).map(str::to_string));

    info!(
        compared = report.entries.len(),
        skipped = report.skipped.len(),
        "batch comparison finished"
    );
    report
}

/// Compare several annotators against one base sheet.
pub fn compare_many<'a>(
    base: &AnnotatorSheet,
    others: impl IntoIterator<Item = (&'a str, &'a AnnotatorSheet)>,
    options: &ReliabilityOptions,
) -> Vec<(String, BatchReport)> {
    others
        .into_iter()
        .map(|(name, sheet)| {
            info!(annotator = name, "comparing against base");
            (name.to_string(), compare_sheets(base, sheet, options))
        })
        .collect()
}
