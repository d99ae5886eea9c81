//! Reading annotator sheets exported from the transcription tool.
//!
//! Each line after the header is one word:
//!
//! ```text
//! gloss, m1, m2, m3, m4, <151 data columns>
//! ```
//!
//! The data columns hold the four configuration/hand blocks back to back.
//! A block is 37 columns wide; its last two columns are dropped, the first
//! 34 of the remaining 35 carry slots 1..=34 and the 35th is padding. The
//! three columns left over after the fourth block are padding too.
//!
//! Cells are split on `,` with no quoting and surrounding whitespace is
//! ignored. Rows that cannot be split are skipped and recorded rather than
//! failing the whole sheet.

use std::collections::BTreeMap;
use std::path::Path;

use slpa_core::schema::{self, SLOT_COUNT};
use slpa_core::{HandConfig, Transcription, TranscriptionOptions};
use tracing::{debug, warn};

use crate::error::{ReliabilityError, Result};

/// Leading metadata columns (gloss included).
pub const METADATA_COLUMNS: usize = 5;
/// Data columns in a complete record.
pub const DATA_COLUMNS: usize = 151;
/// Width of one configuration/hand block.
pub const BLOCK_WIDTH: usize = DATA_COLUMNS / 4;
/// Columns dropped from the end of each block.
pub const BLOCK_TRAILER: usize = 2;

/// Marker for a position excluded from comparison.
pub const WILDCARD: &str = "*";

/// A row that was not loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    pub row: usize,
    pub reason: String,
}

/// One annotator's transcriptions, keyed by upper-cased word.
#[derive(Debug, Clone, Default)]
pub struct AnnotatorSheet {
    words: BTreeMap<String, [Transcription; 4]>,
    pub skipped: Vec<SkippedRow>,
}

impl AnnotatorSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a word. Returns true if an entry was replaced.
    pub fn insert(&mut self, word: &str, transcriptions: [Transcription; 4]) -> bool {
        self.words
            .insert(word.trim().to_uppercase(), transcriptions)
            .is_some()
    }

    /// Case-insensitive lookup.
    pub fn get(&self, word: &str) -> Option<&[Transcription; 4]> {
        self.words.get(&word.trim().to_uppercase())
    }

    pub fn transcription(&self, word: &str, which: HandConfig) -> Option<&Transcription> {
        self.get(word).map(|ts| &ts[which.index()])
    }

    pub fn contains(&self, word: &str) -> bool {
        self.get(word).is_some()
    }

    /// Words in sorted order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Parse one record into its word and four transcriptions.
///
/// `row` is the 1-based line number, used in error messages.
pub fn parse_record(row: usize, line: &str) -> Result<(String, [Transcription; 4])> {
    let cells: Vec<&str> = line.split(',').map(str::trim).collect();
    let bad = |detail: String| ReliabilityError::Format { row, detail };

    let word = cells.first().copied().unwrap_or_default();
    if word.is_empty() {
        return Err(bad("missing gloss in column 1".into()));
    }
    if cells.len() < METADATA_COLUMNS {
        return Err(bad(format!(
            "expected {METADATA_COLUMNS} metadata columns, found {}",
            cells.len()
        )));
    }

    let mut data: Vec<&str> = cells[METADATA_COLUMNS..].to_vec();
    match data.len() {
        n if n == DATA_COLUMNS - 1 => data.push(WILDCARD),
        n if n >= DATA_COLUMNS => data.truncate(DATA_COLUMNS),
        n => {
            return Err(bad(format!(
                "expected {} or {DATA_COLUMNS} data columns, found {n}",
                DATA_COLUMNS - 1
            )))
        }
    }

    let mut transcriptions: [Transcription; 4] = Default::default();
    for (hc, block) in HandConfig::ALL.iter().zip(data.chunks_exact(BLOCK_WIDTH)) {
        let kept = &block[..BLOCK_WIDTH - BLOCK_TRAILER];
        transcriptions[hc.index()] = block_transcription(row, word, *hc, &kept[..SLOT_COUNT])?;
    }
    Ok((word.to_uppercase(), transcriptions))
}

fn block_transcription(
    row: usize,
    word: &str,
    which: HandConfig,
    cells: &[&str],
) -> Result<Transcription> {
    let options = TranscriptionOptions::unrestricted();
    let mut t = Transcription::new();

    for (i, cell) in cells.iter().enumerate() {
        let number = i + 1;
        if let Some(constant) = schema::slot(number).constant() {
            if !cell.is_empty() && *cell != constant && *cell != WILDCARD {
                warn!(
                    row,
                    word,
                    config = %which,
                    slot = number,
                    found = *cell,
                    "constant column differs from its fixed symbol"
                );
            }
            continue;
        }
        t.set_slot(number, cell, &options)?;
    }
    Ok(t)
}

/// Parse a whole sheet. The first line is a header and is skipped.
pub fn parse_sheet(text: &str) -> AnnotatorSheet {
    let mut sheet = AnnotatorSheet::new();

    for (i, line) in text.lines().enumerate().skip(1) {
        let row = i + 1;
        if line.trim().is_empty() {
            continue;
        }
        match parse_record(row, line) {
            Ok((word, transcriptions)) => {
                if sheet.insert(&word, transcriptions) {
                    warn!(row, word = %word, "duplicate word; later row wins");
                } else {
                    debug!(row, word = %word, "loaded word");
                }
            }
            Err(e) => {
                warn!(row, error = %e, "skipping row");
                sheet.skipped.push(SkippedRow {
                    row,
                    reason: e.to_string(),
                });
            }
        }
    }
    sheet
}

/// Read and parse a sheet file.
pub fn read_sheet(path: &Path) -> Result<AnnotatorSheet> {
    let text = std::fs::read_to_string(path).map_err(|source| ReliabilityError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let sheet = parse_sheet(&text);
    debug!(
        path = %path.display(),
        words = sheet.len(),
        skipped = sheet.skipped.len(),
        "read sheet"
    );
    Ok(sheet)
}
