//! Text and JSON rendering of reliability results.

use std::fmt;

use serde::Serialize;
use slpa_core::HandConfig;

use crate::analyzer::{Agreement, SectionScore};

/// Scores for one word and configuration/hand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordReport {
    pub word: String,
    pub config: HandConfig,
    pub scores: Vec<SectionScore>,
}

/// All comparisons between a base sheet and one other sheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchReport {
    pub entries: Vec<WordReport>,
    /// Words present in only one sheet, or whose comparison failed.
    pub skipped: Vec<String>,
}

/// `97.06%`, or `n/a` when nothing was compared.
pub fn format_percent(agreement: &Agreement) -> String {
    match agreement.percent {
        Some(p) => format!("{p:.2}%"),
        None => "n/a".to_string(),
    }
}

impl fmt::Display for SectionScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Section: {}", self.name)?;
        write!(f, "Reliability = {}", format_percent(&self.agreement))
    }
}

impl fmt::Display for WordReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Word: {} ({})", self.word, self.config)?;
        for score in &self.scores {
            writeln!(f)?;
            writeln!(f, "{score}")?;
        }
        Ok(())
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        if !self.skipped.is_empty() {
            writeln!(f, "Skipped ({}):", self.skipped.len())?;
            for word in &self.skipped {
                writeln!(f, "  {word}")?;
            }
        }
        Ok(())
    }
}
