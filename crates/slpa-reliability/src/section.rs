//! The named slot groupings scored by the reliability analysis.

use std::fmt;

use serde::Serialize;

use crate::error::{ReliabilityError, Result};

/// One of the 19 predefined sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Section {
    pub number: usize,
    pub name: &'static str,
    #[serde(skip)]
    slots: SlotSet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum SlotSet {
    Range(usize, usize),
    List(&'static [usize]),
}

impl Section {
    /// Slot numbers in comparison order.
    pub fn slots(&self) -> Vec<usize> {
        match self.slots {
            SlotSet::Range(lo, hi) => (lo..=hi).collect(),
            SlotSet::List(list) => list.to_vec(),
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

const fn range(number: usize, name: &'static str, lo: usize, hi: usize) -> Section {
    Section {
        number,
        name,
        slots: SlotSet::Range(lo, hi),
    }
}

const fn list(number: usize, name: &'static str, slots: &'static [usize]) -> Section {
    Section {
        number,
        name,
        slots: SlotSet::List(slots),
    }
}

pub static SECTIONS: [Section; 19] = [
    range(1, "All", 1, 34),
    list(2, "Forearm", &[1]),
    range(3, "Thumb", 2, 5),
    range(4, "Thumb / Finger Contact", 6, 15),
    range(5, "Index Finger", 17, 19),
    range(6, "Middle Finger", 20, 24),
    range(7, "Ring Finger", 25, 29),
    range(8, "Pinky Finger", 30, 34),
    list(9, "Thumb / Finger Surfaces", &[6, 7, 10, 11]),
    range(10, "Finger Contact", 12, 15),
    list(
        11,
        "Extensions",
        &[4, 5, 17, 18, 19, 22, 23, 24, 27, 28, 29, 32, 33, 34],
    ),
    list(12, "Finger 1 Extensions", &[17, 18, 19]),
    list(13, "Finger 2 Extensions", &[22, 23, 24]),
    list(14, "Finger 3 Extensions", &[27, 28, 29]),
    list(15, "Finger 4 Extensions", &[32, 33, 34]),
    list(16, "Finger / Finger Contact", &[20, 25, 30]),
    list(17, "Proximal Joints", &[4, 17, 22, 27, 32]),
    list(18, "Medial Joints", &[18, 23, 28, 33]),
    list(19, "Distal Joints", &[5, 19, 24, 29, 34]),
];

/// Name of the pseudo-section 20.
pub const SUMMARY_NAME: &str = "ALL summary of 1-19";

/// A selectable view: one section, or every section reported separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionSelector {
    Single(&'static Section),
    AllSummary,
}

impl SectionSelector {
    /// Look up by menu number 1..=20.
    pub fn from_number(number: usize) -> Result<Self> {
        match number {
            20 => Ok(SectionSelector::AllSummary),
            n => SECTIONS
                .get(n.wrapping_sub(1))
                .map(SectionSelector::Single)
                .ok_or(ReliabilityError::UnknownSection(number)),
        }
    }

    pub fn number(&self) -> usize {
        match self {
            SectionSelector::Single(s) => s.number,
            SectionSelector::AllSummary => 20,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SectionSelector::Single(s) => s.name,
            SectionSelector::AllSummary => SUMMARY_NAME,
        }
    }

    /// The sections this selector scores, in order.
    pub fn sections(&self) -> &'static [Section] {
        match self {
            SectionSelector::Single(s) => std::slice::from_ref(*s),
            SectionSelector::AllSummary => &SECTIONS,
        }
    }
}

/// The 20-entry menu, numbered.
pub fn menu() -> impl Iterator<Item = (usize, &'static str)> {
    SECTIONS
        .iter()
        .map(|s| (s.number, s.name))
        .chain(std::iter::once((20, SUMMARY_NAME)))
}
