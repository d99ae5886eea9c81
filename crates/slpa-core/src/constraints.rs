//! Phonotactic constraint checks over a transcription.
//!
//! Each check can be switched off through [`ConstraintSet`]; the annotator's
//! settings decide which ones run. Violations never block an edit, they are
//! reported alongside the transcription.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::schema::{self, MEDIAL_JOINT_SLOTS};
use crate::transcription::Transcription;

/// A named constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Constraint {
    /// No medial joint can be hyperextended (`H`).
    MedialHyperextension,
    /// A transcription that has been started has no blank editable slots.
    BlankSlot,
    /// Every stored symbol belongs to its slot alphabet.
    NonstandardSymbol,
}

impl Constraint {
    pub const ALL: [Constraint; 3] = [
        Constraint::MedialHyperextension,
        Constraint::BlankSlot,
        Constraint::NonstandardSymbol,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Constraint::MedialHyperextension => "medial-hyperextension",
            Constraint::BlankSlot => "blank-slot",
            Constraint::NonstandardSymbol => "nonstandard-symbol",
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which constraints are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ConstraintSet {
    pub medial_hyperextension: bool,
    pub blank_slot: bool,
    pub nonstandard_symbol: bool,
}

impl Default for ConstraintSet {
    fn default() -> Self {
        Self {
            medial_hyperextension: true,
            blank_slot: false,
            nonstandard_symbol: true,
        }
    }
}

impl ConstraintSet {
    pub fn all() -> Self {
        Self {
            medial_hyperextension: true,
            blank_slot: true,
            nonstandard_symbol: true,
        }
    }

    pub fn none() -> Self {
        Self {
            medial_hyperextension: false,
            blank_slot: false,
            nonstandard_symbol: false,
        }
    }

    pub fn is_enabled(&self, constraint: Constraint) -> bool {
        match constraint {
            Constraint::MedialHyperextension => self.medial_hyperextension,
            Constraint::BlankSlot => self.blank_slot,
            Constraint::NonstandardSymbol => self.nonstandard_symbol,
        }
    }
}

/// A constraint violation at a specific slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub constraint: Constraint,
    pub slot: usize,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot {} [{}]: {}", self.slot, self.constraint, self.message)
    }
}

/// Run the enabled constraints, returning violations in slot order.
pub fn check(transcription: &Transcription, constraints: &ConstraintSet) -> Vec<Violation> {
    let mut violations = Vec::new();
    let started = !transcription.is_empty();

    for slot in schema::slots().filter(|s| !s.is_constant()) {
        let n = slot.number;
        let value = transcription.value(n);

        if constraints.medial_hyperextension && MEDIAL_JOINT_SLOTS.contains(&n) && value == "H" {
            violations.push(Violation {
                constraint: Constraint::MedialHyperextension,
                slot: n,
                message: format!("{} cannot be hyperextended", slot.purpose),
            });
        }

        // Slot 1 is a checkbox: unchecked is a value, not a gap.
        if constraints.blank_slot && started && n != 1 && value.is_empty() {
            violations.push(Violation {
                constraint: Constraint::BlankSlot,
                slot: n,
                message: format!("{} is blank", slot.purpose),
            });
        }

        if constraints.nonstandard_symbol && !slot.accepts(value) {
            violations.push(Violation {
                constraint: Constraint::NonstandardSymbol,
                slot: n,
                message: format!("'{value}' is not a standard symbol for this slot"),
            });
        }
    }
    violations
}
