//! The 34-slot transcription record.
//!
//! A [`Transcription`] is a pure data record: slot values plus per-slot
//! annotation flags. Every edit goes through [`Transcription::set_slot`], which
//! checks the slot schema according to the [`TranscriptionOptions`] passed in.
//! Rejected edits leave the stored value untouched.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::code;
use crate::error::{CoreError, Result};
use crate::schema::{self, Field, FOREARM_SYMBOL, SLOT_COUNT};

/// Annotation metadata attached to a slot (not phonological content).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotFlags {
    pub uncertain: bool,
    pub estimate: bool,
}

/// Whether slot values are checked against the slot alphabets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntryMode {
    #[default]
    Restricted,
    /// Any value is accepted on editable slots. Constant slots stay fixed.
    Unrestricted,
}

/// Options threaded into every validating transcription operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranscriptionOptions {
    pub mode: EntryMode,
    /// Marker rendered for empty slots in the bracketed code.
    pub blank: char,
}

impl Default for TranscriptionOptions {
    fn default() -> Self {
        Self {
            mode: EntryMode::Restricted,
            blank: '_',
        }
    }
}

impl TranscriptionOptions {
    /// Default options with alphabet checks waived.
    pub fn unrestricted() -> Self {
        Self {
            mode: EntryMode::Unrestricted,
            ..Self::default()
        }
    }

    /// Reject blank markers that would make the notation ambiguous.
    pub fn validate(&self) -> Result<()> {
        let mut buf = [0u8; 4];
        let blank: &str = self.blank.encode_utf8(&mut buf);
        if self.blank.is_whitespace() || matches!(self.blank, '[' | ']') {
            return Err(CoreError::InvalidOptions(format!(
                "blank marker {:?} cannot be whitespace or a bracket",
                self.blank
            )));
        }
        if schema::is_known_symbol(blank) || self.blank == 'x' {
            return Err(CoreError::InvalidOptions(format!(
                "blank marker '{blank}' is a transcription symbol"
            )));
        }
        Ok(())
    }

    fn restricted(&self) -> bool {
        self.mode == EntryMode::Restricted
    }
}

/// An ordered record of 34 slot values with per-slot flags.
///
/// Slot 1 holds `V` when the forearm box is checked and is empty otherwise;
/// unrestricted entry may store another marker there (e.g. a sheet wildcard),
/// which still reads as checked. Constant slots always hold their fixed
/// symbol. Equality compares slot values only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "TranscriptionRecord", into = "TranscriptionRecord")]
pub struct Transcription {
    values: [String; SLOT_COUNT],
    flags: [SlotFlags; SLOT_COUNT],
}

fn position(number: usize) -> usize {
    schema::slot(number).number - 1
}

impl Transcription {
    /// An empty transcription with the constant slots filled in.
    pub fn new() -> Self {
        Self {
            values: std::array::from_fn(|i| {
                schema::slot(i + 1).constant().unwrap_or_default().to_string()
            }),
            flags: [SlotFlags::default(); SLOT_COUNT],
        }
    }

    /// The value of a slot (`V` or empty for slot 1).
    ///
    /// # Panics
    ///
    /// Panics if `number` is outside `1..=34`.
    pub fn value(&self, number: usize) -> &str {
        &self.values[position(number)]
    }

    /// All 34 values in slot order.
    pub fn values(&self) -> impl Iterator<Item = &str> + '_ {
        self.values.iter().map(String::as_str)
    }

    pub fn forearm(&self) -> bool {
        !self.values[0].is_empty()
    }

    pub fn set_forearm(&mut self, checked: bool) {
        self.values[0] = if checked {
            FOREARM_SYMBOL.to_string()
        } else {
            String::new()
        };
    }

    /// Set a slot value.
    ///
    /// Fails if the slot is constant (in every mode) or, in restricted mode,
    /// if `value` is outside the slot alphabet. The value is stored as given,
    /// slot 1 included. Flags are not touched.
    pub fn set_slot(
        &mut self,
        number: usize,
        value: &str,
        options: &TranscriptionOptions,
    ) -> Result<()> {
        let slot = schema::slot(number);
        if slot.is_constant() {
            return Err(CoreError::ConstantSlot { slot: number });
        }
        if options.restricted() && !slot.accepts(value) {
            return Err(CoreError::IllegalSymbol {
                slot: number,
                value: value.to_string(),
            });
        }
        self.values[number - 1] = value.to_string();
        Ok(())
    }

    /// Set a slot from raw keyboard input, applying the entry conventions first.
    pub fn enter_slot(
        &mut self,
        number: usize,
        raw: &str,
        options: &TranscriptionOptions,
    ) -> Result<()> {
        let value = schema::slot(number).normalize(raw);
        self.set_slot(number, &value, options)
    }

    /// Blank every editable slot. Flags are kept.
    pub fn clear(&mut self) {
        *self = Self {
            flags: self.flags,
            ..Self::new()
        };
    }

    /// Copy slot values (not flags) from another transcription.
    pub fn copy_from(&mut self, other: &Transcription) {
        self.values = other.values.clone();
    }

    pub fn flags(&self, number: usize) -> SlotFlags {
        self.flags[position(number)]
    }

    pub fn set_flags(&mut self, number: usize, flags: SlotFlags) {
        self.flags[position(number)] = flags;
    }

    pub fn set_uncertain(&mut self, number: usize, uncertain: bool) {
        self.flags[position(number)].uncertain = uncertain;
    }

    pub fn set_estimate(&mut self, number: usize, estimate: bool) {
        self.flags[position(number)].estimate = estimate;
    }

    /// Reset every flag.
    pub fn clear_flags(&mut self) {
        self.flags = [SlotFlags::default(); SLOT_COUNT];
    }

    /// True iff the forearm box is unchecked and every editable slot is blank.
    pub fn is_empty(&self) -> bool {
        schema::slots()
            .filter(|s| !s.is_constant())
            .all(|s| self.values[s.number - 1].is_empty())
    }

    /// Slot numbers whose values differ from `other`.
    pub fn diff(&self, other: &Transcription) -> Vec<usize> {
        (1..=SLOT_COUNT)
            .filter(|&n| self.values[n - 1] != other.values[n - 1])
            .collect()
    }

    /// Whether every non-blank slot of `query` holds the same value here.
    pub fn matches(&self, query: &Transcription) -> bool {
        schema::slots()
            .filter(|s| !s.is_constant())
            .all(|s| {
                let wanted = &query.values[s.number - 1];
                wanted.is_empty() || *wanted == self.values[s.number - 1]
            })
    }

    /// Render the bracketed code with `blank` standing in for empty slots.
    pub fn render(&self, blank: &str) -> String {
        let mut out = String::new();
        for field in Field::ALL {
            out.push('[');
            for number in field.slots() {
                let value = &self.values[number - 1];
                out.push_str(if value.is_empty() { blank } else { value });
            }
            out.push(']');
            out.push_str(&field.number().to_string());
        }
        out
    }

    /// Canonical bracketed code, e.g. `[_]1[O=EH]2[...]3...[...]7`.
    ///
    /// Fails if the blank marker could be read back as a symbol.
    pub fn to_code(&self, options: &TranscriptionOptions) -> Result<String> {
        options.validate()?;
        let mut buf = [0u8; 4];
        Ok(self.render(options.blank.encode_utf8(&mut buf)))
    }

    /// Parse a bracketed code.
    ///
    /// Fails with a format error on a malformed layout, a wrong slot count
    /// within a field, a constant slot holding anything but its symbol, or
    /// (in restricted mode) a symbol outside the slot alphabet. Invalid
    /// options are rejected before anything is read.
    pub fn parse(raw: &str, options: &TranscriptionOptions) -> Result<Self> {
        options.validate()?;
        let tokens = code::tokenize_all(raw, options.blank)?;
        let mut transcription = Self::new();

        for (i, token) in tokens.iter().enumerate() {
            let number = i + 1;
            let slot = schema::slot(number);
            if let Some(symbol) = slot.constant() {
                if token != symbol {
                    return Err(CoreError::format(format!(
                        "slot {number} must be '{symbol}', found '{token}'"
                    )));
                }
                continue;
            }
            transcription
                .set_slot(number, token, options)
                .map_err(|e| CoreError::format(e.to_string()))?;
        }
        Ok(transcription)
    }
}

impl Default for Transcription {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Transcription {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl Eq for Transcription {}

impl fmt::Display for Transcription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = [0u8; 4];
        let blank = TranscriptionOptions::default().blank.encode_utf8(&mut buf);
        f.write_str(&self.render(blank))
    }
}

/// Persisted shape of a transcription: values plus flagged slot numbers.
#[derive(Serialize, Deserialize)]
struct TranscriptionRecord {
    slots: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    uncertain: Vec<usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    estimate: Vec<usize>,
}

impl From<Transcription> for TranscriptionRecord {
    fn from(t: Transcription) -> Self {
        let flagged = |pick: fn(&SlotFlags) -> bool| {
            (1..=SLOT_COUNT)
                .filter(|&n| pick(&t.flags[n - 1]))
                .collect::<Vec<_>>()
        };
        let uncertain = flagged(|f| f.uncertain);
        let estimate = flagged(|f| f.estimate);
        Self {
            slots: t.values.to_vec(),
            uncertain,
            estimate,
        }
    }
}

impl TryFrom<TranscriptionRecord> for Transcription {
    type Error = CoreError;

    fn try_from(record: TranscriptionRecord) -> Result<Self> {
        if record.slots.len() != SLOT_COUNT {
            return Err(CoreError::format(format!(
                "stored transcription has {} slots, expected {SLOT_COUNT}",
                record.slots.len()
            )));
        }
        let mut t = Transcription::new();
        let options = TranscriptionOptions::unrestricted();
        for (i, value) in record.slots.iter().enumerate() {
            let number = i + 1;
            match schema::slot(number).constant() {
                Some(symbol) if value != symbol => {
                    return Err(CoreError::format(format!(
                        "stored slot {number} must be '{symbol}', found '{value}'"
                    )));
                }
                Some(_) => {}
                None => t.set_slot(number, value, &options)?,
            }
        }
        for n in record.uncertain {
            if !(1..=SLOT_COUNT).contains(&n) {
                return Err(CoreError::format(format!("flagged slot {n} out of range")));
            }
            t.set_uncertain(n, true);
        }
        for n in record.estimate {
            if !(1..=SLOT_COUNT).contains(&n) {
                return Err(CoreError::format(format!("flagged slot {n} out of range")));
            }
            t.set_estimate(n, true);
        }
        Ok(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{CONSTANT_SLOTS, CROSSED_WITHOUT_CONTACT, NULL_SYMBOL};

    fn opts() -> TranscriptionOptions {
        TranscriptionOptions::default()
    }

    fn sample() -> Transcription {
        let o = opts();
        let mut t = Transcription::new();
        t.set_forearm(true);
        for (n, v) in [
            (2, "O"),
            (3, "="),
            (4, "E"),
            (5, "H"),
            (6, "t"),
            (7, "p"),
            (10, "f"),
            (11, "d"),
            (12, "1"),
            (13, "-"),
            (17, "H"),
            (18, "E"),
            (19, "E"),
            (20, "x+"),
            (22, "i"),
            (23, "F"),
            (24, "F"),
            (25, CROSSED_WITHOUT_CONTACT),
            (27, "E"),
            (30, "x-"),
            (32, "H"),
            (34, "i"),
        ] {
            t.set_slot(n, v, &o).unwrap();
        }
        t
    }

    #[test]
    fn fresh_transcription_is_empty() {
        let t = Transcription::new();
        assert!(t.is_empty());
        assert_eq!(t.value(8), NULL_SYMBOL);
        assert_eq!(t.value(9), "/");
        assert_eq!(t.value(16), "1");
        assert_eq!(t.value(31), "4");
        assert_eq!(t.value(2), "");
    }

    #[test]
    fn single_edit_makes_it_non_empty() {
        for n in (2..=SLOT_COUNT).filter(|n| !CONSTANT_SLOTS.contains(n)) {
            let mut t = Transcription::new();
            let symbol = schema::legal_alphabet(n)[0];
            t.set_slot(n, symbol, &opts()).unwrap();
            assert!(!t.is_empty(), "slot {n} edit should make it non-empty");
        }
        let mut t = Transcription::new();
        t.set_forearm(true);
        assert!(!t.is_empty());
    }

    #[test]
    fn constant_slots_reject_edits_in_every_mode() {
        for mode in [opts(), TranscriptionOptions::unrestricted()] {
            for n in CONSTANT_SLOTS {
                let mut t = Transcription::new();
                let before = t.value(n).to_string();
                let err = t.set_slot(n, &before, &mode).unwrap_err();
                assert!(matches!(err, CoreError::ConstantSlot { slot } if slot == n));
                assert!(err.is_validation());
                assert_eq!(t.value(n), before);
            }
        }
    }

    #[test]
    fn illegal_symbol_keeps_previous_value() {
        let mut t = Transcription::new();
        t.set_slot(2, "L", &opts()).unwrap();
        let err = t.set_slot(2, "Q", &opts()).unwrap_err();
        assert!(matches!(err, CoreError::IllegalSymbol { slot: 2, .. }));
        assert_eq!(t.value(2), "L");
    }

    #[test]
    fn unrestricted_mode_waives_alphabet() {
        let mut t = Transcription::new();
        t.set_slot(2, "Q", &TranscriptionOptions::unrestricted())
            .unwrap();
        assert_eq!(t.value(2), "Q");
    }

    #[test]
    fn set_slot_leaves_flags_alone() {
        let mut t = Transcription::new();
        t.set_uncertain(17, true);
        t.set_slot(17, "F", &opts()).unwrap();
        assert!(t.flags(17).uncertain);
        assert!(!t.flags(17).estimate);
    }

    #[test]
    fn enter_slot_normalizes() {
        let mut t = Transcription::new();
        t.enter_slot(20, "z", &opts()).unwrap();
        assert_eq!(t.value(20), "x-");
        t.enter_slot(4, "f", &opts()).unwrap();
        assert_eq!(t.value(4), "F");
    }

    #[test]
    fn serialize_layout() {
        let code = Transcription::new().to_code(&opts()).unwrap();
        assert_eq!(
            code,
            "[_]1[____]2[__\u{2205}/______]3[1___]4[_2___]5[_3___]6[_4___]7"
        );

        let code = sample().to_string();
        assert!(code.starts_with("[V]1[O=EH]2[tp\u{2205}/fd1-__]3"));
        assert!(code.contains("[x+2iFF]5"));
    }

    #[test]
    fn round_trip() {
        for t in [Transcription::new(), sample()] {
            let code = t.to_code(&opts()).unwrap();
            let parsed = Transcription::parse(&code, &opts()).unwrap();
            assert_eq!(parsed, t);
        }
    }

    #[test]
    fn round_trip_with_custom_blank() {
        let options = TranscriptionOptions {
            blank: '.',
            ..opts()
        };
        options.validate().unwrap();
        let code = sample().to_code(&options).unwrap();
        assert!(code.contains('.'));
        assert_eq!(Transcription::parse(&code, &options).unwrap(), sample());
    }

    #[test]
    fn round_trip_every_symbol_in_every_slot() {
        for slot in schema::slots().filter(|s| !s.is_constant()) {
            for &symbol in slot.alphabet() {
                let mut t = sample();
                t.set_slot(slot.number, symbol, &opts()).unwrap();
                let code = t.to_code(&opts()).unwrap();
                let parsed = Transcription::parse(&code, &opts())
                    .unwrap_or_else(|e| panic!("slot {} '{symbol}': {e}", slot.number));
                assert_eq!(parsed, t, "slot {} '{symbol}' via {code}", slot.number);
            }
        }
    }

    #[test]
    fn ambiguous_blank_marker_is_rejected_both_ways() {
        let dash = TranscriptionOptions { blank: '-', ..opts() };
        let mut t = Transcription::new();
        t.set_slot(6, "-", &opts()).unwrap();

        let err = t.to_code(&dash).unwrap_err();
        assert!(matches!(err, CoreError::InvalidOptions(_)));

        let code = t.to_code(&opts()).unwrap();
        assert!(matches!(
            Transcription::parse(&code, &dash).unwrap_err(),
            CoreError::InvalidOptions(_)
        ));
        assert_eq!(Transcription::parse(&code, &opts()).unwrap().value(6), "-");
    }

    #[test]
    fn slot_one_keeps_unrestricted_marker() {
        let mut t = Transcription::new();
        assert!(t.set_slot(1, "*", &opts()).is_err());
        t.set_slot(1, "*", &TranscriptionOptions::unrestricted()).unwrap();
        assert_eq!(t.value(1), "*");
        assert!(t.forearm());

        let code = t.to_code(&opts()).unwrap();
        assert!(code.starts_with("[*]1"));
        assert!(Transcription::parse(&code, &opts()).is_err());
        assert_eq!(
            Transcription::parse(&code, &TranscriptionOptions::unrestricted()).unwrap(),
            t
        );
    }

    #[test]
    fn parse_rejects_illegal_symbol() {
        let code = sample().to_string().replace("[O=EH]2", "[Q=EH]2");
        let err = Transcription::parse(&code, &opts()).unwrap_err();
        assert!(matches!(err, CoreError::Format { .. }));

        let lenient = Transcription::parse(&code, &TranscriptionOptions::unrestricted()).unwrap();
        assert_eq!(lenient.value(2), "Q");
    }

    #[test]
    fn parse_rejects_bad_constant() {
        let code = Transcription::new().to_string().replace("[1___]4", "[7___]4");
        assert!(Transcription::parse(&code, &TranscriptionOptions::unrestricted()).is_err());
    }

    #[test]
    fn parse_rejects_field_count_mismatch() {
        assert!(Transcription::parse("[_]1[____]2", &opts()).is_err());
        let code = Transcription::new().to_string().replace("[____]2", "[___]2");
        assert!(Transcription::parse(&code, &opts()).is_err());
    }

    #[test]
    fn equality_ignores_flags_and_diff_lists_slots() {
        let a = sample();
        let mut b = sample();
        b.set_estimate(4, true);
        assert_eq!(a, b);

        b.set_slot(4, "F", &opts()).unwrap();
        b.set_forearm(false);
        assert_eq!(a.diff(&b), vec![1, 4]);
    }

    #[test]
    fn clear_keeps_flags_and_constants() {
        let mut t = sample();
        t.set_uncertain(5, true);
        t.clear();
        assert!(t.is_empty());
        assert!(t.flags(5).uncertain);
        assert_eq!(t.value(21), "2");
    }

    #[test]
    fn matches_treats_blank_as_wildcard() {
        let t = sample();
        let mut query = Transcription::new();
        assert!(t.matches(&query));
        query.set_slot(2, "O", &opts()).unwrap();
        assert!(t.matches(&query));
        query.set_slot(3, "<", &opts()).unwrap();
        assert!(!t.matches(&query));
    }

    #[test]
    fn blank_marker_validation() {
        assert!(opts().validate().is_ok());
        for bad in ['E', '-', ' ', '[', 'x'] {
            let o = TranscriptionOptions { blank: bad, ..opts() };
            assert!(o.validate().is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn json_round_trip_keeps_flags() {
        let mut t = sample();
        t.set_uncertain(17, true);
        t.set_estimate(20, true);
        let json = serde_json::to_string(&t).unwrap();
        let back: Transcription = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
        assert!(back.flags(17).uncertain);
        assert!(back.flags(20).estimate);
    }

    #[test]
    fn json_rejects_wrong_length() {
        let json = r#"{"slots": ["", "O"]}"#;
        assert!(serde_json::from_str::<Transcription>(json).is_err());
    }
}
