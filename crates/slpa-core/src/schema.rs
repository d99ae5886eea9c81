//! Static slot schema for the 34-slot handshape transcription.
//!
//! The layout is fixed by linguistic convention:
//! - **Field 1** (slot 1): forearm involvement, a checkbox rendered as `V`.
//! - **Field 2** (slots 2-5): thumb opposition, abduction and flexion.
//! - **Field 3** (slots 6-15): thumb/finger contact.
//! - **Fields 4-7** (slots 16-34): index, middle, ring and pinky fingers.
//!
//! Slots 8, 9, 16, 21, 26 and 31 are constant. Slots 20, 25 and 30 describe
//! finger crossing and are the only slots whose alphabet contains two-character
//! tokens (`x+`, `x-`).

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Number of slots in a transcription.
pub const SLOT_COUNT: usize = 34;

/// Number of fields in a transcription.
pub const FIELD_COUNT: usize = 7;

/// Slots holding a fixed symbol.
pub const CONSTANT_SLOTS: [usize; 6] = [8, 9, 16, 21, 26, 31];

/// Finger-crossing slots that accept the `x+` / `x-` digraphs.
pub const CROSSING_SLOTS: [usize; 3] = [20, 25, 30];

/// Medial (PIP) joint slots of the four fingers.
pub const MEDIAL_JOINT_SLOTS: [usize; 4] = [18, 23, 28, 33];

/// Slots that take a joint flexion symbol.
pub const FLEXION_SLOTS: [usize; 14] = [4, 5, 17, 18, 19, 22, 23, 24, 27, 28, 29, 32, 33, 34];

/// Rendering of a checked forearm box.
pub const FOREARM_SYMBOL: &str = "V";

/// Constant symbol of slot 8.
pub const NULL_SYMBOL: &str = "\u{2205}";

/// "Crossed without contact" symbol used in the crossing slots.
pub const CROSSED_WITHOUT_CONTACT: &str = "\u{2327}";

/// A transcription field: a contiguous group of slots sharing a body part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Field {
    Forearm,
    Thumb,
    ThumbFingerContact,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Field {
    /// All fields in transcription order.
    pub const ALL: [Field; FIELD_COUNT] = [
        Field::Forearm,
        Field::Thumb,
        Field::ThumbFingerContact,
        Field::Index,
        Field::Middle,
        Field::Ring,
        Field::Pinky,
    ];

    /// Field number (1-7), as written after the closing bracket.
    pub fn number(self) -> usize {
        self as usize + 1
    }

    /// Look up a field by its number.
    pub fn from_number(number: usize) -> Option<Field> {
        number
            .checked_sub(1)
            .and_then(|i| Self::ALL.get(i))
            .copied()
    }

    /// Human-readable field name.
    pub fn name(self) -> &'static str {
        match self {
            Field::Forearm => "Forearm",
            Field::Thumb => "Thumb",
            Field::ThumbFingerContact => "Thumb/finger contact",
            Field::Index => "Index finger",
            Field::Middle => "Middle finger",
            Field::Ring => "Ring finger",
            Field::Pinky => "Pinky finger",
        }
    }

    /// The slot numbers owned by this field.
    pub fn slots(self) -> RangeInclusive<usize> {
        match self {
            Field::Forearm => 1..=1,
            Field::Thumb => 2..=5,
            Field::ThumbFingerContact => 6..=15,
            Field::Index => 16..=19,
            Field::Middle => 20..=24,
            Field::Ring => 25..=29,
            Field::Pinky => 30..=34,
        }
    }

    /// Number of slots in this field.
    pub fn len(self) -> usize {
        let range = self.slots();
        range.end() - range.start() + 1
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (field {})", self.name(), self.number())
    }
}

/// Definition of a single transcription slot.
#[derive(Debug)]
pub struct Slot {
    /// Slot number (1-34).
    pub number: usize,
    /// The field this slot belongs to.
    pub field: Field,
    alphabet: &'static [&'static str],
    constant: Option<&'static str>,
    /// What the slot records.
    pub purpose: &'static str,
}

impl Slot {
    /// The symbols this slot accepts, besides the empty value.
    pub fn alphabet(&'static self) -> &'static [&'static str] {
        match &self.constant {
            Some(symbol) => std::slice::from_ref(symbol),
            None => self.alphabet,
        }
    }

    /// The fixed symbol of a constant slot.
    pub fn constant(&self) -> Option<&'static str> {
        self.constant
    }

    pub fn is_constant(&self) -> bool {
        self.constant.is_some()
    }

    /// Whether the slot accepts the crossing digraphs.
    pub fn is_crossing(&self) -> bool {
        CROSSING_SLOTS.contains(&self.number)
    }

    /// Whether `value` is legal here. Blank is legal on every editable slot.
    pub fn accepts(&'static self, value: &str) -> bool {
        match self.constant {
            Some(symbol) => value == symbol,
            None => value.is_empty() || self.alphabet().contains(&value),
        }
    }

    /// Apply the keystroke conventions of the annotation editor.
    ///
    /// Slot 2 upper-cases `l u o`, slot 7 upper-cases `m`, flexion slots
    /// upper-case `e f h`, and the crossing slots take `z`, `c` and `s` as
    /// stand-ins for `x-`, `x+` and the crossed-without-contact symbol.
    pub fn normalize(&self, raw: &str) -> String {
        let value = raw.trim();
        let upper = |allowed: &[&str]| {
            if allowed.contains(&value) {
                value.to_uppercase()
            } else {
                value.to_string()
            }
        };
        match self.number {
            1 => upper(&["v"]),
            2 => upper(&["l", "u", "o"]),
            7 => upper(&["m"]),
            n if FLEXION_SLOTS.contains(&n) => upper(&["e", "f", "h"]),
            n if CROSSING_SLOTS.contains(&n) => match value {
                "z" | "Z" => "x-".to_string(),
                "c" | "C" => "x+".to_string(),
                "s" | "S" => CROSSED_WITHOUT_CONTACT.to_string(),
                other => other.to_string(),
            },
            _ => value.to_string(),
        }
    }
}

const FOREARM: &[&str] = &[FOREARM_SYMBOL];
const OPPOSITION: &[&str] = &["L", "U", "O", "?"];
const THUMB_SPREAD: &[&str] = &["{", "<", "=", "x", "?"];
const FLEXION: &[&str] = &["H", "E", "i", "F", "?"];
const PINKY_FLEXION: &[&str] = &["H", "E", "i", "F"];
const SURFACE: &[&str] = &["-", "t", "f", "b", "r", "u", "?"];
const THUMB_BONE: &[&str] = &["-", "d", "t", "p", "M", "?"];
const FINGER_BONE: &[&str] = &["-", "d", "m", "p", "M", "?"];
const CROSSING: &[&str] = &["{", "<", "=", "x", "x+", "x-", CROSSED_WITHOUT_CONTACT, "?"];

const fn open(
    number: usize,
    field: Field,
    alphabet: &'static [&'static str],
    purpose: &'static str,
) -> Slot {
    Slot {
        number,
        field,
        alphabet,
        constant: None,
        purpose,
    }
}

const fn fixed(number: usize, field: Field, symbol: &'static str, purpose: &'static str) -> Slot {
    Slot {
        number,
        field,
        alphabet: &[],
        constant: Some(symbol),
        purpose,
    }
}

static SLOTS: [Slot; SLOT_COUNT] = [
    open(1, Field::Forearm, FOREARM, "Shows if forearm is involved"),
    open(2, Field::Thumb, OPPOSITION, "Thumb oppositional positions (CM rotation)"),
    open(3, Field::Thumb, THUMB_SPREAD, "Thumb abduction/adduction (CM adduction)"),
    open(4, Field::Thumb, FLEXION, "Thumb MCP flexion"),
    open(5, Field::Thumb, FLEXION, "Thumb DIP flexion"),
    open(6, Field::ThumbFingerContact, SURFACE, "Thumb surface options"),
    open(7, Field::ThumbFingerContact, THUMB_BONE, "Thumb bone options"),
    fixed(8, Field::ThumbFingerContact, NULL_SYMBOL, "Represents the thumb"),
    fixed(9, Field::ThumbFingerContact, "/", "Represents contact"),
    open(10, Field::ThumbFingerContact, SURFACE, "Finger surface options"),
    open(11, Field::ThumbFingerContact, FINGER_BONE, "Finger bone options"),
    open(12, Field::ThumbFingerContact, &["-", "1"], "Index/thumb contact"),
    open(13, Field::ThumbFingerContact, &["-", "2"], "Middle/thumb contact"),
    open(14, Field::ThumbFingerContact, &["-", "3"], "Ring/thumb contact"),
    open(15, Field::ThumbFingerContact, &["-", "4"], "Pinky/thumb contact"),
    fixed(16, Field::Index, "1", "Represents the index finger"),
    open(17, Field::Index, FLEXION, "Index MCP flexion"),
    open(18, Field::Index, FLEXION, "Index PIP flexion"),
    open(19, Field::Index, FLEXION, "Index DIP flexion"),
    open(20, Field::Middle, CROSSING, "Index/middle contact"),
    fixed(21, Field::Middle, "2", "Represents the middle finger"),
    open(22, Field::Middle, FLEXION, "Middle MCP flexion"),
    open(23, Field::Middle, FLEXION, "Middle PIP flexion"),
    open(24, Field::Middle, FLEXION, "Middle DIP flexion"),
    open(25, Field::Ring, CROSSING, "Middle/ring contact"),
    fixed(26, Field::Ring, "3", "Represents the ring finger"),
    open(27, Field::Ring, FLEXION, "Ring MCP flexion"),
    open(28, Field::Ring, FLEXION, "Ring PIP flexion"),
    open(29, Field::Ring, FLEXION, "Ring DIP flexion"),
    open(30, Field::Pinky, CROSSING, "Ring/pinky contact"),
    fixed(31, Field::Pinky, "4", "Represents the pinky finger"),
    open(32, Field::Pinky, PINKY_FLEXION, "Pinky MCP flexion"),
    open(33, Field::Pinky, PINKY_FLEXION, "Pinky PIP flexion"),
    open(34, Field::Pinky, PINKY_FLEXION, "Pinky DIP flexion"),
];

/// Look up a slot definition.
///
/// # Panics
///
/// Panics if `number` is outside `1..=34`; slot numbers come from the fixed
/// layout, so an out-of-range number is a caller bug.
pub fn slot(number: usize) -> &'static Slot {
    match number.checked_sub(1).and_then(|i| SLOTS.get(i)) {
        Some(slot) => slot,
        None => panic!("slot number {number} is outside 1..={SLOT_COUNT}"),
    }
}

/// All slot definitions in order.
pub fn slots() -> impl Iterator<Item = &'static Slot> {
    SLOTS.iter()
}

/// Legal symbols for a slot (the empty value is also accepted on editable slots).
pub fn legal_alphabet(number: usize) -> &'static [&'static str] {
    slot(number).alphabet()
}

pub fn is_constant(number: usize) -> bool {
    slot(number).is_constant()
}

/// The field a slot belongs to.
pub fn field_of(number: usize) -> Field {
    slot(number).field
}

/// Whether `symbol` is legal in at least one slot.
pub fn is_known_symbol(symbol: &str) -> bool {
    slots().any(|s| s.alphabet().contains(&symbol))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_ordered_and_complete() {
        for (i, s) in slots().enumerate() {
            assert_eq!(s.number, i + 1);
            assert!(s.field.slots().contains(&s.number));
        }
        assert_eq!(slots().count(), SLOT_COUNT);
    }

    #[test]
    fn fields_cover_all_slots() {
        let total: usize = Field::ALL.iter().map(|f| f.len()).sum();
        assert_eq!(total, SLOT_COUNT);
        let lengths: Vec<usize> = Field::ALL.iter().map(|f| f.len()).collect();
        assert_eq!(lengths, vec![1, 4, 10, 4, 5, 5, 5]);
        assert_eq!(Field::from_number(5), Some(Field::Middle));
        assert_eq!(Field::from_number(0), None);
        assert_eq!(Field::from_number(8), None);
    }

    #[test]
    fn exactly_six_constant_slots() {
        let constants: Vec<usize> = slots()
            .filter(|s| s.is_constant())
            .map(|s| s.number)
            .collect();
        assert_eq!(constants, CONSTANT_SLOTS.to_vec());
        assert_eq!(slot(8).constant(), Some(NULL_SYMBOL));
        assert_eq!(slot(9).constant(), Some("/"));
        assert_eq!(legal_alphabet(31), &["4"]);
    }

    #[test]
    fn field_lookup() {
        assert_eq!(field_of(1), Field::Forearm);
        assert_eq!(field_of(15), Field::ThumbFingerContact);
        assert_eq!(field_of(16), Field::Index);
        assert_eq!(field_of(30), Field::Pinky);
    }

    #[test]
    fn crossing_slots_take_digraphs() {
        for n in CROSSING_SLOTS {
            assert!(slot(n).is_crossing());
            assert!(slot(n).accepts("x+"));
            assert!(slot(n).accepts("x-"));
            assert!(slot(n).accepts(CROSSED_WITHOUT_CONTACT));
        }
        assert!(!slot(3).accepts("x+"));
        assert!(slot(3).accepts("x"));
    }

    #[test]
    fn accepts_is_case_sensitive() {
        assert!(slot(17).accepts("i"));
        assert!(!slot(17).accepts("I"));
        assert!(!slot(17).accepts("e"));
        assert!(slot(17).accepts(""));
        assert!(!slot(32).accepts("?"));
        assert!(!slot(8).accepts(""));
    }

    #[test]
    fn normalize_keystrokes() {
        assert_eq!(slot(2).normalize("o"), "O");
        assert_eq!(slot(7).normalize("m"), "M");
        assert_eq!(slot(11).normalize("m"), "m");
        assert_eq!(slot(22).normalize("h"), "H");
        assert_eq!(slot(22).normalize("i"), "i");
        assert_eq!(slot(20).normalize("z"), "x-");
        assert_eq!(slot(25).normalize("c"), "x+");
        assert_eq!(slot(30).normalize("s"), CROSSED_WITHOUT_CONTACT);
        assert_eq!(slot(1).normalize("v"), "V");
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn slot_zero_panics() {
        slot(0);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn slot_past_end_panics() {
        slot(35);
    }
}
