//! Static rotation tables, in degrees.
//!
//! Finger and thumb tables are indexed by the symbol enums below. Flexion is
//! tabulated separately for each hand; abduction and rotation are tabulated
//! for the left hand and mirrored for the right.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HandCodeError;

/// Which hand is posed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    #[serde(rename = "L")]
    Left,
    #[serde(rename = "R")]
    Right,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Left, Side::Right];

    /// Bone-name suffix.
    pub fn letter(self) -> &'static str {
        match self {
            Side::Left => "L",
            Side::Right => "R",
        }
    }

    fn sign(self) -> i32 {
        match self {
            Side::Left => 1,
            Side::Right => -1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter())
    }
}

impl FromStr for Side {
    type Err = HandCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "l" | "left" => Ok(Side::Left),
            "r" | "right" => Ok(Side::Right),
            _ => Err(HandCodeError::UnknownSide(s.to_string())),
        }
    }
}

/// The four fingers, in posing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Finger {
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Finger; 4] = [Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky];

    pub fn name(self) -> &'static str {
        match self {
            Finger::Index => "index",
            Finger::Middle => "middle",
            Finger::Ring => "ring",
            Finger::Pinky => "pinky",
        }
    }

    /// First slot of the finger's field.
    pub fn first_slot(self) -> usize {
        match self {
            Finger::Index => 16,
            Finger::Middle => 20,
            Finger::Ring => 25,
            Finger::Pinky => 30,
        }
    }
}

/// Joint flexion symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flexion {
    /// `H`
    Hyperextended,
    /// `E`
    Extended,
    /// `e`
    SlightlyExtended,
    /// `i`
    Intermediate,
    /// `f`
    SlightlyFlexed,
    /// `F`
    Flexed,
    Blank,
}

impl Flexion {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Some(match symbol {
            "H" => Flexion::Hyperextended,
            "E" => Flexion::Extended,
            "e" => Flexion::SlightlyExtended,
            "i" => Flexion::Intermediate,
            "f" => Flexion::SlightlyFlexed,
            "F" => Flexion::Flexed,
            "" => Flexion::Blank,
            _ => return None,
        })
    }
}

/// Finger spread symbol, from the crossing slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Spread {
    /// `x`
    Crossed,
    /// `=`
    Adducted,
    /// `<`
    Neutral,
    /// `{`
    Spread,
    Blank,
}

impl Spread {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Some(match symbol {
            "x" => Spread::Crossed,
            "=" => Spread::Adducted,
            "<" => Spread::Neutral,
            "{" => Spread::Spread,
            "" => Spread::Blank,
            _ => return None,
        })
    }
}

/// Thumb opposition symbol (slot 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opposition {
    /// `U`
    Unopposed,
    /// `O`
    Opposed,
    /// `L`
    Lateral,
}

impl Opposition {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "U" => Some(Opposition::Unopposed),
            "O" => Some(Opposition::Opposed),
            "L" => Some(Opposition::Lateral),
            _ => None,
        }
    }
}

/// Thumb spread symbol (slot 3). Only `=` and `<` have a base pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThumbSpread {
    Adducted,
    Neutral,
}

impl ThumbSpread {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "=" => Some(ThumbSpread::Adducted),
            "<" => Some(ThumbSpread::Neutral),
            _ => None,
        }
    }
}

// [side][flexion] -> [proximal, medial, distal]
static FINGER_FLEXION: [[[i32; 3]; 7]; 2] = [
    [
        [25, 15, 10],
        [7, 5, 5],
        [5, 0, 0],
        [-30, -35, -40],
        [-30, -35, -40],
        [-80, -90, -75],
        [0, 0, 0],
    ],
    [
        [-25, -15, -10],
        [-7, -5, -5],
        [-5, 0, 0],
        [30, 35, 40],
        [30, 35, 40],
        [80, 90, 75],
        [0, 0, 0],
    ],
];

// Left hand, [middle, ring, pinky][spread]
static ABDUCTION: [[i32; 5]; 3] = [
    [-30, 0, 10, 15, 0],
    [-25, 0, 10, 15, 0],
    [-25, 0, 10, 15, 0],
];

static ROTATION: [[i32; 5]; 3] = [
    [-10, 0, 5, 7, 0],
    [-10, 0, -5, -7, 0],
    [-10, 0, -10, -12, 0],
];

// [side][opposition][spread] -> [adduction, rotation, flexion]
static THUMB_BASE: [[[[i32; 3]; 2]; 3]; 2] = [
    [
        [[-10, -25, 0], [10, -25, 0]],
        [[15, -20, 5], [5, -20, -10]],
        [[15, 20, 5], [-35, 20, -10]],
    ],
    [
        [[-10, -25, 0], [10, -25, 0]],
        [[-45, -20, 30], [-5, -20, 50]],
        [[-12, 20, -5], [30, 20, 10]],
    ],
];

// [side][opposed, lateral, other][flexion] -> [02 joint, 03 joint]
// The thumb has no `f` entry.
static THUMB_FLEXION: [[[Option<[i32; 2]>; 7]; 3]; 2] = [
    [
        [
            Some([-20, -10]),
            Some([-10, -5]),
            Some([15, 15]),
            Some([30, 25]),
            None,
            Some([80, 25]),
            Some([0, 0]),
        ],
        [
            Some([-20, -10]),
            Some([-10, -5]),
            Some([15, 15]),
            Some([30, 25]),
            None,
            Some([85, 35]),
            Some([0, 0]),
        ],
        [
            Some([0, 0]),
            Some([50, 0]),
            Some([0, 0]),
            Some([60, 0]),
            None,
            Some([80, 0]),
            Some([0, 0]),
        ],
    ],
    [
        [
            Some([20, -10]),
            Some([10, -5]),
            Some([-15, 15]),
            Some([-30, 25]),
            None,
            Some([-80, 25]),
            Some([0, 0]),
        ],
        [
            Some([20, -10]),
            Some([10, -5]),
            Some([-15, 15]),
            Some([-30, 25]),
            None,
            Some([-85, 35]),
            Some([0, 0]),
        ],
        [
            Some([0, 0]),
            Some([50, 0]),
            Some([0, 0]),
            Some([60, 0]),
            None,
            Some([80, 0]),
            Some([0, 0]),
        ],
    ],
];

/// Proximal, medial and distal flexion for a symbol.
pub fn finger_flexion(side: Side, flexion: Flexion) -> [i32; 3] {
    FINGER_FLEXION[side as usize][flexion as usize]
}

fn spread_row(finger: Finger) -> Option<usize> {
    match finger {
        Finger::Index => None,
        Finger::Middle => Some(0),
        Finger::Ring => Some(1),
        Finger::Pinky => Some(2),
    }
}

/// Base-joint abduction. The index finger has none.
pub fn abduction(side: Side, finger: Finger, spread: Spread) -> i32 {
    spread_row(finger).map_or(0, |row| side.sign() * ABDUCTION[row][spread as usize])
}

/// Axial rotation applied to every joint of the finger. The index finger has none.
pub fn rotation(side: Side, finger: Finger, spread: Spread) -> i32 {
    spread_row(finger).map_or(0, |row| side.sign() * ROTATION[row][spread as usize])
}

/// Thumb base joint pose.
pub fn thumb_base(side: Side, opposition: Opposition, spread: ThumbSpread) -> [i32; 3] {
    THUMB_BASE[side as usize][opposition as usize][spread as usize]
}

/// Thumb flexion pair; the table is chosen by the thumb's opposition.
pub fn thumb_flexion(side: Side, opposition: Opposition, flexion: Flexion) -> Option<[i32; 2]> {
    let table = match opposition {
        Opposition::Opposed => 0,
        Opposition::Lateral => 1,
        Opposition::Unopposed => 2,
    };
    THUMB_FLEXION[side as usize][table][flexion as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPREADS: [Spread; 5] = [
        Spread::Crossed,
        Spread::Adducted,
        Spread::Neutral,
        Spread::Spread,
        Spread::Blank,
    ];

    #[test]
    fn symbol_parsing() {
        assert_eq!(Flexion::from_symbol("i"), Some(Flexion::Intermediate));
        assert_eq!(Flexion::from_symbol(""), Some(Flexion::Blank));
        assert_eq!(Flexion::from_symbol("?"), None);
        assert_eq!(Spread::from_symbol("x+"), None);
        assert_eq!(Spread::from_symbol("\u{2327}"), None);
        assert_eq!(ThumbSpread::from_symbol("{"), None);
        assert_eq!(Opposition::from_symbol("?"), None);
        assert_eq!("r".parse::<Side>().unwrap(), Side::Right);
        assert!("up".parse::<Side>().is_err());
    }

    #[test]
    fn left_values() {
        assert_eq!(finger_flexion(Side::Left, Flexion::Flexed), [-80, -90, -75]);
        assert_eq!(abduction(Side::Left, Finger::Middle, Spread::Crossed), -30);
        assert_eq!(rotation(Side::Left, Finger::Pinky, Spread::Spread), -12);
        assert_eq!(
            thumb_base(Side::Left, Opposition::Lateral, ThumbSpread::Neutral),
            [-35, 20, -10]
        );
        assert_eq!(
            thumb_flexion(Side::Left, Opposition::Lateral, Flexion::Flexed),
            Some([85, 35])
        );
    }

    #[test]
    fn right_hand_mirrors_abduction_and_rotation() {
        for finger in Finger::ALL {
            for spread in SPREADS {
                assert_eq!(
                    abduction(Side::Right, finger, spread),
                    -abduction(Side::Left, finger, spread)
                );
                assert_eq!(
                    rotation(Side::Right, finger, spread),
                    -rotation(Side::Left, finger, spread)
                );
            }
        }
    }

    #[test]
    fn index_has_no_spread_degrees() {
        for spread in SPREADS {
            assert_eq!(abduction(Side::Left, Finger::Index, spread), 0);
            assert_eq!(rotation(Side::Right, Finger::Index, spread), 0);
        }
    }

    #[test]
    fn thumb_tables_are_per_side() {
        assert_eq!(
            thumb_base(Side::Right, Opposition::Opposed, ThumbSpread::Adducted),
            [-45, -20, 30]
        );
        assert_eq!(
            thumb_flexion(Side::Right, Opposition::Opposed, Flexion::Hyperextended),
            Some([20, -10])
        );
        assert_eq!(
            thumb_flexion(Side::Right, Opposition::Unopposed, Flexion::Intermediate),
            Some([60, 0])
        );
        assert_eq!(
            thumb_flexion(Side::Left, Opposition::Opposed, Flexion::SlightlyFlexed),
            None
        );
    }
}
