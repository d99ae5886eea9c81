//! Conversion of a handshape code into per-bone joint rotations.

use std::fmt;

use serde::Serialize;
use slpa_core::{Transcription, TranscriptionOptions};
use tracing::debug;

use crate::error::{HandCodeError, Result};
use crate::tables::{self, Finger, Flexion, Opposition, Side, Spread, ThumbSpread};

/// Blank marker used by the interchange format.
pub const INTERCHANGE_BLANK: char = '_';

/// A handshape code as exchanged with the renderer.
///
/// Symbols are not checked against the slot alphabets when parsing; unknown
/// symbols surface as [`HandCodeError::NotFound`] when posing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandCode {
    transcription: Transcription,
}

impl HandCode {
    /// Parse the seven-field bracketed blob, e.g. the contents of `handCode.txt`.
    pub fn parse(blob: &str) -> Result<Self> {
        let options = TranscriptionOptions {
            blank: INTERCHANGE_BLANK,
            ..TranscriptionOptions::unrestricted()
        };
        Ok(Self {
            transcription: Transcription::parse(blob, &options)?,
        })
    }

    pub fn from_transcription(transcription: &Transcription) -> Self {
        Self {
            transcription: transcription.clone(),
        }
    }

    fn symbol(&self, slot: usize) -> &str {
        self.transcription.value(slot)
    }

    fn lookup<T>(&self, slot: usize, parse: fn(&str) -> Option<T>) -> Result<T> {
        let symbol = self.symbol(slot);
        parse(symbol).ok_or_else(|| HandCodeError::NotFound {
            slot,
            symbol: symbol.to_string(),
        })
    }
}

impl fmt::Display for HandCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = [0u8; 4];
        f.write_str(&self.transcription.render(INTERCHANGE_BLANK.encode_utf8(&mut buf)))
    }
}

/// Rotation of one joint in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct JointRotation {
    pub adduction: i32,
    pub rotation: i32,
    pub flexion: i32,
}

impl JointRotation {
    pub fn new(adduction: i32, rotation: i32, flexion: i32) -> Self {
        Self {
            adduction,
            rotation,
            flexion,
        }
    }

    fn from_array([adduction, rotation, flexion]: [i32; 3]) -> Self {
        Self::new(adduction, rotation, flexion)
    }

    /// `[adduction, rotation, flexion]` in radians.
    pub fn to_radians(self) -> [f64; 3] {
        [self.adduction, self.rotation, self.flexion].map(|d| f64::from(d).to_radians())
    }
}

/// A named bone and its rotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Joint {
    pub bone: String,
    #[serde(flatten)]
    pub rotation: JointRotation,
}

/// Ordered joint rotations for one hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandPose {
    pub side: Side,
    pub joints: Vec<Joint>,
}

impl HandPose {
    pub fn get(&self, bone: &str) -> Option<JointRotation> {
        self.joints
            .iter()
            .find(|j| j.bone == bone)
            .map(|j| j.rotation)
    }
}

impl fmt::Display for HandPose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for joint in &self.joints {
            let r = joint.rotation;
            writeln!(
                f,
                "{:<20} adduction {:>4}  rotation {:>4}  flexion {:>4}",
                joint.bone, r.adduction, r.rotation, r.flexion
            )?;
        }
        Ok(())
    }
}

fn finger_bone(finger: Finger, joint: usize, side: Side) -> String {
    format!("finger_{}.0{joint}.{side}", finger.name())
}

fn finger_joints(
    code: &HandCode,
    finger: Finger,
    side: Side,
    joints: &mut Vec<Joint>,
) -> Result<()> {
    let first = finger.first_slot();

    if finger == Finger::Index {
        for (i, slot) in (first + 1..=first + 3).enumerate() {
            let flexion = tables::finger_flexion(side, code.lookup(slot, Flexion::from_symbol)?);
            joints.push(Joint {
                bone: finger_bone(finger, i + 1, side),
                rotation: JointRotation::new(0, 0, flexion[i]),
            });
        }
        return Ok(());
    }

    let spread = code.lookup(first, Spread::from_symbol)?;
    let abduction = tables::abduction(side, finger, spread);
    let rotation = tables::rotation(side, finger, spread);
    for (i, slot) in (first + 2..=first + 4).enumerate() {
        let flexion = tables::finger_flexion(side, code.lookup(slot, Flexion::from_symbol)?);
        let adduction = if i == 0 { abduction } else { 0 };
        joints.push(Joint {
            bone: finger_bone(finger, i + 1, side),
            rotation: JointRotation::new(adduction, rotation, flexion[i]),
        });
    }
    Ok(())
}

fn thumb_joints(code: &HandCode, side: Side, joints: &mut Vec<Joint>) -> Result<()> {
    let opposition = code.lookup(2, Opposition::from_symbol)?;
    let spread = code.lookup(3, ThumbSpread::from_symbol)?;
    joints.push(Joint {
        bone: format!("thumb.01.{side}.001"),
        rotation: JointRotation::from_array(tables::thumb_base(side, opposition, spread)),
    });

    for (i, slot) in [4, 5].into_iter().enumerate() {
        let flexion = code.lookup(slot, Flexion::from_symbol)?;
        let pair = tables::thumb_flexion(side, opposition, flexion).ok_or_else(|| {
            HandCodeError::NotFound {
                slot,
                symbol: code.symbol(slot).to_string(),
            }
        })?;
        joints.push(Joint {
            bone: format!("thumb.0{}.{side}", i + 2),
            rotation: JointRotation::new(0, 0, pair[i]),
        });
    }
    Ok(())
}

/// Joint rotations for every finger bone, then the thumb.
///
/// Fails on the first symbol without a table entry.
pub fn pose(code: &HandCode, side: Side) -> Result<HandPose> {
    let mut joints = Vec::with_capacity(15);
    for finger in Finger::ALL {
        finger_joints(code, finger, side, &mut joints)?;
    }
    thumb_joints(code, side, &mut joints)?;
    debug!(side = %side, joints = joints.len(), "posed hand");
    Ok(HandPose { side, joints })
}
