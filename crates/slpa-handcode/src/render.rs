//! Inputs handed to the external hand renderer.
//!
//! The renderer reads the handshape code from `handCode.txt` in a working
//! directory and takes the hand side and an RGB colour alongside it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::codec::HandCode;
use crate::error::{HandCodeError, Result};
use crate::tables::Side;

/// File name the renderer reads the code from.
pub const HAND_CODE_FILE: &str = "handCode.txt";

/// Everything the renderer needs besides the working directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderRequest {
    pub code: String,
    pub side: Side,
    /// RGB, each channel in 0..=1.
    pub color: [f32; 3],
}

impl RenderRequest {
    pub fn new(code: &HandCode, side: Side, color: [f32; 3]) -> Result<Self> {
        for (channel, value) in color.iter().copied().enumerate() {
            if !(0.0..=1.0).contains(&value) {
                return Err(HandCodeError::InvalidColor { channel, value });
            }
        }
        Ok(Self {
            code: code.to_string(),
            side,
            color,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Write `handCode.txt` into `dir`, returning its path.
pub fn write_interchange(dir: &Path, code: &HandCode) -> Result<PathBuf> {
    let path = dir.join(HAND_CODE_FILE);
    std::fs::write(&path, code.to_string())?;
    info!(path = %path.display(), "wrote handshape code");
    Ok(path)
}

/// Read a code back from `handCode.txt` in `dir`.
pub fn read_interchange(dir: &Path) -> Result<HandCode> {
    let blob = std::fs::read_to_string(dir.join(HAND_CODE_FILE))?;
    HandCode::parse(&blob)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CODE: &str = "[V]1[L<EE]2[__\u{2205}/______]3[1FFF]4[=2FFF]5[=3FFF]6[=4FFF]7";

    #[test]
    fn interchange_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let code = HandCode::parse(CODE).unwrap();
        let path = write_interchange(dir.path(), &code).unwrap();
        assert!(path.ends_with(HAND_CODE_FILE));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), CODE);
        assert_eq!(read_interchange(dir.path()).unwrap(), code);
    }

    #[test]
    fn request_json() {
        let code = HandCode::parse(CODE).unwrap();
        let request = RenderRequest::new(&code, Side::Right, [1.0, 0.5, 0.0]).unwrap();
        let json: serde_json::Value = serde_json::from_str(&request.to_json().unwrap()).unwrap();
        assert_eq!(json["side"], "R");
        assert_eq!(json["code"], CODE);
        assert_eq!(json["color"][1], 0.5);
    }

    #[test]
    fn colour_out_of_range() {
        let code = HandCode::parse(CODE).unwrap();
        let err = RenderRequest::new(&code, Side::Left, [0.0, 1.5, 0.0]).unwrap_err();
        assert!(matches!(err, HandCodeError::InvalidColor { channel: 1, .. }));
    }
}
