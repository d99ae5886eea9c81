//! Error types for handshape code conversion.

use slpa_core::CoreError;

/// Errors that can occur while reading a handshape code or posing a hand.
#[derive(Debug, thiserror::Error)]
pub enum HandCodeError {
    /// A symbol with no entry in the rotation tables. No default pose is used.
    #[error("no rotation entry for '{symbol}' in slot {slot}")]
    NotFound {
        /// Slot number (1-based).
        slot: usize,
        /// The symbol that was looked up (empty for blank).
        symbol: String,
    },

    /// Malformed handshape code.
    #[error("invalid handshape code: {0}")]
    Code(#[from] CoreError),

    /// Hand side other than `L` or `R`.
    #[error("unknown hand side '{0}' (expected L or R)")]
    UnknownSide(String),

    /// Colour channel outside 0..=1.
    #[error("colour channel {channel} is out of range: {value}")]
    InvalidColor { channel: usize, value: f32 },

    /// I/O error writing the interchange file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for handshape operations.
pub type Result<T> = std::result::Result<T, HandCodeError>;
