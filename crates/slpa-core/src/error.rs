//! Error types for transcription, corpus, and export operations.

/// Errors that can occur in the transcription model and corpus.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The slot holds a fixed symbol and cannot be edited.
    #[error("slot {slot} is constant and cannot be changed")]
    ConstantSlot {
        /// Slot number (1-based).
        slot: usize,
    },

    /// The value is not in the slot's legal alphabet.
    #[error("'{value}' is not a legal symbol for slot {slot}")]
    IllegalSymbol {
        /// Slot number (1-based).
        slot: usize,
        /// The rejected value.
        value: String,
    },

    /// A major feature value outside the configured vocabulary.
    #[error("'{value}' is not a recognised {feature}")]
    UnknownFeature {
        /// Feature name (e.g. "movement").
        feature: &'static str,
        /// The rejected value.
        value: String,
    },

    /// Transcription options that would make the notation ambiguous.
    #[error("invalid transcription options: {0}")]
    InvalidOptions(String),

    /// Malformed serialized transcription or record.
    #[error("format error: {detail}")]
    Format {
        /// Description of the problem.
        detail: String,
    },

    /// Lookup of an unknown key.
    #[error("{what} not found: {key}")]
    NotFound {
        /// Kind of thing looked up (e.g. "gloss").
        what: &'static str,
        /// The key that was missing.
        key: String,
    },

    /// Gloss collision on corpus insert.
    #[error("gloss '{0}' already exists in the corpus")]
    Duplicate(String),

    /// Corpus file content hash mismatch.
    #[error("integrity check failed: expected {expected}, got {actual}")]
    IntegrityFailed { expected: String, actual: String },

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error reading or writing corpus files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    pub(crate) fn format(detail: impl Into<String>) -> Self {
        CoreError::Format {
            detail: detail.into(),
        }
    }

    /// Whether this error rejects an edit (the stored value is unchanged).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CoreError::ConstantSlot { .. }
                | CoreError::IllegalSymbol { .. }
                | CoreError::UnknownFeature { .. }
        )
    }
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = CoreError::ConstantSlot { slot: 8 };
        assert_eq!(err.to_string(), "slot 8 is constant and cannot be changed");

        let err = CoreError::IllegalSymbol {
            slot: 2,
            value: "Q".into(),
        };
        assert!(err.to_string().contains("slot 2"));
    }

    #[test]
    fn validation_classification() {
        assert!(CoreError::ConstantSlot { slot: 9 }.is_validation());
        assert!(!CoreError::Duplicate("HOUSE".into()).is_validation());
        assert!(!CoreError::format("bad").is_validation());
    }
}
