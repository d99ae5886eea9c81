//! Error types for reliability input and comparison.

use std::path::PathBuf;

use slpa_core::CoreError;

/// Errors that can occur while reading annotator sheets or comparing them.
#[derive(Debug, thiserror::Error)]
pub enum ReliabilityError {
    /// A record that cannot be split into four transcriptions.
    #[error("row {row}: {detail}")]
    Format {
        /// 1-based line number in the input (the header is line 1).
        row: usize,
        /// Description of the problem.
        detail: String,
    },

    /// Word missing from one or both sheets.
    #[error("word '{word}' is not present in both sheets")]
    NotFound { word: String },

    /// Section number outside 1..=20.
    #[error("no reliability section numbered {0}")]
    UnknownSection(usize),

    /// Sheet file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type for reliability operations.
pub type Result<T> = std::result::Result<T, ReliabilityError>;
