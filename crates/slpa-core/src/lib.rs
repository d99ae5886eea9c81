//! Transcription model for SLPA handshape annotation.
//!
//! A handshape is transcribed into 34 ordered slots grouped into seven
//! fields (forearm, thumb, thumb/finger contact, and the four fingers). Each
//! slot accepts its own alphabet, six slots hold fixed symbols, and the
//! finger-crossing slots accept the digraphs `x+` and `x-`.
//!
//! The slot table lives in [`schema`]; [`Transcription`] is the validated
//! record and its bracketed code `[..]1[..]2..[..]7` is the durable form.
//! Signs group four transcriptions (two configurations for each hand) and a
//! [`Corpus`] keys them by gloss.

pub mod code;
pub mod constraints;
pub mod corpus;
pub mod error;
pub mod export;
pub mod schema;
pub mod sign;
pub mod transcription;

pub use constraints::{check, Constraint, ConstraintSet, Violation};
pub use corpus::Corpus;
pub use error::{CoreError, Result};
pub use export::{export_csv, ExportOptions};
pub use schema::{Field, Slot, SLOT_COUNT};
pub use sign::{FeatureVocabulary, HandConfig, MajorFeatures, Sign};
pub use transcription::{EntryMode, SlotFlags, Transcription, TranscriptionOptions};
