//! Inter-annotator reliability for SLPA transcriptions.
//!
//! Two annotators' sheets are read with [`reader::read_sheet`] and compared
//! word by word over named slot sections. See [`analyzer`] for the scoring
//! rules.

pub mod analyzer;
pub mod error;
pub mod reader;
pub mod report;
pub mod section;

pub use analyzer::{
    compare, compare_many, compare_sheets, compare_word, Agreement, ReliabilityOptions,
    SectionScore,
};
pub use error::{ReliabilityError, Result};
pub use reader::{parse_sheet, read_sheet, AnnotatorSheet};
pub use report::{BatchReport, WordReport};
pub use section::{Section, SectionSelector, SECTIONS};
