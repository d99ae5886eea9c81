//! `slpa.toml` manifest parsing and project settings.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use slpa_core::{ConstraintSet, EntryMode, ExportOptions, FeatureVocabulary, TranscriptionOptions};
use slpa_reliability::ReliabilityOptions;

/// File name searched for by [`SlpaManifest::find_and_load`].
pub const MANIFEST_FILE: &str = "slpa.toml";

/// The top-level manifest of an annotation project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlpaManifest {
    #[serde(default)]
    pub project: ProjectConfig,
    #[serde(default)]
    pub transcription: TranscriptionConfig,
    #[serde(default)]
    pub constraints: ConstraintSet,
    #[serde(default)]
    pub export: ExportOptions,
    #[serde(default)]
    pub features: FeatureVocabulary,
    #[serde(default)]
    pub reliability: ReliabilityOptions,
}

/// Project metadata section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
    /// Corpus file, relative to the manifest directory.
    #[serde(default)]
    pub corpus: Option<String>,
}

/// Transcription entry settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptionConfig {
    /// Accept any symbol on editable slots.
    pub unrestricted: bool,
    /// Blank marker, a single character.
    pub blank: String,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            unrestricted: false,
            blank: "_".to_string(),
        }
    }
}

impl SlpaManifest {
    /// Search upward from `start_dir` for `slpa.toml`, returning it with the
    /// directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(MANIFEST_FILE);
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let manifest: SlpaManifest = toml::from_str(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                return Ok(Some((manifest, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing slpa.toml")
    }

    /// Transcription options, with the blank marker checked.
    pub fn transcription_options(&self) -> Result<TranscriptionOptions> {
        let mut chars = self.transcription.blank.chars();
        let blank = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => bail!(
                "transcription.blank must be a single character, got {:?}",
                self.transcription.blank
            ),
        };
        let options = TranscriptionOptions {
            mode: if self.transcription.unrestricted {
                EntryMode::Unrestricted
            } else {
                EntryMode::Restricted
            },
            blank,
        };
        options.validate().context("invalid [transcription] settings")?;
        Ok(options)
    }

    /// Generate the default template for `slpa init`.
    pub fn template(name: &str) -> String {
        format!(
            r#"[project]
name = "{name}"
corpus = "corpus.json"

[transcription]
unrestricted = false
blank = "_"

[constraints]
medial-hyperextension = true
blank-slot = false
nonstandard-symbol = true

[export]
blank = "_"
crossed-without-contact = "X"

[features]
major-locations = []
minor-locations = []
movements = []
orientations = []

[reliability]
exclude-constants = true
"#
        )
    }
}
