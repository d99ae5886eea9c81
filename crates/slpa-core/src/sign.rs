//! Lexical entries: a gloss, four transcriptions and the major features.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::transcription::Transcription;

/// One of the four configuration/hand combinations of a sign, in storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HandConfig {
    Config1Hand1,
    Config1Hand2,
    Config2Hand1,
    Config2Hand2,
}

impl HandConfig {
    pub const ALL: [HandConfig; 4] = [
        HandConfig::Config1Hand1,
        HandConfig::Config1Hand2,
        HandConfig::Config2Hand1,
        HandConfig::Config2Hand2,
    ];

    /// Position in a sign's transcription array.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Look up by 1-based menu number.
    pub fn from_number(number: usize) -> Option<HandConfig> {
        number
            .checked_sub(1)
            .and_then(|i| Self::ALL.get(i))
            .copied()
    }

    /// Configuration number (1 = start, 2 = end).
    pub fn config(self) -> u8 {
        match self {
            HandConfig::Config1Hand1 | HandConfig::Config1Hand2 => 1,
            HandConfig::Config2Hand1 | HandConfig::Config2Hand2 => 2,
        }
    }

    /// Hand number (1 or 2).
    pub fn hand(self) -> u8 {
        match self {
            HandConfig::Config1Hand1 | HandConfig::Config2Hand1 => 1,
            HandConfig::Config1Hand2 | HandConfig::Config2Hand2 => 2,
        }
    }

    /// Export column name, e.g. `config1hand2`.
    pub fn column(self) -> String {
        format!("config{}hand{}", self.config(), self.hand())
    }

    /// Report label, e.g. `Config-1 Hand-2`.
    pub fn label(self) -> String {
        format!("Config-{} Hand-{}", self.config(), self.hand())
    }
}

impl fmt::Display for HandConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Allowed values for the categorical major features.
///
/// An empty list places no restriction on that feature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct FeatureVocabulary {
    pub major_locations: Vec<String>,
    pub minor_locations: Vec<String>,
    pub movements: Vec<String>,
    pub orientations: Vec<String>,
}

fn admit(feature: &'static str, allowed: &[String], value: &str) -> Result<()> {
    if value.is_empty() || allowed.is_empty() || allowed.iter().any(|a| a == value) {
        Ok(())
    } else {
        Err(CoreError::UnknownFeature {
            feature,
            value: value.to_string(),
        })
    }
}

/// Major phonological features of a sign.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MajorFeatures {
    pub major_location: String,
    pub minor_location: String,
    pub movement: String,
    pub orientation: String,
}

impl MajorFeatures {
    /// Check every non-empty feature against the vocabulary.
    pub fn validate(&self, vocabulary: &FeatureVocabulary) -> Result<()> {
        admit("major location", &vocabulary.major_locations, &self.major_location)?;
        admit("minor location", &vocabulary.minor_locations, &self.minor_location)?;
        admit("movement", &vocabulary.movements, &self.movement)?;
        admit("orientation", &vocabulary.orientations, &self.orientation)
    }
}

/// A lexical entry of the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sign {
    pub gloss: String,
    pub transcriptions: [Transcription; 4],
    #[serde(default)]
    pub features: MajorFeatures,
}

impl Sign {
    /// A sign with four empty transcriptions.
    pub fn new(gloss: impl Into<String>) -> Self {
        Self {
            gloss: gloss.into().trim().to_string(),
            transcriptions: Default::default(),
            features: MajorFeatures::default(),
        }
    }

    pub fn transcription(&self, which: HandConfig) -> &Transcription {
        &self.transcriptions[which.index()]
    }

    pub fn transcription_mut(&mut self, which: HandConfig) -> &mut Transcription {
        &mut self.transcriptions[which.index()]
    }

    /// Whether the sign matches a four-transcription search query.
    pub fn matches(&self, query: &[Transcription; 4]) -> bool {
        self.transcriptions
            .iter()
            .zip(query)
            .all(|(t, q)| t.matches(q))
    }
}
