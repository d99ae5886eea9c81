//! The in-memory corpus and its JSON file format.
//!
//! A corpus file is a JSON envelope:
//!
//! ```text
//! { "format": "slpa-corpus/1", "sha256": "<hex>", "signs": [ ... ] }
//! ```
//!
//! The hash covers the canonical serialization of `signs`. Files without a
//! hash (hand-written or produced by other tools) load unchecked.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::{CoreError, Result};
use crate::sign::Sign;
use crate::transcription::Transcription;

/// Format tag written into every corpus file.
pub const CORPUS_FORMAT: &str = "slpa-corpus/1";

/// An ordered collection of signs keyed by gloss.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    signs: Vec<Sign>,
    index: HashMap<String, usize>,
}

#[derive(Serialize, Deserialize)]
struct CorpusFile {
    format: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sha256: Option<String>,
    signs: Vec<Sign>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sign. Glosses are unique.
    pub fn insert(&mut self, sign: Sign) -> Result<()> {
        if self.index.contains_key(&sign.gloss) {
            return Err(CoreError::Duplicate(sign.gloss));
        }
        self.index.insert(sign.gloss.clone(), self.signs.len());
        self.signs.push(sign);
        Ok(())
    }

    pub fn get(&self, gloss: &str) -> Option<&Sign> {
        self.index.get(gloss).map(|&i| &self.signs[i])
    }

    pub fn get_mut(&mut self, gloss: &str) -> Option<&mut Sign> {
        self.index.get(gloss).map(|&i| &mut self.signs[i])
    }

    pub fn contains(&self, gloss: &str) -> bool {
        self.index.contains_key(gloss)
    }

    /// Remove a sign, preserving the order of the rest.
    pub fn remove(&mut self, gloss: &str) -> Result<Sign> {
        let i = self.index.remove(gloss).ok_or_else(|| CoreError::NotFound {
            what: "gloss",
            key: gloss.to_string(),
        })?;
        let sign = self.signs.remove(i);
        for slot in self.index.values_mut() {
            if *slot > i {
                *slot -= 1;
            }
        }
        Ok(sign)
    }

    pub fn len(&self) -> usize {
        self.signs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signs.is_empty()
    }

    /// Signs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Sign> {
        self.signs.iter()
    }

    pub fn glosses(&self) -> impl Iterator<Item = &str> {
        self.signs.iter().map(|s| s.gloss.as_str())
    }

    /// Glosses of every sign matching the query, in corpus order.
    ///
    /// Blank query slots are wildcards, so an empty query transcription
    /// matches anything.
    pub fn search(&self, query: &[Transcription; 4]) -> Vec<&str> {
        self.signs
            .iter()
            .filter(|s| s.matches(query))
            .map(|s| s.gloss.as_str())
            .collect()
    }

    pub fn to_json(&self) -> Result<String> {
        let file = CorpusFile {
            format: CORPUS_FORMAT.to_string(),
            sha256: Some(content_hash(&self.signs)?),
            signs: self.signs.clone(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let file: CorpusFile = serde_json::from_str(json)?;
        if file.format != CORPUS_FORMAT {
            return Err(CoreError::format(format!(
                "unsupported corpus format '{}'",
                file.format
            )));
        }
        if let Some(expected) = file.sha256 {
            let actual = content_hash(&file.signs)?;
            if actual != expected {
                return Err(CoreError::IntegrityFailed { expected, actual });
            }
        }

        let mut corpus = Corpus::new();
        for sign in file.signs {
            corpus.insert(sign)?;
        }
        debug!(signs = corpus.len(), "loaded corpus");
        Ok(corpus)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        debug!(path = %path.display(), signs = self.len(), "saved corpus");
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

fn content_hash(signs: &[Sign]) -> Result<String> {
    let bytes = serde_json::to_vec(signs)?;
    Ok(hex_encode(&Sha256::digest(&bytes)))
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
