// 📄 Raw Page Extract - heading/paragraph strings as delivered by the scraper

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

/// `{"h2": [...], "p": [...]}` extracted from one results page.
/// Source of truth for a run; never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPageExtract {
    #[serde(rename = "h2")]
    pub headings: Vec<String>,

    #[serde(rename = "p")]
    pub paragraphs: Vec<String>,
}

impl RawPageExtract {
    pub fn new(headings: Vec<String>, paragraphs: Vec<String>) -> Self {
        RawPageExtract {
            headings,
            paragraphs,
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read page extract: {:?}", path.as_ref()))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse page extract JSON")
    }

    /// SHA-256 over every heading and paragraph, used to recognise the
    /// snapshot a correction set was written against.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for heading in &self.headings {
            hasher.update(b"h2\0");
            hasher.update(heading.as_bytes());
            hasher.update(b"\n");
        }
        for paragraph in &self.paragraphs {
            hasher.update(b"p\0");
            hasher.update(paragraph.as_bytes());
            hasher.update(b"\n");
        }
        hex::encode(hasher.finalize())
    }
}
