// ⚙️ Pipeline configuration
// Every input and output path in one place. Defaults follow the
// data/raw → data/processed layout; a JSON file can override any field.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    // Raw inputs
    pub paris_extract: PathBuf,
    pub country_codes: PathBuf,
    pub noc_regions: PathBuf,
    pub canonical_sports: PathBuf,
    /// Curated event labels; the page's own labels when absent
    pub canonical_events: Option<PathBuf>,
    pub tokyo_medals: PathBuf,
    pub kaggle_events: PathBuf,

    // Optional rule overrides (built-in Paris 2024 tables otherwise)
    pub corrections: Option<PathBuf>,
    pub grouping: Option<PathBuf>,
    pub rules: Option<PathBuf>,

    // Outputs
    /// Where to save the page's event labels for curation
    pub event_labels_out: Option<PathBuf>,
    pub paris_output: PathBuf,
    pub tokyo_output: PathBuf,
    pub kaggle_output: PathBuf,
    pub combined_output: PathBuf,
    pub swimming_output: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let raw = Path::new("data").join("raw");
        let processed = Path::new("data").join("processed");

        PipelineConfig {
            paris_extract: raw.join("paris2024_medals.json"),
            country_codes: raw.join("country_codes.csv"),
            noc_regions: raw.join("noc_regions.csv"),
            canonical_sports: raw.join("paris2024_sports.json"),
            canonical_events: None,
            tokyo_medals: raw.join("tokyo2020_medals.json"),
            kaggle_events: raw.join("athlete_events.csv"),
            corrections: None,
            grouping: None,
            rules: None,
            event_labels_out: None,
            paris_output: processed.join("paris2024_results.csv"),
            tokyo_output: processed.join("tokyo2020_results.csv"),
            kaggle_output: processed.join("kaggle1896_to_2016_results.csv"),
            combined_output: processed.join("all_olympics_data.csv"),
            swimming_output: processed.join("swimming").join("swimming_results.csv"),
        }
    }
}

impl PipelineConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        serde_json::from_str(&content).context("Failed to parse config JSON")
    }

    /// Config file when given, defaults otherwise
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}
