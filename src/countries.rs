// 🌍 Country reference data
// - CountryDirectory: display name → NOC (country_codes.csv)
// - NocRegions: NOC → region name (noc_regions.csv)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

// ============================================================================
// COUNTRY DIRECTORY
// ============================================================================

/// One row of country_codes.csv; the ISO code column is not needed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryEntry {
    pub country_name: String,
    #[serde(default)]
    pub country_noc: String,
}

#[derive(Debug, Clone, Default)]
pub struct CountryDirectory {
    entries: HashMap<String, CountryEntry>,
}

impl CountryDirectory {
    pub fn new(entries: Vec<CountryEntry>) -> Self {
        CountryDirectory {
            entries: entries
                .into_iter()
                .map(|e| (e.country_name.clone(), e))
                .collect(),
        }
    }

    /// Build from bare names (no NOCs)
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CountryDirectory::new(
            names
                .into_iter()
                .map(|n| CountryEntry {
                    country_name: n.into(),
                    country_noc: String::new(),
                })
                .collect(),
        )
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = csv::Reader::from_path(path.as_ref())
            .with_context(|| format!("Failed to open country codes: {:?}", path.as_ref()))?;
        Self::from_csv(reader)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_csv(csv::Reader::from_reader(reader))
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>) -> Result<Self> {
        let mut entries = Vec::new();
        for result in reader.deserialize() {
            let entry: CountryEntry = result.context("Failed to deserialize country entry")?;
            entries.push(entry);
        }
        Ok(CountryDirectory::new(entries))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// NOC listed for a display name, if the file gave one
    pub fn noc(&self, name: &str) -> Option<&str> {
        self.entries
            .get(name)
            .map(|e| e.country_noc.as_str())
            .filter(|noc| !noc.is_empty())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// NOC REGIONS
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
struct NocRegionRecord {
    #[serde(rename = "NOC")]
    noc: String,
    #[serde(default)]
    region: Option<String>,
}

/// NOC ↔ region lookups. A region can have several NOCs (historic teams);
/// the first one listed is its NOC.
#[derive(Debug, Clone, Default)]
pub struct NocRegions {
    region_by_noc: HashMap<String, String>,
    noc_by_region: HashMap<String, String>,
}

impl NocRegions {
    pub fn new<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut regions = NocRegions::default();
        for (noc, region) in pairs {
            regions
                .noc_by_region
                .entry(region.clone())
                .or_insert_with(|| noc.clone());
            regions.region_by_noc.insert(noc, region);
        }
        regions
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = csv::Reader::from_path(path.as_ref())
            .with_context(|| format!("Failed to open NOC regions: {:?}", path.as_ref()))?;
        Self::from_csv(reader)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_csv(csv::Reader::from_reader(reader))
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>) -> Result<Self> {
        let mut pairs = Vec::new();
        for result in reader.deserialize() {
            let record: NocRegionRecord = result.context("Failed to deserialize NOC region")?;
            // a few NOCs (refugee team, unknown) have no region
            if let Some(region) = record.region.filter(|r| !r.is_empty()) {
                pairs.push((record.noc, region));
            }
        }
        Ok(NocRegions::new(pairs))
    }

    pub fn region(&self, noc: &str) -> Option<&str> {
        self.region_by_noc.get(noc).map(String::as_str)
    }

    pub fn noc(&self, region: &str) -> Option<&str> {
        self.noc_by_region.get(region).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_from_csv() {
        let data = "country_name,country_code,country_noc\n\
                    Georgia,GE,GEO\n\
                    Great Britain,GB,GBR\n";
        let directory = CountryDirectory::from_reader(data.as_bytes()).unwrap();

        assert_eq!(directory.len(), 2);
        assert!(directory.contains("Georgia"));
        assert!(!directory.contains("Britain"));
        assert_eq!(directory.noc("Great Britain"), Some("GBR"));
    }

    #[test]
    fn test_noc_regions_first_noc_wins() {
        let data = "NOC,region,notes\n\
                    GER,Germany,\n\
                    FRG,Germany,West Germany\n\
                    ROT,,Refugee Olympic Team\n\
                    USA,USA,\n";
        let regions = NocRegions::from_reader(data.as_bytes()).unwrap();

        assert_eq!(regions.noc("Germany"), Some("GER"));
        assert_eq!(regions.region("FRG"), Some("Germany"));
        assert_eq!(regions.region("ROT"), None);
        assert_eq!(regions.noc("USA"), Some("USA"));
    }

    #[test]
    fn test_directory_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("country_codes.csv");
        std::fs::write(&path, "country_name,country_code,country_noc\nKenya,KE,KEN\n").unwrap();

        let directory = CountryDirectory::from_path(&path).unwrap();
        assert!(directory.contains("Kenya"));
        assert_eq!(directory.noc("Kenya"), Some("KEN"));
        assert_eq!(CountryDirectory::from_names(["Kenya"]).noc("Kenya"), None);
    }
}
