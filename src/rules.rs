// 🏷️ Override Rules - Rules as Data
// Alias tables, tie handling and manual fixes for one scraped snapshot.
// Defaults reproduce the Paris 2024 AP News page; a JSON file can replace them.

use crate::medal::Medal;
use anyhow::{Context as AnyhowContext, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

// ============================================================================
// RULE DEFINITIONS
// ============================================================================

/// A left-hand token that identifies the athlete when the country is unusable
/// ("Yang, ..." → Yang Liu, China)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AthleteAlias {
    pub token: String,
    pub athlete: String,
    pub country: String,
}

/// Fixed name/country for a tied athlete whose text does not parse
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TieFix {
    /// Substring identifying the athlete
    pub contains: String,
    pub athlete: String,
    pub country: String,
}

/// Fill athlete/country for rows the scrape left empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualFill {
    #[serde(default)]
    pub sport: Option<String>,
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default)]
    pub medal: Option<Medal>,
    pub athlete: String,
    pub country: String,
}

impl ManualFill {
    pub fn matches(&self, sport: &str, event: &str, medal: Medal) -> bool {
        self.sport.as_deref().map_or(true, |s| s == sport)
            && self.event.as_deref().map_or(true, |e| e == event)
            && self.medal.map_or(true, |m| m == medal)
            // a rule with no selector would fill everything
            && (self.sport.is_some() || self.event.is_some())
    }
}

/// A medal row missing from the page altogether
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraRow {
    pub sport: String,
    pub event: String,
    pub medal: Medal,
    pub athlete: String,
    pub country: String,
}

/// One row whose athlete text also carries a second crew's country
/// ("A and B, Germany and Hungary"): trim the suffix, add the other crew
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedMedalSplit {
    pub event: String,
    pub medal: Medal,
    pub suffix: String,
    pub athlete: String,
    pub country: String,
}

// ============================================================================
// RULE SET
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverrideRules {
    /// Country spellings seen after ", " or before " (" → directory name
    #[serde(default)]
    pub split_aliases: BTreeMap<String, String>,

    #[serde(default)]
    pub athlete_aliases: Vec<AthleteAlias>,

    /// Sports that award two bronzes per event
    #[serde(default)]
    pub tie_sports: Vec<String>,

    /// Individual events with a tie (any colour)
    #[serde(default)]
    pub tie_events: Vec<String>,

    #[serde(default)]
    pub tie_fixes: Vec<TieFix>,

    #[serde(default)]
    pub manual_fills: Vec<ManualFill>,

    #[serde(default)]
    pub extra_rows: Vec<ExtraRow>,

    #[serde(default)]
    pub shared_medal_splits: Vec<SharedMedalSplit>,

    /// Final country renames before NOC assignment
    #[serde(default)]
    pub country_renames: BTreeMap<String, String>,

    /// NOC ↔ country names the region table spells differently
    #[serde(default)]
    pub noc_names: BTreeMap<String, String>,
}

fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl OverrideRules {
    pub fn empty() -> Self {
        OverrideRules {
            split_aliases: BTreeMap::new(),
            athlete_aliases: Vec::new(),
            tie_sports: Vec::new(),
            tie_events: Vec::new(),
            tie_fixes: Vec::new(),
            manual_fills: Vec::new(),
            extra_rows: Vec::new(),
            shared_medal_splits: Vec::new(),
            country_renames: BTreeMap::new(),
            noc_names: BTreeMap::new(),
        }
    }

    pub fn paris_2024() -> Self {
        let fill = |sport: Option<&str>,
                    event: Option<&str>,
                    medal: Option<Medal>,
                    athlete: &str,
                    country: &str| {
            ManualFill {
                sport: sport.map(str::to_string),
                event: event.map(str::to_string),
                medal,
                athlete: athlete.to_string(),
                country: country.to_string(),
            }
        };
        let breaststroke = |medal: Medal, athlete: &str, country: &str| ExtraRow {
            sport: "SWIMMING".to_string(),
            event: "MEN’S 100M BREASTSTROKE".to_string(),
            medal,
            athlete: athlete.to_string(),
            country: country.to_string(),
        };

        OverrideRules {
            split_aliases: map(&[("Britain", "Great Britain"), ("AIN", "Belarus")]),
            athlete_aliases: vec![AthleteAlias {
                token: "Yang".to_string(),
                athlete: "Yang Liu".to_string(),
                country: "China".to_string(),
            }],
            tie_sports: ["WRESTLING", "JUDO", "TAEKWONDO", "BOXING"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            tie_events: vec!["MEN’S HORIZONTAL BAR".to_string(), "WOMEN’S HIGH JUMP".to_string()],
            tie_fixes: vec![TieFix {
                contains: "Dauren Kurugliev".to_string(),
                athlete: "Dauren Kurugliev".to_string(),
                country: "Greece".to_string(),
            }],
            manual_fills: vec![
                fill(None, Some("MEN’S 110M HURDLES"), None, "GRANT HOLLOWAY", "United States"),
                fill(Some("ARTISTIC SWIMMING"), None, None, "China", "China"),
                fill(
                    None,
                    Some("MEN’S SABER INDIVIDUAL"),
                    Some(Medal::Gold),
                    "Sanguk Oh",
                    "South Korea",
                ),
                fill(
                    None,
                    Some("MEN’S SABER INDIVIDUAL"),
                    Some(Medal::Silver),
                    "Fares Ferjani",
                    "Tunisia",
                ),
                fill(
                    None,
                    Some("WOMEN’S FREESTYLE 68KG"),
                    None,
                    "Meerim Zhumanazarova",
                    "Kyrgyzstan",
                ),
            ],
            extra_rows: vec![
                breaststroke(Medal::Gold, "Nicolo Martinenghi", "Italy"),
                breaststroke(Medal::Silver, "Nic Fink", "United States"),
                breaststroke(Medal::Silver, "Adam Peaty", "Great Britain"),
            ],
            shared_medal_splits: vec![SharedMedalSplit {
                event: "WOMEN’S KAYAK DOUBLE 500M".to_string(),
                medal: Medal::Bronze,
                suffix: " and Hungary".to_string(),
                athlete: "Noemi Pup and Sara Fojt".to_string(),
                country: "Hungary".to_string(),
            }],
            country_renames: map(&[
                ("St. Lucia", "Saint Lucia"),
                ("Britain", "Great Britain"),
                ("Albany", "Albania"),
                ("Tadzhikistan", "Tajikistan"),
                ("AIN", "Refugee Olympic Team"),
            ]),
            noc_names: map(&[
                ("GBR", "Great Britain"),
                ("ROC", "Russia"),
                ("USA", "United States"),
            ]),
        }
    }

    /// Load rules from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read rules file: {:?}", path.as_ref()))?;

        serde_json::from_str(&content).context("Failed to parse rules JSON")
    }

    pub fn split_alias(&self, token: &str) -> Option<&str> {
        self.split_aliases.get(token).map(String::as_str)
    }

    pub fn athlete_alias(&self, token: &str) -> Option<&AthleteAlias> {
        self.athlete_aliases.iter().find(|a| a.token == token)
    }

    pub fn tie_fix(&self, text: &str) -> Option<&TieFix> {
        self.tie_fixes.iter().find(|f| text.contains(&f.contains))
    }

    pub fn manual_fill(&self, sport: &str, event: &str, medal: Medal) -> Option<&ManualFill> {
        self.manual_fills.iter().find(|f| f.matches(sport, event, medal))
    }

    pub fn rename_country<'a>(&'a self, country: &'a str) -> &'a str {
        self.country_renames
            .get(country)
            .map(String::as_str)
            .unwrap_or(country)
    }

    /// Country name for a NOC, when the region table spells it differently
    pub fn country_for_noc(&self, noc: &str) -> Option<&str> {
        self.noc_names.get(noc).map(String::as_str)
    }

    /// NOC for a country name from the same table, read backwards
    pub fn noc_for_country(&self, country: &str) -> Option<&str> {
        self.noc_names
            .iter()
            .find(|(_, name)| name.as_str() == country)
            .map(|(noc, _)| noc.as_str())
    }
}

impl Default for OverrideRules {
    fn default() -> Self {
        Self::paris_2024()
    }
}

// ============================================================================
// TESTS
// ============================================================================
