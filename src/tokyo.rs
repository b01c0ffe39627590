// 🗼 Tokyo 2020 results (Olympedia scrape)
//
// Input is `{ sport: { event: [token, ...] } }`. Tokens are athlete names
// or three-letter NOCs, in finishing order:
//   ["USA", "CAN", "GBR"]                                  team event
//   ["Caeleb Dressel", "USA", "Kyle Chalmers", "AUS", ...]  individual
//   ["A", "B", "USA", "USA", ...]                          tie: names first, then their NOCs
// Each run of names plus the NOCs that follow is one block sharing a medal.

use crate::countries::NocRegions;
use crate::medal::Medal;
use crate::rules::OverrideRules;
use crate::table::{Edition, OlympicRecord};
use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokyoEvent {
    pub sport: String,
    pub event: String,
    pub tokens: Vec<String>,
}

pub fn load_events<P: AsRef<Path>>(path: P) -> Result<Vec<TokyoEvent>> {
    let content = fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read Tokyo results: {:?}", path.as_ref()))?;
    parse_events(&content)
}

/// Flatten the nested object, keeping file order
pub fn parse_events(json: &str) -> Result<Vec<TokyoEvent>> {
    let sports: Map<String, Value> =
        serde_json::from_str(json).context("Failed to parse Tokyo results JSON")?;

    let mut events = Vec::new();
    for (sport, by_event) in sports {
        let by_event: Map<String, Value> = serde_json::from_value(by_event)
            .with_context(|| format!("Sport {:?} is not an object of events", sport))?;

        for (event, tokens) in by_event {
            let tokens: Vec<String> = serde_json::from_value(tokens)
                .with_context(|| format!("Results for {:?} / {:?} are not strings", sport, event))?;
            events.push(TokyoEvent {
                sport: sport.clone(),
                event,
                tokens,
            });
        }
    }

    debug!(events = events.len(), "loaded Tokyo events");
    Ok(events)
}

// ============================================================================
// MEDAL BLOCKS
// ============================================================================

/// Three uppercase ASCII letters
pub fn is_noc(token: &str) -> bool {
    token.len() == 3 && token.bytes().all(|b| b.is_ascii_uppercase())
}

/// Athletes (none for a team result) and the NOCs naming their countries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Block {
    names: Vec<String>,
    nocs: Vec<String>,
}

impl Block {
    fn is_complete(&self) -> bool {
        self.nocs.len() >= self.names.len().max(1)
    }

    fn medallists(&self) -> usize {
        self.names.len().max(self.nocs.len())
    }

    fn tokens(&self) -> impl Iterator<Item = &String> {
        self.names.iter().chain(self.nocs.iter())
    }
}

fn blocks(tokens: &[String]) -> Vec<Block> {
    let mut out = Vec::new();
    let mut current = Block::default();

    for token in tokens {
        if is_noc(token) {
            current.nocs.push(token.clone());
            if current.is_complete() {
                out.push(std::mem::take(&mut current));
            }
        } else {
            current.names.push(token.clone());
        }
    }

    if current != Block::default() {
        if current.nocs.is_empty() {
            warn!(names = ?current.names, "athletes without a country, dropped");
        } else {
            warn!(names = ?current.names, nocs = ?current.nocs, "fewer countries than athletes");
            out.push(current);
        }
    }
    out
}

/// Standard competition ranking: the medal depends on how many
/// medallists finished ahead, so a shared gold leaves no silver
fn medal_for(ahead: usize) -> Medal {
    match ahead {
        0 => Medal::Gold,
        1 => Medal::Silver,
        _ => Medal::Bronze,
    }
}

fn ranked_blocks(tokens: &[String]) -> Vec<(Medal, Block)> {
    let mut ahead = 0;
    blocks(tokens)
        .into_iter()
        .map(|block| {
            let medal = medal_for(ahead);
            ahead += block.medallists();
            (medal, block)
        })
        .collect()
}

/// Raw tokens per colour: (gold, silver, bronze)
pub fn split_medals(tokens: &[String]) -> (Vec<String>, Vec<String>, Vec<String>) {
    let mut gold = Vec::new();
    let mut silver = Vec::new();
    let mut bronze = Vec::new();

    for (medal, block) in ranked_blocks(tokens) {
        let target = match medal {
            Medal::Gold => &mut gold,
            Medal::Silver => &mut silver,
            Medal::Bronze => &mut bronze,
        };
        target.extend(block.tokens().cloned());
    }

    (gold, silver, bronze)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Medallist {
    pub medal: Medal,
    /// `None` for a team result
    pub athlete: Option<String>,
    pub noc: String,
}

pub fn medallists(tokens: &[String]) -> Vec<Medallist> {
    let mut out = Vec::new();

    for (medal, block) in ranked_blocks(tokens) {
        if block.names.is_empty() {
            out.extend(block.nocs.iter().map(|noc| Medallist {
                medal,
                athlete: None,
                noc: noc.clone(),
            }));
            continue;
        }
        for (i, name) in block.names.iter().enumerate() {
            // a short NOC run repeats its last country
            let noc = block.nocs.get(i).or_else(|| block.nocs.last());
            if let Some(noc) = noc {
                out.push(Medallist {
                    medal,
                    athlete: Some(name.clone()),
                    noc: noc.clone(),
                });
            }
        }
    }

    out
}

// ============================================================================
// RECORDS
// ============================================================================

/// Display name for a NOC: rule table first (ROC → Russia), then regions
pub fn country_for_noc(noc: &str, rules: &OverrideRules, regions: &NocRegions) -> Option<String> {
    rules
        .country_for_noc(noc)
        .or_else(|| regions.region(noc))
        .map(str::to_string)
}

/// Output rows; team results use the country as the athlete
pub fn tokyo_records(
    events: &[TokyoEvent],
    rules: &OverrideRules,
    regions: &NocRegions,
) -> Vec<OlympicRecord> {
    let edition = Edition::tokyo_2020();
    let mut records = Vec::new();

    for event in events {
        for medallist in medallists(&event.tokens) {
            let country = country_for_noc(&medallist.noc, rules, regions);
            if country.is_none() {
                warn!(noc = %medallist.noc, event = %event.event, "unknown NOC");
            }
            records.push(OlympicRecord {
                athlete: medallist.athlete.or_else(|| country.clone()),
                country,
                noc: Some(medallist.noc),
                season: edition.season.clone(),
                year: edition.year,
                city: edition.city.clone(),
                sport: event.sport.clone(),
                event: event.event.clone(),
                medal: medallist.medal,
            });
        }
    }

    debug!(events = events.len(), rows = records.len(), "built Tokyo rows");
    records
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn regions() -> NocRegions {
        NocRegions::new(
            [("USA", "USA"), ("AUS", "Australia"), ("ROC", "Russia"), ("ITA", "Italy")]
                .iter()
                .map(|(n, r)| (n.to_string(), r.to_string())),
        )
    }

    #[test]
    fn test_simple_split_medals() {
        assert_eq!(
            split_medals(&strings(&["USA", "CAN", "GBR"])),
            (strings(&["USA"]), strings(&["CAN"]), strings(&["GBR"]))
        );
        assert_eq!(
            split_medals(&strings(&[
                "Michael Phelps",
                "USA",
                "Ryan Lochte",
                "USA",
                "Laszlo Cseh",
                "HUN",
            ])),
            (
                strings(&["Michael Phelps", "USA"]),
                strings(&["Ryan Lochte", "USA"]),
                strings(&["Laszlo Cseh", "HUN"])
            )
        );
    }

    #[test]
    fn test_gold_tie() {
        assert_eq!(
            split_medals(&strings(&[
                "Michael Phelps",
                "Ryan Lochte",
                "USA",
                "USA",
                "Laszlo Cseh",
                "HUN",
            ])),
            (
                strings(&["Michael Phelps", "Ryan Lochte", "USA", "USA"]),
                vec![],
                strings(&["Laszlo Cseh", "HUN"])
            )
        );
    }

    #[test]
    fn test_silver_tie() {
        assert_eq!(
            split_medals(&strings(&[
                "Michael Phelps",
                "USA",
                "Ryan Lochte",
                "Laszlo Cseh",
                "USA",
                "HUN",
            ])),
            (
                strings(&["Michael Phelps", "USA"]),
                strings(&["Ryan Lochte", "Laszlo Cseh", "USA", "HUN"]),
                vec![]
            )
        );
    }

    #[test]
    fn test_bronze_tie() {
        let tokens = strings(&[
            "Michael Phelps",
            "USA",
            "Ryan Lochte",
            "USA",
            "Laszlo Cseh",
            "Chad Le Clos",
            "HUN",
            "RSA",
        ]);
        assert_eq!(
            split_medals(&tokens),
            (
                strings(&["Michael Phelps", "USA"]),
                strings(&["Ryan Lochte", "USA"]),
                strings(&["Laszlo Cseh", "Chad Le Clos", "HUN", "RSA"])
            )
        );
    }

    #[test]
    fn test_two_separate_bronzes() {
        let tokens = strings(&["A", "JPN", "B", "FRA", "C", "GER", "D", "KOR"]);
        let medals: Vec<Medal> = medallists(&tokens).iter().map(|m| m.medal).collect();
        assert_eq!(medals, vec![Medal::Gold, Medal::Silver, Medal::Bronze, Medal::Bronze]);
    }

    #[test]
    fn test_event_rows_and_country_assignment() {
        let events = vec![TokyoEvent {
            sport: "Swimming".to_string(),
            event: "100M Freestyle (Men)".to_string(),
            tokens: strings(&[
                "Caeleb Dressel",
                "USA",
                "Kyle Chalmers",
                "AUS",
                "Kliment Kolesnikov",
                "ROC",
            ]),
        }];

        let records = tokyo_records(&events, &OverrideRules::default(), &regions());
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].medal, Medal::Gold);
        assert_eq!(records[0].athlete.as_deref(), Some("Caeleb Dressel"));
        assert_eq!(records[0].country.as_deref(), Some("United States"));
        assert_eq!(records[1].country.as_deref(), Some("Australia"));
        assert_eq!(records[2].country.as_deref(), Some("Russia"));
        assert_eq!(records[2].noc.as_deref(), Some("ROC"));
        assert!(records.iter().all(|r| r.year == 2020 && r.city == "Tokyo"));
    }

    #[test]
    fn test_relay_athlete_is_country() {
        let events = vec![TokyoEvent {
            sport: "Swimming".to_string(),
            event: "4X100M Freestyle Relay".to_string(),
            tokens: strings(&["USA", "ITA", "AUS"]),
        }];

        let records = tokyo_records(&events, &OverrideRules::default(), &regions());
        let athletes: Vec<_> = records.iter().map(|r| r.athlete.as_deref().unwrap()).collect();
        assert_eq!(athletes, vec!["United States", "Italy", "Australia"]);
    }

    #[test]
    fn test_parse_events_keeps_file_order() {
        let json = r#"{
            "Swimming": {"800M Freestyle (Women)": ["Katie Ledecky", "USA"], "100M Freestyle (Men)": ["USA"]},
            "Archery": {"Team (Men)": ["KOR", "TPE", "JPN"]}
        }"#;
        let events = parse_events(json).unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].event, "800M Freestyle (Women)");
        assert_eq!(events[1].event, "100M Freestyle (Men)");
        assert_eq!(events[2].sport, "Archery");
    }

    #[test]
    fn test_trailing_names_without_noc_dropped() {
        let tokens = strings(&["A", "USA", "B"]);
        assert_eq!(medallists(&tokens).len(), 1);
        assert!(is_noc("ROC"));
        assert!(!is_noc("Roc"));
        assert!(!is_noc("USAA"));
    }
}
