// 🏊 Swimming results
// The three sources name the same event differently:
//   "Swimming Men'S 100 Metres Freestyle"   Kaggle
//   "100M Freestyle (Men)"                  Olympedia
//   "Men’S 100M Freestyle"                  AP News
// Each is reduced to a category (Men / Women / Mixed) plus "100M Freestyle".

use crate::table::{title_case, OlympicRecord};
use crate::medal::Medal;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::OnceLock;
use tracing::debug;

fn gender_word() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(men|women|mixed)").expect("static regex"))
}

fn yards_distance() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d)m\b").expect("static regex"))
}

/// Output row: the common columns plus the category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwimmingRecord {
    #[serde(rename = "Athlete")]
    pub athlete: Option<String>,
    #[serde(rename = "Country")]
    pub country: Option<String>,
    #[serde(rename = "NOC")]
    pub noc: Option<String>,
    #[serde(rename = "Season")]
    pub season: String,
    #[serde(rename = "Year")]
    pub year: u16,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Sport")]
    pub sport: String,
    #[serde(rename = "Event")]
    pub event: String,
    #[serde(rename = "Medal")]
    pub medal: Medal,
    #[serde(rename = "Category")]
    pub category: Option<String>,
}

// ============================================================================
// EVENT NAME STEPS
// ============================================================================

/// Lowercase, metres → m, no "swimming", "4 x 100" → "4x100", no commas
pub fn standardize_event_name(event: &str) -> String {
    event
        .to_lowercase()
        .trim()
        .replace(" metres", "m")
        .replace("metres", "m")
        .replace("swimming ", "")
        .replace("swimming", "")
        .replace('×', "x")
        .replace("4 x 100", "4x100")
        .replace("4 x 200", "4x200")
        .replace(',', "")
        .trim()
        .to_string()
}

/// First of men / women / mixed in the name, capitalized
pub fn category(event: &str) -> Option<String> {
    gender_word()
        .find(event)
        .map(|m| title_case(m.as_str()))
}

pub fn remove_gender_from_event(event: &str) -> String {
    event
        .replace("women", "")
        .replace("mixed", "")
        .replace("men", "")
        .replace("()", "")
}

pub fn remove_apostrophes(event: &str) -> String {
    event.replace("'s ", "").replace("’s ", "").replace("s ", "")
}

/// "200 butterfly" → "200m butterfly"
pub fn add_meters_to_event_name(event: &str) -> String {
    event.replace("0 ", "0m ")
}

pub fn rename_10km_event(event: &str) -> String {
    event.replace("10m kilom open water", "10km open water")
}

/// "400m yard backstroke" → "400yds backstroke"
pub fn replace_meters_with_yards(event: &str) -> String {
    if !event.contains("yard") {
        return event.to_string();
    }
    yards_distance()
        .replace_all(event, "${1}yds")
        .replace("yard ", "")
}

/// Every step in order; returns the category and the cleaned name
pub fn standardize_event(event: &str) -> (Option<String>, String) {
    let event = standardize_event_name(event);
    let category = category(&event);

    let event = remove_gender_from_event(&event);
    let event = remove_apostrophes(event.trim());
    let event = add_meters_to_event_name(&event);
    let event = rename_10km_event(&event);
    let event = replace_meters_with_yards(&event);
    let event = event.split_whitespace().collect::<Vec<_>>().join(" ");

    (category, title_case(&event))
}

// ============================================================================
// TABLE
// ============================================================================

pub fn is_swimming(record: &OlympicRecord) -> bool {
    record.sport.to_lowercase() == "swimming"
}

/// One row per relay medal, the country standing in for the swimmers.
/// Individual rows come first, relays after, each in input order.
pub fn remove_athletes_from_relay(records: Vec<SwimmingRecord>) -> Vec<SwimmingRecord> {
    let (relays, mut out): (Vec<_>, Vec<_>) =
        records.into_iter().partition(|r| r.event.contains("Relay"));

    let mut seen = HashSet::new();
    for mut relay in relays {
        let key = (
            relay.country.clone(),
            relay.noc.clone(),
            relay.year,
            relay.city.clone(),
            relay.category.clone(),
            relay.event.clone(),
            relay.medal,
        );
        if seen.insert(key) {
            relay.athlete = relay.country.clone();
            out.push(relay);
        }
    }

    out
}

pub fn swimming_results(records: &[OlympicRecord]) -> Vec<SwimmingRecord> {
    let swims: Vec<SwimmingRecord> = records
        .iter()
        .filter(|r| is_swimming(r))
        .map(|r| {
            let (category, event) = standardize_event(&r.event);
            SwimmingRecord {
                athlete: r.athlete.clone(),
                country: r.country.clone(),
                noc: r.noc.clone(),
                season: r.season.clone(),
                year: r.year,
                city: r.city.clone(),
                sport: r.sport.clone(),
                event,
                medal: r.medal,
                category,
            }
        })
        .collect();

    let total = swims.len();
    let out = remove_athletes_from_relay(swims);
    debug!(swimming = total, kept = out.len(), "standardized swimming rows");
    out
}

// ============================================================================
// TESTS
// ============================================================================
