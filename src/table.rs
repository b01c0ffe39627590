// 📊 Result tables
// Row types shared by every edition pipeline, and the CSV boundary.

use crate::medal::Medal;
use crate::reconciliation::EventRow;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Column order of every processed CSV
pub const FINAL_COLUMNS: [&str; 9] = [
    "Athlete", "Country", "NOC", "Season", "Year", "City", "Sport", "Event", "Medal",
];

// ============================================================================
// SPORT EVENT ROW
// ============================================================================

/// One awarded medal before edition columns are attached
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SportEventRow {
    pub sport: String,
    pub event: String,
    pub medal: Medal,
    pub athlete: Option<String>,
    pub country: Option<String>,
}

impl SportEventRow {
    pub fn new(sport: &str, event: &str, medal: Medal, athlete: Option<String>) -> Self {
        SportEventRow {
            sport: sport.to_string(),
            event: event.to_string(),
            medal,
            athlete,
            country: None,
        }
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn has_country(&self) -> bool {
        self.country.is_some()
    }
}

/// One row per medal line, colour marker already stripped, in Gold →
/// Silver → Bronze order. A colour with no line at all still gets an
/// empty row for the manual fills; "no medal awarded" placeholders
/// produce nothing.
pub fn melt_medals(rows: &[EventRow]) -> Vec<SportEventRow> {
    let mut out = Vec::new();

    for row in rows {
        for medal in Medal::ALL {
            if row.group.count(medal) == 0 {
                out.push(SportEventRow::new(&row.sport, &row.event, medal, None));
                continue;
            }
            for line in &row.group {
                if line.medal != medal || line.is_placeholder() {
                    continue;
                }
                let text = line.text.trim();
                let athlete = (!text.is_empty()).then(|| text.to_string());
                out.push(SportEventRow::new(&row.sport, &row.event, medal, athlete));
            }
        }
    }

    debug!(events = rows.len(), rows = out.len(), "melted medal groups");
    out
}

// ============================================================================
// EDITION + FINAL RECORD
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edition {
    pub year: u16,
    pub city: String,
    pub season: String,
}

impl Edition {
    pub fn summer(year: u16, city: &str) -> Self {
        Edition {
            year,
            city: city.to_string(),
            season: "Summer".to_string(),
        }
    }

    pub fn paris_2024() -> Self {
        Edition::summer(2024, "Paris")
    }

    pub fn tokyo_2020() -> Self {
        Edition::summer(2020, "Tokyo")
    }
}

/// Output row, serialized in [`FINAL_COLUMNS`] order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OlympicRecord {
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
}

impl OlympicRecord {
    pub fn from_row(row: SportEventRow, edition: &Edition, noc: Option<String>) -> Self {
        OlympicRecord {
            athlete: row.athlete,
            country: row.country,
            noc,
            season: edition.season.clone(),
            year: edition.year,
            city: edition.city.clone(),
            sport: row.sport,
            event: row.event,
            medal: row.medal,
        }
    }
}

pub fn read_records<P: AsRef<Path>>(path: P) -> Result<Vec<OlympicRecord>> {
    let mut reader = csv::Reader::from_path(path.as_ref())
        .with_context(|| format!("Failed to open CSV file: {:?}", path.as_ref()))?;

    let mut records = Vec::new();
    for (line, result) in reader.deserialize().enumerate() {
        let record: OlympicRecord = result.with_context(|| {
            format!("Failed to parse CSV line {} in {:?}", line + 2, path.as_ref())
        })?;
        records.push(record);
    }
    Ok(records)
}

/// Write any record type with serde column names (parent dirs created)
pub fn write_records<P: AsRef<Path>, T: Serialize>(path: P, records: &[T]) -> Result<()> {
    if let Some(parent) = path.as_ref().parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }

    let mut writer = csv::Writer::from_path(path.as_ref())
        .with_context(|| format!("Failed to create CSV file: {:?}", path.as_ref()))?;
    for record in records {
        writer.serialize(record).context("Failed to write CSV record")?;
    }
    writer.flush().context("Failed to flush CSV file")?;
    Ok(())
}

// ============================================================================
// STRING HELPERS
// ============================================================================

/// Uppercase the first letter of every
/// alphabetic run, lowercase the rest ("MEN’S 4X100M" → "Men’S 4X100M")
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;

    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }

    out
}

// ============================================================================
// TESTS
// ============================================================================
