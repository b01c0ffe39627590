// 🏛️ Kaggle "120 years of Olympic history" (1896–2016)
// athlete_events.csv has one row per athlete per event, medal or not.
// Keep Summer medal rows and reshape them into the common record.

use crate::error::PipelineError;
use crate::medal::Medal;
use crate::table::OlympicRecord;
use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

const REQUIRED_COLUMNS: [&str; 9] = [
    "Name", "Team", "NOC", "Year", "Season", "City", "Sport", "Event", "Medal",
];

#[derive(Debug, Clone, Deserialize)]
struct AthleteEventRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Team")]
    team: String,
    #[serde(rename = "NOC")]
    noc: String,
    #[serde(rename = "Year")]
    year: u16,
    #[serde(rename = "Season")]
    season: String,
    #[serde(rename = "City")]
    city: String,
    #[serde(rename = "Sport")]
    sport: String,
    #[serde(rename = "Event")]
    event: String,
    #[serde(rename = "Medal")]
    medal: String,
}

fn hyphen_number() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"-\d").expect("static regex"))
}

/// "United States-1" → "United States"
pub fn remove_hyphen_numbers(team: &str) -> String {
    hyphen_number().replace_all(team, "").into_owned()
}

/// "NA" or empty means no medal
fn parse_medal(raw: &str) -> Result<Option<Medal>, PipelineError> {
    match raw.trim() {
        "" | "NA" => Ok(None),
        other => other.parse().map(Some),
    }
}

pub fn load_kaggle<P: AsRef<Path>>(path: P) -> Result<Vec<OlympicRecord>> {
    let file = std::fs::File::open(path.as_ref())
        .with_context(|| format!("Failed to open Kaggle CSV: {:?}", path.as_ref()))?;
    clean_kaggle(file)
}

/// Summer medal rows, Team renamed to Country, team suffixes removed
pub fn clean_kaggle<R: Read>(reader: R) -> Result<Vec<OlympicRecord>> {
    let mut reader = csv::Reader::from_reader(reader);

    let headers = reader.headers().context("Failed to read Kaggle header")?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(PipelineError::MissingColumn {
                column: column.to_string(),
                source_name: "athlete_events.csv".to_string(),
            }
            .into());
        }
    }

    let mut total = 0;
    let mut records = Vec::new();
    for (line, result) in reader.deserialize().enumerate() {
        total += 1;
        let row: AthleteEventRow =
            result.with_context(|| format!("Failed to parse Kaggle line {}", line + 2))?;

        let Some(medal) = parse_medal(&row.medal)? else {
            continue;
        };
        if row.season != "Summer" {
            continue;
        }

        records.push(OlympicRecord {
            athlete: Some(row.name),
            country: Some(remove_hyphen_numbers(&row.team)),
            noc: Some(row.noc),
            season: row.season,
            year: row.year,
            city: row.city,
            sport: row.sport,
            event: row.event,
            medal,
        });
    }

    debug!(rows = total, kept = records.len(), "cleaned Kaggle rows");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
ID,Name,Sex,Age,Height,Weight,Team,NOC,Games,Year,Season,City,Sport,Event,Medal
1,A Dijiang,M,24,180,80,China,CHN,1992 Summer,1992,Summer,Barcelona,Basketball,Basketball Men's Basketball,NA
4,Edgar Lindenau Aabye,M,34,NA,NA,Denmark/Sweden,DEN,1900 Summer,1900,Summer,Paris,Tug-Of-War,Tug-Of-War Men's Tug-Of-War,Gold
5,Christine Jacoba Aaftink,F,21,185,82,Netherlands,NED,1988 Winter,1988,Winter,Calgary,Speed Skating,Speed Skating Women's 500 metres,Bronze
17,Paavo Johannes Aaltonen,M,28,175,64,Finland,FIN,1948 Summer,1948,Summer,London,Gymnastics,Gymnastics Men's Team All-Around,Bronze
99,Jane Doe,F,22,170,60,United States-1,USA,1904 Summer,1904,Summer,St. Louis,Swimming,Swimming Women's 100 metres Freestyle,Silver
";

    #[test]
    fn test_keeps_summer_medals_only() {
        let records = clean_kaggle(SAMPLE.as_bytes()).unwrap();
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.season == "Summer"));
        assert_eq!(records[0].athlete.as_deref(), Some("Edgar Lindenau Aabye"));
        assert_eq!(records[0].medal, Medal::Gold);
        assert_eq!(records[1].year, 1948);
    }

    #[test]
    fn test_team_becomes_country_without_suffix() {
        let records = clean_kaggle(SAMPLE.as_bytes()).unwrap();
        let last = records.last().unwrap();
        assert_eq!(last.country.as_deref(), Some("United States"));
        assert_eq!(last.noc.as_deref(), Some("USA"));
        assert_eq!(remove_hyphen_numbers("Germany-2"), "Germany");
        assert_eq!(remove_hyphen_numbers("Guinea-Bissau"), "Guinea-Bissau");
    }

    #[test]
    fn test_missing_column_is_reported() {
        let data = "Name,Team,NOC,Year,Season,City,Sport,Event\nA,B,C,2000,Summer,Sydney,X,Y\n";
        let err = clean_kaggle(data.as_bytes()).unwrap_err();
        let pipeline = err.downcast_ref::<PipelineError>().unwrap();
        assert_eq!(
            pipeline,
            &PipelineError::MissingColumn {
                column: "Medal".to_string(),
                source_name: "athlete_events.csv".to_string(),
            }
        );
    }

    #[test]
    fn test_unknown_medal_is_error() {
        let data = "Name,Team,NOC,Year,Season,City,Sport,Event,Medal\nA,B,C,2000,Summer,Sydney,X,Y,Platinum\n";
        assert!(clean_kaggle(data.as_bytes()).is_err());
    }
}
