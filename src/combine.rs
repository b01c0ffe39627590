// 🧩 Combined 1896–2024 table
// Tokyo, Paris and Kaggle rows in that order, text columns title-cased.

use crate::table::{read_records, title_case, OlympicRecord};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// "united states" → "United States" on every text column but NOC
pub fn format_strings(mut record: OlympicRecord) -> OlympicRecord {
    record.athlete = record.athlete.map(|a| title_case(&a));
    record.country = record.country.map(|c| title_case(&c));
    record.season = title_case(&record.season);
    record.city = title_case(&record.city);
    record.sport = title_case(&record.sport);
    record.event = title_case(&record.event);
    record
}

pub fn combine(
    tokyo: Vec<OlympicRecord>,
    paris: Vec<OlympicRecord>,
    kaggle: Vec<OlympicRecord>,
) -> Vec<OlympicRecord> {
    tokyo
        .into_iter()
        .chain(paris)
        .chain(kaggle)
        .map(format_strings)
        .collect()
}

pub fn combine_files(tokyo: &Path, paris: &Path, kaggle: &Path) -> Result<Vec<OlympicRecord>> {
    let tokyo = read_records(tokyo).context("Failed to load Tokyo results")?;
    let paris = read_records(paris).context("Failed to load Paris results")?;
    let kaggle = read_records(kaggle).context("Failed to load Kaggle results")?;

    info!(
        tokyo = tokyo.len(),
        paris = paris.len(),
        kaggle = kaggle.len(),
        "combining datasets"
    );
    Ok(combine(tokyo, paris, kaggle))
}
