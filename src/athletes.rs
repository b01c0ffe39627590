// 🧑 Athlete / Country Splitter & Tie Resolver
//
// The page writes winners three ways:
//   "Lasha Bekauri, Georgia"          individual
//   "Netherlands (Sifan Hassan)"      country first
//   "United States"                   team
// and ties as "A, X and B, Y". Anything that matches no rule keeps its raw
// text with no country, to be picked up by a later pass or left as a gap.

use crate::countries::CountryDirectory;
use crate::medal::Medal;
use crate::rules::OverrideRules;
use crate::table::SportEventRow;
use tracing::{debug, warn};

pub struct AthleteResolver<'a> {
    directory: &'a CountryDirectory,
    rules: &'a OverrideRules,
}

impl<'a> AthleteResolver<'a> {
    pub fn new(directory: &'a CountryDirectory, rules: &'a OverrideRules) -> Self {
        AthleteResolver { directory, rules }
    }

    /// Directory name for a country token, directly or through an alias
    fn resolve_country(&self, token: &str) -> Option<String> {
        let token = token.trim();
        if self.directory.contains(token) {
            return Some(token.to_string());
        }
        self.rules.split_alias(token).map(str::to_string)
    }

    /// "Name, Country" → (athlete, country)
    fn split_comma(&self, text: &str) -> Option<(String, String)> {
        let (left, rest) = text.split_once(", ")?;
        // only the token up to the next ", " names the country
        let right = rest.split(", ").next().unwrap_or(rest).trim();

        if let Some(country) = self.resolve_country(right) {
            return Some((left.to_string(), country));
        }
        if let Some(alias) = self.rules.athlete_alias(left.trim()) {
            return Some((alias.athlete.clone(), alias.country.clone()));
        }
        if let Some(stripped) = right.strip_suffix('.') {
            if self.directory.contains(stripped) {
                return Some((left.to_string(), stripped.to_string()));
            }
        }
        None
    }

    /// "Country (Name)" → (athlete, country)
    fn split_paren(&self, text: &str, use_aliases: bool) -> Option<(String, String)> {
        let mut parts = text.split(" (");
        let left = parts.next()?.trim();
        let inner = parts.next()?;

        let country = if use_aliases {
            self.resolve_country(left)?
        } else if self.directory.contains(left) {
            left.to_string()
        } else {
            return None;
        };
        Some((inner.trim().replace(')', ""), country))
    }

    fn split_one(&self, row: &mut SportEventRow) {
        let Some(text) = row.athlete.clone() else {
            return;
        };

        let split = if text.contains(", ") {
            self.split_comma(&text)
        } else if text.contains(" (") {
            self.split_paren(&text, false)
        } else {
            row.country = Some(text);
            row.athlete = None;
            return;
        };

        if let Some((athlete, country)) = split {
            row.athlete = Some(athlete);
            row.country = Some(country);
        }
    }

    /// First pass per row, then a " (" retry with aliases for rows whose
    /// ", " split failed ("United States (A, B, C)")
    pub fn split_country_athlete(&self, rows: Vec<SportEventRow>) -> Vec<SportEventRow> {
        let mut rows = rows;
        for row in rows.iter_mut() {
            self.split_one(row);
        }

        let mut retried = 0;
        for row in rows.iter_mut().filter(|r| r.country.is_none()) {
            let Some(text) = row.athlete.as_deref() else {
                continue;
            };
            if !text.contains(" (") {
                continue;
            }
            if let Some((athlete, country)) = self.split_paren(text, true) {
                row.athlete = Some(athlete);
                row.country = Some(country);
                retried += 1;
            }
        }

        let unresolved = rows.iter().filter(|r| r.country.is_none()).count();
        debug!(rows = rows.len(), retried, unresolved, "split athletes and countries");
        rows
    }

    fn is_tie_row(&self, row: &SportEventRow) -> bool {
        let Some(text) = row.athlete.as_deref() else {
            return false;
        };
        if row.country.is_some() || !text.contains(" and ") {
            return false;
        }
        let multi_bronze =
            row.medal == Medal::Bronze && self.rules.tie_sports.iter().any(|s| *s == row.sport);
        multi_bronze || self.rules.tie_events.iter().any(|e| *e == row.event)
    }

    /// Parse every " and "-separated winner; `None` unless all parse
    fn expand_tie(&self, row: &SportEventRow) -> Option<Vec<SportEventRow>> {
        let text = row.athlete.as_deref()?;

        text.split(" and ")
            .map(|part| {
                let (athlete, country) = match self.rules.tie_fix(part) {
                    Some(fix) => (fix.athlete.clone(), fix.country.clone()),
                    None => {
                        let (name, country) = part.split_once(", ")?;
                        let country = self
                            .resolve_country(country)
                            .unwrap_or_else(|| country.trim().to_string());
                        (name.trim().to_string(), country)
                    }
                };
                Some(
                    SportEventRow::new(&row.sport, &row.event, row.medal, Some(athlete))
                        .with_country(country),
                )
            })
            .collect()
    }

    /// Replace each tied row, in place, with one row per winner
    pub fn resolve_ties(&self, rows: Vec<SportEventRow>) -> Vec<SportEventRow> {
        let mut out = Vec::with_capacity(rows.len());
        let mut expanded = 0;

        for row in rows {
            if !self.is_tie_row(&row) {
                out.push(row);
                continue;
            }
            match self.expand_tie(&row) {
                Some(winners) => {
                    expanded += 1;
                    out.extend(winners);
                }
                None => {
                    warn!(
                        event = %row.event,
                        athlete = ?row.athlete,
                        "tie text did not parse, left as is"
                    );
                    out.push(row);
                }
            }
        }

        debug!(expanded, "resolved tied medals");
        out
    }

    /// Rows the scrape left completely empty
    pub fn fill_missing(&self, rows: Vec<SportEventRow>) -> Vec<SportEventRow> {
        rows.into_iter()
            .map(|mut row| {
                if row.athlete.is_none() && row.country.is_none() {
                    if let Some(fill) = self.rules.manual_fill(&row.sport, &row.event, row.medal) {
                        row.athlete = Some(fill.athlete.clone());
                        row.country = Some(fill.country.clone());
                    }
                }
                row
            })
            .collect()
    }

    /// Append medals the page never listed
    pub fn add_extra_rows(&self, mut rows: Vec<SportEventRow>) -> Vec<SportEventRow> {
        for extra in &self.rules.extra_rows {
            let athlete = Some(extra.athlete.clone());
            rows.push(
                SportEventRow::new(&extra.sport, &extra.event, extra.medal, athlete)
                    .with_country(extra.country.clone()),
            );
        }
        rows
    }

    /// Separate a second crew folded into another crew's row
    pub fn split_shared_medals(&self, rows: Vec<SportEventRow>) -> Vec<SportEventRow> {
        let mut out = Vec::with_capacity(rows.len());

        for mut row in rows {
            let split = self.rules.shared_medal_splits.iter().find(|s| {
                s.event == row.event
                    && s.medal == row.medal
                    && row.athlete.as_deref().map_or(false, |a| a.contains(&s.suffix))
            });

            match split {
                Some(split) => {
                    row.athlete = row.athlete.map(|a| a.replace(&split.suffix, ""));
                    let athlete = Some(split.athlete.clone());
                    let other = SportEventRow::new(&row.sport, &row.event, row.medal, athlete)
                        .with_country(split.country.clone());
                    out.push(row);
                    out.push(other);
                }
                None => out.push(row),
            }
        }

        out
    }

    /// Every athlete/country step in order
    pub fn resolve(&self, rows: Vec<SportEventRow>) -> Vec<SportEventRow> {
        let rows = self.split_country_athlete(rows);
        let rows = self.resolve_ties(rows);
        let rows = self.fill_missing(rows);
        let rows = self.add_extra_rows(rows);
        self.split_shared_medals(rows)
    }
}

// ============================================================================
// TESTS
// ============================================================================
