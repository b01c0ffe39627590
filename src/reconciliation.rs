// ⚖️ Event-Name Reconciler
// Gives each aligned row its real sport and event label.
//
// The page headings mix sport names ("JUDO") with event sub-labels
// ("MEN’S 90KG"). A curated list holds the sports in page order; walking it
// with a cursor tells the two apart. Rows headed by a sport name get their
// event label from the curated paragraph-label list instead.

use crate::alignment::AlignedEvent;
use crate::corrections::CorrectionSet;
use crate::medal::EventMedalGroup;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Composite heading labels and the sport they belong to
pub const COMPOSITE_SPORTS: &[(&str, &str)] = &[
    ("CYCLING MEN’S TEAM PURSUIT", "CYCLING"),
    ("CYCLING WOMEN’S TEAM PURSUIT", "CYCLING"),
    ("MEN’S 3X3 BASKETBALL", "3X3 BASKETBALL"),
    ("WOMEN’S 3X3 BASKETBALL", "3X3 BASKETBALL"),
];

/// Load a flat JSON array of labels (canonical sports or events)
pub fn load_label_list<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let content = fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read label list: {:?}", path.as_ref()))?;
    serde_json::from_str(&content).context("Failed to parse label list JSON")
}

/// Save labels as a JSON array
pub fn save_label_list<P: AsRef<Path>>(path: P, labels: &[String]) -> Result<()> {
    let content = serde_json::to_string(labels).context("Failed to serialize labels")?;
    fs::write(path.as_ref(), content)
        .with_context(|| format!("Failed to write label list: {:?}", path.as_ref()))
}

// ============================================================================
// SPORT CURSOR
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CursorStep {
    /// Label is the next expected sport; cursor moves on
    Advance,
    /// Label is a sub-label; row belongs to the sport last advanced past
    Stay,
    /// Cursor ran off the end; row belongs to the final sport
    Clamp,
}

/// Position in the canonical sport list
#[derive(Debug, Clone)]
pub struct SportCursor<'a> {
    canonical: &'a [String],
    position: usize,
}

impl<'a> SportCursor<'a> {
    pub fn new(canonical: &'a [String]) -> Self {
        SportCursor {
            canonical,
            position: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Feed one heading label; returns the transition taken and the sport
    /// the row should carry
    pub fn step(&mut self, label: &str) -> (CursorStep, String) {
        if self.position >= self.canonical.len() {
            let sport = self
                .canonical
                .last()
                .cloned()
                .unwrap_or_else(|| label.to_string());
            return (CursorStep::Clamp, sport);
        }

        if label == self.canonical[self.position] {
            self.position += 1;
            return (CursorStep::Advance, label.to_string());
        }

        let sport = match self.position.checked_sub(1) {
            Some(previous) => self.canonical[previous].clone(),
            // nothing advanced past yet
            None => label.to_string(),
        };
        (CursorStep::Stay, sport)
    }
}

// ============================================================================
// RECONCILED ROWS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRow {
    pub sport: String,
    pub event: String,
    pub group: EventMedalGroup,
}

/// Walk the sport cursor over the aligned rows. Event starts as the
/// heading label.
pub fn adjust_event_and_sports(
    aligned: &[AlignedEvent],
    canonical_sports: &[String],
) -> Vec<EventRow> {
    let mut cursor = SportCursor::new(canonical_sports);
    let mut stays = 0;

    let rows: Vec<EventRow> = aligned
        .iter()
        .map(|a| {
            let (step, sport) = cursor.step(&a.label);
            if step != CursorStep::Advance {
                stays += 1;
            }
            EventRow {
                sport,
                event: a.label.clone(),
                group: a.group.clone(),
            }
        })
        .collect();

    debug!(
        rows = rows.len(),
        sub_labels = stays,
        cursor = cursor.position(),
        "assigned sports"
    );
    rows
}

/// Map composite heading labels to their sport
pub fn replace_composite_sports(rows: Vec<EventRow>) -> Vec<EventRow> {
    rows.into_iter()
        .map(|mut row| {
            if let Some((_, simple)) = COMPOSITE_SPORTS.iter().find(|(c, _)| *c == row.sport) {
                row.sport = simple.to_string();
            }
            row
        })
        .collect()
}

/// Rows still labelled by their sport take the next canonical event label.
/// `labels` must already have the correction set's drops applied.
pub fn insert_event_labels(
    rows: Vec<EventRow>,
    labels: &[String],
    corrections: &CorrectionSet,
) -> Vec<EventRow> {
    let mut next = 0;
    let mut exhausted = 0;

    let rows: Vec<EventRow> = rows
        .into_iter()
        .enumerate()
        .map(|(i, mut row)| {
            if let Some(o) = corrections.row_override(i) {
                row.event = o.event.clone();
                next += o.skip;
            } else if row.sport == row.event {
                match labels.get(next) {
                    Some(label) => {
                        row.event = label.clone();
                        next += 1;
                    }
                    None => exhausted += 1,
                }
            }
            row
        })
        .collect();

    if exhausted > 0 {
        warn!(rows = exhausted, "ran out of canonical event labels");
    }
    if next < labels.len() {
        debug!(unused = labels.len() - next, "canonical event labels left over");
    }
    rows
}

/// All three reconciliation steps
pub fn reconcile(
    aligned: &[AlignedEvent],
    canonical_sports: &[String],
    canonical_events: &[String],
    corrections: &CorrectionSet,
) -> Vec<EventRow> {
    let rows = adjust_event_and_sports(aligned, canonical_sports);
    let rows = replace_composite_sports(rows);
    let labels = corrections.apply_event_labels(canonical_events);
    insert_event_labels(rows, &labels, corrections)
}

// ============================================================================
// TESTS
// ============================================================================
