// 🩹 Snapshot Corrections
// Literal index patches for scraper drift, kept as data.
//
// Each set was discovered by hand against one frozen scrape. A set is
// selected by the extract's content fingerprint (or, when the set carries
// none, by a dry run proving every operation is in bounds) and is applied
// all-or-nothing.

use crate::error::PipelineError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

// ============================================================================
// OPERATIONS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum HeadingOp {
    Remove { index: usize },
    Insert { index: usize, value: String },
}

impl HeadingOp {
    fn index(&self) -> usize {
        match self {
            HeadingOp::Remove { index } | HeadingOp::Insert { index, .. } => *index,
        }
    }

    fn in_bounds(&self, len: usize) -> bool {
        match self {
            HeadingOp::Remove { index } => *index < len,
            HeadingOp::Insert { index, .. } => *index <= len,
        }
    }

    fn apply(&self, headings: &mut Vec<String>) {
        match self {
            HeadingOp::Remove { index } => {
                headings.remove(*index);
            }
            HeadingOp::Insert { index, value } => headings.insert(*index, value.clone()),
        }
    }
}

/// Pin a row's event label where the canonical list is incomplete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowEventOverride {
    pub row: usize,
    pub event: String,

    /// Canonical labels to skip past after this row
    #[serde(default)]
    pub skip: usize,
}

// ============================================================================
// CORRECTION SET
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionSet {
    /// Version tag of the scrape, e.g. "paris-2024-apnews"
    pub tag: String,

    /// Content fingerprint of the extract this set was written against
    #[serde(default)]
    pub fingerprint: Option<String>,

    /// Edits to the normalized heading list, applied in order
    #[serde(default)]
    pub heading_ops: Vec<HeadingOp>,

    /// Canonical event labels removed by position, applied in order
    #[serde(default)]
    pub dropped_event_indices: Vec<usize>,

    /// Canonical event labels removed by value (first occurrence)
    #[serde(default)]
    pub dropped_event_labels: Vec<String>,

    #[serde(default)]
    pub row_event_overrides: Vec<RowEventOverride>,
}

impl CorrectionSet {
    /// A set that changes nothing
    pub fn none() -> Self {
        CorrectionSet {
            tag: "none".to_string(),
            fingerprint: None,
            heading_ops: Vec::new(),
            dropped_event_indices: Vec::new(),
            dropped_event_labels: Vec::new(),
            row_event_overrides: Vec::new(),
        }
    }

    /// Patches for the Paris 2024 AP News medal-winners page
    pub fn paris_2024() -> Self {
        let insert = |index: usize, value: &str| HeadingOp::Insert {
            index,
            value: value.to_string(),
        };
        let row = |row: usize, event: &str, skip: usize| RowEventOverride {
            row,
            event: event.to_string(),
            skip,
        };

        CorrectionSet {
            tag: "paris-2024-apnews".to_string(),
            fingerprint: None,
            heading_ops: vec![
                HeadingOp::Remove { index: 251 },
                HeadingOp::Remove { index: 254 },
                insert(256, "MEN’S 90KG"),
                insert(276, "MEN’S 4X200M FREESTYLE RELAY"),
                insert(172, "SWIMMING"),
                HeadingOp::Remove { index: 173 },
                HeadingOp::Remove { index: 251 },
                insert(251, "CYCLING"),
            ],
            dropped_event_indices: vec![72, 132, 134],
            dropped_event_labels: vec![
                "WOMEN’S 4x100M MEDLEY RELAY".to_string(),
                "MEN’S 4x100M MEDLEY RELAY".to_string(),
            ],
            row_event_overrides: vec![
                row(28, "MEN’S", 0),
                row(60, "WOMEN’S", 0),
                row(103, "WOMEN’S KITE", 0),
                row(114, "MEN’S DINGHY", 2),
                row(251, "WOMEN’S PARK", 0),
                row(253, "WOMEN’S SYNCHRONIZED 10-METER PLATFORM", 0),
                row(314, "MEN’S", 0),
            ],
        }
    }

    /// Apply the heading operations, failing on the first out-of-bounds one
    pub fn try_apply_headings(&self, headings: &[String]) -> Result<Vec<String>, PipelineError> {
        let mut out = headings.to_vec();
        for (op_index, op) in self.heading_ops.iter().enumerate() {
            if !op.in_bounds(out.len()) {
                return Err(PipelineError::CorrectionOutOfBounds {
                    tag: self.tag.clone(),
                    op: op_index,
                    index: op.index(),
                    len: out.len(),
                });
            }
            op.apply(&mut out);
        }
        Ok(out)
    }

    /// Fingerprint matches (when pinned) and every heading op fits
    pub fn is_applicable(&self, fingerprint: &str, headings: &[String]) -> bool {
        if let Some(expected) = &self.fingerprint {
            if expected != fingerprint {
                debug!(tag = %self.tag, "fingerprint differs");
                return false;
            }
        }
        match self.try_apply_headings(headings) {
            Ok(_) => true,
            Err(e) => {
                debug!(error = %e, "dry run failed");
                false
            }
        }
    }

    /// Remove the labels this snapshot's canonical list got wrong
    pub fn apply_event_labels(&self, labels: &[String]) -> Vec<String> {
        let mut out = labels.to_vec();

        for &index in &self.dropped_event_indices {
            if index < out.len() {
                out.remove(index);
            } else {
                warn!(tag = %self.tag, index, len = out.len(), "event label index out of bounds");
            }
        }

        for label in &self.dropped_event_labels {
            match out.iter().position(|l| l == label) {
                Some(pos) => {
                    out.remove(pos);
                }
                None => warn!(tag = %self.tag, label = %label, "event label not found"),
            }
        }

        out
    }

    pub fn row_override(&self, row: usize) -> Option<&RowEventOverride> {
        self.row_event_overrides.iter().find(|o| o.row == row)
    }
}

// ============================================================================
// CORRECTION TABLE
// ============================================================================

/// All known correction sets; at most one is active for a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionTable {
    pub sets: Vec<CorrectionSet>,
}

impl CorrectionTable {
    pub fn new(sets: Vec<CorrectionSet>) -> Self {
        CorrectionTable { sets }
    }

    /// Load sets from a JSON array
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read corrections file: {:?}", path.as_ref()))?;

        let sets: Vec<CorrectionSet> =
            serde_json::from_str(&content).context("Failed to parse corrections JSON")?;

        Ok(CorrectionTable::new(sets))
    }

    /// Pick the set for this extract. Pinned fingerprints win over
    /// unpinned sets; an unusable table yields [`CorrectionSet::none`].
    pub fn select(&self, fingerprint: &str, headings: &[String]) -> CorrectionSet {
        let pinned = self
            .sets
            .iter()
            .filter(|s| s.fingerprint.as_deref() == Some(fingerprint));
        let unpinned = self.sets.iter().filter(|s| s.fingerprint.is_none());

        for set in pinned.chain(unpinned) {
            if set.is_applicable(fingerprint, headings) {
                info!(tag = %set.tag, "using snapshot corrections");
                return set.clone();
            }
            warn!(tag = %set.tag, "snapshot corrections do not fit this extract, skipped");
        }

        CorrectionSet::none()
    }
}

impl Default for CorrectionTable {
    fn default() -> Self {
        CorrectionTable::new(vec![CorrectionSet::paris_2024()])
    }
}

// ============================================================================
// TESTS
// ============================================================================
