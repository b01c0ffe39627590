//! Error types for the medal pipeline
//!
//! Stages are best-effort by default. Only conditions that would silently
//! misalign the output table are surfaced as errors.

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum PipelineError {
    /// Headings and medal groups disagree after snapshot corrections
    #[error("alignment mismatch: {headings} headings vs {groups} medal groups")]
    AlignmentMismatch { headings: usize, groups: usize },

    /// A correction operation points outside the heading list
    #[error("correction set '{tag}' operation {op} is out of bounds (index {index}, len {len})")]
    CorrectionOutOfBounds {
        tag: String,
        op: usize,
        index: usize,
        len: usize,
    },

    /// Medal colour could not be parsed
    #[error("invalid medal: {0}")]
    InvalidMedal(String),

    /// A required column is missing from an input table
    #[error("missing column '{column}' in {source_name}")]
    MissingColumn { column: String, source_name: String },
}
