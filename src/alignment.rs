// 📐 Heading / Medal-Group Aligner
// Pairs each normalized heading with the medal group at the same position.

use crate::corrections::CorrectionSet;
use crate::error::PipelineError;
use crate::medal::EventMedalGroup;
use tracing::debug;

/// One heading label with the medals listed under it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedEvent {
    pub label: String,
    pub group: EventMedalGroup,
}

/// Zip headings with groups 1:1. Unequal lengths are fatal: a shifted
/// table cannot be detected downstream.
pub fn combine_grouped_medals_with_headings(
    headings: &[String],
    groups: &[EventMedalGroup],
) -> Result<Vec<AlignedEvent>, PipelineError> {
    if headings.len() != groups.len() {
        return Err(PipelineError::AlignmentMismatch {
            headings: headings.len(),
            groups: groups.len(),
        });
    }

    Ok(headings
        .iter()
        .zip(groups)
        .map(|(label, group)| AlignedEvent {
            label: label.clone(),
            group: group.clone(),
        })
        .collect())
}

/// Apply the active correction set, then zip
pub fn align(
    headings: &[String],
    groups: &[EventMedalGroup],
    corrections: &CorrectionSet,
) -> Result<Vec<AlignedEvent>, PipelineError> {
    let corrected = corrections.try_apply_headings(headings)?;
    debug!(
        tag = %corrections.tag,
        before = headings.len(),
        after = corrected.len(),
        groups = groups.len(),
        "applied heading corrections"
    );
    combine_grouped_medals_with_headings(&corrected, groups)
}
