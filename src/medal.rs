// 🥇 Medal Lines - "Gold: Name, Country" parsing and per-event groups

use crate::error::PipelineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Text of the synthetic line appended when an event awarded no bronze
pub const NO_MEDAL_AWARDED: &str = "No medal awarded";

// ============================================================================
// MEDAL
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    pub const ALL: [Medal; 3] = [Medal::Gold, Medal::Silver, Medal::Bronze];

    pub fn as_str(&self) -> &'static str {
        match self {
            Medal::Gold => "Gold",
            Medal::Silver => "Silver",
            Medal::Bronze => "Bronze",
        }
    }

    /// Prefix used on medal result lines ("Gold:")
    pub fn prefix(&self) -> String {
        format!("{}:", self.as_str())
    }

    /// Detect a leading "<Color>:" marker, case-insensitive.
    /// Returns the medal and the remaining text (trimmed).
    pub fn strip_prefix(line: &str) -> Option<(Medal, &str)> {
        for medal in Medal::ALL {
            let prefix = medal.prefix();
            if line.len() >= prefix.len()
                && line.is_char_boundary(prefix.len())
                && line[..prefix.len()].eq_ignore_ascii_case(&prefix)
            {
                return Some((medal, line[prefix.len()..].trim()));
            }
        }
        None
    }
}

impl fmt::Display for Medal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Medal {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gold" => Ok(Medal::Gold),
            "silver" => Ok(Medal::Silver),
            "bronze" => Ok(Medal::Bronze),
            other => Err(PipelineError::InvalidMedal(other.to_string())),
        }
    }
}

// ============================================================================
// MEDAL LINE
// ============================================================================

/// One medal result line, e.g. `Gold: Lasha Bekauri, Georgia`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedalLine {
    pub medal: Medal,
    /// Everything after the colour marker
    pub text: String,
}

impl MedalLine {
    pub fn new(medal: Medal, text: impl Into<String>) -> Self {
        MedalLine {
            medal,
            text: text.into(),
        }
    }

    /// Parse a paragraph that starts with a colour marker
    pub fn parse(line: &str) -> Option<Self> {
        Medal::strip_prefix(line).map(|(medal, text)| MedalLine::new(medal, text))
    }

    pub fn no_bronze() -> Self {
        MedalLine::new(Medal::Bronze, NO_MEDAL_AWARDED)
    }

    pub fn is_placeholder(&self) -> bool {
        self.text == NO_MEDAL_AWARDED
    }
}

impl fmt::Display for MedalLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.medal, self.text)
    }
}

// ============================================================================
// EVENT MEDAL GROUP
// ============================================================================

/// All medal lines belonging to one event, in source order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EventMedalGroup {
    lines: Vec<MedalLine>,
}

impl EventMedalGroup {
    pub fn new() -> Self {
        EventMedalGroup { lines: Vec::new() }
    }

    pub fn push(&mut self, line: MedalLine) {
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[MedalLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn last_medal(&self) -> Option<Medal> {
        self.lines.last().map(|l| l.medal)
    }

    /// Number of lines for a given colour (more than one means a tie)
    pub fn count(&self, medal: Medal) -> usize {
        self.lines.iter().filter(|l| l.medal == medal).count()
    }

    /// Length ≥ 2, opens with Gold, Bronze lines only as a trailing run
    pub fn is_well_formed(&self) -> bool {
        if self.lines.len() < 2 || self.lines[0].medal != Medal::Gold {
            return false;
        }
        let first_bronze = self
            .lines
            .iter()
            .position(|l| l.medal == Medal::Bronze)
            .unwrap_or(self.lines.len());
        self.lines[first_bronze..]
            .iter()
            .all(|l| l.medal == Medal::Bronze)
    }
}

impl From<Vec<MedalLine>> for EventMedalGroup {
    fn from(lines: Vec<MedalLine>) -> Self {
        EventMedalGroup { lines }
    }
}

impl<'a> IntoIterator for &'a EventMedalGroup {
    type Item = &'a MedalLine;
    type IntoIter = std::slice::Iter<'a, MedalLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

// ============================================================================
// TESTS
// ============================================================================
