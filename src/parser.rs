// 🏗️ Paragraph Parser
// Reduces the scraped <p> stream to event labels and medal result lines.
//
// The page mixes three kinds of paragraph:
// - prose ("PARIS (AP) — The 2024 Olympics are done...") → dropped
// - event labels, all uppercase ("WOMEN’S MARATHON")
// - medal results ("Gold: Netherlands (Sifan Hassan)")
// and sometimes glues a label and a result into one paragraph.

use crate::medal::{Medal, MedalLine};
use tracing::debug;

/// Labels that head a paragraph block but never receive their own row
pub const EXCLUDED_EVENT_LABELS: &[&str] = &["SYNCHRONIZED 10-METER PLATFORM"];

/// Markers that may appear mid-paragraph after an event label
const INLINE_MARKERS: &[(&str, Medal)] = &[
    ("Gold:", Medal::Gold),
    ("GOLD:", Medal::Gold),
    ("Silver:", Medal::Silver),
    ("Bronze:", Medal::Bronze),
];

/// At least one cased letter and no lowercase ones
fn is_upper(s: &str) -> bool {
    let mut has_cased = false;
    for c in s.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}

/// Keep event labels and medal lines, drop prose and page furniture
pub fn remove_headlines(paragraphs: &[String]) -> Vec<String> {
    paragraphs
        .iter()
        .filter(|p| {
            let lower = p.to_lowercase();
            is_upper(p)
                || Medal::strip_prefix(p).is_some()
                // labels the uppercase check misses ("Men’s keirin")
                || lower.starts_with("men")
                || lower.starts_with("women")
        })
        .cloned()
        .collect()
}

/// Split "MEN’S 90KG Gold: Lasha Bekauri, Georgia" into the label and
/// the medal line. Returns `None` when the paragraph is not mixed.
pub fn split_event_medal(paragraph: &str) -> Option<(String, String)> {
    if Medal::strip_prefix(paragraph).is_some() {
        return None;
    }

    let (index, marker, medal) = INLINE_MARKERS
        .iter()
        .filter_map(|(marker, medal)| {
            paragraph
                .find(marker)
                .filter(|&i| i > 0)
                .map(|i| (i, *marker, *medal))
        })
        .min_by_key(|(i, _, _)| *i)?;

    let event = paragraph[..index].trim_end().to_string();
    let rest = &paragraph[index + marker.len()..];
    Some((event, format!("{}{}", medal.prefix(), rest)))
}

/// Apply [`split_event_medal`] across the stream
pub fn split_event_medal_lines(paragraphs: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(paragraphs.len());

    for paragraph in paragraphs {
        match split_event_medal(paragraph) {
            Some((event, medal)) => {
                out.push(event);
                out.push(medal);
            }
            None => out.push(paragraph.clone()),
        }
    }

    out
}

/// Both paragraph passes, in order
pub fn prepare_paragraphs(paragraphs: &[String]) -> Vec<String> {
    let kept = remove_headlines(paragraphs);
    let split = split_event_medal_lines(&kept);
    debug!(
        raw = paragraphs.len(),
        kept = kept.len(),
        prepared = split.len(),
        "prepared paragraphs"
    );
    split
}

/// Event labels in page order (everything that is not a medal line)
pub fn event_labels(paragraphs: &[String]) -> Vec<String> {
    paragraphs
        .iter()
        .filter(|p| Medal::strip_prefix(p).is_none())
        .filter(|p| !EXCLUDED_EVENT_LABELS.contains(&p.as_str()))
        .cloned()
        .collect()
}

/// Medal lines in page order
pub fn medal_lines(paragraphs: &[String]) -> Vec<MedalLine> {
    paragraphs.iter().filter_map(|p| MedalLine::parse(p)).collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_remove_headlines() {
        let paragraphs = strings(&[
            "PARIS (AP) — The 2024 Olympics are done. The United States led the final medal standings with 126 total medals, ahead of China (91), Britain (65) and France (64). Below is a list of all the medal winners, day by day.",
            "\n",
            "2024 Paris Olympics:",
            "▶ See other events still in progress",
            "GOLD: Tom Pidcock, Britain",
            "WOMEN’S 500M SINGLE KAYAK",
        ]);
        assert_eq!(
            remove_headlines(&paragraphs),
            strings(&["GOLD: Tom Pidcock, Britain", "WOMEN’S 500M SINGLE KAYAK"])
        );
    }

    #[test]
    fn test_remove_headlines_keeps_mixed_case_labels() {
        let paragraphs = strings(&["Women’s keirin", "Menu", "Some prose."]);
        assert_eq!(remove_headlines(&paragraphs), strings(&["Women’s keirin", "Menu"]));
    }

    #[test]
    fn test_clean_medals_events() {
        let paragraphs = strings(&["MEN’S 90KG Gold: Lasha Bekauri, Georgia"]);
        assert_eq!(
            split_event_medal_lines(&paragraphs),
            strings(&["MEN’S 90KG", "Gold: Lasha Bekauri, Georgia"])
        );
    }

    #[test]
    fn test_split_normalizes_uppercase_marker() {
        let (event, medal) =
            split_event_medal("WOMEN’S MARATHON GOLD: Sifan Hassan, Netherlands").unwrap();
        assert_eq!(event, "WOMEN’S MARATHON");
        assert_eq!(medal, "Gold: Sifan Hassan, Netherlands");
    }

    #[test]
    fn test_split_leaves_plain_lines() {
        assert!(split_event_medal("Gold: A, B").is_none());
        assert!(split_event_medal("GOLD: Tom Pidcock, Britain").is_none());
        assert!(split_event_medal("WOMEN’S MARATHON").is_none());
    }

    #[test]
    fn test_split_uses_earliest_marker() {
        let (event, medal) = split_event_medal("MEN’S 60KG Silver: A, X Bronze: B, Y").unwrap();
        assert_eq!(event, "MEN’S 60KG");
        assert_eq!(medal, "Silver: A, X Bronze: B, Y");
    }

    #[test]
    fn test_get_p_events() {
        let paragraphs = strings(&[
            "WOMEN’S MARATHON",
            "Gold: Netherlands (Sifan Hassan)",
            "Silver: Ethiopia (Tigst Assefa)",
            "Bronze: Kenya (Hellen Obiri)",
            "WOMEN’S",
            "Gold: United States",
            "Silver: France",
            "Bronze: Australia",
            "SYNCHRONIZED 10-METER PLATFORM",
            "MEN’S KEIRIN",
            "Gold: Netherlands (Harrie Lavreysen)",
        ]);
        assert_eq!(
            event_labels(&paragraphs),
            strings(&["WOMEN’S MARATHON", "WOMEN’S", "MEN’S KEIRIN"])
        );
    }

    #[test]
    fn test_prepare_then_medal_lines() {
        let paragraphs = strings(&[
            "Some prose.",
            "MEN’S 90KG Gold: Lasha Bekauri, Georgia",
            "Silver: Sanshiro Murao, Japan",
        ]);
        let prepared = prepare_paragraphs(&paragraphs);
        let lines = medal_lines(&prepared);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].medal, Medal::Gold);
        assert_eq!(lines[1].text, "Sanshiro Murao, Japan");
        assert_eq!(event_labels(&prepared), strings(&["MEN’S 90KG"]));
    }
}
