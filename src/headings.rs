// 🏷️ Heading Normalizer
// Cleans the scraped <h2> sequence into one label per sport/event section.
//
// Every step is total: unexpected input passes through unchanged.

use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// Headings kept even when the letter check would drop them
pub const PRESERVED_PREFIXES: &[&str] = &["3X3 BASKETBALL"];

fn day_of_week() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Z][a-z]+day").expect("static regex"))
}

/// Drop day-of-week date labels such as "Sunday, Aug. 11"
pub fn remove_dates(headings: &[String]) -> Vec<String> {
    headings
        .iter()
        .filter(|h| !day_of_week().is_match(h))
        .cloned()
        .collect()
}

/// Drop symbol-only junk ("______", "######")
pub fn remove_symbols(headings: &[String]) -> Vec<String> {
    headings
        .iter()
        .filter(|h| {
            PRESERVED_PREFIXES.iter().any(|p| h.starts_with(p))
                || h.chars().any(|c| c.is_ascii_alphabetic())
        })
        .cloned()
        .collect()
}

/// "CYCLING" directly before a "... TEAM PURSUIT" heading is folded into it
pub fn combine_cycling_pursuit(headings: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(headings.len());

    for (i, heading) in headings.iter().enumerate() {
        let next_is_pursuit = headings
            .get(i + 1)
            .map(|next| next.contains("TEAM PURSUIT"))
            .unwrap_or(false);

        if heading == "CYCLING" && next_is_pursuit {
            continue;
        } else if heading.contains("TEAM PURSUIT") {
            out.push(format!("CYCLING {}", heading));
        } else {
            out.push(heading.clone());
        }
    }

    out
}

/// The site prints "3X3 BASKETBALL" then a bare "WOMEN"; make both explicit
pub fn update_3x3_basketball(headings: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(headings.len());
    let mut womens_index = None;

    for (i, heading) in headings.iter().enumerate() {
        if heading == "3X3 BASKETBALL" {
            out.push(format!("MEN’S {}", heading));
            womens_index = Some(i + 1);
        } else if womens_index == Some(i) {
            out.push("WOMEN’S 3X3 BASKETBALL".to_string());
        } else {
            out.push(heading.clone());
        }
    }

    out
}

/// Restore the two medley relays (and the women's 50m) the page never headed
pub fn clean_swimming_relays(headings: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(headings.len() + 2);

    for (i, heading) in headings.iter().enumerate() {
        let next_is_1500 = headings
            .get(i + 1)
            .map(|next| next.contains("1500M"))
            .unwrap_or(false);

        if heading == "SWIMMING" && next_is_1500 {
            out.push("WOMEN’S 50M FREESTYLE".to_string());
            out.push("WOMEN’S 4x100M MEDLEY RELAY".to_string());
        } else if heading == "MEN’S 1500M FREESTYLE" {
            out.push(heading.clone());
            out.push("MEN’S 4x100M MEDLEY RELAY".to_string());
        } else {
            out.push(heading.clone());
        }
    }

    out
}

/// Full normalization in source order of the fixes
pub fn normalize_headings(headings: &[String]) -> Vec<String> {
    let cleaned = remove_dates(headings);
    let cleaned = remove_symbols(&cleaned);
    let cleaned = combine_cycling_pursuit(&cleaned);
    let cleaned = update_3x3_basketball(&cleaned);
    let cleaned = clean_swimming_relays(&cleaned);

    debug!(
        raw = headings.len(),
        normalized = cleaned.len(),
        "normalized headings"
    );
    cleaned
}
