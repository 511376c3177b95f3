//! Brazilian Portuguese month abbreviations used in chart labels.
//!
//! The same table is used to format labels and to parse them back, so the two
//! directions cannot drift apart.

use time::Month;

/// Three-letter lowercase pt-BR month abbreviations, January first.
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

/// Formats `month` as a three-letter pt-BR abbreviation (e.g., "fev").
pub fn month_abbreviation(month: Month) -> &'static str {
    MONTH_ABBREVIATIONS[u8::from(month) as usize - 1]
}

/// Parses a pt-BR month abbreviation back into a [Month].
///
/// Matching ignores case and a trailing period, and only looks at the first
/// three letters, so "Mar", "mar." and "março" all parse as March.
pub fn parse_month_abbreviation(text: &str) -> Option<Month> {
    let text = text.trim().trim_end_matches('.').to_lowercase();
    let prefix: String = text.chars().take(3).collect();

    MONTH_ABBREVIATIONS
        .iter()
        .position(|&abbreviation| abbreviation == prefix)
        .and_then(|index| Month::try_from(index as u8 + 1).ok())
}
