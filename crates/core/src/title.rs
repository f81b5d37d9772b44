//! Shelf-title normalization and catalog search formatting.
//!
//! Goodreads exports annotate series membership inline, e.g.
//! `The Fifth Season (The Broken Earth, #1)`. The library catalog writes the
//! same book as `The Fifth Season : The Broken Earth, Book 1`, so the
//! annotation is parsed out once and re-rendered per provider.

use regex::Regex;
use std::sync::LazyLock;

use crate::book::{SeriesRef, TitleParts};

// `Title (Series, #N)` with the annotation anchored at the end of the string.
// A parenthesized subtitle without the `, #N` tail must not match.
static SERIES_TITLE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+)\(([^)]*), #(\d+)\)\s*$").unwrap());

/// Split a raw shelf title into its base title and series annotation.
/// Titles without the annotation pass through unchanged.
pub fn extract_title(raw: &str) -> TitleParts {
    if let Some(caps) = SERIES_TITLE_PATTERN.captures(raw) {
        if let Ok(number) = caps[3].parse::<u32>() {
            return TitleParts {
                base_title: caps[1].trim().to_string(),
                series: Some(SeriesRef {
                    name: caps[2].to_string(),
                    number,
                }),
            };
        }
    }
    TitleParts {
        base_title: raw.to_string(),
        series: None,
    }
}

/// Render title parts the way the library catalog writes series entries.
/// Identity on the base title when there is no series annotation.
pub fn catalog_search_title(parts: &TitleParts) -> String {
    match &parts.series {
        Some(series) => format!("{} : {}, Book {}", parts.base_title, series.name, series.number),
        None => parts.base_title.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn series_annotation_is_extracted() {
        let parts = extract_title("The Fifth Season (The Broken Earth, #1)");
        assert_eq!(parts.base_title, "The Fifth Season");
        let series = parts.series.unwrap();
        assert_eq!(series.name, "The Broken Earth");
        assert_eq!(series.number, 1);
    }

    #[test]
    fn series_name_may_contain_commas() {
        let parts = extract_title("Dawn (Lilith's Brood, or Xenogenesis, #1)");
        let series = parts.series.unwrap();
        assert_eq!(series.name, "Lilith's Brood, or Xenogenesis");
        assert_eq!(series.number, 1);
    }

    #[test]
    fn parenthesized_subtitle_is_not_a_series() {
        let parts = extract_title("Caste (The Origins of Our Discontents)");
        assert_eq!(parts.base_title, "Caste (The Origins of Our Discontents)");
        assert!(parts.series.is_none());
    }

    #[test]
    fn annotation_must_be_at_the_end() {
        let parts = extract_title("Dune (Dune, #1) Special Edition");
        assert!(parts.series.is_none());
        assert_eq!(parts.base_title, "Dune (Dune, #1) Special Edition");
    }

    #[test]
    fn empty_title_passes_through() {
        let parts = extract_title("");
        assert_eq!(parts.base_title, "");
        assert!(parts.series.is_none());
    }

    #[test]
    fn catalog_title_without_series_is_identity() {
        let parts = extract_title("Parable of the Sower");
        assert_eq!(catalog_search_title(&parts), "Parable of the Sower");
    }

    #[test]
    fn catalog_title_with_series_uses_book_convention() {
        let parts = extract_title("The Obelisk Gate (The Broken Earth, #2)");
        assert_eq!(
            catalog_search_title(&parts),
            "The Obelisk Gate : The Broken Earth, Book 2"
        );
    }

    proptest! {
        #[test]
        fn annotated_titles_round_trip(
            base in "[A-Za-z][A-Za-z ]{0,30}",
            series in "[A-Za-z][A-Za-z ]{0,30}",
            number in 1u32..10_000,
        ) {
            let raw = format!("{} ({}, #{})", base, series, number);
            let parts = extract_title(&raw);
            prop_assert_eq!(parts.base_title, base.trim());
            let parsed = parts.series.unwrap();
            prop_assert_eq!(parsed.name, series);
            prop_assert_eq!(parsed.number, number);
        }

        #[test]
        fn titles_without_hash_never_yield_a_series(raw in "[^#]{0,60}") {
            let parts = extract_title(&raw);
            prop_assert!(parts.series.is_none());
            prop_assert_eq!(parts.base_title, raw);
        }
    }
}
