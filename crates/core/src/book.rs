use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One reading-list entry to resolve. Immutable for the duration of a lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookQuery {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

/// A shelf title split into its base title and optional series annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleParts {
    pub base_title: String,
    pub series: Option<SeriesRef>,
}

/// Series membership as annotated in a shelf title. A match always yields
/// both a name and a number, so the pair lives in one struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesRef {
    pub name: String,
    pub number: u32,
}

/// Which catalog or lending source reported the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Gutenberg,
    Hoopla,
    Overdrive,
    OpenLibrary,
}

/// Lending format reported by a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LendingFormat {
    Ebook,
    Audiobook,
}

/// A single cover image URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverImage {
    pub url: String,
}

/// Cover art in the sizes a provider exposes. Either size may be missing
/// independently of the other.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverImageSet {
    pub thumbnail: Option<CoverImage>,
    pub full: Option<CoverImage>,
}

impl CoverImageSet {
    /// Both sizes from one URL, for sources that expose a single image.
    pub fn same(url: String) -> Self {
        Self {
            thumbnail: Some(CoverImage { url: url.clone() }),
            full: Some(CoverImage { url }),
        }
    }
}

/// One actionable availability record. A query may produce zero of these
/// (nothing found), exactly one (a short-circuiting source), or several
/// (one per available OverDrive edition).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAvailability {
    pub title: String,
    pub author: String,
    pub tags: BTreeSet<String>,
    pub source: Source,
    /// Subdomain name for OverDrive records.
    pub source_detail: Option<String>,
    pub acquisition_url: Option<String>,
    pub format: Option<LendingFormat>,
    pub covers: Option<CoverImageSet>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Source::Gutenberg).unwrap(), "\"gutenberg\"");
        assert_eq!(serde_json::to_string(&Source::OpenLibrary).unwrap(), "\"openlibrary\"");
    }

    #[test]
    fn format_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&LendingFormat::Audiobook).unwrap(), "\"audiobook\"");
    }

    #[test]
    fn cover_set_same_fills_both_sizes() {
        let covers = CoverImageSet::same("https://example.org/c.jpg".to_string());
        assert_eq!(covers.thumbnail.unwrap().url, "https://example.org/c.jpg");
        assert_eq!(covers.full.unwrap().url, "https://example.org/c.jpg");
    }
}
