//! Public-domain text provider (Project Gutenberg).
//!
//! Matching a title/author pair against the Gutenberg catalog index is left
//! behind a strategy trait: the default strategy never matches, so the
//! cascade's control flow works today and an index-backed strategy can plug
//! in later without touching the cascade. Cover URLs, by contrast, are fully
//! specified by the e-book number and are derived here.

use serde::{Deserialize, Serialize};

use crate::book::{CoverImage, CoverImageSet};
use crate::error::ProviderError;

pub const GUTENBERG_BASE_URL: &str = "https://www.gutenberg.org";

/// A matched public-domain text: the catalog's title/author record plus the
/// e-book number that addresses its cover art and content pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GutenbergHit {
    pub title: String,
    pub author: Option<String>,
    pub ebook_number: String,
}

/// Strategy for matching a title/author pair against a public-domain catalog.
pub trait PublicDomainIndex: Send + Sync {
    fn lookup(&self, title: &str, author: &str) -> Result<Option<GutenbergHit>, ProviderError>;
}

/// Default strategy: no index loaded, never matches.
#[derive(Debug, Default)]
pub struct UnindexedPublicDomain;

impl PublicDomainIndex for UnindexedPublicDomain {
    fn lookup(&self, _title: &str, _author: &str) -> Result<Option<GutenbergHit>, ProviderError> {
        Ok(None)
    }
}

/// Cover art URL for a matched text, derived from its e-book number.
pub fn cover_url(hit: &GutenbergHit, thumbnail: bool) -> String {
    format!(
        "{base}/cache/epub/{n}/pg{n}.cover.{size}.jpg",
        base = GUTENBERG_BASE_URL,
        n = hit.ebook_number,
        size = if thumbnail { "small" } else { "medium" },
    )
}

/// Thumbnail and full cover set for a matched text.
pub fn covers(hit: &GutenbergHit) -> CoverImageSet {
    CoverImageSet {
        thumbnail: Some(CoverImage {
            url: cover_url(hit, true),
        }),
        full: Some(CoverImage {
            url: cover_url(hit, false),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit() -> GutenbergHit {
        GutenbergHit {
            title: "frankenstein".to_string(),
            author: Some("mary wollstonecraft shelley".to_string()),
            ebook_number: "84".to_string(),
        }
    }

    #[test]
    fn unindexed_strategy_never_matches() {
        let result = UnindexedPublicDomain
            .lookup("Frankenstein", "Mary Shelley")
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn cover_urls_by_size() {
        assert_eq!(
            cover_url(&hit(), true),
            "https://www.gutenberg.org/cache/epub/84/pg84.cover.small.jpg"
        );
        assert_eq!(
            cover_url(&hit(), false),
            "https://www.gutenberg.org/cache/epub/84/pg84.cover.medium.jpg"
        );
    }

    #[test]
    fn cover_set_uses_small_thumbnail_and_medium_full() {
        let covers = covers(&hit());
        assert!(covers.thumbnail.unwrap().url.contains("small"));
        assert!(covers.full.unwrap().url.contains("medium"));
    }
}
