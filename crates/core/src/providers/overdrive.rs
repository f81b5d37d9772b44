//! OverDrive subdomain client.
//!
//! Each library system exposes its own `{subdomain}.overdrive.com` catalog.
//! The search page renders through JavaScript, but the media data rides along
//! as a JSON blob assigned inline in a script tag; reading one JSON value
//! from the assignment point sidesteps the DOM entirely.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;

use crate::book::{CoverImage, CoverImageSet, LendingFormat};
use crate::error::ProviderError;

const MEDIA_ITEMS_MARKER: &str = "window.OverDrive.mediaItems = ";

/// One media entry parsed from a subdomain's search results.
#[derive(Debug, Clone)]
pub struct OverdriveHit {
    pub available: bool,
    pub url: String,
    pub format: LendingFormat,
    pub covers: Option<CoverImageSet>,
}

/// An OverDrive-backed catalog addressed by subdomain.
pub trait OverdriveCatalog: Send + Sync {
    fn lookup(
        &self,
        subdomain: &str,
        title: &str,
        author: &str,
    ) -> Result<Vec<OverdriveHit>, ProviderError>;
}

pub struct OverdriveClient {
    client: reqwest::blocking::Client,
}

impl OverdriveClient {
    pub fn new(timeout: Duration) -> Result<Self, ProviderError> {
        Ok(Self {
            client: super::http_client(timeout)?,
        })
    }
}

impl OverdriveCatalog for OverdriveClient {
    fn lookup(
        &self,
        subdomain: &str,
        title: &str,
        author: &str,
    ) -> Result<Vec<OverdriveHit>, ProviderError> {
        let body = self
            .client
            .get(format!("https://{}.overdrive.com/search", subdomain))
            .query(&[("query", title), ("creator", author), ("sortBy", "relevance")])
            .send()
            .map_err(ProviderError::network)?
            .error_for_status()
            .map_err(ProviderError::network)?
            .text()
            .map_err(ProviderError::network)?;
        parse_search_page(&body, subdomain, title)
    }
}

#[derive(Debug, Deserialize)]
struct MediaItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    subtitle: String,
    #[serde(rename = "isAvailable", default)]
    is_available: bool,
    #[serde(rename = "type")]
    media_type: MediaTypeTag,
    #[serde(default)]
    covers: BTreeMap<String, CoverRef>,
}

#[derive(Debug, Deserialize)]
struct MediaTypeTag {
    name: String,
}

#[derive(Debug, Deserialize)]
struct CoverRef {
    href: String,
}

/// Parse the embedded media-items blob out of a search page.
///
/// Entries whose title does not correspond to the search title are dropped;
/// filtering on availability is left to the caller, which also tags hits with
/// their originating subdomain. A page without the blob means no results.
pub fn parse_search_page(
    body: &str,
    subdomain: &str,
    search_title: &str,
) -> Result<Vec<OverdriveHit>, ProviderError> {
    let Some(start) = body.find(MEDIA_ITEMS_MARKER) else {
        return Ok(Vec::new());
    };
    let blob = &body[start + MEDIA_ITEMS_MARKER.len()..];
    // Reading a single JSON value means the end of the blob never has to be
    // located in the surrounding script text.
    let mut values = serde_json::Deserializer::from_str(blob).into_iter::<serde_json::Value>();
    let media_items = match values.next() {
        Some(Ok(value)) => value,
        Some(Err(e)) => return Err(ProviderError::parse("overdrive", e.to_string())),
        None => return Err(ProviderError::parse("overdrive", "empty media items blob")),
    };
    let Some(items) = media_items.as_object() else {
        return Err(ProviderError::parse(
            "overdrive",
            "media items blob is not an object",
        ));
    };

    let mut hits = Vec::new();
    for (id, value) in items {
        let item: MediaItem = serde_json::from_value(value.clone())
            .map_err(|e| ProviderError::parse("overdrive", format!("media item {}: {}", id, e)))?;
        if !titles_match(search_title, &item.title, &item.subtitle) {
            continue;
        }
        let format = match item.media_type.name.as_str() {
            "eBook" => Some(LendingFormat::Ebook),
            "Audiobook" => Some(LendingFormat::Audiobook),
            _ => None,
        };
        hits.push(OverdriveHit {
            available: item.is_available && format.is_some(),
            // Redirects to the library-specific record for logged-in readers.
            url: format!("https://{}.overdrive.com/media/{}", subdomain, id),
            format: format.unwrap_or(LendingFormat::Ebook),
            covers: pick_covers(&item.covers),
        });
    }
    Ok(hits)
}

/// Exact title match, or a main-title/subtitle prefix match when the search
/// title carries a subtitle after a colon.
fn titles_match(search_title: &str, item_title: &str, item_subtitle: &str) -> bool {
    if search_title == item_title {
        return true;
    }
    let Some((main, sub)) = search_title.split_once(':') else {
        return false;
    };
    item_title.starts_with(main.trim()) && item_subtitle.starts_with(sub.trim())
}

/// Pick covers from the `cover{N}Wide` set: smallest width as thumbnail,
/// largest as full.
fn pick_covers(covers: &BTreeMap<String, CoverRef>) -> Option<CoverImageSet> {
    if covers.is_empty() {
        return None;
    }
    let mut sized: Vec<(u32, &CoverRef)> = covers
        .iter()
        .map(|(key, cover)| (cover_width(key), cover))
        .collect();
    sized.sort_by_key(|(width, _)| *width);
    Some(CoverImageSet {
        thumbnail: sized.first().map(|(_, c)| CoverImage { url: c.href.clone() }),
        full: sized.last().map(|(_, c)| CoverImage { url: c.href.clone() }),
    })
}

fn cover_width(key: &str) -> u32 {
    key.strip_prefix("cover")
        .and_then(|k| k.strip_suffix("Wide"))
        .and_then(|width| width.parse().ok())
        .unwrap_or(0)
}
