//! Open Library availability check.
//!
//! The one provider with a documented JSON API
//! (https://openlibrary.org/dev/docs/api/search). A title match with borrow
//! availability means the Internet Archive will lend the book.

use std::time::Duration;

use serde::Deserialize;

use crate::error::ProviderError;

pub const DEFAULT_BASE_URL: &str = "https://openlibrary.org";

const BORROW_AVAILABLE: &str = "borrow_available";

/// A lending archive that can answer "is this borrowable right now".
pub trait LendingArchive: Send + Sync {
    fn lookup(&self, title: &str, author: &str) -> Result<bool, ProviderError>;
}

pub struct OpenLibraryClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl OpenLibraryClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ProviderError> {
        Ok(Self {
            client: super::http_client(timeout)?,
            base_url: base_url.into(),
        })
    }
}

impl LendingArchive for OpenLibraryClient {
    fn lookup(&self, title: &str, author: &str) -> Result<bool, ProviderError> {
        let response: SearchResponse = self
            .client
            .get(format!("{}/search.json", self.base_url))
            .query(&[
                ("q", title),
                ("author", author),
                ("mode", "ebooks"),
                ("has_fulltext", "true"),
            ])
            .send()
            .map_err(ProviderError::network)?
            .error_for_status()
            .map_err(ProviderError::network)?
            .json()
            .map_err(|e| ProviderError::parse("openlibrary", e.to_string()))?;
        Ok(is_borrowable(&response, title))
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    docs: Vec<Doc>,
}

#[derive(Debug, Deserialize)]
struct Doc {
    #[serde(default)]
    title: String,
    availability: Option<Availability>,
}

#[derive(Debug, Deserialize)]
struct Availability {
    status: Option<String>,
}

fn is_borrowable(response: &SearchResponse, title: &str) -> bool {
    let wanted = title.to_lowercase();
    response.docs.iter().any(|doc| {
        doc.title.to_lowercase() == wanted
            && doc
                .availability
                .as_ref()
                .and_then(|a| a.status.as_deref())
                == Some(BORROW_AVAILABLE)
    })
}
