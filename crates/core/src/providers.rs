//! Provider clients, one per external catalog/lending source.
//!
//! Each client wraps URL construction, the network fetch, and parsing of the
//! provider's search-results response into structured availability data. The
//! per-provider traits are the seams the cascade is driven and tested through.

pub mod gutenberg;
pub mod minuteman;
pub mod openlibrary;
pub mod overdrive;

use std::time::Duration;

use crate::error::ProviderError;

/// Blocking client with a bounded per-fetch timeout. Lookups are never
/// retried; a hung fetch is cut off rather than waited out.
pub(crate) fn http_client(timeout: Duration) -> Result<reqwest::blocking::Client, ProviderError> {
    reqwest::blocking::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("find-libraries/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(ProviderError::network)
}
