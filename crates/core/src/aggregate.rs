//! Assembly of final availability records from whichever provider matched.
//!
//! Every record carries the query's original title, author, and tags;
//! the provider contributes source, URLs, format, and cover art.

use crate::book::{BookAvailability, BookQuery, Source};
use crate::providers::gutenberg::{self, GutenbergHit};
use crate::providers::minuteman::HooplaResult;
use crate::providers::overdrive::OverdriveHit;

fn base_record(query: &BookQuery, source: Source) -> BookAvailability {
    BookAvailability {
        title: query.title.clone(),
        author: query.author.clone(),
        tags: query.tags.clone(),
        source,
        source_detail: None,
        acquisition_url: None,
        format: None,
        covers: None,
    }
}

/// Public-domain hit: covers are derived from the e-book number.
pub fn from_public_domain(query: &BookQuery, hit: &GutenbergHit) -> BookAvailability {
    BookAvailability {
        covers: Some(gutenberg::covers(hit)),
        ..base_record(query, Source::Gutenberg)
    }
}

/// Hoopla annotation: the lending link and covers carry through when present.
pub fn from_hoopla(query: &BookQuery, result: HooplaResult) -> BookAvailability {
    BookAvailability {
        acquisition_url: result.acquisition_url,
        covers: result.covers,
        ..base_record(query, Source::Hoopla)
    }
}

/// OverDrive hit: tagged with the subdomain it came from.
pub fn from_overdrive(query: &BookQuery, subdomain: &str, hit: OverdriveHit) -> BookAvailability {
    BookAvailability {
        source_detail: Some(subdomain.to_string()),
        acquisition_url: Some(hit.url),
        format: Some(hit.format),
        covers: hit.covers,
        ..base_record(query, Source::Overdrive)
    }
}

/// Open Library match: the archive reports only that borrowing is possible.
pub fn from_open_library(query: &BookQuery) -> BookAvailability {
    base_record(query, Source::OpenLibrary)
}
