//! Goodreads shelf-export ingestion.
//!
//! The export is a CSV with `Title` and `Author` columns and, usually, a
//! comma-separated `Bookshelves` column. Only rows shelved under the
//! configured shelf are looked up, and a row's bookshelves become the tags on
//! its output records.

use std::collections::BTreeSet;
use std::io::Read;

use crate::book::{BookAvailability, BookQuery};
use crate::cascade::Cascade;
use crate::config::{AppConfig, ShelfConfig};
use crate::error::{FindError, ShelfError};

/// Project a shelf export onto book queries, applying the shelf filter and
/// tag projection from config.
pub fn read_shelf<R: Read>(reader: R, config: &ShelfConfig) -> Result<Vec<BookQuery>, ShelfError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let title_idx = column(&headers, "Title")?;
    let author_idx = column(&headers, "Author")?;
    let shelves_idx = headers.iter().position(|h| h == "Bookshelves");

    let mut queries = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let shelves = shelves_idx.and_then(|i| record.get(i)).unwrap_or("");
        if shelves_idx.is_some() && !on_shelf(shelves, &config.shelf) {
            continue;
        }
        queries.push(BookQuery {
            title: record.get(title_idx).unwrap_or("").to_string(),
            author: record.get(author_idx).unwrap_or("").to_string(),
            tags: book_tags(shelves, &config.tag_shelves),
        });
    }
    Ok(queries)
}

/// The full pipeline: read a shelf export and resolve every entry through
/// the provider cascade. Per-book progress is logged at info level because
/// the web lookups are slow.
pub fn resolve_shelf<R: Read>(
    reader: R,
    config: &AppConfig,
) -> Result<Vec<BookAvailability>, FindError> {
    let queries = read_shelf(reader, &config.shelf)?;
    let cascade = Cascade::from_config(&config.providers)?;
    let mut records = Vec::new();
    for query in &queries {
        tracing::info!("{} by {}", query.title, query.author);
        records.extend(cascade.resolve(query));
    }
    Ok(records)
}

fn column(headers: &csv::StringRecord, name: &'static str) -> Result<usize, ShelfError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or(ShelfError::MissingColumn(name))
}

fn on_shelf(bookshelves: &str, shelf: &str) -> bool {
    bookshelves.split(',').map(str::trim).any(|s| s == shelf)
}

fn book_tags(bookshelves: &str, tag_shelves: &[String]) -> BTreeSet<String> {
    bookshelves
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter(|s| tag_shelves.is_empty() || tag_shelves.iter().any(|t| t.eq_ignore_ascii_case(s)))
        .map(String::from)
        .collect()
}
