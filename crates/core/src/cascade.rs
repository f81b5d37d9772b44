//! The provider cascade: fixed priority order, short-circuiting on the first
//! source that reports availability.
//!
//! Order: public-domain text, then the Hoopla-annotated catalog, then the
//! OverDrive subdomains, then Open Library. The OverDrive tier fans out
//! across every configured subdomain and unions the available hits, merged in
//! configured subdomain order; the other tiers return at most one record and
//! stop the cascade when they do.

use tracing::warn;

use crate::aggregate;
use crate::book::{BookAvailability, BookQuery};
use crate::config::ProvidersConfig;
use crate::error::ProviderError;
use crate::providers::gutenberg::{PublicDomainIndex, UnindexedPublicDomain};
use crate::providers::minuteman::{HooplaCatalog, MinutemanClient};
use crate::providers::openlibrary::{LendingArchive, OpenLibraryClient};
use crate::providers::overdrive::{OverdriveCatalog, OverdriveClient};
use crate::title::{catalog_search_title, extract_title};

pub struct Cascade {
    public_domain: Box<dyn PublicDomainIndex>,
    hoopla: Box<dyn HooplaCatalog>,
    overdrive: Box<dyn OverdriveCatalog>,
    open_library: Box<dyn LendingArchive>,
    overdrive_subdomains: Vec<String>,
}

impl Cascade {
    /// Cascade over the real network clients.
    pub fn from_config(config: &ProvidersConfig) -> Result<Self, ProviderError> {
        let timeout = config.timeout();
        Ok(Self {
            public_domain: Box::new(UnindexedPublicDomain),
            hoopla: Box::new(MinutemanClient::new(&config.catalog_base_url, timeout)?),
            overdrive: Box::new(OverdriveClient::new(timeout)?),
            open_library: Box::new(OpenLibraryClient::new(
                &config.open_library_base_url,
                timeout,
            )?),
            overdrive_subdomains: config.overdrive_subdomains.clone(),
        })
    }

    /// Cascade over caller-supplied providers.
    pub fn new(
        public_domain: Box<dyn PublicDomainIndex>,
        hoopla: Box<dyn HooplaCatalog>,
        overdrive: Box<dyn OverdriveCatalog>,
        open_library: Box<dyn LendingArchive>,
        overdrive_subdomains: Vec<String>,
    ) -> Self {
        Self {
            public_domain,
            hoopla,
            overdrive,
            open_library,
            overdrive_subdomains,
        }
    }

    /// Swap the public-domain strategy (e.g. for an index-backed one).
    pub fn with_public_domain(mut self, strategy: Box<dyn PublicDomainIndex>) -> Self {
        self.public_domain = strategy;
        self
    }

    /// Resolve one query into availability records.
    ///
    /// Returns whatever the first successful tier produced; an empty vector
    /// when nothing is available anywhere — never an error. A provider
    /// failure is logged and treated as "this tier found nothing" so one bad
    /// source cannot sink the whole lookup.
    pub fn resolve(&self, query: &BookQuery) -> Vec<BookAvailability> {
        let parts = extract_title(&query.title);

        match self.public_domain.lookup(&parts.base_title, &query.author) {
            Ok(Some(hit)) => return vec![aggregate::from_public_domain(query, &hit)],
            Ok(None) => {}
            Err(e) => warn!("Public-domain lookup failed for '{}': {}", query.title, e),
        }

        let search_title = catalog_search_title(&parts);
        match self.hoopla.lookup(&search_title, &query.author) {
            Ok(result) if result.available => {
                return vec![aggregate::from_hoopla(query, result)]
            }
            Ok(_) => {}
            Err(e) => warn!("Hoopla catalog lookup failed for '{}': {}", query.title, e),
        }

        let mut records = Vec::new();
        for subdomain in &self.overdrive_subdomains {
            match self
                .overdrive
                .lookup(subdomain, &parts.base_title, &query.author)
            {
                Ok(hits) => records.extend(
                    hits.into_iter()
                        .filter(|hit| hit.available)
                        .map(|hit| aggregate::from_overdrive(query, subdomain, hit)),
                ),
                Err(e) => warn!(
                    "OverDrive lookup failed for '{}' at {}: {}",
                    query.title, subdomain, e
                ),
            }
        }
        if !records.is_empty() {
            return records;
        }

        match self.open_library.lookup(&parts.base_title, &query.author) {
            Ok(true) => vec![aggregate::from_open_library(query)],
            Ok(false) => Vec::new(),
            Err(e) => {
                warn!("Open Library lookup failed for '{}': {}", query.title, e);
                Vec::new()
            }
        }
    }
}
