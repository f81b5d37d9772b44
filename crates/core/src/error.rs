/// Top-level error type for the shelf-to-records pipeline.
#[derive(Debug, thiserror::Error)]
pub enum FindError {
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Shelf read error: {0}")]
    Shelf(#[from] ShelfError),
}

/// Failure of a single catalog/lending source. The cascade downgrades these
/// to "this tier found nothing" and moves on to the next tier.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Provider {provider} response did not match expected structure: {detail}")]
    Parse {
        provider: &'static str,
        detail: String,
    },

    #[error("Provider {0} has no lookup implementation")]
    Unimplemented(&'static str),
}

impl ProviderError {
    pub(crate) fn network(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }

    pub(crate) fn parse(provider: &'static str, detail: impl Into<String>) -> Self {
        Self::Parse {
            provider,
            detail: detail.into(),
        }
    }
}

/// Shelf-export ingestion failure. Malformed caller input fails the whole
/// run instead of being silently skipped.
#[derive(Debug, thiserror::Error)]
pub enum ShelfError {
    #[error("Shelf export is missing required column: {0}")]
    MissingColumn(&'static str),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
