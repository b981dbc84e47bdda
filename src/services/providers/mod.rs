/// Movie database provider abstraction
///
/// The search aggregator talks to the provider only through [`MovieProvider`], so the
/// RapidAPI client can be swapped for a stub in tests or for another data source.
use crate::models::{MovieDetail, SearchResponse};

pub mod rapidapi;

pub use rapidapi::RapidApiMovieProvider;

/// Failures of a provider search call
#[derive(thiserror::Error, Debug)]
pub enum ProviderError {
    #[error("no provider API key is configured (set RAPIDAPI_KEY)")]
    MissingApiKey,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The body is kept for logs and left out of the message
    #[error("provider returned status {status}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to parse provider response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ProviderError {
    /// Upstream response body, when the provider answered with an error status
    pub fn response_body(&self) -> Option<&str> {
        match self {
            ProviderError::Status { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Trait for movie database providers
///
/// Providers expose one search call and one per-title detail call.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieProvider: Send + Sync {
    /// Search for titles matching `query` (first page only)
    ///
    /// Must fail with [`ProviderError::MissingApiKey`] before any network call when
    /// no credential is configured.
    async fn search_movies(&self, query: &str) -> Result<SearchResponse, ProviderError>;

    /// Fetch the detail record for one external id
    ///
    /// Every failure mode (blank id, transport error, non-success status, bad body)
    /// collapses to `None`.
    async fn fetch_detail(&self, imdb_id: &str) -> Option<MovieDetail>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
