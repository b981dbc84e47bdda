/// Movie Database Alternative provider (via RapidAPI)
///
/// API Flow:
/// 1. Search: GET /?s={query}&r=json&page=1 → list of matches with IMDb ids
/// 2. Details: GET /?i={imdb_id}&r=json → full record for one title
use crate::{
    config::MovieApiSettings,
    models::{MovieDetail, SearchResponse},
    services::providers::{MovieProvider, ProviderError},
};
use reqwest::{header::ACCEPT, Client as HttpClient, RequestBuilder};
use serde::de::DeserializeOwned;

const API_KEY_HEADER: &str = "x-rapidapi-key";
const API_HOST_HEADER: &str = "x-rapidapi-host";
const SEARCH_PAGE: &str = "1";

#[derive(Clone)]
pub struct RapidApiMovieProvider {
    http_client: HttpClient,
    settings: MovieApiSettings,
}

impl RapidApiMovieProvider {
    pub fn new(settings: MovieApiSettings) -> Self {
        Self::with_client(HttpClient::new(), settings)
    }

    pub fn with_client(http_client: HttpClient, settings: MovieApiSettings) -> Self {
        Self {
            http_client,
            settings,
        }
    }

    /// Builds a GET against the provider root with auth headers attached
    fn request(&self, api_key: &str) -> RequestBuilder {
        let url = format!("{}/", self.settings.base_url);
        self.http_client
            .get(url)
            .header(ACCEPT, "application/json")
            .header(API_KEY_HEADER, api_key)
            .header(API_HOST_HEADER, &self.settings.host)
    }

    /// Sends a request and decodes a successful JSON body
    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ProviderError> {
        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status { status, body });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait::async_trait]
impl MovieProvider for RapidApiMovieProvider {
    async fn search_movies(&self, query: &str) -> Result<SearchResponse, ProviderError> {
        let api_key = self.settings.api_key().ok_or(ProviderError::MissingApiKey)?;

        let search: SearchResponse = self
            .send_json(
                self.request(api_key)
                    .query(&[("s", query), ("r", "json"), ("page", SEARCH_PAGE)]),
            )
            .await?;

        tracing::info!(
            query = %query,
            total_results = search.total_results.as_deref().unwrap_or("0"),
            response = search.response.as_deref().unwrap_or("missing"),
            provider = self.name(),
            "Movie search call completed"
        );

        Ok(search)
    }

    async fn fetch_detail(&self, imdb_id: &str) -> Option<MovieDetail> {
        let imdb_id = imdb_id.trim();
        if imdb_id.is_empty() {
            return None;
        }

        let api_key = self.settings.api_key()?;

        let request = self
            .request(api_key)
            .query(&[("i", imdb_id), ("r", "json")]);

        match self.send_json::<MovieDetail>(request).await {
            Ok(detail) => {
                tracing::debug!(imdb_id = %imdb_id, provider = self.name(), "Movie detail fetched");
                Some(detail)
            }
            Err(e) => {
                tracing::warn!(
                    imdb_id = %imdb_id,
                    error = %e,
                    provider = self.name(),
                    "Movie detail lookup failed"
                );
                None
            }
        }
    }

    fn name(&self) -> &'static str {
        "rapidapi_movie_database"
    }
}
