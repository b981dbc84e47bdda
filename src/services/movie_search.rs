use std::future::Future;
use std::sync::Arc;

use tokio::task::JoinSet;

use crate::{
    error::{AppError, AppResult},
    models::{MovieDetail, MovieResult, SearchMatch, SearchOutcome},
    services::providers::{MovieProvider, ProviderError},
};

/// Searches the movie database and enriches every match with its detail record
///
/// One search call, then one detail call per match. Detail failures drop the match
/// and never fail the search.
#[derive(Clone)]
pub struct MovieSearchService {
    provider: Arc<dyn MovieProvider>,
}

impl MovieSearchService {
    pub fn new(provider: Arc<dyn MovieProvider>) -> Self {
        Self { provider }
    }

    /// Runs a search, aborting with [`AppError::Cancelled`] if `cancelled` resolves first.
    ///
    /// Dropping the search future aborts any detail lookups still in flight.
    pub async fn search_until<C>(&self, query: &str, cancelled: C) -> AppResult<SearchOutcome>
    where
        C: Future<Output = ()>,
    {
        tokio::select! {
            biased;
            _ = cancelled => {
                tracing::info!(query = %query, "Movie search cancelled");
                Err(AppError::Cancelled)
            }
            outcome = self.search(query) => outcome,
        }
    }

    /// Runs a search to completion
    pub async fn search(&self, query: &str) -> AppResult<SearchOutcome> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Ok(SearchOutcome::blank(query));
        }

        let response = self
            .provider
            .search_movies(trimmed)
            .await
            .map_err(|e| match e {
                missing @ ProviderError::MissingApiKey => {
                    AppError::Configuration(missing.to_string())
                }
                other => {
                    tracing::error!(
                        query = %trimmed,
                        error = %other,
                        body = other.response_body().unwrap_or(""),
                        "Movie search call failed"
                    );
                    AppError::ProviderUnavailable(other.to_string())
                }
            })?;

        let provider_error = response.error.clone();
        let Some(matches) = response.into_matches() else {
            tracing::info!(
                query = %trimmed,
                provider_error = provider_error.as_deref().unwrap_or(""),
                "Movie search returned no matches"
            );
            return Ok(SearchOutcome::completed(query, Vec::new()));
        };

        let match_count = matches.len();
        let results = self.enrich(matches).await;

        tracing::info!(
            query = %trimmed,
            matches = match_count,
            results = results.len(),
            dropped = match_count - results.len(),
            "Movie search completed"
        );

        Ok(SearchOutcome::completed(query, results))
    }

    /// Fetches details for all matches concurrently and merges them in match order
    async fn enrich(&self, matches: Vec<SearchMatch>) -> Vec<MovieResult> {
        let mut tasks = JoinSet::new();

        for (index, search_match) in matches.iter().enumerate() {
            let provider = Arc::clone(&self.provider);
            let imdb_id = search_match.imdb_id.clone();
            tasks.spawn(async move { (index, provider.fetch_detail(&imdb_id).await) });
        }

        let mut slots: Vec<Option<MovieDetail>> = (0..matches.len()).map(|_| None).collect();

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, detail)) => slots[index] = detail,
                Err(e) => tracing::warn!(error = %e, "Movie detail task failed"),
            }
        }

        matches
            .into_iter()
            .zip(slots)
            .filter_map(|(search_match, detail)| match detail {
                Some(detail) => Some(MovieResult::merge(search_match, detail)),
                None => {
                    tracing::debug!(
                        imdb_id = %search_match.imdb_id,
                        "Dropping match without detail record"
                    );
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SearchResponse, NO_RESULTS_MESSAGE};
    use crate::services::providers::MockMovieProvider;
    use std::time::Duration;

    fn search_match(imdb_id: &str, title: &str, year: &str) -> SearchMatch {
        SearchMatch {
            title: title.to_string(),
            year: year.to_string(),
            imdb_id: imdb_id.to_string(),
            media_type: "movie".to_string(),
            poster: format!("https://img/{}.jpg", imdb_id),
        }
    }

    fn positive(matches: Vec<SearchMatch>) -> SearchResponse {
        SearchResponse {
            total_results: Some(matches.len().to_string()),
            search: Some(matches),
            response: Some("True".to_string()),
            error: None,
        }
    }

    fn toy_story_detail() -> MovieDetail {
        MovieDetail {
            title: Some("Toy Story".to_string()),
            year: Some("1995".to_string()),
            genre: Some("Animation, Adventure, Comedy".to_string()),
            actors: Some("Tom Hanks, Tim Allen, Don Rickles".to_string()),
            plot: Some("A cowboy doll is profoundly threatened.".to_string()),
            imdb_id: Some("tt0114709".to_string()),
            ..Default::default()
        }
    }

    fn service(mock: MockMovieProvider) -> MovieSearchService {
        MovieSearchService::new(Arc::new(mock))
    }

    #[tokio::test]
    async fn test_blank_query_makes_no_calls() {
        let mut mock = MockMovieProvider::new();
        mock.expect_search_movies().never();
        mock.expect_fetch_detail().never();
        let service = service(mock);

        for query in ["", "   ", "\t\n"] {
            let outcome = service.search(query).await.unwrap();
            assert_eq!(outcome.query, query);
            assert!(outcome.results.is_empty());
            assert_eq!(outcome.message, None);
        }
    }

    #[tokio::test]
    async fn test_toy_story_drops_failed_detail() {
        let mut mock = MockMovieProvider::new();
        mock.expect_search_movies()
            .times(1)
            .returning(|_| {
                Ok(positive(vec![
                    search_match("tt0114709", "Toy Story", "1995"),
                    search_match("tt0435761", "Toy Story 3", "2010"),
                ]))
            });
        mock.expect_fetch_detail()
            .times(2)
            .returning(|imdb_id: &str| match imdb_id {
                "tt0114709" => Some(toy_story_detail()),
                _ => None,
            });

        let outcome = service(mock).search("Toy Story").await.unwrap();

        assert_eq!(outcome.query, "Toy Story");
        assert_eq!(outcome.message, None);
        assert_eq!(outcome.results.len(), 1);
        let result = &outcome.results[0];
        assert_eq!(result.imdb_id, "tt0114709");
        assert_eq!(result.lead_actor, "Tom Hanks");
        assert_eq!(result.genre, "Animation, Adventure, Comedy");
        assert_eq!(result.poster_url, "https://img/tt0114709.jpg");
    }

    #[tokio::test]
    async fn test_results_keep_provider_order() {
        let ids = ["tt1", "tt2", "tt3", "tt4", "tt5"];
        let mut mock = MockMovieProvider::new();
        mock.expect_search_movies().returning(move |_| {
            Ok(positive(
                ids.iter()
                    .map(|id| search_match(id, &format!("Movie {}", id), "2000"))
                    .collect(),
            ))
        });
        mock.expect_fetch_detail().returning(|imdb_id: &str| {
            (imdb_id != "tt3").then(|| MovieDetail {
                plot: Some(format!("Plot of {}", imdb_id)),
                ..Default::default()
            })
        });

        let outcome = service(mock).search("movie").await.unwrap();
        let returned: Vec<&str> = outcome.results.iter().map(|r| r.imdb_id.as_str()).collect();
        assert_eq!(returned, vec!["tt1", "tt2", "tt4", "tt5"]);
        assert_eq!(outcome.results[3].plot, "Plot of tt5");
        assert_eq!(outcome.results[0].title, "Movie tt1");
    }

    #[tokio::test]
    async fn test_negative_flag_is_no_results_not_error() {
        let mut mock = MockMovieProvider::new();
        mock.expect_search_movies().returning(|_| {
            Ok(SearchResponse {
                response: Some("False".to_string()),
                error: Some("Movie not found!".to_string()),
                ..Default::default()
            })
        });
        mock.expect_fetch_detail().never();

        let outcome = service(mock).search("qwertyuiop").await.unwrap();
        assert!(outcome.results.is_empty());
        assert_eq!(outcome.message.as_deref(), Some(NO_RESULTS_MESSAGE));
    }

    #[tokio::test]
    async fn test_absent_match_list_is_no_results() {
        let mut mock = MockMovieProvider::new();
        mock.expect_search_movies().returning(|_| {
            Ok(SearchResponse {
                response: Some("True".to_string()),
                ..Default::default()
            })
        });
        mock.expect_fetch_detail().never();

        let outcome = service(mock).search("Toy Story").await.unwrap();
        assert!(outcome.results.is_empty());
        assert_eq!(outcome.message.as_deref(), Some(NO_RESULTS_MESSAGE));
    }

    #[tokio::test]
    async fn test_all_details_failing_is_no_results() {
        let mut mock = MockMovieProvider::new();
        mock.expect_search_movies()
            .returning(|_| Ok(positive(vec![search_match("tt0114709", "Toy Story", "1995")])));
        mock.expect_fetch_detail().returning(|_: &str| None);

        let outcome = service(mock).search("Toy Story").await.unwrap();
        assert!(outcome.results.is_empty());
        assert_eq!(outcome.message.as_deref(), Some(NO_RESULTS_MESSAGE));
    }

    #[tokio::test]
    async fn test_missing_key_is_configuration_error() {
        let mut mock = MockMovieProvider::new();
        mock.expect_search_movies()
            .times(1)
            .returning(|_| Err(ProviderError::MissingApiKey));
        mock.expect_fetch_detail().never();

        let result = service(mock).search("Toy Story").await;
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_provider_failure_aborts_search() {
        let mut mock = MockMovieProvider::new();
        mock.expect_search_movies().times(1).returning(|_| {
            Err(ProviderError::Status {
                status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
                body: "<html>scheduled maintenance</html>".to_string(),
            })
        });
        mock.expect_fetch_detail().never();

        let result = service(mock).search("Toy Story").await;
        match result {
            Err(e @ AppError::ProviderUnavailable(_)) => {
                let message = e.user_message();
                assert!(message.contains("503"));
                assert!(!message.contains("maintenance"));
            }
            other => panic!("expected provider error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_query_is_trimmed_for_provider_but_echoed_verbatim() {
        let mut mock = MockMovieProvider::new();
        mock.expect_search_movies()
            .withf(|query: &str| query == "Toy Story")
            .times(1)
            .returning(|_| Ok(SearchResponse::default()));

        let outcome = service(mock).search("  Toy Story ").await.unwrap();
        assert_eq!(outcome.query, "  Toy Story ");
    }

    /// Provider whose detail lookups never finish
    struct StalledProvider;

    #[async_trait::async_trait]
    impl MovieProvider for StalledProvider {
        async fn search_movies(&self, _query: &str) -> Result<SearchResponse, ProviderError> {
            Ok(positive(vec![search_match("tt0114709", "Toy Story", "1995")]))
        }

        async fn fetch_detail(&self, _imdb_id: &str) -> Option<MovieDetail> {
            std::future::pending().await
        }

        fn name(&self) -> &'static str {
            "stalled"
        }
    }

    #[tokio::test]
    async fn test_cancellation_aborts_in_flight_search() {
        let service = MovieSearchService::new(Arc::new(StalledProvider));

        let result = service
            .search_until("Toy Story", tokio::time::sleep(Duration::from_millis(20)))
            .await;
        assert!(matches!(result, Err(AppError::Cancelled)));
    }

    #[tokio::test]
    async fn test_already_cancelled_makes_no_calls() {
        let mut mock = MockMovieProvider::new();
        mock.expect_search_movies().never();

        let result = service(mock)
            .search_until("Toy Story", std::future::ready(()))
            .await;
        assert!(matches!(result, Err(AppError::Cancelled)));
    }

    #[tokio::test]
    async fn test_uncancelled_search_completes() {
        let mut mock = MockMovieProvider::new();
        mock.expect_search_movies()
            .returning(|_| Ok(positive(vec![search_match("tt0114709", "Toy Story", "1995")])));
        mock.expect_fetch_detail()
            .returning(|_: &str| Some(toy_story_detail()));

        let outcome = service(mock)
            .search_until("Toy Story", std::future::pending())
            .await
            .unwrap();
        assert_eq!(outcome.results.len(), 1);
    }
}
