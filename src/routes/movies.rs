use axum::{
    extract::{Query, State},
    response::Html,
    Extension, Json,
};
use serde::Deserialize;

use crate::{
    error::AppResult,
    middleware::RequestId,
    models::SearchOutcome,
    routes::AppState,
    views::render_search_page,
};

/// `searchTerm` wins when both it and `q` are sent
#[derive(Debug, Default, Deserialize)]
pub struct SearchPageQuery {
    #[serde(rename = "searchTerm", default)]
    search_term: Option<String>,
    #[serde(default)]
    q: Option<String>,
}

impl SearchPageQuery {
    fn into_query(self) -> String {
        self.search_term.or(self.q).unwrap_or_default()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchApiQuery {
    #[serde(default)]
    q: Option<String>,
}

/// Handler for the HTML search page
///
/// Search failures are rendered as a message on the page rather than an error status.
pub async fn search_page(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<SearchPageQuery>,
) -> Html<String> {
    let query = params.into_query();

    let outcome = match state
        .search
        .search_until(&query, state.shutdown_requested())
        .await
    {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Search page failed");
            SearchOutcome::failed(query, e.user_message())
        }
    };

    render_search_page(&outcome)
}

/// Handler for the JSON search endpoint
pub async fn search_json(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<SearchApiQuery>,
) -> AppResult<Json<SearchOutcome>> {
    let query = params.q.unwrap_or_default();

    tracing::info!(request_id = %request_id, query = %query, "Processing movie search request");

    let outcome = state
        .search
        .search_until(&query, state.shutdown_requested())
        .await?;

    tracing::info!(
        request_id = %request_id,
        results = outcome.results.len(),
        "Movie search request completed"
    );

    Ok(Json(outcome))
}
