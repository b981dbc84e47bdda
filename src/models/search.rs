use serde::{Deserialize, Serialize};

use super::{MovieDetail, SearchMatch};

/// Shown when a non-blank search ends with nothing to display
pub const NO_RESULTS_MESSAGE: &str =
    "No movies found for that search. Try another title or broaden your keywords.";

const UNKNOWN: &str = "Unknown";
const PLOT_UNAVAILABLE: &str = "Plot details unavailable.";

/// A search match enriched with its detail record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieResult {
    pub title: String,
    pub year: String,
    pub imdb_id: String,
    pub poster_url: String,
    pub genre: String,
    pub lead_actor: String,
    pub plot: String,
}

impl MovieResult {
    /// Merges a search match with its detail record.
    ///
    /// Title and year prefer the detail record; id and poster always come from the match.
    pub fn merge(search_match: SearchMatch, detail: MovieDetail) -> Self {
        let lead_actor = lead_actor(detail.actors.as_deref()).unwrap_or(UNKNOWN).to_string();

        Self {
            title: detail.title.unwrap_or(search_match.title),
            year: detail.year.unwrap_or(search_match.year),
            imdb_id: search_match.imdb_id,
            poster_url: search_match.poster,
            genre: detail.genre.unwrap_or_else(|| UNKNOWN.to_string()),
            lead_actor,
            plot: detail.plot.unwrap_or_else(|| PLOT_UNAVAILABLE.to_string()),
        }
    }
}

/// First non-empty name of a comma-separated actors list
fn lead_actor(actors: Option<&str>) -> Option<&str> {
    actors?.split(',').map(str::trim).find(|name| !name.is_empty())
}

/// Everything returned to the caller for one query
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchOutcome {
    pub query: String,
    pub results: Vec<MovieResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SearchOutcome {
    /// Outcome for a blank query: no results, no message
    pub fn blank(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            results: Vec::new(),
            message: None,
        }
    }

    /// Outcome for a completed search; attaches the no-results message when empty
    pub fn completed(query: impl Into<String>, results: Vec<MovieResult>) -> Self {
        let message = results
            .is_empty()
            .then(|| NO_RESULTS_MESSAGE.to_string());

        Self {
            query: query.into(),
            results,
            message,
        }
    }

    /// Outcome carrying an error message for display
    pub fn failed(query: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            results: Vec::new(),
            message: Some(message.into()),
        }
    }

    pub fn has_results(&self) -> bool {
        !self.results.is_empty()
    }
}
