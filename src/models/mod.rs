use serde::{Deserialize, Deserializer};

pub mod search;

pub use search::{MovieResult, SearchOutcome, NO_RESULTS_MESSAGE};

// ============================================================================
// Movie Database API Types
// ============================================================================

/// Response body of the provider's search endpoint (`?s=...`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(rename = "Search", default)]
    pub search: Option<Vec<SearchMatch>>,
    #[serde(rename = "totalResults", default)]
    pub total_results: Option<String>,
    #[serde(rename = "Response", default)]
    pub response: Option<String>,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
}

impl SearchResponse {
    /// Returns the matches when the provider reports a positive response.
    ///
    /// A `Response` flag other than "True" (any case) or a missing list both mean
    /// no matches.
    pub fn into_matches(self) -> Option<Vec<SearchMatch>> {
        let positive = self
            .response
            .as_deref()
            .is_some_and(|flag| flag.eq_ignore_ascii_case("true"));

        if positive {
            self.search
        } else {
            None
        }
    }
}

/// One item of a provider search response
///
/// Missing and `null` fields both decode as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SearchMatch {
    #[serde(rename = "Title", default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(rename = "Year", default, deserialize_with = "null_as_empty")]
    pub year: String,
    #[serde(rename = "imdbID", default, deserialize_with = "null_as_empty")]
    pub imdb_id: String,
    #[serde(rename = "Type", default, deserialize_with = "null_as_empty")]
    pub media_type: String,
    #[serde(rename = "Poster", default, deserialize_with = "null_as_empty")]
    pub poster: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Response body of the provider's detail endpoint (`?i=...`)
///
/// Every field is optional; the provider omits or nulls them freely.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MovieDetail {
    #[serde(rename = "Title", default)]
    pub title: Option<String>,
    #[serde(rename = "Year", default)]
    pub year: Option<String>,
    #[serde(rename = "Rated", default)]
    pub rated: Option<String>,
    #[serde(rename = "Released", default)]
    pub released: Option<String>,
    #[serde(rename = "Genre", default)]
    pub genre: Option<String>,
    #[serde(rename = "Director", default)]
    pub director: Option<String>,
    #[serde(rename = "Writer", default)]
    pub writer: Option<String>,
    #[serde(rename = "Actors", default)]
    pub actors: Option<String>,
    #[serde(rename = "Plot", default)]
    pub plot: Option<String>,
    #[serde(rename = "Language", default)]
    pub language: Option<String>,
    #[serde(rename = "Poster", default)]
    pub poster: Option<String>,
    #[serde(rename = "imdbID", default)]
    pub imdb_id: Option<String>,
}
