use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Movie database unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Search cancelled")]
    Cancelled,
}

impl AppError {
    /// Message shown to a person on the search page
    pub fn user_message(&self) -> String {
        match self {
            AppError::Configuration(msg) => format!("Movie search is not configured: {}", msg),
            AppError::ProviderUnavailable(msg) => format!(
                "We hit a snag while talking to the movie database: {}",
                msg
            ),
            AppError::Cancelled => "The search was cancelled before it finished.".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ProviderUnavailable(_) => StatusCode::BAD_GATEWAY,
            AppError::Cancelled => StatusCode::REQUEST_TIMEOUT,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
