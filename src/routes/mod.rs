use axum::{http::StatusCode, middleware, routing::get, Json, Router};
use serde_json::{json, Value};
use tokio::sync::watch;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    middleware::{make_span_with_request_id, request_id_middleware},
    services::MovieSearchService,
};

pub mod movies;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub search: MovieSearchService,
    shutdown: watch::Receiver<bool>,
}

impl AppState {
    /// State whose searches are never cancelled by shutdown
    pub fn new(search: MovieSearchService) -> Self {
        let (_, shutdown) = watch::channel(false);
        Self::with_shutdown(search, shutdown)
    }

    /// State whose in-flight searches are cancelled once `shutdown` flips to true
    pub fn with_shutdown(search: MovieSearchService, shutdown: watch::Receiver<bool>) -> Self {
        Self { search, shutdown }
    }

    /// Resolves when shutdown has been requested; pends forever if it never can be
    pub async fn shutdown_requested(&self) {
        let mut shutdown = self.shutdown.clone();
        let requested = shutdown.wait_for(|stopping| *stopping).await.is_ok();
        if !requested {
            std::future::pending::<()>().await;
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(movies::search_page))
        .route("/movies", get(movies::search_page))
        .route("/Movies", get(movies::search_page))
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id)),
        )
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/movies/search", get(movies::search_json))
        .layer(CorsLayer::permissive())
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
