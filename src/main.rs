use std::sync::Arc;

use movie_search::{
    config::Config,
    routes::{create_router, AppState},
    services::{providers::RapidApiMovieProvider, MovieSearchService},
};
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let movie_api = config.movie_api();
    if movie_api.api_key().is_none() {
        tracing::warn!("RAPIDAPI_KEY is not set; searches will fail until it is configured");
    }

    let provider = RapidApiMovieProvider::new(movie_api);
    let search = MovieSearchService::new(Arc::new(provider));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let app = create_router(AppState::with_shutdown(search, shutdown_rx));

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for shutdown signal");
                std::future::pending::<()>().await;
            }
            tracing::info!("Shutdown requested; cancelling in-flight searches");
            let _ = shutdown_tx.send(true);
        })
        .await?;

    Ok(())
}
