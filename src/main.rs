use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use movie_recommender::{
    catalog::Catalog,
    config::Config,
    routes::{create_router, AppState},
    services::Recommender,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;

    // Build all similarity state before accepting requests
    let build_config = config.clone();
    let recommender = tokio::task::spawn_blocking(move || -> anyhow::Result<Recommender> {
        let catalog = Catalog::from_path(&build_config.catalog_path)
            .with_context(|| format!("Failed to load catalog {}", build_config.catalog_path))?;
        tracing::info!(
            path = %build_config.catalog_path,
            movies = catalog.len(),
            "Catalog loaded"
        );
        Ok(Recommender::build(
            catalog,
            build_config.match_algorithm,
            build_config.match_threshold,
        ))
    })
    .await
    .context("Recommender build task failed")??;

    let state = Arc::new(AppState::new(Arc::new(recommender), &config));
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(
        addr = %addr,
        threshold = config.match_threshold,
        algorithm = ?config.match_algorithm,
        "Server running"
    );
    axum::serve(listener, app).await?;

    Ok(())
}
