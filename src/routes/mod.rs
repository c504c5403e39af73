use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    services::Recommender,
};

pub mod recommendations;
pub mod titles;

/// Shared, read-only state handed to every handler
pub struct AppState {
    pub recommender: Arc<Recommender>,
    /// Limit used when a request does not specify one
    pub default_limit: usize,
    /// Largest limit a request may ask for
    pub max_limit: usize,
}

impl AppState {
    pub fn new(recommender: Arc<Recommender>, config: &Config) -> Self {
        Self {
            recommender,
            default_limit: config.default_limit,
            max_limit: config.max_limit,
        }
    }

    /// Applies the default and checks the requested limit against the bounds
    pub fn resolve_limit(&self, requested: Option<usize>) -> AppResult<usize> {
        let limit = requested.unwrap_or(self.default_limit);
        if limit == 0 || limit > self.max_limit {
            return Err(AppError::InvalidInput(format!(
                "limit must be between 1 and {}",
                self.max_limit
            )));
        }
        Ok(limit)
    }
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/recommendations",
            get(recommendations::recommend).post(recommendations::recommend_form),
        )
        .route("/titles/search", get(titles::search))
}

/// Health check endpoint
async fn health_check(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "movies": state.recommender.catalog().len(),
        })),
    )
}
