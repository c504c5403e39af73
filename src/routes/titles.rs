use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{error::AppResult, models::ScoredMovie, routes::AppState};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    q: String,
    limit: Option<usize>,
}

/// Handler for title search endpoint
///
/// Lists the catalog titles a query would fuzzy-match, best first. An empty
/// list means a recommendation request with the same text would 404.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<Vec<ScoredMovie>>> {
    let limit = state.resolve_limit(params.limit)?;
    let matches = state.recommender.close_matches(&params.q, limit);
    Ok(Json(matches))
}
