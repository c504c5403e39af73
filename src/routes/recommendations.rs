use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::RecommendationResponse,
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub q: String,
    pub limit: Option<usize>,
}

/// Body of the form-style POST; `movie_name` matches the HTML form field
#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub movie_name: String,
    pub limit: Option<usize>,
}

/// Handler for `GET /recommendations?q=..&limit=..`
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<RecommendationQuery>,
) -> AppResult<Json<RecommendationResponse>> {
    run(&state, request_id, params.q, params.limit).map(Json)
}

/// Handler for `POST /recommendations` with a JSON body
pub async fn recommend_form(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    run(&state, request_id, request.movie_name, request.limit).map(Json)
}

fn run(
    state: &AppState,
    request_id: RequestId,
    query: String,
    limit: Option<usize>,
) -> AppResult<RecommendationResponse> {
    let limit = state.resolve_limit(limit)?;

    tracing::info!(
        request_id = %request_id,
        query = %query,
        limit,
        "Processing recommendation request"
    );

    let ranking = state.recommender.rank(&query, limit)?;

    Ok(RecommendationResponse {
        titles: ranking.titles(),
        matched_title: ranking.matched.title,
        results: ranking.results,
        query,
    })
}
