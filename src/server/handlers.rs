//! HTTP request handlers and shared application state.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::server::errors::ApiError;
use crate::{Corpus, HitEntry, Score};

/// Shared application state passed to every handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// fitted corpus, read-only for the lifetime of the server
    pub corpus: Arc<Corpus>,
    pub max_results: usize,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<HitEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ContentParams {
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContentResponse {
    pub name: String,
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub documents: usize,
    pub vocabulary: usize,
}

/// Handle GET /ls
pub async fn list_documents(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.corpus.names().into_iter().map(str::to_string).collect())
}

/// Handle GET /search?q=...&limit=...
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let query = params
        .q
        .ok_or_else(|| ApiError::BadRequest("missing query parameter 'q'".to_string()))?;
    let limit = params.limit.unwrap_or(state.max_results).min(state.max_results);

    let corpus = Arc::clone(&state.corpus);
    let q = query.clone();
    // scoring refits a snapshot of the corpus, keep it off the async workers
    let mut hits = tokio::task::spawn_blocking(move || corpus.search(&q))
        .await
        .map_err(|e| ApiError::Internal(format!("search task failed: {e}")))??;
    hits.truncate(limit);

    tracing::info!(query = %query, hits = hits.len(), "search");
    Ok(Json(SearchResponse {
        query,
        results: hits.list,
    }))
}

/// Handle GET /content?name=...
pub async fn content(
    State(state): State<AppState>,
    Query(params): Query<ContentParams>,
) -> Result<Json<ContentResponse>, ApiError> {
    let name = params
        .name
        .ok_or_else(|| ApiError::BadRequest("missing query parameter 'name'".to_string()))?;
    let doc = state
        .corpus
        .get(&name)
        .ok_or_else(|| ApiError::NotFound(format!("document '{name}' not found")))?;
    Ok(Json(ContentResponse {
        content: doc.content().to_string(),
        name,
    }))
}

/// Handle GET /vector
pub async fn vector(State(state): State<AppState>) -> Result<Json<Vec<Score>>, ApiError> {
    Ok(Json(state.corpus.as_vector()?))
}

/// Handle GET /health
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        documents: state.corpus.len(),
        vocabulary: state.corpus.vocabulary().len(),
    })
}
