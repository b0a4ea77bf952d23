//! Axum route handlers for the Match API.

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::matching::scorer::compute_match;
use crate::models::resume::MatchScoreRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub resume_id: i32,
    pub job_id: i32,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub score: f64,
}

/// POST /match
///
/// Scores a stored résumé against a stored job description and records the score.
pub async fn handle_match(
    State(state): State<AppState>,
    request: Result<Json<MatchRequest>, JsonRejection>,
) -> Result<Json<MatchResponse>, AppError> {
    let Json(request) = request.map_err(|e| AppError::Validation(e.body_text()))?;

    let row = compute_match(
        state.store.as_ref(),
        state.embedder.as_ref(),
        request.resume_id,
        request.job_id,
    )
    .await?;

    Ok(Json(MatchResponse { score: row.score }))
}

/// GET /match-scores?resume_id=&job_id=
///
/// Every score recorded for the pair, oldest first.
pub async fn handle_list_match_scores(
    State(state): State<AppState>,
    query: Result<Query<MatchRequest>, QueryRejection>,
) -> Result<Json<Vec<MatchScoreRow>>, AppError> {
    let Query(pair) = query.map_err(|e| AppError::Validation(e.body_text()))?;

    let rows = state
        .store
        .list_match_scores(pair.resume_id, pair.job_id)
        .await?;

    Ok(Json(rows))
}
