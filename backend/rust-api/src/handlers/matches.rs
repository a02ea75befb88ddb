use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use validator::Validate;

use crate::{
    error::LedgerResult,
    models::SubmitMatchScoreRequest,
    services::{AppState, MatchService},
};

pub async fn get_match(
    State(state): State<Arc<AppState>>,
    Path(match_id): Path<String>,
) -> LedgerResult<impl IntoResponse> {
    let service = MatchService::new(state.repo.clone());
    Ok(Json(service.get_match(&match_id).await?))
}

pub async fn submit_score(
    State(state): State<Arc<AppState>>,
    Path(match_id): Path<String>,
    Json(req): Json<SubmitMatchScoreRequest>,
) -> LedgerResult<impl IntoResponse> {
    req.validate()?;
    tracing::info!(
        "Submitting match score: match={}, user={}, score={}",
        match_id,
        req.user_id,
        req.score
    );

    let service = MatchService::new(state.repo.clone());
    let game = service
        .submit_match_score(&match_id, &req.user_id, req.score, req.correct_answers)
        .await?;
    Ok(Json(game))
}
