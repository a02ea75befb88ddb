use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::{
    error::LedgerResult,
    services::{AppState, AttemptService, StatsService, TeamService},
};

pub async fn get_user_stats(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> LedgerResult<impl IntoResponse> {
    let service = StatsService::new(state.repo.clone());
    Ok(Json(service.get_user_stats(&user_id).await?))
}

/// Attempt history, most recent first.
pub async fn list_user_results(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> LedgerResult<impl IntoResponse> {
    let service = AttemptService::new(state.repo.clone());
    Ok(Json(service.list_user_results(&user_id).await?))
}

pub async fn list_user_teams(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> LedgerResult<impl IntoResponse> {
    let service = TeamService::new(state.repo.clone());
    Ok(Json(service.list_user_teams(&user_id).await?))
}
