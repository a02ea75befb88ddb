use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use validator::Validate;

use crate::{
    error::LedgerResult,
    models::{
        CreateTournamentRequest, FindMatchRequest, JoinTournamentRequest,
        SubmitTournamentScoreRequest,
    },
    services::{AppState, LeaderboardService, MatchService, TournamentService},
};

pub async fn list_tournaments(State(state): State<Arc<AppState>>) -> LedgerResult<impl IntoResponse> {
    let service = TournamentService::new(state.repo.clone());
    Ok(Json(service.list_tournaments().await?))
}

pub async fn create_tournament(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateTournamentRequest>,
) -> LedgerResult<impl IntoResponse> {
    req.validate()?;

    let service = TournamentService::new(state.repo.clone());
    let tournament = service.create_tournament(req).await?;
    Ok((StatusCode::CREATED, Json(tournament)))
}

pub async fn get_tournament(
    State(state): State<Arc<AppState>>,
    Path(tournament_id): Path<String>,
) -> LedgerResult<impl IntoResponse> {
    let service = TournamentService::new(state.repo.clone());
    Ok(Json(service.get_tournament(&tournament_id).await?))
}

pub async fn join_tournament(
    State(state): State<Arc<AppState>>,
    Path(tournament_id): Path<String>,
    Json(req): Json<JoinTournamentRequest>,
) -> LedgerResult<impl IntoResponse> {
    req.validate()?;

    let service = TournamentService::new(state.repo.clone());
    let tournament = service
        .add_participant(&tournament_id, &req.user_id)
        .await?;
    Ok(Json(tournament))
}

pub async fn get_leaderboard(
    State(state): State<Arc<AppState>>,
    Path(tournament_id): Path<String>,
) -> LedgerResult<impl IntoResponse> {
    let service = LeaderboardService::new(state.repo.clone());
    Ok(Json(service.get_tournament_leaderboard(&tournament_id).await?))
}

pub async fn submit_score(
    State(state): State<Arc<AppState>>,
    Path(tournament_id): Path<String>,
    Json(req): Json<SubmitTournamentScoreRequest>,
) -> LedgerResult<impl IntoResponse> {
    req.validate()?;

    let service = LeaderboardService::new(state.repo.clone());
    let leaderboard = service
        .submit_tournament_score(
            &tournament_id,
            &req.user_id,
            &req.user_name,
            req.score,
            req.correct_answers,
        )
        .await?;
    Ok(Json(leaderboard))
}

pub async fn list_matches(
    State(state): State<Arc<AppState>>,
    Path(tournament_id): Path<String>,
) -> LedgerResult<impl IntoResponse> {
    let service = MatchService::new(state.repo.clone());
    Ok(Json(service.list_tournament_matches(&tournament_id).await?))
}

/// Pairs the caller with a waiting opponent or opens a new match.
pub async fn find_match(
    State(state): State<Arc<AppState>>,
    Path(tournament_id): Path<String>,
    Json(req): Json<FindMatchRequest>,
) -> LedgerResult<impl IntoResponse> {
    req.validate()?;
    tracing::info!(
        "Finding match: tournament={}, user={}",
        tournament_id,
        req.user_id
    );

    let service = MatchService::new(state.repo.clone());
    let game = service
        .find_or_create_match(&tournament_id, &req.user_id, &req.user_name)
        .await?;
    Ok(Json(game))
}
