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
    models::{AddTeamMemberRequest, CreateTeamRequest, LeaveTeamRequest, TeamMembershipRequest},
    services::{AppState, TeamService},
};

pub async fn list_teams(State(state): State<Arc<AppState>>) -> LedgerResult<impl IntoResponse> {
    let service = TeamService::new(state.repo.clone());
    Ok(Json(service.list_teams().await?))
}

pub async fn create_team(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateTeamRequest>,
) -> LedgerResult<impl IntoResponse> {
    req.validate()?;

    let service = TeamService::new(state.repo.clone());
    let team = service.create_team(req).await?;
    Ok((StatusCode::CREATED, Json(team)))
}

pub async fn get_team(
    State(state): State<Arc<AppState>>,
    Path(team_id): Path<String>,
) -> LedgerResult<impl IntoResponse> {
    let service = TeamService::new(state.repo.clone());
    Ok(Json(service.get_team(&team_id).await?))
}

pub async fn join_team(
    State(state): State<Arc<AppState>>,
    Path(team_id): Path<String>,
    Json(req): Json<TeamMembershipRequest>,
) -> LedgerResult<impl IntoResponse> {
    req.validate()?;

    let service = TeamService::new(state.repo.clone());
    let team = service
        .join_team(&team_id, &req.user_id, &req.user_name)
        .await?;
    Ok(Json(team))
}

pub async fn add_member(
    State(state): State<Arc<AppState>>,
    Path(team_id): Path<String>,
    Json(req): Json<AddTeamMemberRequest>,
) -> LedgerResult<impl IntoResponse> {
    req.validate()?;

    let service = TeamService::new(state.repo.clone());
    Ok(Json(service.add_member(&team_id, req).await?))
}

pub async fn leave_team(
    State(state): State<Arc<AppState>>,
    Path(team_id): Path<String>,
    Json(req): Json<LeaveTeamRequest>,
) -> LedgerResult<impl IntoResponse> {
    req.validate()?;

    let service = TeamService::new(state.repo.clone());
    Ok(Json(service.leave_team(&team_id, &req.user_id).await?))
}
