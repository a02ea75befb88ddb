use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use validator::Validate;

use crate::{
    error::LedgerResult,
    models::{ListQuizzesQuery, SaveQuizRequest, SubmitAttemptRequest},
    services::{AppState, AttemptService, QuizService},
};

pub async fn list_quizzes(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuizzesQuery>,
) -> LedgerResult<impl IntoResponse> {
    let service = QuizService::new(state.repo.clone());
    let quizzes = service.list_quizzes(query.status).await?;
    Ok(Json(quizzes))
}

pub async fn save_quiz(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SaveQuizRequest>,
) -> LedgerResult<impl IntoResponse> {
    req.validate()?;
    tracing::info!("Saving test: title={}, by={}", req.title, req.created_by);

    let service = QuizService::new(state.repo.clone());
    let quiz = service.save_quiz(req).await?;
    Ok((StatusCode::CREATED, Json(quiz)))
}

pub async fn get_quiz(
    State(state): State<Arc<AppState>>,
    Path(quiz_id): Path<String>,
) -> LedgerResult<impl IntoResponse> {
    let service = QuizService::new(state.repo.clone());
    Ok(Json(service.get_quiz(&quiz_id).await?))
}

pub async fn delete_quiz(
    State(state): State<Arc<AppState>>,
    Path(quiz_id): Path<String>,
) -> LedgerResult<impl IntoResponse> {
    tracing::info!("Deleting test: {}", quiz_id);

    let service = QuizService::new(state.repo.clone());
    service.delete_quiz(&quiz_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn submit_attempt(
    State(state): State<Arc<AppState>>,
    Path(quiz_id): Path<String>,
    Json(req): Json<SubmitAttemptRequest>,
) -> LedgerResult<impl IntoResponse> {
    req.validate()?;

    let service = AttemptService::new(state.repo.clone());
    let response = service.submit_attempt(&quiz_id, req).await?;
    Ok((StatusCode::CREATED, Json(response)))
}
