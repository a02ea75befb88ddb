use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use std::sync::Arc;

use crate::{
    error::{LedgerError, LedgerResult},
    models::WeeklyRankingsQuery,
    services::{ranking_service::DEFAULT_RANKING_LIMIT, AppState, RankingService},
};

const MAX_RANKING_LIMIT: usize = 1000;

pub async fn weekly_rankings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WeeklyRankingsQuery>,
) -> LedgerResult<impl IntoResponse> {
    let limit = query.limit.unwrap_or(DEFAULT_RANKING_LIMIT);
    if limit == 0 || limit > MAX_RANKING_LIMIT {
        return Err(LedgerError::Validation(format!(
            "limit must be between 1 and {}",
            MAX_RANKING_LIMIT
        )));
    }
    let day = query.date.unwrap_or_else(|| Utc::now().date_naive());

    let service = RankingService::new(state.repo.clone());
    Ok(Json(service.weekly_rankings(day, limit).await?))
}
