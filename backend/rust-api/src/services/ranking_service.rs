use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::NaiveDate;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{AttemptResult, WeeklyRanking, WeeklyRankingsResponse};
use crate::storage::{Collection, Repository};
use crate::utils::time::week_bounds;

pub const DEFAULT_RANKING_LIMIT: usize = 100;

/// Weekly standings computed from stored attempt results.
pub struct RankingService {
    repo: Repository,
}

impl RankingService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    pub async fn weekly_rankings(
        &self,
        week_containing: NaiveDate,
        limit: usize,
    ) -> LedgerResult<WeeklyRankingsResponse> {
        let (week_start, week_end) = week_bounds(week_containing).ok_or_else(|| {
            LedgerError::Validation(format!("date {} is out of range", week_containing))
        })?;
        let results: Vec<AttemptResult> = self.repo.load(Collection::TestResults).await?;

        let mut totals: HashMap<String, WeeklyRanking> = HashMap::new();
        for result in results
            .into_iter()
            .filter(|r| r.completed_at >= week_start && r.completed_at < week_end)
        {
            let entry = totals
                .entry(result.user_id.clone())
                .or_insert_with(|| WeeklyRanking {
                    rank: 0,
                    user_id: result.user_id.clone(),
                    user_name: result.user_name.clone(),
                    points: 0,
                    attempts: 0,
                    correct_answers: 0,
                });
            entry.user_name = result.user_name;
            entry.points = entry.points.saturating_add(result.points_earned);
            entry.attempts = entry.attempts.saturating_add(1);
            entry.correct_answers = entry
                .correct_answers
                .saturating_add(u64::from(result.correct_answers));
        }

        let mut rankings: Vec<WeeklyRanking> = totals.into_values().collect();
        rankings.sort_by(ranking_order);
        rankings.truncate(limit);
        for (i, entry) in rankings.iter_mut().enumerate() {
            entry.rank = (i + 1) as u32;
        }

        tracing::debug!(
            "Weekly rankings computed: week_start={}, entries={}",
            week_start,
            rankings.len()
        );
        Ok(WeeklyRankingsResponse {
            week_start,
            week_end,
            rankings,
        })
    }
}

fn ranking_order(a: &WeeklyRanking, b: &WeeklyRanking) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.correct_answers.cmp(&a.correct_answers))
        .then_with(|| a.user_id.cmp(&b.user_id))
}
