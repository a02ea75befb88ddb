use crate::error::LedgerResult;
use crate::metrics::POINTS_AWARDED_TOTAL;
use crate::models::{GameMode, UserStats};
use crate::storage::{Collection, Repository};

use super::scoring::points_per_question;

/// Per-user cumulative counters.
///
/// Every operation is one locked read-modify-write of the stats collection,
/// so concurrent increments for the same user are never lost. Separate calls
/// are not grouped: use [`StatsService::record_attempt`] when several counters
/// must move together.
pub struct StatsService {
    repo: Repository,
}

impl StatsService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Users without a record read as all zeros.
    pub async fn get_user_stats(&self, user_id: &str) -> LedgerResult<UserStats> {
        let all: Vec<UserStats> = self.repo.load(Collection::UserStats).await?;
        Ok(all
            .into_iter()
            .find(|s| s.user_id == user_id)
            .unwrap_or_else(|| UserStats::empty(user_id)))
    }

    pub async fn add_points(&self, user_id: &str, points: u64) -> LedgerResult<UserStats> {
        self.modify(user_id, |stats| {
            stats.total_points = stats.total_points.saturating_add(points);
        })
        .await
    }

    /// Adds `count` correct answers and the regular-mode points for them.
    pub async fn increment_correct_answers(
        &self,
        user_id: &str,
        count: u32,
    ) -> LedgerResult<UserStats> {
        let points = u64::from(count) * points_per_question(GameMode::Regular);
        let stats = self
            .modify(user_id, |stats| {
                stats.correct_answers = stats.correct_answers.saturating_add(u64::from(count));
                stats.total_points = stats.total_points.saturating_add(points);
            })
            .await?;

        POINTS_AWARDED_TOTAL
            .with_label_values(&[GameMode::Regular.as_str()])
            .inc_by(points);
        Ok(stats)
    }

    pub async fn increment_tests_completed(&self, user_id: &str) -> LedgerResult<UserStats> {
        self.modify(user_id, |stats| {
            stats.tests_completed = stats.tests_completed.saturating_add(1);
        })
        .await
    }

    pub async fn increment_tournaments_won(&self, user_id: &str) -> LedgerResult<UserStats> {
        self.modify(user_id, |stats| {
            stats.tournaments_won = stats.tournaments_won.saturating_add(1);
        })
        .await
    }

    /// One finished attempt: tests completed, correct answers and points in a
    /// single write.
    pub async fn record_attempt(
        &self,
        user_id: &str,
        correct_answers: u32,
        points: u64,
    ) -> LedgerResult<UserStats> {
        self.modify(user_id, |stats| {
            stats.tests_completed = stats.tests_completed.saturating_add(1);
            stats.correct_answers = stats
                .correct_answers
                .saturating_add(u64::from(correct_answers));
            stats.total_points = stats.total_points.saturating_add(points);
        })
        .await
    }

    async fn modify<F>(&self, user_id: &str, apply: F) -> LedgerResult<UserStats>
    where
        F: FnOnce(&mut UserStats) + Send,
    {
        let stats = self
            .repo
            .update(Collection::UserStats, |all: &mut Vec<UserStats>| {
                let idx = match all.iter().position(|s| s.user_id == user_id) {
                    Some(idx) => idx,
                    None => {
                        all.push(UserStats::empty(user_id));
                        all.len() - 1
                    }
                };
                apply(&mut all[idx]);
                Ok(all[idx].clone())
            })
            .await?;

        tracing::debug!(
            "Stats updated: user={}, points={}, correct={}, tests={}",
            stats.user_id,
            stats.total_points,
            stats.correct_answers,
            stats.tests_completed
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_user_reads_as_zeros() {
        let service = StatsService::new(Repository::in_memory());
        let stats = service.get_user_stats("ghost").await.unwrap();
        assert_eq!(stats, UserStats::empty("ghost"));
    }

    #[tokio::test]
    async fn correct_answers_also_award_regular_points() {
        let service = StatsService::new(Repository::in_memory());
        service.add_points("u1", 10).await.unwrap();

        let stats = service.increment_correct_answers("u1", 5).await.unwrap();
        assert_eq!(stats.correct_answers, 5);
        assert_eq!(stats.total_points, 25);
    }

    #[tokio::test]
    async fn counters_are_independent_per_user() {
        let service = StatsService::new(Repository::in_memory());
        service.increment_tests_completed("a").await.unwrap();
        service.increment_tests_completed("a").await.unwrap();
        service.increment_tournaments_won("b").await.unwrap();

        let a = service.get_user_stats("a").await.unwrap();
        let b = service.get_user_stats("b").await.unwrap();
        assert_eq!((a.tests_completed, a.tournaments_won), (2, 0));
        assert_eq!((b.tests_completed, b.tournaments_won), (0, 1));
    }

    #[tokio::test]
    async fn record_attempt_moves_three_counters() {
        let service = StatsService::new(Repository::in_memory());
        let stats = service.record_attempt("u1", 4, 20).await.unwrap();
        assert_eq!(stats.tests_completed, 1);
        assert_eq!(stats.correct_answers, 4);
        assert_eq!(stats.total_points, 20);
    }

    #[tokio::test]
    async fn parallel_point_awards_are_all_applied() {
        let repo = Repository::in_memory();
        let mut handles = Vec::new();
        for _ in 0..20 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                StatsService::new(repo).add_points("busy", 7).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let stats = StatsService::new(repo).get_user_stats("busy").await.unwrap();
        assert_eq!(stats.total_points, 140);
    }
}
