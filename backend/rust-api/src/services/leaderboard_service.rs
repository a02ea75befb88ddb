use chrono::Utc;

use crate::error::{LedgerError, LedgerResult};
use crate::metrics::SCORES_SUBMITTED_TOTAL;
use crate::models::{Tournament, TournamentScore};
use crate::storage::{Collection, Repository};

use super::validate_score;

/// Per-tournament ranking of participant scores.
pub struct LeaderboardService {
    repo: Repository,
}

impl LeaderboardService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Upserts the user's entry and returns the re-sorted leaderboard.
    ///
    /// A repeat submission replaces score, correct answers and timestamp of
    /// the existing entry; there is no per-user history.
    pub async fn submit_tournament_score(
        &self,
        tournament_id: &str,
        user_id: &str,
        user_name: &str,
        score: f64,
        correct_answers: u32,
    ) -> LedgerResult<Vec<TournamentScore>> {
        validate_score(score)?;

        let leaderboard = self
            .repo
            .update(Collection::Tournaments, |all: &mut Vec<Tournament>| {
                let t = all
                    .iter_mut()
                    .find(|t| t.id == tournament_id)
                    .ok_or_else(|| LedgerError::not_found("Tournament", tournament_id))?;

                let now = Utc::now();
                match t.leaderboard.iter_mut().find(|e| e.user_id == user_id) {
                    Some(entry) => {
                        entry.score = score;
                        entry.correct_answers = correct_answers;
                        entry.completed_at = now;
                    }
                    None => t.leaderboard.push(TournamentScore {
                        user_id: user_id.to_string(),
                        user_name: user_name.to_string(),
                        score,
                        correct_answers,
                        completed_at: now,
                    }),
                }

                sort_leaderboard(&mut t.leaderboard);
                Ok(t.leaderboard.clone())
            })
            .await?;

        SCORES_SUBMITTED_TOTAL
            .with_label_values(&["leaderboard"])
            .inc();
        tracing::info!(
            "Leaderboard score: tournament={}, user={}, score={:.1}, entries={}",
            tournament_id,
            user_id,
            score,
            leaderboard.len()
        );

        Ok(leaderboard)
    }

    pub async fn get_tournament_leaderboard(
        &self,
        tournament_id: &str,
    ) -> LedgerResult<Vec<TournamentScore>> {
        let all: Vec<Tournament> = self.repo.load(Collection::Tournaments).await?;
        all.into_iter()
            .find(|t| t.id == tournament_id)
            .map(|t| t.leaderboard)
            .ok_or_else(|| LedgerError::not_found("Tournament", tournament_id))
    }
}

/// Highest score first. Stable, so equal scores keep their previous order.
pub fn sort_leaderboard(entries: &mut [TournamentScore]) {
    entries.sort_by(|a, b| b.score.total_cmp(&a.score));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::tournament_service::{tests::request, TournamentService};

    async fn setup() -> (LeaderboardService, String) {
        let repo = Repository::in_memory();
        let t = TournamentService::new(repo.clone())
            .create_tournament(request(10))
            .await
            .unwrap();
        (LeaderboardService::new(repo), t.id)
    }

    #[tokio::test]
    async fn higher_score_ranks_first() {
        let (service, tid) = setup().await;
        service
            .submit_tournament_score(&tid, "a", "Aziz", 90.0, 9)
            .await
            .unwrap();
        let board = service
            .submit_tournament_score(&tid, "b", "Bekzod", 95.0, 10)
            .await
            .unwrap();

        let order: Vec<(&str, f64)> = board
            .iter()
            .map(|e| (e.user_id.as_str(), e.score))
            .collect();
        assert_eq!(order, vec![("b", 95.0), ("a", 90.0)]);
    }

    #[tokio::test]
    async fn resubmission_overwrites_single_entry() {
        let (service, tid) = setup().await;
        service
            .submit_tournament_score(&tid, "a", "Aziz", 40.0, 4)
            .await
            .unwrap();
        service
            .submit_tournament_score(&tid, "b", "Bekzod", 60.0, 6)
            .await
            .unwrap();
        let board = service
            .submit_tournament_score(&tid, "a", "Aziz", 80.0, 8)
            .await
            .unwrap();

        assert_eq!(board.len(), 2);
        assert_eq!(board[0].user_id, "a");
        assert_eq!(board[0].correct_answers, 8);
        assert_eq!(service.get_tournament_leaderboard(&tid).await.unwrap(), board);
    }

    #[tokio::test]
    async fn unknown_tournament_is_not_found() {
        let (service, _) = setup().await;
        let err = service
            .submit_tournament_score("missing", "a", "Aziz", 50.0, 5)
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::NotFound { .. }));
    }

    #[tokio::test]
    async fn out_of_range_score_is_rejected() {
        let (service, tid) = setup().await;
        let err = service
            .submit_tournament_score(&tid, "a", "Aziz", 120.0, 5)
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
    }

    #[test]
    fn sort_is_stable_for_ties() {
        let at = Utc::now();
        let entry = |id: &str, score: f64| TournamentScore {
            user_id: id.into(),
            user_name: id.into(),
            score,
            correct_answers: 0,
            completed_at: at,
        };
        let mut entries = vec![entry("x", 50.0), entry("y", 70.0), entry("z", 50.0)];
        sort_leaderboard(&mut entries);
        let ids: Vec<&str> = entries.iter().map(|e| e.user_id.as_str()).collect();
        assert_eq!(ids, vec!["y", "x", "z"]);
    }
}
