use chrono::Utc;
use uuid::Uuid;

use crate::error::LedgerResult;
use crate::metrics::{ATTEMPTS_GRADED_TOTAL, POINTS_AWARDED_TOTAL};
use crate::models::{AttemptResult, GameMode, SubmitAttemptRequest, SubmitAttemptResponse};
use crate::storage::{Collection, Repository};

use super::leaderboard_service::LeaderboardService;
use super::quiz_service::{grade_answers, QuizService};
use super::scoring::calculate_points;
use super::stats_service::StatsService;
use super::team_service::TeamService;

/// Grades quiz attempts and fans the outcome out to stats, teams and
/// tournament leaderboards.
pub struct AttemptService {
    repo: Repository,
}

impl AttemptService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// The result record, user stats, team points and leaderboard entry are
    /// written one after another. A failure part-way (for example an unknown
    /// team) is returned to the caller, but earlier writes stay in place.
    pub async fn submit_attempt(
        &self,
        quiz_id: &str,
        req: SubmitAttemptRequest,
    ) -> LedgerResult<SubmitAttemptResponse> {
        let mode: GameMode = match req.mode.as_deref() {
            Some(raw) => raw.parse()?,
            None => GameMode::default(),
        };

        let quiz = QuizService::new(self.repo.clone()).get_quiz(quiz_id).await?;
        let grade = grade_answers(&quiz.questions, &req.answers);
        let points = calculate_points(grade.correct, mode);

        tracing::info!(
            "Grading attempt: test={}, user={}, mode={}, correct={}/{}",
            quiz_id,
            req.user_id,
            mode,
            grade.correct,
            grade.total
        );

        let result = AttemptResult {
            id: Uuid::new_v4().to_string(),
            test_id: quiz.id.clone(),
            user_id: req.user_id.clone(),
            user_name: req.user_name.clone(),
            tournament_id: req.tournament_id.clone(),
            team_id: req.team_id.clone(),
            mode,
            score: grade.score,
            total_questions: grade.total,
            correct_answers: grade.correct,
            points_earned: points,
            completed_at: Utc::now(),
        };

        let stored = result.clone();
        self.repo
            .update(Collection::TestResults, move |all: &mut Vec<AttemptResult>| {
                all.push(stored);
                Ok(())
            })
            .await?;

        ATTEMPTS_GRADED_TOTAL.with_label_values(&[mode.as_str()]).inc();

        StatsService::new(self.repo.clone())
            .record_attempt(&req.user_id, grade.correct, points)
            .await?;
        POINTS_AWARDED_TOTAL
            .with_label_values(&[mode.as_str()])
            .inc_by(points);

        if let Some(team_id) = req.team_id.as_deref() {
            TeamService::new(self.repo.clone())
                .add_team_points(team_id, points)
                .await?;
        }

        if let Some(tournament_id) = req.tournament_id.as_deref() {
            LeaderboardService::new(self.repo.clone())
                .submit_tournament_score(
                    tournament_id,
                    &req.user_id,
                    &req.user_name,
                    grade.score,
                    grade.correct,
                )
                .await?;
        }

        Ok(SubmitAttemptResponse {
            result_id: result.id,
            correct_answers: grade.correct,
            total_questions: grade.total,
            points_earned: points,
            score: grade.score,
        })
    }

    /// Most recent first.
    pub async fn list_user_results(&self, user_id: &str) -> LedgerResult<Vec<AttemptResult>> {
        let all: Vec<AttemptResult> = self.repo.load(Collection::TestResults).await?;
        let mut results: Vec<AttemptResult> =
            all.into_iter().filter(|r| r.user_id == user_id).collect();
        results.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LedgerError;
    use crate::models::CreateTeamRequest;
    use crate::services::quiz_service::{tests::save_request, QuizService};
    use crate::services::tournament_service::{tests::request, TournamentService};

    fn attempt(answers: Vec<Option<usize>>, mode: Option<&str>) -> SubmitAttemptRequest {
        SubmitAttemptRequest {
            user_id: "u1".into(),
            user_name: "Umida".into(),
            answers,
            mode: mode.map(str::to_string),
            tournament_id: None,
            team_id: None,
        }
    }

    async fn quiz(repo: &Repository) -> String {
        QuizService::new(repo.clone())
            .save_quiz(save_request(&[0, 1, 3]))
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn regular_attempt_updates_stats_and_history() {
        let repo = Repository::in_memory();
        let quiz_id = quiz(&repo).await;
        let service = AttemptService::new(repo.clone());

        let response = service
            .submit_attempt(&quiz_id, attempt(vec![Some(0), Some(1), Some(3)], None))
            .await
            .unwrap();
        assert_eq!(response.correct_answers, 3);
        assert_eq!(response.points_earned, 9);
        assert_eq!(response.score, 100.0);

        let stats = StatsService::new(repo).get_user_stats("u1").await.unwrap();
        assert_eq!(stats.tests_completed, 1);
        assert_eq!(stats.correct_answers, 3);
        assert_eq!(stats.total_points, 9);

        let history = service.list_user_results("u1").await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, response.result_id);
    }

    #[tokio::test]
    async fn team_attempt_credits_the_team() {
        let repo = Repository::in_memory();
        let quiz_id = quiz(&repo).await;
        let team = TeamService::new(repo.clone())
            .create_team(CreateTeamRequest {
                name: "Owls".into(),
                description: String::new(),
                subject: "math".into(),
                leader_id: "u1".into(),
                leader_name: "Umida".into(),
                max_members: None,
            })
            .await
            .unwrap();

        let mut req = attempt(vec![Some(0), Some(1), Some(2)], Some("team_tournament"));
        req.team_id = Some(team.id.clone());
        let response = AttemptService::new(repo.clone())
            .submit_attempt(&quiz_id, req)
            .await
            .unwrap();

        assert_eq!(response.correct_answers, 2);
        assert_eq!(response.points_earned, 10);
        let team = TeamService::new(repo).get_team(&team.id).await.unwrap();
        assert_eq!(team.points, 10);
    }

    #[tokio::test]
    async fn tournament_attempt_lands_on_the_leaderboard() {
        let repo = Repository::in_memory();
        let quiz_id = quiz(&repo).await;
        let tournament = TournamentService::new(repo.clone())
            .create_tournament(request(4))
            .await
            .unwrap();

        let mut req = attempt(vec![Some(0), None, None], Some("regular"));
        req.tournament_id = Some(tournament.id.clone());
        AttemptService::new(repo.clone())
            .submit_attempt(&quiz_id, req)
            .await
            .unwrap();

        let board = LeaderboardService::new(repo)
            .get_tournament_leaderboard(&tournament.id)
            .await
            .unwrap();
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].correct_answers, 1);
    }

    #[tokio::test]
    async fn unknown_mode_and_quiz_are_typed_errors() {
        let repo = Repository::in_memory();
        let quiz_id = quiz(&repo).await;
        let service = AttemptService::new(repo);

        let err = service
            .submit_attempt(&quiz_id, attempt(vec![], Some("marathon")))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidMode(_)));

        let err = service
            .submit_attempt("missing", attempt(vec![], None))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::NotFound { .. }));
    }
}
