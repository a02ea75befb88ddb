use chrono::Utc;

use crate::error::{LedgerError, LedgerResult};
use crate::metrics::{MATCHES_TOTAL, POINTS_AWARDED_TOTAL, SCORES_SUBMITTED_TOTAL};
use crate::models::{GameMode, Match, MatchStatus, PlayerSlot};
use crate::storage::{Collection, Repository};

use super::scoring::calculate_points;
use super::stats_service::StatsService;
use super::validate_score;

/// Pairs players into 1v1 matches and settles them once both have scored.
pub struct MatchService {
    repo: Repository,
}

impl MatchService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Joins the first waiting match in the tournament opened by someone else,
    /// or opens a new waiting match with the caller as player 1.
    ///
    /// A caller who already has a waiting match of their own gets another one;
    /// they are never paired with themselves.
    pub async fn find_or_create_match(
        &self,
        tournament_id: &str,
        user_id: &str,
        user_name: &str,
    ) -> LedgerResult<Match> {
        let found = self
            .repo
            .update(Collection::Matches, |matches: &mut Vec<Match>| {
                let waiting = matches.iter_mut().find(|m| {
                    m.tournament_id == tournament_id
                        && m.status == MatchStatus::Waiting
                        && m.player1_id != user_id
                });

                if let Some(m) = waiting {
                    m.player2_id = Some(user_id.to_string());
                    m.player2_name = Some(user_name.to_string());
                    m.status = MatchStatus::InProgress;
                    return Ok(m.clone());
                }

                let created = Match::waiting(tournament_id, user_id, user_name);
                matches.push(created.clone());
                Ok(created)
            })
            .await?;

        MATCHES_TOTAL
            .with_label_values(&[found.status.as_str()])
            .inc();
        tracing::info!(
            "Matchmaking: tournament={}, user={}, match={}, status={}",
            tournament_id,
            user_id,
            found.id,
            found.status.as_str()
        );

        Ok(found)
    }

    /// Records `score` in the caller's slot.
    ///
    /// When both slots hold a positive score the match completes: the winner
    /// is decided and the submitting user is credited 1v1 points for
    /// `correct_answers`. The other player receives nothing here.
    pub async fn submit_match_score(
        &self,
        match_id: &str,
        user_id: &str,
        score: f64,
        correct_answers: u32,
    ) -> LedgerResult<Match> {
        validate_score(score)?;

        let updated = self
            .repo
            .update(Collection::Matches, |matches: &mut Vec<Match>| {
                let m = matches
                    .iter_mut()
                    .find(|m| m.id == match_id)
                    .ok_or_else(|| LedgerError::not_found("Match", match_id))?;

                if m.status == MatchStatus::Completed {
                    return Err(LedgerError::Conflict(format!(
                        "Match {} is already completed",
                        match_id
                    )));
                }

                match m.slot_of(user_id) {
                    Some(PlayerSlot::First) => m.player1_score = score,
                    Some(PlayerSlot::Second) => m.player2_score = score,
                    None => {
                        return Err(LedgerError::NotParticipant {
                            match_id: match_id.to_string(),
                            user_id: user_id.to_string(),
                        })
                    }
                }

                if m.both_scores_in() {
                    let winner = m.leading_player().map(str::to_string);
                    m.winner_id = winner;
                    m.status = MatchStatus::Completed;
                    m.completed_at = Some(Utc::now());
                }

                Ok(m.clone())
            })
            .await?;

        SCORES_SUBMITTED_TOTAL.with_label_values(&["match"]).inc();

        // Completed matches reject further scores, so this call completed it
        if updated.status == MatchStatus::Completed {
            MATCHES_TOTAL
                .with_label_values(&[MatchStatus::Completed.as_str()])
                .inc();

            let points = calculate_points(correct_answers, GameMode::OneVsOne);
            StatsService::new(self.repo.clone())
                .add_points(user_id, points)
                .await?;
            POINTS_AWARDED_TOTAL
                .with_label_values(&[GameMode::OneVsOne.as_str()])
                .inc_by(points);

            tracing::info!(
                "Match {} completed: {} vs {}, winner={:?}, {} points to {}",
                updated.id,
                updated.player1_score,
                updated.player2_score,
                updated.winner_id,
                points,
                user_id
            );
        }

        Ok(updated)
    }

    pub async fn get_match(&self, match_id: &str) -> LedgerResult<Match> {
        let matches: Vec<Match> = self.repo.load(Collection::Matches).await?;
        matches
            .into_iter()
            .find(|m| m.id == match_id)
            .ok_or_else(|| LedgerError::not_found("Match", match_id))
    }

    pub async fn list_tournament_matches(&self, tournament_id: &str) -> LedgerResult<Vec<Match>> {
        let matches: Vec<Match> = self.repo.load(Collection::Matches).await?;
        Ok(matches
            .into_iter()
            .filter(|m| m.tournament_id == tournament_id)
            .collect())
    }
}
