use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A 1v1 pairing inside a tournament.
///
/// A score of `0.0` means the player has not submitted yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: String,
    pub tournament_id: String,
    pub player1_id: String,
    pub player1_name: String,
    #[serde(default)]
    pub player2_id: Option<String>,
    #[serde(default)]
    pub player2_name: Option<String>,
    #[serde(default)]
    pub player1_score: f64,
    #[serde(default)]
    pub player2_score: f64,
    #[serde(default)]
    pub winner_id: Option<String>,
    pub status: MatchStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Waiting,
    InProgress,
    Completed,
}

impl MatchStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchStatus::Waiting => "waiting",
            MatchStatus::InProgress => "in_progress",
            MatchStatus::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerSlot {
    First,
    Second,
}

impl Match {
    pub fn waiting(tournament_id: &str, user_id: &str, user_name: &str) -> Self {
        Self {
            id: format!("match_{}", Uuid::new_v4().simple()),
            tournament_id: tournament_id.to_string(),
            player1_id: user_id.to_string(),
            player1_name: user_name.to_string(),
            player2_id: None,
            player2_name: None,
            player1_score: 0.0,
            player2_score: 0.0,
            winner_id: None,
            status: MatchStatus::Waiting,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    pub fn slot_of(&self, user_id: &str) -> Option<PlayerSlot> {
        if self.player1_id == user_id {
            Some(PlayerSlot::First)
        } else if self.player2_id.as_deref() == Some(user_id) {
            Some(PlayerSlot::Second)
        } else {
            None
        }
    }

    /// Zero counts as "not submitted", so a 0% result never completes a match.
    pub fn both_scores_in(&self) -> bool {
        self.player1_score > 0.0 && self.player2_score > 0.0
    }

    /// Higher score wins; player 1 takes ties.
    pub fn leading_player(&self) -> Option<&str> {
        if self.player1_score >= self.player2_score {
            Some(self.player1_id.as_str())
        } else {
            self.player2_id.as_deref()
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FindMatchRequest {
    #[validate(length(min = 1, max = 128))]
    pub user_id: String,
    #[validate(length(min = 1, max = 128))]
    pub user_name: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitMatchScoreRequest {
    #[validate(length(min = 1, max = 128))]
    pub user_id: String,
    #[validate(range(min = 0.0, max = 100.0))]
    pub score: f64,
    pub correct_answers: u32,
}
