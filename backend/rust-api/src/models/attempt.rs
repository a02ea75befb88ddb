use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::GameMode;

/// Graded quiz submission. Persisted under the `test_results` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptResult {
    pub id: String,
    pub test_id: String,
    pub user_id: String,
    pub user_name: String,
    #[serde(default)]
    pub tournament_id: Option<String>,
    #[serde(default)]
    pub team_id: Option<String>,
    pub mode: GameMode,
    pub score: f64,
    pub total_questions: u32,
    pub correct_answers: u32,
    pub points_earned: u64,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitAttemptRequest {
    #[validate(length(min = 1, max = 128))]
    pub user_id: String,
    #[validate(length(min = 1, max = 128))]
    pub user_name: String,
    /// Chosen option index per question; `None` for a skipped question
    pub answers: Vec<Option<usize>>,
    /// Parsed with [`GameMode::from_str`](std::str::FromStr); defaults to `regular`
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub tournament_id: Option<String>,
    #[serde(default)]
    pub team_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitAttemptResponse {
    pub result_id: String,
    pub correct_answers: u32,
    pub total_questions: u32,
    pub points_earned: u64,
    pub score: f64,
}
