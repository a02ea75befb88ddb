use serde::{Deserialize, Serialize};

/// Cumulative per-user counters. They only ever grow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub user_id: String,
    #[serde(default)]
    pub tests_completed: u64,
    #[serde(default)]
    pub tournaments_won: u64,
    #[serde(default)]
    pub total_points: u64,
    #[serde(default)]
    pub correct_answers: u64,
}

impl UserStats {
    pub fn empty(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            ..Self::default()
        }
    }
}
