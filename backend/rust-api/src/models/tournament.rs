use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub subject: String,
    pub test_id: String,
    pub start_date: DateTime<Utc>,
    /// Minutes
    pub duration: u32,
    pub max_participants: u32,
    #[serde(default)]
    pub participants: Vec<String>,
    pub status: TournamentStatus,
    #[serde(default)]
    pub prize_pool: u64,
    #[serde(default)]
    pub prizes: Vec<u64>,
    /// Kept sorted by score, highest first
    #[serde(default)]
    pub leaderboard: Vec<TournamentScore>,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub format: Option<TournamentFormat>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    Upcoming,
    Active,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TournamentFormat {
    #[serde(rename = "solo")]
    Solo,
    #[serde(rename = "team")]
    Team,
    #[serde(rename = "1vs1", alias = "1v1")]
    OneVsOne,
}

/// Leaderboard entry; one per user per tournament.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentScore {
    pub user_id: String,
    pub user_name: String,
    /// Percentage of correct answers, 0-100
    pub score: f64,
    pub correct_answers: u32,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTournamentRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub subject: String,
    #[validate(length(min = 1))]
    pub test_id: String,
    pub start_date: DateTime<Utc>,
    #[validate(range(min = 1))]
    pub duration: u32,
    #[validate(range(min = 1, max = 10000))]
    pub max_participants: u32,
    #[serde(default)]
    pub prize_pool: u64,
    #[serde(default)]
    pub prizes: Vec<u64>,
    #[serde(default, rename = "type")]
    pub format: Option<TournamentFormat>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct JoinTournamentRequest {
    #[validate(length(min = 1, max = 128))]
    pub user_id: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitTournamentScoreRequest {
    #[validate(length(min = 1, max = 128))]
    pub user_id: String,
    #[validate(length(min = 1, max = 128))]
    pub user_name: String,
    #[validate(range(min = 0.0, max = 100.0))]
    pub score: f64,
    pub correct_answers: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn leaderboard_entry_layout_uses_camel_case() {
        let entry = TournamentScore {
            user_id: "u1".into(),
            user_name: "Umida".into(),
            score: 87.5,
            correct_answers: 7,
            completed_at: Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["userId"], "u1");
        assert_eq!(json["userName"], "Umida");
        assert_eq!(json["score"], 87.5);
        assert_eq!(json["correctAnswers"], 7);
        assert_eq!(json["completedAt"], "2026-10-19T08:30:00Z");

        let back: TournamentScore = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn stored_tournament_without_leaderboard_reads_empty() {
        let raw = r#"{
            "id": "t1", "name": "Cup", "testId": "q1",
            "startDate": "2026-10-20T09:00:00Z", "duration": 30,
            "maxParticipants": 8, "status": "upcoming",
            "createdAt": "2026-10-19T09:00:00Z", "type": "1v1"
        }"#;
        let t: Tournament = serde_json::from_str(raw).unwrap();
        assert!(t.leaderboard.is_empty());
        assert_eq!(t.format, Some(TournamentFormat::OneVsOne));
    }
}
