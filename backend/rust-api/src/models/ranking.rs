use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyRanking {
    pub rank: u32,
    pub user_id: String,
    pub user_name: String,
    pub points: u64,
    pub attempts: u32,
    pub correct_answers: u64,
}

#[derive(Debug, Default, Deserialize)]
pub struct WeeklyRankingsQuery {
    /// Any day inside the requested week; defaults to today (UTC)
    pub date: Option<NaiveDate>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyRankingsResponse {
    pub week_start: DateTime<Utc>,
    pub week_end: DateTime<Utc>,
    pub rankings: Vec<WeeklyRanking>,
}
