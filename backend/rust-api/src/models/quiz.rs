use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A multiple-choice test. Persisted under the `tests` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub subject: String,
    /// Minutes
    pub duration: u32,
    pub questions: Vec<Question>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub status: QuizStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
    /// Index into `options`
    pub correct: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizStatus {
    Active,
    Draft,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SaveQuizRequest {
    /// Present when updating an existing quiz
    #[serde(default)]
    pub id: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    pub subject: String,
    #[validate(range(min = 1, max = 600))]
    pub duration: u32,
    #[validate(length(min = 1))]
    pub questions: Vec<Question>,
    #[validate(length(min = 1, max = 128))]
    pub created_by: String,
    pub status: QuizStatus,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuizzesQuery {
    pub status: Option<QuizStatus>,
}
