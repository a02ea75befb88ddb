use chrono::Utc;
use uuid::Uuid;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Question, Quiz, QuizStatus, SaveQuizRequest};
use crate::storage::{Collection, Repository};

/// Outcome of checking a set of answers against a quiz.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grade {
    pub correct: u32,
    pub total: u32,
    /// Percentage, 0-100
    pub score: f64,
}

/// Compares answers position by position; missing or skipped answers are wrong
/// and answers beyond the last question are ignored.
pub fn grade_answers(questions: &[Question], answers: &[Option<usize>]) -> Grade {
    let correct = questions
        .iter()
        .zip(answers.iter())
        .filter(|(q, a)| **a == Some(q.correct))
        .count() as u32;
    let total = questions.len() as u32;
    let score = if total == 0 {
        0.0
    } else {
        f64::from(correct) / f64::from(total) * 100.0
    };

    Grade {
        correct,
        total,
        score,
    }
}

pub struct QuizService {
    repo: Repository,
}

impl QuizService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Inserts a new quiz or replaces the one with the same id. Replacing
    /// keeps the original author and creation time.
    pub async fn save_quiz(&self, req: SaveQuizRequest) -> LedgerResult<Quiz> {
        validate_questions(&req.questions)?;

        let quiz = Quiz {
            id: req.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            title: req.title,
            subject: req.subject,
            duration: req.duration,
            questions: req.questions,
            created_by: req.created_by,
            created_at: Utc::now(),
            status: req.status,
        };

        let saved = self
            .repo
            .update(Collection::Tests, move |all: &mut Vec<Quiz>| {
                match all.iter_mut().find(|q| q.id == quiz.id) {
                    Some(existing) => {
                        let created_by = std::mem::take(&mut existing.created_by);
                        let created_at = existing.created_at;
                        *existing = Quiz {
                            created_by,
                            created_at,
                            ..quiz
                        };
                        Ok(existing.clone())
                    }
                    None => {
                        all.push(quiz.clone());
                        Ok(quiz)
                    }
                }
            })
            .await?;

        tracing::info!(
            "Quiz saved: id={}, questions={}, status={:?}",
            saved.id,
            saved.questions.len(),
            saved.status
        );
        Ok(saved)
    }

    pub async fn list_quizzes(&self, status: Option<QuizStatus>) -> LedgerResult<Vec<Quiz>> {
        let all: Vec<Quiz> = self.repo.load(Collection::Tests).await?;
        Ok(all
            .into_iter()
            .filter(|q| status.is_none_or(|s| q.status == s))
            .collect())
    }

    pub async fn get_quiz(&self, quiz_id: &str) -> LedgerResult<Quiz> {
        let all: Vec<Quiz> = self.repo.load(Collection::Tests).await?;
        all.into_iter()
            .find(|q| q.id == quiz_id)
            .ok_or_else(|| LedgerError::not_found("Test", quiz_id))
    }

    pub async fn delete_quiz(&self, quiz_id: &str) -> LedgerResult<()> {
        self.repo
            .update(Collection::Tests, |all: &mut Vec<Quiz>| {
                let before = all.len();
                all.retain(|q| q.id != quiz_id);
                if all.len() == before {
                    return Err(LedgerError::not_found("Test", quiz_id));
                }
                Ok(())
            })
            .await?;

        tracing::info!("Quiz deleted: id={}", quiz_id);
        Ok(())
    }
}

fn validate_questions(questions: &[Question]) -> LedgerResult<()> {
    if questions.is_empty() {
        return Err(LedgerError::Validation(
            "A test needs at least one question".into(),
        ));
    }

    for (idx, q) in questions.iter().enumerate() {
        if q.question.trim().is_empty() {
            return Err(LedgerError::Validation(format!(
                "Question {} has no text",
                idx + 1
            )));
        }
        if q.options.len() < 2 {
            return Err(LedgerError::Validation(format!(
                "Question {} needs at least two options",
                idx + 1
            )));
        }
        if q.correct >= q.options.len() {
            return Err(LedgerError::Validation(format!(
                "Question {} marks option {} correct but has {} options",
                idx + 1,
                q.correct,
                q.options.len()
            )));
        }
    }

    Ok(())
}
