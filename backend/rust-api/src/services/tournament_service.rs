use chrono::Utc;
use uuid::Uuid;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{CreateTournamentRequest, Tournament, TournamentStatus};
use crate::storage::{Collection, Repository};

pub struct TournamentService {
    repo: Repository,
}

impl TournamentService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    pub async fn create_tournament(&self, req: CreateTournamentRequest) -> LedgerResult<Tournament> {
        let tournament = Tournament {
            id: Uuid::new_v4().to_string(),
            name: req.name,
            description: req.description,
            subject: req.subject,
            test_id: req.test_id,
            start_date: req.start_date,
            duration: req.duration,
            max_participants: req.max_participants,
            participants: Vec::new(),
            status: TournamentStatus::Upcoming,
            prize_pool: req.prize_pool,
            prizes: req.prizes,
            leaderboard: Vec::new(),
            created_at: Utc::now(),
            format: req.format,
        };

        let stored = tournament.clone();
        self.repo
            .update(Collection::Tournaments, move |all: &mut Vec<Tournament>| {
                all.push(stored);
                Ok(())
            })
            .await?;

        tracing::info!(
            "Tournament created: id={}, name={}, max_participants={}",
            tournament.id,
            tournament.name,
            tournament.max_participants
        );
        Ok(tournament)
    }

    pub async fn list_tournaments(&self) -> LedgerResult<Vec<Tournament>> {
        self.repo.load(Collection::Tournaments).await
    }

    pub async fn get_tournament(&self, tournament_id: &str) -> LedgerResult<Tournament> {
        let all: Vec<Tournament> = self.repo.load(Collection::Tournaments).await?;
        all.into_iter()
            .find(|t| t.id == tournament_id)
            .ok_or_else(|| LedgerError::not_found("Tournament", tournament_id))
    }

    pub async fn add_participant(
        &self,
        tournament_id: &str,
        user_id: &str,
    ) -> LedgerResult<Tournament> {
        let tournament = self
            .repo
            .update(Collection::Tournaments, |all: &mut Vec<Tournament>| {
                let t = all
                    .iter_mut()
                    .find(|t| t.id == tournament_id)
                    .ok_or_else(|| LedgerError::not_found("Tournament", tournament_id))?;

                if t.participants.iter().any(|p| p == user_id) {
                    return Err(LedgerError::AlreadyMember {
                        user_id: user_id.to_string(),
                        target: format!("tournament {}", tournament_id),
                    });
                }
                if t.participants.len() >= t.max_participants as usize {
                    return Err(LedgerError::Capacity(format!("Tournament {}", tournament_id)));
                }

                t.participants.push(user_id.to_string());
                Ok(t.clone())
            })
            .await?;

        tracing::info!(
            "User {} joined tournament {} ({}/{})",
            user_id,
            tournament_id,
            tournament.participants.len(),
            tournament.max_participants
        );
        Ok(tournament)
    }
}
