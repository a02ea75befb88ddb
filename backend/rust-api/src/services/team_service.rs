use chrono::Utc;
use uuid::Uuid;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    AddTeamMemberRequest, CreateTeamRequest, Team, TeamMember, TeamRole, DEFAULT_MAX_MEMBERS,
};
use crate::storage::{Collection, Repository};

pub struct TeamService {
    repo: Repository,
}

impl TeamService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// The creator becomes the leader and the first member.
    pub async fn create_team(&self, req: CreateTeamRequest) -> LedgerResult<Team> {
        let now = Utc::now();
        let team = Team {
            id: Uuid::new_v4().to_string(),
            name: req.name,
            description: req.description,
            subject: req.subject,
            leader_id: req.leader_id.clone(),
            leader_name: req.leader_name.clone(),
            members: vec![TeamMember {
                user_id: req.leader_id,
                user_name: req.leader_name,
                joined_at: now,
                role: TeamRole::Leader,
            }],
            max_members: req.max_members.unwrap_or(DEFAULT_MAX_MEMBERS),
            points: 0,
            created_at: now,
        };

        let stored = team.clone();
        self.repo
            .update(Collection::Teams, move |all: &mut Vec<Team>| {
                all.push(stored);
                Ok(())
            })
            .await?;

        tracing::info!(
            "Team created: id={}, name={}, leader={}",
            team.id,
            team.name,
            team.leader_id
        );
        Ok(team)
    }

    pub async fn list_teams(&self) -> LedgerResult<Vec<Team>> {
        self.repo.load(Collection::Teams).await
    }

    pub async fn get_team(&self, team_id: &str) -> LedgerResult<Team> {
        let all: Vec<Team> = self.repo.load(Collection::Teams).await?;
        all.into_iter()
            .find(|t| t.id == team_id)
            .ok_or_else(|| LedgerError::not_found("Team", team_id))
    }

    /// Teams the user belongs to, in creation order.
    pub async fn list_user_teams(&self, user_id: &str) -> LedgerResult<Vec<Team>> {
        let all: Vec<Team> = self.repo.load(Collection::Teams).await?;
        Ok(all.into_iter().filter(|t| t.is_member(user_id)).collect())
    }

    pub async fn join_team(
        &self,
        team_id: &str,
        user_id: &str,
        user_name: &str,
    ) -> LedgerResult<Team> {
        let team = self
            .modify(team_id, |team| push_member(team, user_id, user_name))
            .await?;

        tracing::info!("User {} joined team {}", user_id, team_id);
        Ok(team)
    }

    /// Only the team leader may add someone else.
    pub async fn add_member(&self, team_id: &str, req: AddTeamMemberRequest) -> LedgerResult<Team> {
        let team = self
            .modify(team_id, |team| {
                if team.leader_id != req.requester_id {
                    return Err(LedgerError::Forbidden(format!(
                        "only the leader of team {} can add members",
                        team.id
                    )));
                }
                push_member(team, &req.user_id, &req.user_name)
            })
            .await?;

        tracing::info!(
            "User {} added to team {} by {}",
            req.user_id,
            team_id,
            req.requester_id
        );
        Ok(team)
    }

    pub async fn leave_team(&self, team_id: &str, user_id: &str) -> LedgerResult<Team> {
        let team = self
            .modify(team_id, |team| {
                if team.leader_id == user_id {
                    return Err(LedgerError::Conflict(format!(
                        "the leader cannot leave team {}",
                        team.id
                    )));
                }
                let position = team
                    .members
                    .iter()
                    .position(|m| m.user_id == user_id)
                    .ok_or_else(|| LedgerError::not_found("Team member", user_id))?;
                team.members.remove(position);
                Ok(())
            })
            .await?;

        tracing::info!("User {} left team {}", user_id, team_id);
        Ok(team)
    }

    pub async fn add_team_points(&self, team_id: &str, points: u64) -> LedgerResult<Team> {
        self.modify(team_id, |team| {
            team.points = team.points.saturating_add(points);
            Ok(())
        })
        .await
    }

    async fn modify<F>(&self, team_id: &str, mutate: F) -> LedgerResult<Team>
    where
        F: FnOnce(&mut Team) -> LedgerResult<()> + Send,
    {
        self.repo
            .update(Collection::Teams, |all: &mut Vec<Team>| {
                let team = all
                    .iter_mut()
                    .find(|t| t.id == team_id)
                    .ok_or_else(|| LedgerError::not_found("Team", team_id))?;
                mutate(team)?;
                Ok(team.clone())
            })
            .await
    }
}

fn push_member(team: &mut Team, user_id: &str, user_name: &str) -> LedgerResult<()> {
    if team.is_member(user_id) {
        return Err(LedgerError::AlreadyMember {
            user_id: user_id.to_string(),
            target: format!("team {}", team.id),
        });
    }
    if team.is_full() {
        return Err(LedgerError::Capacity(format!("Team {}", team.id)));
    }
    team.members.push(TeamMember {
        user_id: user_id.to_string(),
        user_name: user_name.to_string(),
        joined_at: Utc::now(),
        role: TeamRole::Member,
    });
    Ok(())
}
