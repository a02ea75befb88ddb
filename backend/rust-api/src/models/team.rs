use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

pub const DEFAULT_MAX_MEMBERS: u32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub subject: String,
    pub leader_id: String,
    pub leader_name: String,
    #[serde(default)]
    pub members: Vec<TeamMember>,
    pub max_members: u32,
    #[serde(default)]
    pub points: u64,
    pub created_at: DateTime<Utc>,
}

impl Team {
    pub fn is_member(&self, user_id: &str) -> bool {
        self.members.iter().any(|m| m.user_id == user_id)
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= self.max_members as usize
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub user_id: String,
    pub user_name: String,
    pub joined_at: DateTime<Utc>,
    pub role: TeamRole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamRole {
    Leader,
    Member,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTeamRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub subject: String,
    #[validate(length(min = 1, max = 128))]
    pub leader_id: String,
    #[validate(length(min = 1, max = 128))]
    pub leader_name: String,
    #[validate(range(min = 1, max = 100))]
    pub max_members: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TeamMembershipRequest {
    #[validate(length(min = 1, max = 128))]
    pub user_id: String,
    #[validate(length(min = 1, max = 128))]
    pub user_name: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LeaveTeamRequest {
    #[validate(length(min = 1, max = 128))]
    pub user_id: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddTeamMemberRequest {
    #[validate(length(min = 1, max = 128))]
    pub requester_id: String,
    #[validate(length(min = 1, max = 128))]
    pub user_id: String,
    #[validate(length(min = 1, max = 128))]
    pub user_name: String,
}
