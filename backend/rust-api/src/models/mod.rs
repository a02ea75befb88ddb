pub mod attempt;
pub mod game_match;
pub mod game_mode;
pub mod quiz;
pub mod ranking;
pub mod stats;
pub mod team;
pub mod tournament;

pub use attempt::{AttemptResult, SubmitAttemptRequest, SubmitAttemptResponse};
pub use game_match::{FindMatchRequest, Match, MatchStatus, PlayerSlot, SubmitMatchScoreRequest};
pub use game_mode::GameMode;
pub use quiz::{ListQuizzesQuery, Question, Quiz, QuizStatus, SaveQuizRequest};
pub use ranking::{WeeklyRanking, WeeklyRankingsQuery, WeeklyRankingsResponse};
pub use stats::UserStats;
pub use team::{
    AddTeamMemberRequest, CreateTeamRequest, LeaveTeamRequest, Team, TeamMember,
    TeamMembershipRequest, TeamRole, DEFAULT_MAX_MEMBERS,
};
pub use tournament::{
    CreateTournamentRequest, JoinTournamentRequest, SubmitTournamentScoreRequest, Tournament,
    TournamentFormat, TournamentScore, TournamentStatus,
};
