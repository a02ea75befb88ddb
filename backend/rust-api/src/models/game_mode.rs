use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LedgerError;

/// Context an attempt was played in; decides the points-per-answer weight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    #[serde(rename = "regular")]
    Regular,
    #[serde(rename = "team_tournament", alias = "team")]
    TeamTournament,
    #[serde(rename = "1v1_tournament", alias = "1v1", alias = "1vs1")]
    OneVsOne,
}

impl GameMode {
    pub fn as_str(self) -> &'static str {
        match self {
            GameMode::Regular => "regular",
            GameMode::TeamTournament => "team_tournament",
            GameMode::OneVsOne => "1v1_tournament",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameMode {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "regular" => Ok(GameMode::Regular),
            "team_tournament" | "team" => Ok(GameMode::TeamTournament),
            "1v1_tournament" | "1v1" | "1vs1" => Ok(GameMode::OneVsOne),
            other => Err(LedgerError::InvalidMode(other.to_string())),
        }
    }
}
