//! Points awarded per correct answer, by game mode.
//!
//! | mode              | points |
//! |-------------------|--------|
//! | `regular`         | 3      |
//! | `team_tournament` | 5      |
//! | `1v1_tournament`  | 7      |

use crate::models::GameMode;

pub fn points_per_question(mode: GameMode) -> u64 {
    match mode {
        GameMode::Regular => 3,
        GameMode::TeamTournament => 5,
        GameMode::OneVsOne => 7,
    }
}

pub fn calculate_points(correct_answers: u32, mode: GameMode) -> u64 {
    u64::from(correct_answers) * points_per_question(mode)
}
