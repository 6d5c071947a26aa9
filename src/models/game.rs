//! Match and Team for 2v2 padel games.

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// A doubles team: always exactly two players.
pub type Team = [PlayerId; 2];

/// A single scheduled match: two teams on one court in one round.
/// Scores default to 0 ("unscored") and are edited after play.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    /// Round within the game day, 1-indexed.
    pub round: u32,
    /// Court within the round, 1-indexed.
    pub court: u32,
    pub team_a: Team,
    pub team_b: Team,
    pub score_a: u32,
    pub score_b: u32,
}

impl GameMatch {
    pub fn new(round: u32, court: u32, team_a: Team, team_b: Team) -> Self {
        Self {
            id: Uuid::new_v4(),
            round,
            court,
            team_a,
            team_b,
            score_a: 0,
            score_b: 0,
        }
    }

    /// All four player ids in this match.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.team_a.iter().chain(self.team_b.iter()).copied()
    }

    /// Combined score of both teams.
    pub fn total_points(&self) -> u32 {
        self.score_a + self.score_b
    }
}
