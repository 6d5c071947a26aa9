//! Competition: a named tournament made of game days, plus CompetitionError.

use crate::models::game::{GameMatch, MatchId};
use crate::models::game_day::{GameDay, GameDayId};
use crate::models::player::PlayerId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during competition and game-day operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CompetitionError {
    /// Roster edit attempted after matches were generated for the game day.
    RosterLocked,
    /// Game day not found in this competition.
    GameDayNotFound(GameDayId),
    /// Match not found in this game day.
    MatchNotFound(MatchId),
    /// Game day still has matches or enrolled players, so it cannot be deleted.
    GameDayNotEmpty(GameDayId),
    /// Player id not present in the player directory.
    PlayerNotFound(PlayerId),
}

impl std::fmt::Display for CompetitionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompetitionError::RosterLocked => {
                write!(f, "Players cannot be changed after matches were generated")
            }
            CompetitionError::GameDayNotFound(_) => write!(f, "Game day not found"),
            CompetitionError::MatchNotFound(_) => write!(f, "Match not found"),
            CompetitionError::GameDayNotEmpty(_) => {
                write!(f, "Cannot delete a game day with matches or enrolled players")
            }
            CompetitionError::PlayerNotFound(_) => write!(f, "Player not found"),
        }
    }
}

/// Unique identifier for a competition.
pub type CompetitionId = Uuid;

/// Where the competition stands in its lifecycle.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetitionStatus {
    #[default]
    Upcoming,
    InProgress,
    Completed,
}

/// A competition: name, date range, status and its game days.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Competition {
    pub id: CompetitionId,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: CompetitionStatus,
    pub game_days: Vec<GameDay>,
}

impl Competition {
    /// Create a new competition with no game days, in Upcoming status.
    pub fn new(name: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            start_date,
            end_date,
            status: CompetitionStatus::default(),
            game_days: Vec::new(),
        }
    }

    /// Add a game day; returns its id for subsequent lookups.
    pub fn add_game_day(&mut self, date: NaiveDate, num_courts: usize) -> GameDayId {
        let day = GameDay::new(date, num_courts);
        let id = day.id;
        self.game_days.push(day);
        id
    }

    pub fn game_day(&self, id: GameDayId) -> Option<&GameDay> {
        self.game_days.iter().find(|d| d.id == id)
    }

    pub fn game_day_mut(&mut self, id: GameDayId) -> Option<&mut GameDay> {
        self.game_days.iter_mut().find(|d| d.id == id)
    }

    /// Delete a game day. Refused while it still has matches or enrolled
    /// players (delete the matches and withdraw the players first).
    pub fn remove_game_day(&mut self, id: GameDayId) -> Result<(), CompetitionError> {
        let idx = self
            .game_days
            .iter()
            .position(|d| d.id == id)
            .ok_or(CompetitionError::GameDayNotFound(id))?;
        let day = &self.game_days[idx];
        if day.is_scheduled() || !day.players.is_empty() {
            return Err(CompetitionError::GameDayNotEmpty(id));
        }
        self.game_days.remove(idx);
        Ok(())
    }

    /// All matches across every game day, for competition-scope ranking.
    pub fn all_matches(&self) -> Vec<GameMatch> {
        self.game_days
            .iter()
            .flat_map(|d| d.matches.iter().cloned())
            .collect()
    }
}
