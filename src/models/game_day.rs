//! GameDay: one scheduled event with its own courts, roster and matches.

use crate::models::competition::CompetitionError;
use crate::models::game::{GameMatch, MatchId};
use crate::models::player::PlayerId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a game day.
pub type GameDayId = Uuid;

/// Courts below this are bumped up; a padel game day needs at least 2 courts.
pub const MIN_COURTS: usize = 2;

/// One game day of a competition: a date, a court count, the enrolled
/// players (in enrollment order; the order seeds match rotation), and the
/// generated matches.
///
/// The roster is locked as soon as any match exists; clearing the matches
/// unlocks it again.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameDay {
    pub id: GameDayId,
    pub date: NaiveDate,
    pub num_courts: usize,
    /// Enrolled player ids, in enrollment order.
    pub players: Vec<PlayerId>,
    pub matches: Vec<GameMatch>,
}

impl GameDay {
    /// Create a game day. Court counts below [`MIN_COURTS`] are clamped up.
    pub fn new(date: NaiveDate, num_courts: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            num_courts: num_courts.max(MIN_COURTS),
            players: Vec::new(),
            matches: Vec::new(),
        }
    }

    /// Full roster size required to generate matches (4 players per court).
    pub fn capacity(&self) -> usize {
        self.num_courts * 4
    }

    /// Whether matches have been generated (which locks the roster).
    pub fn is_scheduled(&self) -> bool {
        !self.matches.is_empty()
    }

    fn ensure_roster_unlocked(&self) -> Result<(), CompetitionError> {
        if self.is_scheduled() {
            return Err(CompetitionError::RosterLocked);
        }
        Ok(())
    }

    /// Enroll a player. Enrolling an already-enrolled player is a no-op.
    pub fn enroll(&mut self, player_id: PlayerId) -> Result<(), CompetitionError> {
        self.ensure_roster_unlocked()?;
        if !self.players.contains(&player_id) {
            self.players.push(player_id);
        }
        Ok(())
    }

    /// Withdraw a player. Withdrawing a player who is not enrolled is a no-op.
    pub fn withdraw(&mut self, player_id: PlayerId) -> Result<(), CompetitionError> {
        self.ensure_roster_unlocked()?;
        self.players.retain(|&p| p != player_id);
        Ok(())
    }

    /// Swap one enrolled player for another, keeping everyone else.
    pub fn replace(
        &mut self,
        old_player_id: PlayerId,
        new_player_id: PlayerId,
    ) -> Result<(), CompetitionError> {
        self.withdraw(old_player_id)?;
        self.enroll(new_player_id)
    }

    /// Replace the whole roster at once (the "update players" form).
    pub fn set_players(&mut self, players: Vec<PlayerId>) -> Result<(), CompetitionError> {
        self.ensure_roster_unlocked()?;
        self.players = players;
        Ok(())
    }

    /// Change the court count (clamped to [`MIN_COURTS`]).
    pub fn set_num_courts(&mut self, num_courts: usize) {
        self.num_courts = num_courts.max(MIN_COURTS);
    }

    /// Mutable match lookup by id.
    pub fn get_match_mut(&mut self, match_id: MatchId) -> Option<&mut GameMatch> {
        self.matches.iter_mut().find(|m| m.id == match_id)
    }

    /// Record the final score of one match. Scores stay editable after play.
    pub fn update_score(
        &mut self,
        match_id: MatchId,
        score_a: u32,
        score_b: u32,
    ) -> Result<(), CompetitionError> {
        let m = self
            .get_match_mut(match_id)
            .ok_or(CompetitionError::MatchNotFound(match_id))?;
        m.score_a = score_a;
        m.score_b = score_b;
        Ok(())
    }

    /// Delete all matches, unlocking the roster so it can be edited and
    /// the schedule regenerated.
    pub fn clear_matches(&mut self) {
        self.matches.clear();
    }
}
