//! Player data structure: the global player directory entry.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in rosters, matches and lookups).
pub type PlayerId = Uuid;

/// A registered player. Players exist independently of any competition and
/// are referenced by id from game-day rosters and matches.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// "M" or "F", when known.
    pub gender: Option<String>,
    /// Playing level, e.g. "M1", "F2".
    pub level: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

impl Player {
    /// Create a new player with the given name. Profile fields start empty.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            gender: None,
            level: None,
            birth_date: None,
        }
    }

    /// Age in whole years on the given date, if a birth date is set.
    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        let born = self.birth_date?;
        let mut age = today.year() - born.year();
        if (today.month(), today.day()) < (born.month(), born.day()) {
            age -= 1;
        }
        u32::try_from(age).ok()
    }
}
