//! Data structures for the padel league: players, matches, game days, competitions.

mod competition;
mod game;
mod game_day;
mod player;
mod ranking;

pub use competition::{Competition, CompetitionError, CompetitionId, CompetitionStatus};
pub use game::{GameMatch, MatchId, Team};
pub use game_day::{GameDay, GameDayId, MIN_COURTS};
pub use player::{Player, PlayerId};
pub use ranking::{GameDaySummary, RankingEntry};
