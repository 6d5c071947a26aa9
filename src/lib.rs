//! Padel league web app: library with models and business logic.

pub mod logic;
pub mod models;

pub use logic::{
    aggregate, generate, schedule_game_day, summarize, top_players, RankingError, ScheduleError,
};
pub use models::{
    Competition, CompetitionError, CompetitionId, CompetitionStatus, GameDay, GameDayId,
    GameDaySummary, GameMatch, MatchId, Player, PlayerId, RankingEntry, Team, MIN_COURTS,
};
