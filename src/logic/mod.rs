//! Business logic: round-robin scheduling and ranking aggregation.

mod ranking;
mod scheduler;

pub use ranking::{aggregate, summarize, top_players, RankingError};
pub use scheduler::{generate, schedule_game_day, ScheduleError};
