//! Derived views: per-player ranking entries and game-day summaries.
//! These are recomputed from the match set on every request, never stored.

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};

/// One row of a ranking table: a player's aggregate record over a match set
/// (one game day, or a whole competition).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub player_id: PlayerId,
    pub name: String,
    pub games: u32,
    pub wins: u32,
    pub ties: u32,
    pub losses: u32,
    /// Total points scored by the player's teams. This is the primary
    /// ranking key ("points" in the standings).
    pub points_for: u32,
    pub points_against: u32,
    /// wins / games * 100, rounded to one decimal place. 0.0 with no games.
    pub win_rate: f64,
    /// "W - T - L" record string for display.
    pub record: String,
}

/// Header numbers for a game day's matches page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameDaySummary {
    pub games: u32,
    pub rounds: u32,
    /// Sum of both teams' scores over all matches.
    pub points: u32,
    /// points / games, rounded to one decimal place. 0.0 with no games.
    pub avg_points: f64,
}
