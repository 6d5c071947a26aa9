//! Ranking aggregation: per-player records over an arbitrary match set.
//!
//! Scope-agnostic: callers pass one game day's matches or a whole
//! competition's. Only players who appear in a match get an entry.

use crate::models::{GameDaySummary, GameMatch, Player, PlayerId, RankingEntry};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

/// Errors that can occur while aggregating rankings.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RankingError {
    /// A match references a player id missing from the player directory.
    UnknownPlayer(PlayerId),
}

impl std::fmt::Display for RankingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RankingError::UnknownPlayer(id) => {
                write!(f, "Match references unknown player {}", id)
            }
        }
    }
}

/// Outcome of one match from one team's point of view.
#[derive(Clone, Copy)]
enum TeamResult {
    Win,
    Tie,
    Loss,
}

#[derive(Default)]
struct Totals {
    games: u32,
    wins: u32,
    ties: u32,
    losses: u32,
    points_for: u32,
    points_against: u32,
}

fn round_one_decimal(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Build the ranking table for a set of matches.
///
/// Per match and team: strictly higher score wins, equal scores tie both
/// teams. Every player on a team gets a game, the team's points for/against,
/// and the matching W/T/L increment. A player id missing from `players`
/// fails with [`RankingError::UnknownPlayer`].
///
/// Sorted descending by points_for, then by win rate. The tie-break beyond
/// that is deterministic: totals accumulate in a `BTreeMap` keyed by player
/// id and the sort is stable, so entries with equal keys stay in ascending
/// player-id order on every call.
pub fn aggregate(
    matches: &[GameMatch],
    players: &HashMap<PlayerId, Player>,
) -> Result<Vec<RankingEntry>, RankingError> {
    let mut totals: BTreeMap<PlayerId, Totals> = BTreeMap::new();

    let credit = |totals: &mut BTreeMap<PlayerId, Totals>,
                      pid: PlayerId,
                      points_for: u32,
                      points_against: u32,
                      result: TeamResult|
     -> Result<(), RankingError> {
        if !players.contains_key(&pid) {
            return Err(RankingError::UnknownPlayer(pid));
        }
        let t = totals.entry(pid).or_default();
        t.games += 1;
        t.points_for += points_for;
        t.points_against += points_against;
        match result {
            TeamResult::Win => t.wins += 1,
            TeamResult::Tie => t.ties += 1,
            TeamResult::Loss => t.losses += 1,
        }
        Ok(())
    };

    for m in matches {
        let (result_a, result_b) = match m.score_a.cmp(&m.score_b) {
            Ordering::Greater => (TeamResult::Win, TeamResult::Loss),
            Ordering::Less => (TeamResult::Loss, TeamResult::Win),
            Ordering::Equal => (TeamResult::Tie, TeamResult::Tie),
        };
        for &pid in &m.team_a {
            credit(&mut totals, pid, m.score_a, m.score_b, result_a)?;
        }
        for &pid in &m.team_b {
            credit(&mut totals, pid, m.score_b, m.score_a, result_b)?;
        }
    }

    let mut entries: Vec<RankingEntry> = totals
        .into_iter()
        .map(|(pid, t)| {
            let win_rate = if t.games > 0 {
                round_one_decimal(f64::from(t.wins) / f64::from(t.games) * 100.0)
            } else {
                0.0
            };
            RankingEntry {
                player_id: pid,
                name: players[&pid].name.clone(),
                games: t.games,
                wins: t.wins,
                ties: t.ties,
                losses: t.losses,
                points_for: t.points_for,
                points_against: t.points_against,
                win_rate,
                record: format!("{} - {} - {}", t.wins, t.ties, t.losses),
            }
        })
        .collect();

    // Stable sort over the composite key keeps the id-ordered base for ties.
    entries.sort_by(|a, b| {
        b.points_for
            .cmp(&a.points_for)
            .then(b.win_rate.total_cmp(&a.win_rate))
    });

    Ok(entries)
}

/// Header numbers for a game day's matches page.
pub fn summarize(matches: &[GameMatch]) -> GameDaySummary {
    let games = matches.len() as u32;
    let points: u32 = matches.iter().map(GameMatch::total_points).sum();
    let rounds = matches
        .iter()
        .map(|m| m.round)
        .collect::<std::collections::HashSet<_>>()
        .len() as u32;
    let avg_points = if games > 0 {
        round_one_decimal(f64::from(points) / f64::from(games))
    } else {
        0.0
    };
    GameDaySummary {
        games,
        rounds,
        points,
        avg_points,
    }
}

/// The first `count` ranking entries (the matches page shows a top 3).
pub fn top_players(
    matches: &[GameMatch],
    players: &HashMap<PlayerId, Player>,
    count: usize,
) -> Result<Vec<RankingEntry>, RankingError> {
    let mut entries = aggregate(matches, players)?;
    entries.truncate(count);
    Ok(entries)
}
