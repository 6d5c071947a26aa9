//! Round-robin match generation for a game day (circle method, doubles).

use crate::models::{GameDay, GameMatch, PlayerId, Team, MIN_COURTS};
use std::collections::HashSet;

/// Errors that can occur when generating a game day's schedule.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ScheduleError {
    /// Fewer than the minimum number of courts.
    NotEnoughCourts { court_count: usize },
    /// Roster does not hold exactly 4 players per court.
    WrongRosterSize { required: usize, actual: usize },
    /// The same player appears more than once in the roster.
    DuplicatePlayer(PlayerId),
    /// Matches already exist for this game day; delete them before regenerating.
    AlreadyScheduled,
}

impl std::fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleError::NotEnoughCourts { court_count } => {
                write!(f, "Need at least {} courts (got {})", MIN_COURTS, court_count)
            }
            ScheduleError::WrongRosterSize { required, actual } => {
                write!(f, "Wrong number of players. Required: {}, enrolled: {}", required, actual)
            }
            ScheduleError::DuplicatePlayer(_) => write!(f, "A player is enrolled more than once"),
            ScheduleError::AlreadyScheduled => {
                write!(f, "Matches were already generated for this game day")
            }
        }
    }
}

/// Generate a full round-robin schedule for `roster` on `court_count` courts.
///
/// Circle method, adapted for doubles:
/// 1. The last player in the roster stays fixed; the rest rotate.
/// 2. Each of the N-1 rounds orders players as `rotating ++ [fixed]` and
///    pairs position `i` with position `N-1-i`, giving N/2 provisional teams.
/// 3. Consecutive teams are grouped two at a time onto courts 1..=C: the
///    first of each group plays as team A, the second as team B.
/// 4. The rotating block is right-rotated by one between rounds.
///
/// The classical guarantee (every pair of players meets exactly once over
/// the N-1 rounds) is reused at pair level; with more than one court the
/// grouping step can repeat a teammate pairing across rounds. That is the
/// accepted behavior of this format, not something to rebalance.
///
/// Output is deterministic for a given roster order: `(N-1) * court_count`
/// matches in round-major, then court-major order, all scores 0.
pub fn generate(roster: &[PlayerId], court_count: usize) -> Result<Vec<GameMatch>, ScheduleError> {
    if court_count < MIN_COURTS {
        return Err(ScheduleError::NotEnoughCourts { court_count });
    }
    let required = court_count * 4;
    if roster.len() != required {
        return Err(ScheduleError::WrongRosterSize {
            required,
            actual: roster.len(),
        });
    }
    let mut seen = HashSet::with_capacity(roster.len());
    for &pid in roster {
        if !seen.insert(pid) {
            return Err(ScheduleError::DuplicatePlayer(pid));
        }
    }

    let n = roster.len();
    let fixed = roster[n - 1];
    let mut rotating: Vec<PlayerId> = roster[..n - 1].to_vec();

    let num_rounds = n - 1;
    let mut matches = Vec::with_capacity(num_rounds * court_count);

    for round in 1..=num_rounds {
        let mut order = rotating.clone();
        order.push(fixed);

        let pairs: Vec<Team> = (0..n / 2).map(|i| [order[i], order[n - 1 - i]]).collect();

        for court in 0..court_count {
            let team_a = pairs[court * 2];
            let team_b = pairs[court * 2 + 1];
            matches.push(GameMatch::new(
                round as u32,
                (court + 1) as u32,
                team_a,
                team_b,
            ));
        }

        // Move the last rotating player to the front for the next round.
        rotating.rotate_right(1);
    }

    Ok(matches)
}

/// Generate and store the schedule for a game day.
///
/// Refuses if matches already exist; the caller must `clear_matches` first.
/// Roster stability during this call is the caller's job (the web layer holds
/// its write lock across the whole operation).
pub fn schedule_game_day(day: &mut GameDay) -> Result<(), ScheduleError> {
    if day.is_scheduled() {
        return Err(ScheduleError::AlreadyScheduled);
    }
    day.matches = generate(&day.players, day.num_courts)?;
    Ok(())
}
