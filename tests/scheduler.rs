//! Integration tests for round-robin schedule generation (circle method).

use padel_league_web::logic::{generate, schedule_game_day, ScheduleError};
use padel_league_web::{GameDay, PlayerId};
use std::collections::HashSet;
use uuid::Uuid;

fn roster_of(n: usize) -> Vec<PlayerId> {
    (0..n).map(|_| Uuid::new_v4()).collect()
}

fn test_date() -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
}

#[test]
fn generate_rejects_too_few_courts() {
    let roster = roster_of(4);
    assert_eq!(
        generate(&roster, 1),
        Err(ScheduleError::NotEnoughCourts { court_count: 1 })
    );
}

#[test]
fn generate_rejects_wrong_roster_size() {
    let roster = roster_of(7); // 2 courts need 8
    assert_eq!(
        generate(&roster, 2),
        Err(ScheduleError::WrongRosterSize {
            required: 8,
            actual: 7
        })
    );
}

#[test]
fn generate_rejects_duplicate_players() {
    let mut roster = roster_of(8);
    roster[5] = roster[2];
    assert_eq!(
        generate(&roster, 2),
        Err(ScheduleError::DuplicatePlayer(roster[2]))
    );
}

#[test]
fn generate_produces_full_round_robin_shape() {
    for courts in 2..=4 {
        let n = courts * 4;
        let roster = roster_of(n);
        let matches = generate(&roster, courts).unwrap();

        // (N-1) rounds of `courts` matches each.
        assert_eq!(matches.len(), (n - 1) * courts);

        for round in 1..n as u32 {
            let in_round: Vec<_> = matches.iter().filter(|m| m.round == round).collect();
            assert_eq!(in_round.len(), courts);

            // Courts 1..=C, each exactly once per round.
            let court_numbers: HashSet<u32> = in_round.iter().map(|m| m.court).collect();
            assert_eq!(court_numbers, (1..=courts as u32).collect());

            // Every player plays exactly once per round.
            let playing: Vec<PlayerId> = in_round.iter().flat_map(|m| m.player_ids()).collect();
            assert_eq!(playing.len(), n);
            assert_eq!(playing.iter().collect::<HashSet<_>>().len(), n);
        }
    }
}

#[test]
fn generate_orders_matches_round_major_then_court_major() {
    let roster = roster_of(8);
    let matches = generate(&roster, 2).unwrap();
    let order: Vec<(u32, u32)> = matches.iter().map(|m| (m.round, m.court)).collect();
    let mut expected = order.clone();
    expected.sort();
    assert_eq!(order, expected);

    // (round, court) pairs are unique across the game day.
    assert_eq!(order.iter().collect::<HashSet<_>>().len(), order.len());
}

#[test]
fn generate_starts_all_matches_unscored() {
    let roster = roster_of(8);
    for m in generate(&roster, 2).unwrap() {
        assert_eq!(m.score_a, 0);
        assert_eq!(m.score_b, 0);
    }
}

#[test]
fn generate_is_deterministic_for_a_given_roster_order() {
    let roster = roster_of(12);
    let first = generate(&roster, 3).unwrap();
    let second = generate(&roster, 3).unwrap();
    let teams = |ms: &[padel_league_web::GameMatch]| {
        ms.iter()
            .map(|m| (m.round, m.court, m.team_a, m.team_b))
            .collect::<Vec<_>>()
    };
    assert_eq!(teams(&first), teams(&second));
}

#[test]
fn generate_rotation_follows_circle_method() {
    let roster = roster_of(8);
    let matches = generate(&roster, 2).unwrap();

    // Round 1: order is roster itself. Pairs (0,7), (1,6) on court 1 and
    // (2,5), (3,4) on court 2.
    assert_eq!(matches[0].team_a, [roster[0], roster[7]]);
    assert_eq!(matches[0].team_b, [roster[1], roster[6]]);
    assert_eq!(matches[1].team_a, [roster[2], roster[5]]);
    assert_eq!(matches[1].team_b, [roster[3], roster[4]]);

    // Round 2: rotating block [0..7] right-rotated by one, fixed player last.
    // Order = [6, 0, 1, 2, 3, 4, 5, 7].
    assert_eq!(matches[2].team_a, [roster[6], roster[7]]);
    assert_eq!(matches[2].team_b, [roster[0], roster[5]]);
    assert_eq!(matches[3].team_a, [roster[1], roster[4]]);
    assert_eq!(matches[3].team_b, [roster[2], roster[3]]);
}

#[test]
fn schedule_game_day_refuses_to_regenerate() {
    let mut day = GameDay::new(test_date(), 2);
    day.players = roster_of(8);

    schedule_game_day(&mut day).unwrap();
    assert_eq!(day.matches.len(), 14);

    let before = day.matches.clone();
    assert_eq!(
        schedule_game_day(&mut day),
        Err(ScheduleError::AlreadyScheduled)
    );
    // Nothing appended or overwritten.
    assert_eq!(day.matches, before);
}

#[test]
fn schedule_game_day_runs_again_after_clearing() {
    let mut day = GameDay::new(test_date(), 2);
    day.players = roster_of(8);

    schedule_game_day(&mut day).unwrap();
    day.clear_matches();
    schedule_game_day(&mut day).unwrap();
    assert_eq!(day.matches.len(), 14);
}

#[test]
fn schedule_game_day_leaves_no_partial_schedule_on_error() {
    let mut day = GameDay::new(test_date(), 2);
    day.players = roster_of(6); // wrong size

    assert!(schedule_game_day(&mut day).is_err());
    assert!(day.matches.is_empty());
}
