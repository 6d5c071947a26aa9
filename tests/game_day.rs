//! Integration tests for game day and competition lifecycle: roster locking,
//! score updates, game day deletion guards.

use chrono::NaiveDate;
use padel_league_web::logic::schedule_game_day;
use padel_league_web::{Competition, CompetitionError, GameDay, PlayerId, MIN_COURTS};
use uuid::Uuid;

fn roster_of(n: usize) -> Vec<PlayerId> {
    (0..n).map(|_| Uuid::new_v4()).collect()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn court_count_is_clamped_to_minimum() {
    let day = GameDay::new(date(2026, 5, 2), 0);
    assert_eq!(day.num_courts, MIN_COURTS);
    assert_eq!(day.capacity(), MIN_COURTS * 4);

    let mut day = GameDay::new(date(2026, 5, 2), 3);
    assert_eq!(day.num_courts, 3);
    day.set_num_courts(1);
    assert_eq!(day.num_courts, MIN_COURTS);
}

#[test]
fn enrollment_keeps_order_and_ignores_duplicates() {
    let mut day = GameDay::new(date(2026, 5, 2), 2);
    let ids = roster_of(3);
    for &id in &ids {
        day.enroll(id).unwrap();
    }
    day.enroll(ids[1]).unwrap(); // no-op
    assert_eq!(day.players, ids);
}

#[test]
fn roster_is_locked_while_matches_exist() {
    let mut day = GameDay::new(date(2026, 5, 2), 2);
    let ids = roster_of(8);
    day.set_players(ids.clone()).unwrap();
    schedule_game_day(&mut day).unwrap();

    let newcomer = Uuid::new_v4();
    assert_eq!(day.enroll(newcomer), Err(CompetitionError::RosterLocked));
    assert_eq!(day.withdraw(ids[0]), Err(CompetitionError::RosterLocked));
    assert_eq!(
        day.replace(ids[0], newcomer),
        Err(CompetitionError::RosterLocked)
    );
    assert_eq!(
        day.set_players(vec![newcomer]),
        Err(CompetitionError::RosterLocked)
    );

    // Clearing the matches unlocks the roster again.
    day.clear_matches();
    day.replace(ids[0], newcomer).unwrap();
    assert!(!day.players.contains(&ids[0]));
    assert!(day.players.contains(&newcomer));
}

#[test]
fn scores_stay_editable_after_scheduling() {
    let mut day = GameDay::new(date(2026, 5, 2), 2);
    day.set_players(roster_of(8)).unwrap();
    schedule_game_day(&mut day).unwrap();

    let match_id = day.matches[0].id;
    day.update_score(match_id, 21, 18).unwrap();
    assert_eq!(day.matches[0].score_a, 21);
    assert_eq!(day.matches[0].score_b, 18);

    // Editing an already scored match is allowed (last write wins).
    day.update_score(match_id, 15, 21).unwrap();
    assert_eq!(day.matches[0].score_a, 15);

    let bogus = Uuid::new_v4();
    assert_eq!(
        day.update_score(bogus, 1, 2),
        Err(CompetitionError::MatchNotFound(bogus))
    );
}

#[test]
fn game_day_deletion_is_guarded() {
    let mut competition = Competition::new("Spring Cup", date(2026, 4, 1), date(2026, 6, 30));
    let day_id = competition.add_game_day(date(2026, 5, 2), 2);

    let player = Uuid::new_v4();
    competition.game_day_mut(day_id).unwrap().enroll(player).unwrap();
    assert_eq!(
        competition.remove_game_day(day_id),
        Err(CompetitionError::GameDayNotEmpty(day_id))
    );

    competition
        .game_day_mut(day_id)
        .unwrap()
        .withdraw(player)
        .unwrap();
    competition.remove_game_day(day_id).unwrap();
    assert!(competition.game_day(day_id).is_none());

    let missing = Uuid::new_v4();
    assert_eq!(
        competition.remove_game_day(missing),
        Err(CompetitionError::GameDayNotFound(missing))
    );
}

#[test]
fn competition_collects_matches_across_game_days() {
    let mut competition = Competition::new("Spring Cup", date(2026, 4, 1), date(2026, 6, 30));
    let first = competition.add_game_day(date(2026, 5, 2), 2);
    let second = competition.add_game_day(date(2026, 5, 9), 2);

    for id in [first, second] {
        let day = competition.game_day_mut(id).unwrap();
        day.set_players(roster_of(8)).unwrap();
        schedule_game_day(day).unwrap();
    }

    // 2 game days x (8-1) rounds x 2 courts.
    assert_eq!(competition.all_matches().len(), 28);
}
