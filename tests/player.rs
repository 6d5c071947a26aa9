//! Integration tests for the player directory entry: profile fields and age.

use chrono::NaiveDate;
use padel_league_web::Player;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn new_player_has_empty_profile() {
    let p = Player::new("Ana");
    assert_eq!(p.name, "Ana");
    assert_eq!(p.gender, None);
    assert_eq!(p.level, None);
    assert_eq!(p.birth_date, None);
}

#[test]
fn age_counts_whole_years_around_the_anniversary() {
    let mut p = Player::new("Ana");
    p.birth_date = Some(date(1990, 6, 15));

    // Day before the birthday: still 35.
    assert_eq!(p.age_on(date(2026, 6, 14)), Some(35));
    // On the birthday and after: 36.
    assert_eq!(p.age_on(date(2026, 6, 15)), Some(36));
    assert_eq!(p.age_on(date(2026, 12, 31)), Some(36));
}

#[test]
fn age_is_none_without_a_birth_date() {
    let p = Player::new("Ana");
    assert_eq!(p.age_on(date(2026, 6, 15)), None);
}
