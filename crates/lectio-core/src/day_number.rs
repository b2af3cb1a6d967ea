//! Day-of-cycle computation.
//!
//! A plan's day number is the 1-based position in its cycle of the target
//! date, counted from the plan's start date and wrapping every
//! `cycle_length` days. Dates before the start wrap backwards, so the day
//! before the start is the last day of the cycle.

use chrono::{Local, NaiveDate};

/// The result of [`day_number`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayPosition {
  /// 1-based day within the cycle, in `1..=cycle_length`.
  pub day:           u32,
  /// Set when no start date existed: the caller must persist this date as
  /// the plan's new start (day 1).
  pub adopted_start: Option<NaiveDate>,
}

/// Compute the day of the cycle for `today`.
///
/// Works on calendar dates only; convert timestamps with [`local_today`] or
/// `DateTime::date_naive` before calling.
///
/// # Panics
///
/// Panics if `cycle_length` is zero.
pub fn day_number(today: NaiveDate, start: Option<NaiveDate>, cycle_length: u32) -> DayPosition {
  assert!(cycle_length > 0, "cycle length must be positive");

  let Some(start) = start else {
    return DayPosition { day: 1, adopted_start: Some(today) };
  };

  let elapsed = (today - start).num_days();
  let wrapped = elapsed.rem_euclid(i64::from(cycle_length));

  // `wrapped` is in `0..cycle_length`, so it always fits.
  let day = u32::try_from(wrapped).unwrap_or(0) + 1;
  DayPosition { day, adopted_start: None }
}

/// Today's date in the local time zone, with the time of day dropped.
pub fn local_today() -> NaiveDate { Local::now().date_naive() }

#[cfg(test)]
mod tests {
  use chrono::Duration;

  use super::*;

  fn ymd(y: i32, m: u32, d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(y, m, d).unwrap() }

  #[test]
  fn missing_start_adopts_today() {
    let today = ymd(2024, 6, 1);
    let pos = day_number(today, None, 90);
    assert_eq!(pos, DayPosition { day: 1, adopted_start: Some(today) });
  }

  #[test]
  fn start_date_is_day_one() {
    let start = ymd(2024, 1, 1);
    let pos = day_number(start, Some(start), 90);
    assert_eq!(pos.day, 1);
    assert_eq!(pos.adopted_start, None);
  }

  #[test]
  fn wraps_after_one_cycle() {
    let start = ymd(2024, 1, 1);
    // 2024 is a leap year: Mar 31 is 90 days after Jan 1, Apr 1 is 91.
    assert_eq!(day_number(ymd(2024, 3, 30), Some(start), 90).day, 90);
    assert_eq!(day_number(ymd(2024, 3, 31), Some(start), 90).day, 1);
    assert_eq!(day_number(ymd(2024, 4, 1), Some(start), 90).day, 2);
  }

  #[test]
  fn day_before_start_is_last_day() {
    let start = ymd(2024, 1, 1);
    assert_eq!(day_number(ymd(2023, 12, 31), Some(start), 90).day, 90);
    assert_eq!(day_number(ymd(2023, 12, 31), Some(start), 365).day, 365);
  }

  #[test]
  fn always_within_cycle() {
    let start = ymd(2024, 1, 1);
    for len in [1_u32, 7, 90, 365] {
      for offset in -800_i64..=800 {
        let day = day_number(start + Duration::days(offset), Some(start), len).day;
        assert!((1..=len).contains(&day), "len={len} offset={offset} day={day}");
      }
    }
  }

  #[test]
  fn shifting_by_cycle_length_is_identity() {
    let start = ymd(2024, 3, 15);
    for len in [90_u32, 365] {
      for offset in [-400_i64, -1, 0, 1, 45, 364, 1000] {
        let today = start + Duration::days(offset);
        let shifted = today + Duration::days(i64::from(len));
        assert_eq!(
          day_number(today, Some(start), len).day,
          day_number(shifted, Some(start), len).day,
        );
      }
    }
  }

  #[test]
  #[should_panic(expected = "cycle length must be positive")]
  fn zero_cycle_length_panics() {
    day_number(ymd(2024, 1, 1), Some(ymd(2024, 1, 1)), 0);
  }
}
