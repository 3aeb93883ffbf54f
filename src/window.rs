use chrono::{DateTime, Datelike, Duration, Local, NaiveDate};
use chrono_english::{parse_duration, Interval};
use serde::{Deserialize, Serialize};
use two_timer::parse as parse_natural;

use crate::error::{Error, Result};

// Windowing types live here to keep the builder focused on assembly.

/// How the caller asked for a window, before resolution against "now".
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum WindowSpec {
  /// A calendar month, `YYYY-MM`.
  Month { ym: String },
  /// A natural-language phrase such as `last month` or `3 weeks ago`.
  ForPhrase { phrase: String },
  /// Explicit bounds; a missing `until` means "up to now".
  SinceUntil { since: String, until: Option<String> },
  /// The month leading up to now (the default when nothing is specified).
  TrailingMonth,
}

/// Inclusive day-granular bounds; an inverted window is legal and matches
/// nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
  pub start: NaiveDate,
  pub end: NaiveDate,
}

impl DateWindow {
  pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
    DateWindow { start, end }
  }

  pub fn contains(&self, date: NaiveDate) -> bool {
    self.start <= date && date <= self.end
  }
}

/// Parse a `YYYY-MM-DD` date, also tolerating a full RFC3339 timestamp.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(raw, "%Y-%m-%d")
    .ok()
    .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
    .ok_or_else(|| Error::options(format!("invalid date `{raw}`, expected YYYY-MM-DD")))
}

/// Inclusive first/last day of a `YYYY-MM` month.
pub fn month_bounds(year_month: &str) -> Result<(NaiveDate, NaiveDate)> {
  let parts: Vec<&str> = year_month.split('-').collect();

  if parts.len() != 2 {
    return Err(Error::options("invalid --month, expected YYYY-MM"));
  }
  let y: i32 = parts[0]
    .parse()
    .map_err(|_| Error::options("invalid year in --month"))?;
  let m: u32 = parts[1]
    .parse()
    .map_err(|_| Error::options("invalid month in --month"))?;

  if !(1..=12).contains(&m) {
    return Err(Error::options("invalid month in --month"));
  }
  let first = NaiveDate::from_ymd_opt(y, m, 1).ok_or_else(|| Error::options("invalid --month"))?;
  Ok((first, NaiveDate::from_ymd_opt(y, m, last_day_of_month(y, m)).unwrap()))
}

/// Resolve a window request into inclusive date bounds.
///
/// Supports an optional `now` override for deterministic testing.
pub fn compute_window(spec: &WindowSpec, now: Option<DateTime<Local>>) -> Result<DateWindow> {
  let now = now.unwrap_or_else(Local::now);
  let today = now.date_naive();

  match spec {
    WindowSpec::Month { ym } => {
      let (start, end) = month_bounds(ym)?;
      Ok(DateWindow::new(start, end))
    }
    WindowSpec::SinceUntil { since, until } => {
      let start = parse_date(since)?;
      let end = match until {
        Some(raw) => parse_date(raw)?,
        None => today,
      };
      Ok(DateWindow::new(start, end))
    }
    WindowSpec::ForPhrase { phrase } => for_phrase_window(phrase, now),
    WindowSpec::TrailingMonth => Ok(DateWindow::new(months_back(today, 1), today)),
  }
}

// --- Helpers for `--for` parsing ---

fn start_of_week(date: NaiveDate) -> NaiveDate {
  let weekday = date.weekday().num_days_from_monday() as i64;
  date - Duration::days(weekday)
}

fn last_week_window(today: NaiveDate) -> DateWindow {
  let start_this_week = start_of_week(today);
  DateWindow::new(start_this_week - Duration::days(7), start_this_week - Duration::days(1))
}

fn last_month_window(today: NaiveDate) -> DateWindow {
  let first_this_month = NaiveDate::from_ymd_opt(today.year(), today.month(), 1).unwrap();
  let (last_y, last_m) = if today.month() == 1 {
    (today.year() - 1, 12)
  } else {
    (today.year(), today.month() - 1)
  };
  DateWindow::new(
    NaiveDate::from_ymd_opt(last_y, last_m, 1).unwrap(),
    first_this_month - Duration::days(1),
  )
}

/// Parse a `--now-override` value into a local DateTime.
/// Accepts RFC3339 (e.g. 2025-08-15T12:00:00Z), a naive timestamp
/// (`%Y-%m-%dT%H:%M:%S`), or a plain `YYYY-MM-DD` anchored at noon.
pub fn parse_now_override(s: Option<&str>) -> Option<DateTime<Local>> {
  s.and_then(|raw| {
    DateTime::parse_from_rfc3339(raw)
      .ok()
      .map(|dt| dt.with_timezone(&Local))
      .or_else(|| {
        chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
          .ok()
          .and_then(|ndt| ndt.and_local_timezone(Local).single())
      })
      .or_else(|| {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
          .ok()
          .and_then(|d| d.and_hms_opt(12, 0, 0))
          .and_then(|ndt| ndt.and_local_timezone(Local).single())
      })
  })
}

/// Resolve a natural-language phrase against `now`.
fn for_phrase_window(input: &str, now: DateTime<Local>) -> Result<DateWindow> {
  let phrase = input.trim().to_lowercase();
  let today = now.date_naive();

  // Prefer library support; the overrides below pin calendar anchoring where
  // the libraries disagree with expectations.
  if phrase == "today" {
    return Ok(DateWindow::new(today, today));
  }

  if phrase == "yesterday" {
    return Ok(DateWindow::new(today - Duration::days(1), today));
  }

  // Override: last week anchors to the previous calendar week, Mon..Sun.
  if phrase == "last week" {
    return Ok(last_week_window(today));
  }

  // Override: last month anchors to the previous calendar month.
  if phrase == "last month" {
    return Ok(last_month_window(today));
  }

  // Duration/"ago" parsing via chrono-english (first, to avoid
  // misclassification by the natural parser).
  if let Ok(interval) = parse_duration(&phrase) {
    let (start, end) = match interval {
      Interval::Seconds(secs) => {
        let d = Duration::seconds(secs.into());
        if secs < 0 { (now + d, now) } else { (now, now + d) }
      }
      Interval::Days(days) => {
        let d = Duration::days(days.into());
        if days < 0 { (now + d, now) } else { (now, now + d) }
      }
      Interval::Months(months) => {
        if months < 0 {
          (months_back_datetime(now, months.unsigned_abs() as i32), now)
        } else {
          (now, months_back_datetime(now, -months))
        }
      }
    };

    return Ok(DateWindow::new(start.date_naive(), end.date_naive()));
  }

  // Natural ranges via two_timer (last year, last tuesday, June 2019, ...).
  // two_timer yields a half-open [start, end); subtracting one second turns
  // the exclusive end into the last covered day.
  if let Ok((start_naive, end_naive, _lit)) = parse_natural(&phrase, None) {
    let start = start_naive.date();
    let end_exclusive = end_naive.min(now.naive_local());
    let end = (end_exclusive - Duration::seconds(1)).date();

    return Ok(DateWindow::new(start, end));
  }

  Err(Error::options(format!("cannot interpret --for phrase `{input}`")))
}

fn last_day_of_month(year: i32, month: u32) -> u32 {
  let (ny, nm) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
  let first_next = NaiveDate::from_ymd_opt(ny, nm, 1).unwrap();
  first_next.pred_opt().unwrap().day()
}

/// Same calendar day `n` months earlier, clamped to the month's length.
pub fn months_back(date: NaiveDate, n: i32) -> NaiveDate {
  let total = (date.year() * 12 + date.month() as i32 - 1) - n;
  let y = total.div_euclid(12);
  let m = (total.rem_euclid(12) + 1) as u32;
  let d = date.day().min(last_day_of_month(y, m));
  NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn months_back_datetime(dt: DateTime<Local>, n: i32) -> DateTime<Local> {
  months_back(dt.date_naive(), n)
    .and_time(dt.time())
    .and_local_timezone(Local)
    .single()
    .unwrap_or(dt)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn fixed_now() -> DateTime<Local> {
    chrono::NaiveDateTime::parse_from_str("2025-08-15T12:00:00", "%Y-%m-%dT%H:%M:%S")
      .unwrap()
      .and_local_timezone(Local)
      .single()
      .unwrap()
  }

  fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
  }

  #[test]
  fn month_bounds_are_inclusive() {
    let (start, end) = month_bounds("2025-08").unwrap();
    assert_eq!(start, d("2025-08-01"));
    assert_eq!(end, d("2025-08-31"));
  }

  #[test]
  fn month_bounds_handle_february_and_december() {
    assert_eq!(month_bounds("2024-02").unwrap().1, d("2024-02-29"));
    assert_eq!(month_bounds("2025-12").unwrap().1, d("2025-12-31"));
  }

  #[test]
  fn month_bounds_invalid_errors() {
    assert!(matches!(month_bounds("2025-13"), Err(Error::Options { .. })));
    assert!(month_bounds("2025").is_err());
    assert!(month_bounds("08-2025-01").is_err());
  }

  #[test]
  fn since_until_passthrough() {
    let spec = WindowSpec::SinceUntil {
      since: "2025-08-01".into(),
      until: Some("2025-08-31".into()),
    };
    let win = compute_window(&spec, Some(fixed_now())).unwrap();
    assert_eq!(win, DateWindow::new(d("2025-08-01"), d("2025-08-31")));
  }

  #[test]
  fn since_without_until_runs_to_today() {
    let spec = WindowSpec::SinceUntil { since: "2025-08-01".into(), until: None };
    let win = compute_window(&spec, Some(fixed_now())).unwrap();
    assert_eq!(win.end, d("2025-08-15"));
  }

  #[test]
  fn bad_since_is_an_options_error() {
    let spec = WindowSpec::SinceUntil { since: "Aug 1".into(), until: None };
    assert!(matches!(compute_window(&spec, Some(fixed_now())), Err(Error::Options { .. })));
  }

  #[test]
  fn inverted_window_is_legal_and_matches_nothing() {
    let win = DateWindow::new(d("2025-08-31"), d("2025-08-01"));
    assert!(!win.contains(d("2025-08-15")));
    assert!(!win.contains(d("2025-08-01")));
  }

  #[test]
  fn contains_is_inclusive_on_both_bounds() {
    let win = DateWindow::new(d("2025-08-01"), d("2025-08-31"));
    assert!(win.contains(d("2025-08-01")));
    assert!(win.contains(d("2025-08-31")));
    assert!(!win.contains(d("2025-07-31")));
    assert!(!win.contains(d("2025-09-01")));
  }

  #[test]
  fn trailing_month_ends_today() {
    let win = compute_window(&WindowSpec::TrailingMonth, Some(fixed_now())).unwrap();
    assert_eq!(win, DateWindow::new(d("2025-07-15"), d("2025-08-15")));
  }

  #[test]
  fn for_phrase_today_is_a_single_day() {
    let spec = WindowSpec::ForPhrase { phrase: "today".into() };
    let win = compute_window(&spec, Some(fixed_now())).unwrap();
    assert_eq!(win, DateWindow::new(d("2025-08-15"), d("2025-08-15")));
  }

  #[test]
  fn for_phrase_last_month_has_calendar_bounds() {
    let spec = WindowSpec::ForPhrase { phrase: "last month".into() };
    let win = compute_window(&spec, Some(fixed_now())).unwrap();
    assert_eq!(win, DateWindow::new(d("2025-07-01"), d("2025-07-31")));
  }

  #[test]
  fn for_phrase_last_month_across_january() {
    let january = chrono::NaiveDateTime::parse_from_str("2025-01-10T08:00:00", "%Y-%m-%dT%H:%M:%S")
      .unwrap()
      .and_local_timezone(Local)
      .single()
      .unwrap();
    let spec = WindowSpec::ForPhrase { phrase: "last month".into() };
    let win = compute_window(&spec, Some(january)).unwrap();
    assert_eq!(win, DateWindow::new(d("2024-12-01"), d("2024-12-31")));
  }

  #[test]
  fn for_phrase_last_week_is_mon_through_sun() {
    // 2025-08-15 is a Friday; last week is Mon 08-04 .. Sun 08-10.
    let spec = WindowSpec::ForPhrase { phrase: "last week".into() };
    let win = compute_window(&spec, Some(fixed_now())).unwrap();
    assert_eq!(win, DateWindow::new(d("2025-08-04"), d("2025-08-10")));
  }

  #[test]
  fn for_phrase_weeks_ago_runs_to_today() {
    let spec = WindowSpec::ForPhrase { phrase: "2 weeks ago".into() };
    let win = compute_window(&spec, Some(fixed_now())).unwrap();
    assert_eq!(win, DateWindow::new(d("2025-08-01"), d("2025-08-15")));
  }

  #[test]
  fn for_phrase_last_year_has_calendar_bounds() {
    let spec = WindowSpec::ForPhrase { phrase: "last year".into() };
    let win = compute_window(&spec, Some(fixed_now())).unwrap();
    assert_eq!(win, DateWindow::new(d("2024-01-01"), d("2024-12-31")));
  }

  #[test]
  fn unintelligible_phrase_is_an_options_error() {
    let spec = WindowSpec::ForPhrase { phrase: "unparseable phrase 12345".into() };
    let err = compute_window(&spec, Some(fixed_now())).unwrap_err();
    assert!(matches!(err, Error::Options { .. }));
    assert!(err.to_string().contains("unparseable phrase 12345"));
  }

  #[test]
  fn months_back_clamps_to_month_length() {
    assert_eq!(months_back(d("2025-03-31"), 1), d("2025-02-28"));
    assert_eq!(months_back(d("2025-01-15"), 1), d("2024-12-15"));
    assert_eq!(months_back(d("2024-03-30"), 1), d("2024-02-29"));
  }

  #[test]
  fn now_override_accepts_three_shapes() {
    assert!(parse_now_override(Some("2025-08-15T12:00:00Z")).is_some());
    assert!(parse_now_override(Some("2025-08-15T12:00:00")).is_some());
    assert!(parse_now_override(Some("2025-08-15")).is_some());
    assert!(parse_now_override(Some("not a date")).is_none());
    assert!(parse_now_override(None).is_none());
  }
}
