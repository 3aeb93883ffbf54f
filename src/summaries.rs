use crate::model::{Record, RecordState, RepoId};
use crate::window::DateWindow;

// Short human-readable strings for the report. Assembled with format!,
// rendering beyond that stays outside this crate.

fn about(n: i64, unit: &str) -> String {
  if n == 1 {
    format!("about 1 {unit}")
  } else {
    format!("about {n} {unit}s")
  }
}

/// Approximate a fractional day count in the largest sensible unit.
pub fn humanize_days(days: f64) -> String {
  if days < 1.0 {
    return "less than a day".into();
  }
  let whole = days.round() as i64;
  if whole < 14 {
    return about(whole, "day");
  }
  if whole < 70 {
    return about((days / 7.0).round() as i64, "week");
  }
  if whole < 365 {
    return about((days / 30.44).round() as i64, "month");
  }
  about((days / 365.25).round() as i64, "year")
}

pub fn pluralize(count: usize, noun: &str) -> String {
  if count == 1 {
    format!("{count} {noun}")
  } else {
    format!("{count} {noun}s")
  }
}

/// One-line issues/pulls summary for the report model.
pub fn tracker_summary(noun: &str, records: &[Record], window: &DateWindow, average_age_days: f64) -> String {
  let still_open = records.iter().filter(|r| r.state == RecordState::Open).count();
  format!(
    "{} opened between {} and {}, {} still open. Average age: {}.",
    pluralize(records.len(), noun),
    window.start,
    window.end,
    still_open,
    humanize_days(average_age_days),
  )
}

/// One-line contributions summary; becomes the snapshot's summary field.
pub fn contributions_summary(repo: &RepoId, window: &DateWindow, commits: usize, authors: usize) -> String {
  format!(
    "Between {} and {}, {} gained {} from {}.",
    window.start,
    window.end,
    repo,
    pluralize(commits, "new commit"),
    pluralize(authors, "author"),
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::{NaiveDate, TimeZone, Utc};

  fn window() -> DateWindow {
    DateWindow::new(
      NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
      NaiveDate::from_ymd_opt(2020, 1, 11).unwrap(),
    )
  }

  #[test]
  fn humanize_picks_the_largest_sensible_unit() {
    assert_eq!(humanize_days(0.4), "less than a day");
    assert_eq!(humanize_days(1.0), "about 1 day");
    assert_eq!(humanize_days(5.5), "about 6 days");
    assert_eq!(humanize_days(21.0), "about 3 weeks");
    assert_eq!(humanize_days(92.0), "about 3 months");
    assert_eq!(humanize_days(400.0), "about 1 year");
    assert_eq!(humanize_days(900.0), "about 2 years");
  }

  #[test]
  fn pluralize_handles_the_singular() {
    assert_eq!(pluralize(1, "issue"), "1 issue");
    assert_eq!(pluralize(3, "issue"), "3 issues");
    assert_eq!(pluralize(0, "pull request"), "0 pull requests");
  }

  #[test]
  fn tracker_summary_counts_open_records() {
    let mk = |number: i64, state: RecordState| Record {
      number,
      title: String::new(),
      state,
      created_at: Utc.with_ymd_and_hms(2020, 1, 2, 0, 0, 0).unwrap(),
      closed_at: None,
      labels: vec![],
      link: String::new(),
    };
    let records = vec![mk(1, RecordState::Open), mk(2, RecordState::Closed), mk(3, RecordState::Open)];
    let text = tracker_summary("issue", &records, &window(), 5.5);
    assert_eq!(
      text,
      "3 issues opened between 2020-01-01 and 2020-01-11, 2 still open. Average age: about 6 days."
    );
  }

  #[test]
  fn contributions_summary_names_the_repository() {
    let repo = RepoId::parse("how-is/example-repository").unwrap();
    let text = contributions_summary(&repo, &window(), 17, 3);
    assert_eq!(
      text,
      "Between 2020-01-01 and 2020-01-11, how-is/example-repository gained 17 new commits from 3 authors."
    );
  }
}
