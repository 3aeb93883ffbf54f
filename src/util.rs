// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Small shared helpers: record timestamp parsing, man page rendering
// role: utilities/helpers
// inputs: Raw timestamp strings; clap CommandFactory
// outputs: UTC datetimes; man page troff text
// invariants: parse_utc_datetime accepts RFC3339 or plain dates and never panics
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use clap::CommandFactory;

/// Parse a record timestamp into UTC: RFC3339 first, then a plain
/// `YYYY-MM-DD` anchored at midnight UTC. Anything else is None.
pub fn parse_utc_datetime(raw: &str) -> Option<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(raw)
    .ok()
    .map(|dt| dt.with_timezone(&Utc))
    .or_else(|| {
      NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|ndt| Utc.from_utc_datetime(&ndt))
    })
}

/// Render a section-1 man page for a clap `CommandFactory` implementor.
/// Returns the troff content as a UTF-8 string.
pub fn render_man_page<T: CommandFactory>() -> anyhow::Result<String> {
  let cmd = T::command();
  let man = clap_mangen::Man::new(cmd);
  let mut buf: Vec<u8> = Vec::new();

  man.render(&mut buf)?;

  Ok(String::from_utf8_lossy(&buf).to_string())
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::Timelike;
  use clap::Parser;

  #[test]
  fn rfc3339_timestamps_convert_to_utc() {
    let dt = parse_utc_datetime("2020-01-10T09:30:00Z").unwrap();
    assert_eq!(dt.date_naive().to_string(), "2020-01-10");
    assert_eq!(dt.hour(), 9);

    let offset = parse_utc_datetime("2020-01-10T09:30:00+02:00").unwrap();
    assert_eq!(offset.hour(), 7);
  }

  #[test]
  fn plain_dates_anchor_at_midnight_utc() {
    let dt = parse_utc_datetime("2020-01-10").unwrap();
    assert_eq!(dt.hour(), 0);
    assert_eq!(dt.date_naive().to_string(), "2020-01-10");
  }

  #[test]
  fn garbage_timestamps_are_none() {
    assert!(parse_utc_datetime("not a date").is_none());
    assert!(parse_utc_datetime("").is_none());
  }

  #[derive(Parser, Debug)]
  #[command(name = "dummy", version, about = "Dummy CLI", long_about = None)]
  struct DummyCli;

  #[test]
  fn render_man_page_produces_troff_text() {
    let page = render_man_page::<DummyCli>().expect("render manpage");
    assert!(page.contains(".TH"));
    assert!(page.to_lowercase().contains("dummy"));
  }
}
