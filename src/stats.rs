// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Pure statistics over normalized records (windowing, ages, extremes, label distribution)
// role: computation/statistics
// inputs: Slices of Record plus an inclusive DateWindow or as-of date
// outputs: Deterministic values; no I/O, no clock reads, no mutation of inputs
// invariants: Day granularity throughout; ties resolve to first occurrence; empty sets are EmptySet errors, never sentinels
// errors: Error::EmptySet naming the statistic
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::model::Record;
use crate::window::DateWindow;

/// Keep records whose creation date lies in the inclusive window.
/// Input order is preserved; an inverted window keeps nothing.
pub fn filter_by_window(records: Vec<Record>, window: &DateWindow) -> Vec<Record> {
  records
    .into_iter()
    .filter(|record| window.contains(record.created_date()))
    .collect()
}

/// Mean whole-day age of the records as of `as_of`.
///
/// A record created on `as_of` contributes zero. Empty input is an error,
/// never 0 and never NaN.
pub fn average_age(records: &[Record], as_of: NaiveDate) -> Result<f64> {
  if records.is_empty() {
    return Err(Error::EmptySet { statistic: "average_age" });
  }
  let total_days: i64 = records
    .iter()
    .map(|record| (as_of - record.created_date()).num_days())
    .sum();
  Ok(total_days as f64 / records.len() as f64)
}

/// The record with the minimum creation date; ties keep the first in input
/// order.
pub fn oldest(records: &[Record]) -> Result<&Record> {
  // min_by_key already keeps the first of equal minima.
  records
    .iter()
    .min_by_key(|record| record.created_date())
    .ok_or(Error::EmptySet { statistic: "oldest" })
}

/// The record with the maximum creation date; ties keep the first in input
/// order.
pub fn newest(records: &[Record]) -> Result<&Record> {
  // max_by_key keeps the last of equal maxima, so scan by hand and only
  // replace on a strictly newer date.
  let mut best: Option<&Record> = None;
  for record in records {
    let replace = match best {
      None => true,
      Some(current) => record.created_date() > current.created_date(),
    };
    if replace {
      best = Some(record);
    }
  }
  best.ok_or(Error::EmptySet { statistic: "newest" })
}

/// Count every (record, label) pair. Records without labels contribute
/// nothing; the result never holds zero-count keys. Empty input is an empty
/// map, not an error.
pub fn label_distribution(records: &[Record]) -> BTreeMap<String, usize> {
  let mut distribution = BTreeMap::new();
  for record in records {
    for label in &record.labels {
      *distribution.entry(label.clone()).or_insert(0) += 1;
    }
  }
  distribution
}
