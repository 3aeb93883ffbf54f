// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Define the report JSON model (records, pointers, build summary, the report itself) shared by builder and output
// role: model/types
// outputs: Serializable structs with stable field names; RepoId parsing and display
// invariants: Field order matches declaration order; maps are BTreeMaps for deterministic JSON; dates serialize as ISO-8601
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::window::DateWindow;

/// `owner/name` pair identifying a repository on the tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoId {
  pub owner: String,
  pub name: String,
}

impl RepoId {
  /// Parse an `owner/name` identifier. Both halves are required; the name
  /// keeps everything after the first slash.
  pub fn parse(input: &str) -> Result<Self> {
    let bad = || Error::options(format!("repository `{input}` must be of the form owner/name"));
    let (owner, name) = input.split_once('/').ok_or_else(bad)?;
    if owner.is_empty() || name.is_empty() {
      return Err(bad());
    }
    Ok(RepoId { owner: owner.to_string(), name: name.to_string() })
  }
}

impl fmt::Display for RepoId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/{}", self.owner, self.name)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordState {
  Open,
  Closed,
}

/// One normalized activity item (issue or pull request).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
  pub number: i64,
  pub title: String,
  pub state: RecordState,
  pub created_at: DateTime<Utc>,
  #[serde(skip_serializing_if = "Option::is_none", default)]
  pub closed_at: Option<DateTime<Utc>>,
  #[serde(skip_serializing_if = "Vec::is_empty", default)]
  pub labels: Vec<String>,
  pub link: String,
}

impl Record {
  /// Creation date at day granularity; ages and windowing work on this.
  pub fn created_date(&self) -> NaiveDate {
    self.created_at.date_naive()
  }
}

/// Oldest/newest marker embedded in the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordPointer {
  pub link: String,
  pub date: NaiveDate,
}

impl RecordPointer {
  pub fn of(record: &Record) -> Self {
    RecordPointer { link: record.link.clone(), date: record.created_date() }
  }
}

/// Pre-summarized CI build history; never enters the statistics engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildSummary {
  pub total_builds: usize,
  pub passed: usize,
  pub failed: usize,
  pub errored: usize,
  pub canceled: usize,
  #[serde(skip_serializing_if = "Option::is_none", default)]
  pub latest_state: Option<String>,
  pub text: String,
}

/// The flat report aggregate, serialized to JSON in declaration order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportModel {
  pub title: String,
  pub repository: String,
  pub window: DateWindow,
  pub as_of: NaiveDate,
  pub contributions_summary: String,
  pub issues_summary: String,
  pub pulls_summary: String,
  pub issues_per_label: BTreeMap<String, usize>,
  pub issues: Vec<Record>,
  pub pulls: Vec<Record>,
  pub number_of_issues: usize,
  pub number_of_pulls: usize,
  pub average_issue_age_days: f64,
  pub average_pull_age_days: f64,
  pub oldest_issue: RecordPointer,
  pub newest_issue: RecordPointer,
  pub oldest_pull: RecordPointer,
  pub newest_pull: RecordPointer,
  pub build_summary: BuildSummary,
  #[serde(skip_serializing_if = "Option::is_none", default)]
  pub frontmatter: Option<BTreeMap<String, String>>,
}
