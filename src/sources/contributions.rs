// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Contributions source: fetch windowed commits and pre-summarize them into the snapshot's summary line
// role: adapter/source
// inputs: RepoId, DateWindow, TrackerApi
// outputs: One summary string (commit and distinct author counts); never enters the statistics engine
// invariants: Window filtering is authoritative client-side even when the API narrowed server-side
// errors: Error::Fetch for client/shape failures; Error::MalformedRecord for commits without a parseable date
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::BTreeSet;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::ext::serde_json::JsonFetch;
use crate::model::RepoId;
use crate::summaries;
use crate::util::parse_utc_datetime;
use crate::window::DateWindow;

use super::TrackerApi;

/// Fetch commits for the window and fold them into the one-line
/// contributions summary.
pub fn fetch_summary(repo: &RepoId, window: &DateWindow, api: &dyn TrackerApi) -> Result<String> {
  let raw = api.list_commits(&repo.owner, &repo.name, window)?;

  // Guard 1: the payload must be a commit list; this source never reaches
  // the snapshot validator, so the shape check lives here.
  let commits = raw.as_array().ok_or_else(|| Error::Fetch {
    source: "commits",
    reason: "expected a list of commits".into(),
  })?;

  let mut counted = 0usize;
  let mut authors: BTreeSet<String> = BTreeSet::new();

  for (index, commit) in commits.iter().enumerate() {
    let date_raw = commit.fetch("commit.author.date").to::<String>().ok_or_else(|| {
      Error::MalformedRecord {
        source: "commits",
        index,
        detail: "missing `commit.author.date`".into(),
      }
    })?;
    let date = parse_utc_datetime(&date_raw).ok_or_else(|| Error::MalformedRecord {
      source: "commits",
      index,
      detail: format!("unparseable `commit.author.date` `{date_raw}`"),
    })?;

    if !window.contains(date.date_naive()) {
      continue;
    }
    counted += 1;

    let author = commit
      .fetch("commit.author.email")
      .to::<String>()
      .or_else(|| commit.fetch("author.login").to::<String>())
      .or_else(|| commit.fetch("commit.author.name").to::<String>())
      .unwrap_or_else(|| "unknown".into());
    authors.insert(author);
  }

  Ok(summaries::contributions_summary(repo, window, counted, authors.len()))
}
