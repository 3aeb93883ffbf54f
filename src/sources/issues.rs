// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Issues source: raw fetch plus normalization of validated issue maps into Records
// role: adapter/source
// inputs: RepoId, TrackerApi, validated record maps from the snapshot
// outputs: Raw issue payload; Vec<Record> with computed /issues/{n} links
// invariants: Pull requests surfaced by the issues listing are excluded; indices in errors refer to the raw listing
// errors: Error::Fetch from the client; Error::MalformedRecord for unusable records
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use serde_json::{Map, Value};

use crate::error::Result;
use crate::model::{Record, RepoId};

use super::TrackerApi;

/// Fetch the raw issue listing; shape judgment belongs to the validator.
pub fn fetch_raw(repo: &RepoId, api: &dyn TrackerApi) -> Result<Value> {
  api.list_issues(&repo.owner, &repo.name)
}

/// Normalize validated issue maps into Records.
///
/// The tracker's issue listing carries pull requests too (they arrive with
/// a `pull_request` key); those belong to the pulls source and are skipped
/// here, not errored on.
pub fn normalize(raw: &[Map<String, Value>], repo: &RepoId) -> Result<Vec<Record>> {
  super::normalize_records(
    raw
      .iter()
      .enumerate()
      .filter(|(_, map)| !map.contains_key("pull_request")),
    repo,
    "issues",
    "issues",
  )
}
