// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Pull-request source: raw fetch plus normalization of validated pull maps into Records
// role: adapter/source
// inputs: RepoId, TrackerApi, validated record maps from the snapshot
// outputs: Raw pull payload; Vec<Record> with computed /pull/{n} links
// invariants: Sourced independently from issues; indices in errors refer to the raw listing
// errors: Error::Fetch from the client; Error::MalformedRecord for unusable records
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use serde_json::{Map, Value};

use crate::error::Result;
use crate::model::{Record, RepoId};

use super::TrackerApi;

/// Fetch the raw pull listing; shape judgment belongs to the validator.
pub fn fetch_raw(repo: &RepoId, api: &dyn TrackerApi) -> Result<Value> {
  api.list_pulls(&repo.owner, &repo.name)
}

/// Normalize validated pull maps into Records. Web links use the tracker's
/// singular `/pull/{n}` form.
pub fn normalize(raw: &[Map<String, Value>], repo: &RepoId) -> Result<Vec<Record>> {
  super::normalize_records(raw.iter().enumerate(), repo, "pulls", "pull")
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::Error;
  use crate::model::RecordState;
  use serde_json::json;

  fn maps(value: Value) -> Vec<Map<String, Value>> {
    value
      .as_array()
      .unwrap()
      .iter()
      .map(|v| v.as_object().unwrap().clone())
      .collect()
  }

  fn repo() -> RepoId {
    RepoId::parse("how-is/example-repository").unwrap()
  }

  #[test]
  fn pull_links_use_the_singular_segment() {
    let raw = maps(json!([{
      "number": 77,
      "title": "Speed up reports",
      "state": "closed",
      "created_at": "2020-01-03T08:00:00Z",
      "closed_at": "2020-01-07T10:00:00Z"
    }]));
    let records = normalize(&raw, &repo()).unwrap();
    assert_eq!(
      records[0].link,
      "https://github.com/how-is/example-repository/pull/77"
    );
    assert_eq!(records[0].state, RecordState::Closed);
  }

  #[test]
  fn input_order_is_preserved() {
    let raw = maps(json!([
      {"number": 3, "created_at": "2020-01-03T00:00:00Z"},
      {"number": 1, "created_at": "2020-01-01T00:00:00Z"},
      {"number": 2, "created_at": "2020-01-02T00:00:00Z"}
    ]));
    let numbers: Vec<i64> = normalize(&raw, &repo()).unwrap().iter().map(|r| r.number).collect();
    assert_eq!(numbers, vec![3, 1, 2]);
  }

  #[test]
  fn malformed_pull_names_its_own_source() {
    let raw = maps(json!([{"number": 5, "created_at": 42}]));
    let err = normalize(&raw, &repo()).unwrap_err();
    assert!(matches!(err, Error::MalformedRecord { source: "pulls", index: 0, .. }));
  }
}
