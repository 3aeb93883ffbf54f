// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Build-history source: fetch CI builds and fold them into the report's BuildSummary
// role: adapter/source
// inputs: RepoId, CiApi
// outputs: BuildSummary (state counts, latest state, one-line text); never enters the statistics engine
// invariants: An empty build history is a valid summary, not an error; unknown states count toward the total only
// errors: Error::Fetch for client/shape failures
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use serde_json::Value;

use crate::error::{Error, Result};
use crate::ext::serde_json::JsonFetch;
use crate::model::{BuildSummary, RepoId};
use crate::summaries;

use super::CiApi;

/// Fetch CI build history and fold it into a summary.
pub fn fetch_summary(repo: &RepoId, api: &dyn CiApi) -> Result<BuildSummary> {
  let raw = api.list_builds(&repo.owner, &repo.name)?;

  // The v3 API wraps the list in {"builds": [...]}; a bare list is accepted
  // too. This source never reaches the snapshot validator, so the shape
  // check lives here.
  let builds = raw
    .fetch("builds")
    .raw()
    .and_then(Value::as_array)
    .or_else(|| raw.as_array())
    .ok_or_else(|| Error::Fetch { source: "builds", reason: "expected a build list".into() })?;

  let mut summary = BuildSummary {
    total_builds: builds.len(),
    passed: 0,
    failed: 0,
    errored: 0,
    canceled: 0,
    latest_state: None,
    text: String::new(),
  };

  for build in builds {
    match build.fetch("state").to_or_default::<String>().as_str() {
      "passed" => summary.passed += 1,
      "failed" => summary.failed += 1,
      "errored" => summary.errored += 1,
      "canceled" | "cancelled" => summary.canceled += 1,
      _ => {}
    }
  }

  // The API returns newest first.
  summary.latest_state = builds
    .first()
    .and_then(|b| b.fetch("state").to::<String>())
    .filter(|s| !s.is_empty());

  summary.text = if summary.total_builds == 0 {
    "No CI builds found.".to_string()
  } else {
    let mut text = format!(
      "{}: {} passed, {} failed, {} errored, {} canceled.",
      summaries::pluralize(summary.total_builds, "CI build"),
      summary.passed,
      summary.failed,
      summary.errored,
      summary.canceled,
    );
    if let Some(state) = &summary.latest_state {
      text.push_str(&format!(" Latest build {state}."));
    }
    text
  };

  Ok(summary)
}
