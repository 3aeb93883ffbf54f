// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: CI backends: blocking Travis v3 client and the env-fixture mock
// role: adapter/client
// inputs: Config (optional CI token); RHR_TEST_BUILDS_JSON fixture for the mock
// outputs: Raw build payloads as serde_json::Value ({"builds": [...]}); Error::Fetch on failure
// invariants: One logical fetch per call; unauthenticated access is legal for public repositories
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use serde_json::{json, Value};

use crate::config::Config;
use crate::error::{Error, Result};

use super::CiApi;

pub const BUILDS_FIXTURE_VAR: &str = "RHR_TEST_BUILDS_JSON";

const API_ROOT: &str = "https://api.travis-ci.org";
const USER_AGENT: &str = "repo-health-report";

pub struct TravisHttpApi {
  agent: ureq::Agent,
  token: Option<String>,
}

impl TravisHttpApi {
  pub fn new(config: &Config) -> Self {
    TravisHttpApi {
      agent: ureq::AgentBuilder::new().build(),
      token: config.ci_token.clone(),
    }
  }
}

impl CiApi for TravisHttpApi {
  fn list_builds(&self, owner: &str, name: &str) -> Result<Value> {
    // The v3 API takes a URL-encoded slug, not a path pair.
    let url = format!("{API_ROOT}/repo/{owner}%2F{name}/builds?limit=100");

    let mut request = self
      .agent
      .get(&url)
      .set("Travis-API-Version", "3")
      .set("User-Agent", USER_AGENT);
    if let Some(token) = &self.token {
      request = request.set("Authorization", &format!("token {token}"));
    }

    // Guard 1: the HTTP call must succeed.
    let response = request.call().map_err(|e| {
      let reason = match e {
        ureq::Error::Status(code, _) => format!("HTTP {code}"),
        ureq::Error::Transport(t) => t.to_string(),
      };
      Error::Fetch { source: "builds", reason }
    })?;

    // Guard 2: the body must parse as JSON.
    response
      .into_json::<Value>()
      .map_err(|e| Error::Fetch { source: "builds", reason: format!("invalid JSON body: {e}") })
  }
}

/// Fixture-backed CI client; a missing variable means an empty history.
pub struct TravisEnvApi;

impl CiApi for TravisEnvApi {
  fn list_builds(&self, _owner: &str, _name: &str) -> Result<Value> {
    match std::env::var(BUILDS_FIXTURE_VAR) {
      Ok(raw) => serde_json::from_str::<Value>(&raw).map_err(|e| Error::Fetch {
        source: "builds",
        reason: format!("fixture {BUILDS_FIXTURE_VAR} is not valid JSON: {e}"),
      }),
      Err(_) => Ok(json!({ "builds": [] })),
    }
  }
}
