//! test-support: helpers for robust, nextest-friendly tests.
//!
//! Add as a dev-dependency in your top-level `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test_support = { path = "tests/support" }
//! ```
//!
//! Then in tests:
//! ```rust
//! use test_support::{init_tracing, sample_issues};
//!
//! #[test]
//! fn example() {
//!     init_tracing();
//!     let _issues = sample_issues();
//! }
//! ```

use once_cell::sync::Lazy;
use serde_json::{json, Value};
use tracing_subscriber::{fmt, EnvFilter};

use std::env;

/// Initialize `tracing` once, honoring `RUST_LOG` and writing via the test writer.
///
/// Safe to call from multiple tests; only the first call configures the global subscriber.
pub fn init_tracing() {
    static INIT: Lazy<()> = Lazy::new(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new("warn,test=info"))
            .unwrap();
        // with_test_writer() causes logs to appear alongside failing tests only (cargo/nextest)
        let _ = fmt().with_env_filter(filter).with_test_writer().try_init();
    });
    Lazy::force(&INIT);
}

/// Create a temp directory that deletes on drop.
pub fn tempdir() -> tempfile::TempDir {
    tempfile::tempdir().expect("create tempdir")
}

/// Set multiple environment variables for the duration of the returned guard.
pub fn with_env(vars: &[(&str, &str)]) -> EnvGuard {
    EnvGuard::set_many(vars)
}

/// Run a binary target with `assert_cmd`, returning the ready-to-run `Command`.
pub fn cmd_bin(bin: &str) -> assert_cmd::Command {
    init_tracing();
    tracing::debug!(%bin, "spawning binary under test");
    assert_cmd::Command::cargo_bin(bin).expect("binary target not found")
}

/// Guard for temporarily setting environment variables.
pub struct EnvGuard {
    prev: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    pub fn set_many(kv: &[(&str, &str)]) -> Self {
        let mut prev = Vec::with_capacity(kv.len());
        for (k, v) in kv {
            let k_owned = k.to_string();
            prev.push((k_owned.clone(), env::var(k).ok()));
            env::set_var(k, v);
        }
        Self { prev }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (k, old) in self.prev.drain(..) {
            match old {
                Some(v) => env::set_var(&k, v),
                None => env::remove_var(&k),
            }
        }
    }
}

// --- Canned tracker/CI payloads ---
//
// The canonical window for these fixtures is 2020-01-01 through 2020-01-11
// inclusive. Entries outside it exercise window filtering.

/// One open tracker issue in GitHub listing shape.
pub fn issue_json(number: u64, created_at: &str, labels: &[&str]) -> Value {
    let labels: Vec<Value> = labels.iter().map(|name| json!({ "name": name })).collect();
    json!({
        "number": number,
        "title": format!("Issue {number}"),
        "state": "open",
        "created_at": created_at,
        "labels": labels,
    })
}

/// A closed issue with an explicit closing timestamp.
pub fn closed_issue_json(number: u64, created_at: &str, closed_at: &str, labels: &[&str]) -> Value {
    let mut issue = issue_json(number, created_at, labels);
    issue["state"] = json!("closed");
    issue["closed_at"] = json!(closed_at);
    issue
}

/// One commit in GitHub `/commits` listing shape.
pub fn commit_json(login: &str, email: &str, date: &str) -> Value {
    json!({
        "sha": format!("{login}{date}").chars().filter(char::is_ascii_alphanumeric).collect::<String>(),
        "commit": { "author": { "name": login, "email": email, "date": date } },
        "author": { "login": login },
    })
}

/// A CI build-history payload in Travis v3 shape.
pub fn builds_json(states: &[&str]) -> Value {
    let builds: Vec<Value> = states.iter().map(|state| json!({ "state": state })).collect();
    json!({ "builds": builds })
}

/// Issues listing for the canonical window: two in-window issues, one stale
/// issue outside it, and one pull-request entry the tracker mixes in.
pub fn sample_issues() -> Value {
    json!([
        issue_json(1, "2020-01-01T09:00:00Z", &["bug"]),
        closed_issue_json(2, "2020-01-10T10:00:00Z", "2020-01-20T00:00:00Z", &["bug", "docs"]),
        closed_issue_json(3, "2019-06-01T00:00:00Z", "2019-07-01T00:00:00Z", &[]),
        {
            let mut shadow = issue_json(7, "2020-01-05T00:00:00Z", &[]);
            shadow["pull_request"] = json!({ "url": "https://api.github.com/repos/how-is/example-repository/pulls/7" });
            shadow
        },
    ])
}

/// Pull listing for the canonical window: one open pull request.
pub fn sample_pulls() -> Value {
    json!([issue_json(7, "2020-01-05T00:00:00Z", &[])])
}

/// Commit listing for the canonical window: three in-window commits from
/// two authors, plus one older commit that must be filtered out.
pub fn sample_commits() -> Value {
    json!([
        commit_json("alice", "alice@example.com", "2020-01-03T12:00:00Z"),
        commit_json("bo", "bo@example.com", "2020-01-08T08:30:00Z"),
        commit_json("alice", "alice@example.com", "2020-01-09T15:45:00Z"),
        commit_json("carol", "old@example.com", "2019-12-01T00:00:00Z"),
    ])
}

/// Build history: newest first, mixed states.
pub fn sample_builds() -> Value {
    builds_json(&["passed", "passed", "failed", "errored", "canceled"])
}
