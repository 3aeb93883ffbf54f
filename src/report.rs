// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Orchestrate one report: concurrent source fetches, boundary validation, statistics, model assembly
// role: orchestration
// inputs: RepoId + DateWindow + injected TrackerApi/CiApi clients (defaults built from Config when absent)
// outputs: A memoized ReportModel; repeated reads never re-fetch or recompute
// invariants: Fetches are mutually independent; join order issues -> pulls -> contributions -> builds makes the first error deterministic; any failure aborts the whole build
// errors: Every pipeline error kind propagates unchanged to the caller
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::BTreeMap;
use std::thread;

use once_cell::unsync::OnceCell;

use crate::config::Config;
use crate::error::Result;
use crate::model::{RecordPointer, ReportModel, RepoId};
use crate::snapshot;
use crate::sources::{self, CiApi, TrackerApi};
use crate::stats;
use crate::summaries;
use crate::window::DateWindow;

/// What the caller wants a report over.
#[derive(Debug, Clone)]
pub struct ReportRequest {
  pub repository: String,
  pub window: DateWindow,
  pub frontmatter: Option<BTreeMap<String, String>>,
  pub paginate: bool,
}

/// Builds one report and keeps it for its lifetime.
pub struct ReportBuilder {
  repo: RepoId,
  window: DateWindow,
  frontmatter: Option<BTreeMap<String, String>>,
  tracker: Box<dyn TrackerApi>,
  ci: Box<dyn CiApi>,
  model: OnceCell<ReportModel>,
}

fn join<T>(handle: thread::ScopedJoinHandle<'_, T>) -> T {
  match handle.join() {
    Ok(value) => value,
    Err(payload) => std::panic::resume_unwind(payload),
  }
}

impl ReportBuilder {
  pub fn new(repo: RepoId, window: DateWindow, tracker: Box<dyn TrackerApi>, ci: Box<dyn CiApi>) -> Self {
    ReportBuilder {
      repo,
      window,
      frontmatter: None,
      tracker,
      ci,
      model: OnceCell::new(),
    }
  }

  pub fn with_frontmatter(mut self, frontmatter: Option<BTreeMap<String, String>>) -> Self {
    self.frontmatter = frontmatter;
    self
  }

  /// The report, computed on first call and memoized. Repeated reads hand
  /// back the same model without touching any client again.
  pub fn model(&self) -> Result<&ReportModel> {
    self.model.get_or_try_init(|| self.build())
  }

  fn build(&self) -> Result<ReportModel> {
    // Phase 1: fetch the four sources concurrently; each is one
    // independent blocking round-trip.
    let repo = &self.repo;
    let window = &self.window;
    let tracker = &*self.tracker;
    let ci = &*self.ci;

    let (issues_raw, pulls_raw, contributions, builds) = thread::scope(|scope| {
      let issues = scope.spawn(move || sources::issues::fetch_raw(repo, tracker));
      let pulls = scope.spawn(move || sources::pulls::fetch_raw(repo, tracker));
      let contributions = scope.spawn(move || sources::contributions::fetch_summary(repo, window, tracker));
      let builds = scope.spawn(move || sources::builds::fetch_summary(repo, ci));
      (join(issues), join(pulls), join(contributions), join(builds))
    });

    // Fail fast, in a fixed order, so the surfaced error is deterministic.
    let issues_raw = issues_raw?;
    let pulls_raw = pulls_raw?;
    let contributions_summary = contributions?;
    let build_summary = builds?;

    // Phase 2: boundary-validate the record payloads before anything
    // downstream sees them.
    let repository = self.repo.to_string();
    let snapshot = snapshot::validate(&repository, issues_raw, pulls_raw, contributions_summary)?;

    // Phase 3: normalize and window; issues and pulls stay independent.
    let issues = stats::filter_by_window(sources::issues::normalize(snapshot.issues(), &self.repo)?, &self.window);
    let pulls = stats::filter_by_window(sources::pulls::normalize(snapshot.pulls(), &self.repo)?, &self.window);

    // Phase 4: statistics; ages are as of the window end.
    let as_of = self.window.end;
    let average_issue_age_days = stats::average_age(&issues, as_of)?;
    let average_pull_age_days = stats::average_age(&pulls, as_of)?;
    let oldest_issue = RecordPointer::of(stats::oldest(&issues)?);
    let newest_issue = RecordPointer::of(stats::newest(&issues)?);
    let oldest_pull = RecordPointer::of(stats::oldest(&pulls)?);
    let newest_pull = RecordPointer::of(stats::newest(&pulls)?);

    // Phase 5: assemble.
    Ok(ReportModel {
      title: format!("Health report for {}", self.repo),
      repository,
      window: self.window,
      as_of,
      contributions_summary: snapshot.summary().to_string(),
      issues_summary: summaries::tracker_summary("issue", &issues, &self.window, average_issue_age_days),
      pulls_summary: summaries::tracker_summary("pull request", &pulls, &self.window, average_pull_age_days),
      issues_per_label: stats::label_distribution(&issues),
      number_of_issues: issues.len(),
      number_of_pulls: pulls.len(),
      average_issue_age_days,
      average_pull_age_days,
      oldest_issue,
      newest_issue,
      oldest_pull,
      newest_pull,
      issues,
      pulls,
      build_summary,
      frontmatter: self.frontmatter.clone(),
    })
  }
}

/// Top-level entry: parse options, wire clients, build.
///
/// Default clients are constructed from process configuration only when the
/// caller injected none; the configuration check therefore fires before any
/// adapter is invoked.
pub fn generate(
  request: &ReportRequest,
  tracker: Option<Box<dyn TrackerApi>>,
  ci: Option<Box<dyn CiApi>>,
) -> Result<ReportModel> {
  // Guard 1: the repository id must be owner/name, before any fetch.
  let repo = RepoId::parse(&request.repository)?;

  // Guard 2: configuration is consulted only for missing clients.
  let (tracker, ci) = match (tracker, ci) {
    (Some(tracker), Some(ci)) => (tracker, ci),
    (tracker, ci) => {
      let config = Config::from_env()?.with_pagination(request.paginate);
      (
        tracker.unwrap_or_else(|| sources::build_tracker_api(&config)),
        ci.unwrap_or_else(|| sources::build_ci_api(&config)),
      )
    }
  };

  let builder = ReportBuilder::new(repo, request.window, tracker, ci)
    .with_frontmatter(request.frontmatter.clone());
  builder.model().map(|model| model.clone())
}
