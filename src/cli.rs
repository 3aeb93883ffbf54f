use clap::Parser;
use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::window::WindowSpec;

#[derive(Parser, Debug)]
#[command(
    name = "repo-health-report",
    version,
    about = "Generate a point-in-time repository health report as JSON",
    long_about = None
)]
pub struct Cli {
  /// Repository to report on, as owner/name (e.g. how-is/example-repository)
  pub repository: Option<String>,

  /// Calendar month to report on, e.g. 2025-08
  #[arg(long)]
  pub month: Option<String>,

  /// Natural language window, e.g. "last week" or "2 months ago"
  #[arg(long = "for")]
  pub for_str: Option<String>,

  /// Window start, YYYY-MM-DD; alone it runs up to today
  #[arg(long, alias = "start")]
  pub since: Option<String>,

  /// Window end, YYYY-MM-DD inclusive; requires --since
  #[arg(long, alias = "end")]
  pub until: Option<String>,

  /// Output location: a file path, or "-" for stdout
  #[arg(long, default_value = "-")]
  pub out: String,

  /// Extra front matter merged into the report, as a JSON object
  #[arg(long)]
  pub frontmatter: Option<String>,

  /// Fetch only the first page of tracker listings
  #[arg(long)]
  pub no_pagination: bool,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,

  /// Override the "now" instant for window resolution (hidden; tests only)
  #[arg(long = "now-override", hide = true)]
  pub now_override: Option<String>,
}

/// Flags resolved into one coherent request, before window resolution.
#[derive(Debug)]
pub struct Options {
  pub repository: String,
  pub window: WindowSpec,
  pub frontmatter: Option<BTreeMap<String, String>>,
  pub paginate: bool,
  pub out: String,
  pub now_override: Option<String>,
}

pub fn normalize(cli: Cli) -> Result<Options> {
  let repository = cli
    .repository
    .ok_or_else(|| Error::options("a repository (owner/name) is required"))?;

  // Validate window selection: at most one scheme, default trailing month.
  let window = match (&cli.month, &cli.for_str, &cli.since, &cli.until) {
    (Some(ym), None, None, None) => WindowSpec::Month { ym: ym.clone() },
    (None, Some(p), None, None) => WindowSpec::ForPhrase { phrase: p.clone() },
    (None, None, Some(s), u) => WindowSpec::SinceUntil { since: s.clone(), until: u.clone() },
    (None, None, None, Some(_)) => return Err(Error::options("--until requires --since")),
    (None, None, None, None) => WindowSpec::TrailingMonth,
    _ => {
      return Err(Error::options(
        "ambiguous time selection: choose only one of --month | --for | --since/--until",
      ))
    }
  };

  let frontmatter = match &cli.frontmatter {
    Some(raw) => Some(parse_frontmatter(raw)?),
    None => None,
  };

  Ok(Options {
    repository,
    window,
    frontmatter,
    paginate: !cli.no_pagination,
    out: cli.out,
    now_override: cli.now_override,
  })
}

/// Parse `--frontmatter` into a string map. Non-string values keep their
/// JSON rendering, so `{"count": 3}` becomes the entry `count: "3"`.
fn parse_frontmatter(raw: &str) -> Result<BTreeMap<String, String>> {
  let value: serde_json::Value = serde_json::from_str(raw)
    .map_err(|e| Error::options(format!("--frontmatter is not valid JSON: {e}")))?;
  let object = value
    .as_object()
    .ok_or_else(|| Error::options("--frontmatter must be a JSON object"))?;

  let mut map = BTreeMap::new();
  for (key, value) in object {
    let text = match value {
      serde_json::Value::String(s) => s.clone(),
      other => other.to_string(),
    };
    map.insert(key.clone(), text);
  }
  Ok(map)
}
