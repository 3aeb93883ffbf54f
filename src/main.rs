use anyhow::Result;
use clap::Parser;

use repo_health_report::cli::{normalize, Cli};
use repo_health_report::report::{generate, ReportRequest};
use repo_health_report::{output, util, window};

fn main() -> Result<()> {
  let cli = Cli::parse();

  if cli.gen_man {
    let page = util::render_man_page::<Cli>()?;
    print!("{}", page);
    return Ok(());
  }

  // Phase 1: normalize CLI
  let options = normalize(cli)?;

  // Phase 2: resolve the report window
  let now = window::parse_now_override(options.now_override.as_deref());
  let date_window = window::compute_window(&options.window, now)?;

  // Phase 3: fetch, validate, and assemble the report
  let request = ReportRequest {
    repository: options.repository,
    window: date_window,
    frontmatter: options.frontmatter,
    paginate: options.paginate,
  };
  let model = generate(&request, None, None)?;

  // Phase 4: emit
  output::write_json(&model, &options.out)
}
