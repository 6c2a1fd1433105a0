use anyhow::Result;
use clap::Parser;

mod aggregate;
mod cli;
mod directory;
mod ingest;
mod model;
mod render;
mod scope;
mod service;
mod store;
#[cfg(test)]
mod testutil;
mod util;

use crate::cli::{normalize, Cli};
use crate::service::AnalyticsService;

fn main() -> Result<()> {
  let cli = Cli::parse();

  if cli.gen_man {
    let page = util::render_man_page::<Cli>()?;
    print!("{}", page);
    return Ok(());
  }

  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .with_writer(std::io::stderr)
    .init();

  // Phase 1: normalize CLI
  let cfg = normalize(cli)?;

  // Phase 2: resolve now and load the inputs
  let now_opt = util::parse_now_override(cfg.now_override.as_deref());
  let now = util::effective_now(now_opt).naive_local();
  let changes = ingest::load_changes(&cfg.data)?;
  let directory = directory::Directory::load(&cfg.teams)?;

  // Phase 3: build the service and emit the requested report
  let service = AnalyticsService::new(changes, cfg.filter.clone(), now, directory);
  let report = render::build_report(&cfg, &service)?;
  render::write_report(&cfg.out, &report)
}
