use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::scope::ScopeFilter;

#[derive(Copy, Clone, Eq, PartialEq, Debug, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum ReportKind {
  /// One document with every view (the dashboard document)
  Full,
  Projects,
  Contributors,
  Person,
  Series,
  BusiestDay,
  Summary,
}

#[derive(Parser, Debug)]
#[command(
    name = "gerrit-activity-report",
    version,
    about = "Derive activity reports from a Gerrit change export",
    long_about = None
)]
pub struct Cli {
  /// Path to the change export (JSON array of review events)
  #[arg(long)]
  pub data: Option<PathBuf>,

  /// Path to the team directory file
  #[arg(long)]
  pub teams: Option<PathBuf>,

  /// Day window ending today; 0 selects nothing
  #[arg(long, default_value_t = 365, allow_negative_numbers = true)]
  pub days: i64,

  /// Project allow-list, comma separated; a single entry may end in '*' for prefix matching
  #[arg(long, value_delimiter = ',')]
  pub projects: Vec<String>,

  /// Emit cumulative running totals in the series views
  #[arg(long)]
  pub summarize: bool,

  /// Which report document to emit
  #[arg(long, value_enum, default_value_t = ReportKind::Full)]
  pub report: ReportKind,

  /// Username the person report is about
  #[arg(long)]
  pub person: Option<String>,

  /// Team name scoping the series report (default: all contributors)
  #[arg(long)]
  pub team: Option<String>,

  /// Output file path (default stdout "-")
  #[arg(long, default_value = "-")]
  pub out: String,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,

  /// Override the "now" instant anchoring the day window (hidden; tests only)
  #[arg(long = "now-override", hide = true)]
  pub now_override: Option<String>,
}

#[derive(Debug)]
pub struct EffectiveConfig {
  pub data: PathBuf,
  pub teams: PathBuf,
  pub filter: ScopeFilter,
  pub report: ReportKind,
  pub person: Option<String>,
  pub team: Option<String>,
  pub out: String,
  pub now_override: Option<String>,
}

pub fn normalize(cli: Cli) -> Result<EffectiveConfig> {
  let Some(data) = cli.data else {
    bail!("--data is required");
  };
  let Some(teams) = cli.teams else {
    bail!("--teams is required");
  };

  // The filter constructor owns window validation (negative days etc.).
  let filter = ScopeFilter::new(cli.days, cli.projects, cli.summarize)?;

  if cli.report == ReportKind::Person && cli.person.is_none() {
    bail!("--report person requires --person");
  }
  if cli.team.is_some() && !matches!(cli.report, ReportKind::Series | ReportKind::Full) {
    bail!("--team only applies to the series report");
  }

  Ok(EffectiveConfig {
    data,
    teams,
    filter,
    report: cli.report,
    person: cli.person,
    team: cli.team,
    out: cli.out,
    now_override: cli.now_override,
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn base_cli() -> Cli {
    Cli {
      data: Some(PathBuf::from("changes.json")),
      teams: Some(PathBuf::from("teams.json")),
      days: 365,
      projects: vec!["gerald/*".into()],
      summarize: false,
      report: ReportKind::Full,
      person: None,
      team: None,
      out: "-".into(),
      gen_man: false,
      now_override: None,
    }
  }

  #[test]
  fn normalize_builds_the_filter() {
    let cfg = normalize(base_cli()).unwrap();
    assert_eq!(cfg.filter.number_of_days(), 365);
    assert_eq!(cfg.filter.projects().to_vec(), vec!["gerald/*".to_string()]);
  }

  #[test]
  fn missing_inputs_are_rejected() {
    let mut cli = base_cli();
    cli.data = None;
    assert!(normalize(cli).is_err());

    let mut cli = base_cli();
    cli.teams = None;
    assert!(normalize(cli).is_err());
  }

  #[test]
  fn negative_days_are_rejected_at_the_boundary() {
    let mut cli = base_cli();
    cli.days = -7;
    let err = normalize(cli).unwrap_err();
    assert!(format!("{err:#}").contains("negative"));
  }

  #[test]
  fn person_report_requires_a_person() {
    let mut cli = base_cli();
    cli.report = ReportKind::Person;
    assert!(normalize(cli).is_err());

    let mut cli = base_cli();
    cli.report = ReportKind::Person;
    cli.person = Some("alice".into());
    assert!(normalize(cli).is_ok());
  }

  #[test]
  fn team_flag_is_limited_to_series_reports() {
    let mut cli = base_cli();
    cli.report = ReportKind::Summary;
    cli.team = Some("core".into());
    assert!(normalize(cli).is_err());

    let mut cli = base_cli();
    cli.report = ReportKind::Series;
    cli.team = Some("core".into());
    assert!(normalize(cli).is_ok());
  }

  #[test]
  fn zero_days_is_a_valid_boundary() {
    let mut cli = base_cli();
    cli.days = 0;
    let cfg = normalize(cli).unwrap();
    assert_eq!(cfg.filter.number_of_days(), 0);
  }
}
