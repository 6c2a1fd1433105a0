use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::json;

use crate::cli::{EffectiveConfig, ReportKind};
use crate::model::{Person, PersonSeries, Team};
use crate::service::AnalyticsService;

/// Assemble the requested report document from the service's current state.
pub fn build_report(cfg: &EffectiveConfig, service: &AnalyticsService) -> Result<serde_json::Value> {
  match cfg.report {
    ReportKind::Projects => Ok(json!({ "projects": service.project_report() })),
    ReportKind::Contributors => Ok(json!({ "contributors": service.contributor_leaderboard() })),
    ReportKind::BusiestDay => Ok(json!({ "busiestDay": service.busiest_day() })),
    ReportKind::Summary => Ok(summary_document(service)),
    ReportKind::Series => Ok(json!({ "series": series_rows(cfg, service)? })),
    ReportKind::Person => {
      let username = cfg.person.as_deref().context("--person missing for person report")?;
      person_document(username, service)
    }
    ReportKind::Full => {
      let mut doc = json!({
        "filter": service.filter(),
        "summary": summary_document(service),
        "projects": service.project_report(),
        "contributors": service.contributor_leaderboard(),
        "teams": service.contributing_teams(),
        "series": series_rows(cfg, service)?,
      });
      if let Some(username) = cfg.person.as_deref() {
        doc["person"] = person_document(username, service)?;
      }
      Ok(doc)
    }
  }
}

fn summary_document(service: &AnalyticsService) -> serde_json::Value {
  json!({
    "commitCount": service.commit_count(),
    "contributorCount": service.contributor_count(),
    "busiestDay": service.busiest_day(),
  })
}

fn series_rows(cfg: &EffectiveConfig, service: &AnalyticsService) -> Result<Vec<PersonSeries>> {
  let cohort: Option<Team> = match cfg.team.as_deref() {
    Some(name) => Some(
      service
        .directory()
        .team_named(name)
        .with_context(|| format!("unknown team {name:?}"))?
        .clone(),
    ),
    None => None,
  };
  Ok(service.series(cohort.as_ref()))
}

fn person_document(username: &str, service: &AnalyticsService) -> Result<serde_json::Value> {
  let person = resolve_person(username, service);
  let Some(cohort) = service.directory().team_of(&person).cloned() else {
    bail!("no team found for {username:?}; team averages need a cohort");
  };
  let analytics = service.person_analytics(&person, &cohort)?;
  Ok(serde_json::to_value(analytics)?)
}

/// Best identity available for a username: the directory record, then any
/// contributor on the current leaderboard, then a bare identity. An unknown
/// username is not an error; its calendar is simply all zero.
fn resolve_person(username: &str, service: &AnalyticsService) -> Person {
  if let Some(member) = service
    .directory()
    .teams()
    .iter()
    .flat_map(|team| team.members.iter())
    .find(|member| member.username == username)
  {
    return member.clone();
  }
  if let Some(entry) = service
    .contributor_leaderboard()
    .into_iter()
    .find(|entry| entry.person.username == username)
  {
    return entry.person;
  }
  Person {
    username: username.to_string(),
    name: username.to_string(),
    end_date: None,
  }
}

/// Print to stdout or write to the `--out` path, pretty-printed.
pub fn write_report(out: &str, report: &serde_json::Value) -> Result<()> {
  let text = serde_json::to_string_pretty(report)?;
  if out == "-" {
    println!("{text}");
    return Ok(());
  }

  let path = Path::new(out);
  if let Some(parent) = path.parent() {
    if !parent.as_os_str().is_empty() {
      std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
  }
  std::fs::write(path, text + "\n").with_context(|| format!("writing report to {}", path.display()))?;
  tracing::info!(path = out, "wrote report");
  Ok(())
}
