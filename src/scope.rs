use anyhow::{bail, Context, Result};
use chrono::{NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::model::Change;
use crate::util;

/// Trailing marker that turns a single-entry project list into a prefix match.
pub const PROJECT_WILDCARD: char = '*';

/// The scope every derived view is computed against: a day window ending
/// today, a project allow-list, and the cumulative-series toggle.
///
/// Immutable once built; updates replace the whole value through
/// `AnalyticsService::set_filter`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeFilter {
  number_of_days: u32,
  projects: Vec<String>,
  summarize_cumulative: bool,
}

impl ScopeFilter {
  /// Build a filter, rejecting impossible windows at the boundary.
  pub fn new(number_of_days: i64, projects: Vec<String>, summarize_cumulative: bool) -> Result<Self> {
    if number_of_days < 0 {
      bail!("--days must not be negative (got {number_of_days})");
    }
    let number_of_days =
      u32::try_from(number_of_days).with_context(|| format!("--days out of range (got {number_of_days})"))?;

    Ok(Self {
      number_of_days,
      projects,
      summarize_cumulative,
    })
  }

  pub fn number_of_days(&self) -> u32 {
    self.number_of_days
  }

  pub fn projects(&self) -> &[String] {
    &self.projects
  }

  pub fn summarize_cumulative(&self) -> bool {
    self.summarize_cumulative
  }

  /// Date test: submitted within the `number_of_days`-day window ending at
  /// `now`'s day, and not in the future. A zero-day window matches nothing.
  pub fn in_date_scope(&self, submitted: NaiveDateTime, now: NaiveDateTime) -> bool {
    let Some(start) = util::window_start(now.date(), self.number_of_days) else {
      return false;
    };
    submitted >= start.and_time(NaiveTime::MIN) && submitted <= now
  }

  /// Project test: a single trailing-wildcard entry matches by prefix,
  /// anything else requires exact membership. An empty list matches nothing.
  pub fn matches_project(&self, project: &str) -> bool {
    if self.projects.len() == 1 {
      if let Some(prefix) = self.projects[0].strip_suffix(PROJECT_WILDCARD) {
        return project.starts_with(prefix);
      }
    }
    self.projects.iter().any(|allowed| allowed == project)
  }

  pub fn is_in_scope(&self, change: &Change, now: NaiveDateTime) -> bool {
    self.matches_project(&change.project) && self.in_date_scope(change.submitted, now)
  }
}
