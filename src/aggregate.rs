// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Pure aggregation over scoped change slices: project report, leaderboard, person analytics, series, busiest day
// role: aggregation/engine
// inputs: &[Change] slices from the ChangeStore, day windows, cohorts
// outputs: report row vectors, recomputed from scratch per call
// invariants:
// - self-reviews never earn review credit at any counting site
// - day buckets are dense over the window, zero-filled, ascending
// - ranking sorts are stable; ties keep first-seen group order
// - busiest-day ties resolve to the earliest date
// errors: only DegenerateCohort (zero active members) in person_analytics
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::BTreeMap;

use anyhow::{bail, Result};
use chrono::NaiveDate;
use indexmap::{IndexMap, IndexSet};

use crate::model::{
  BusiestDay, Change, ContributorEntry, DayContribution, Person, PersonAnalytics, PersonSeries, ProjectEntry,
  SeriesPoint, Team,
};
use crate::util;

#[derive(Default)]
struct ProjectStats {
  commits: usize,
  contributors: IndexSet<String>,
}

/// Per-project commit and contributor counts over the date-scoped list,
/// ranked by commit count descending. The stable sort keeps first-seen
/// group order on ties.
pub fn project_report(date_scoped: &[Change]) -> Vec<ProjectEntry> {
  let mut groups: IndexMap<String, ProjectStats> = IndexMap::new();

  for change in date_scoped {
    let stats = groups.entry(change.project.clone()).or_default();
    stats.commits += 1;
    stats.contributors.insert(change.owner.username.clone());
    if let Some(reviewer) = change.credited_reviewer() {
      stats.contributors.insert(reviewer.username.clone());
    }
  }

  let mut rows: Vec<ProjectEntry> = groups
    .into_iter()
    .map(|(project, stats)| ProjectEntry {
      project,
      commits: stats.commits,
      contributors: stats.contributors.len(),
    })
    .collect();
  rows.sort_by(|a, b| b.commits.cmp(&a.commits));
  rows
}

/// Per-person commit and review tallies over the filtered list, ranked by
/// total contributions descending. Team names are joined in by the caller.
pub fn contributor_leaderboard(filtered: &[Change]) -> Vec<ContributorEntry> {
  let mut tallies: IndexMap<String, ContributorEntry> = IndexMap::new();

  let blank = |person: &Person| ContributorEntry {
    person: person.clone(),
    team_name: None,
    commits: 0,
    reviews: 0,
  };

  for change in filtered {
    tallies
      .entry(change.owner.username.clone())
      .or_insert_with(|| blank(&change.owner))
      .commits += 1;

    if let Some(reviewer) = change.credited_reviewer() {
      tallies
        .entry(reviewer.username.clone())
        .or_insert_with(|| blank(reviewer))
        .reviews += 1;
    }
  }

  let mut rows: Vec<ContributorEntry> = tallies.into_values().collect();
  rows.sort_by(|a, b| b.contributions().cmp(&a.contributions()));
  rows
}

fn is_member(team: &Team, username: &str) -> bool {
  team.members.iter().any(|member| member.username == username)
}

/// One person's dense daily contribution calendar plus totals and the
/// cohort's per-member averages.
///
/// A person absent from the filtered list yields an all-zero calendar, not
/// an error. A cohort without active members cannot be averaged over.
pub fn person_analytics(
  filtered: &[Change],
  person: &Person,
  cohort: &Team,
  window: &[NaiveDate],
) -> Result<PersonAnalytics> {
  let cohort_size = cohort.members.iter().filter(|member| member.is_active()).count();
  if cohort_size == 0 {
    bail!("team {:?} has no active members to average over", cohort.name);
  }

  let mut buckets: BTreeMap<NaiveDate, (usize, usize)> = window.iter().map(|day| (*day, (0, 0))).collect();
  let mut commits_from_team = 0usize;
  let mut reviews_from_team = 0usize;

  for change in filtered {
    let day = change.submitted.date();
    if change.owner.username == person.username {
      if let Some((commits, _)) = buckets.get_mut(&day) {
        *commits += 1;
      }
    } else if let Some(reviewer) = change.credited_reviewer() {
      if reviewer.username == person.username {
        if let Some((_, reviews)) = buckets.get_mut(&day) {
          *reviews += 1;
        }
      }
    }

    if is_member(cohort, &change.owner.username) {
      commits_from_team += 1;
    }
    if let Some(reviewer) = change.credited_reviewer() {
      if is_member(cohort, &reviewer.username) {
        reviews_from_team += 1;
      }
    }
  }

  let mut number_of_commits = 0;
  let mut number_of_reviews = 0;
  let contribution_data: Vec<DayContribution> = buckets
    .into_iter()
    .map(|(day, (commits, reviews))| {
      number_of_commits += commits;
      number_of_reviews += reviews;
      DayContribution {
        date: util::format_day(day),
        weekday: util::weekday_index(day),
        commits,
        reviews,
      }
    })
    .collect();

  Ok(PersonAnalytics {
    person: person.clone(),
    contribution_data,
    number_of_commits,
    number_of_reviews,
    number_of_contributions: number_of_commits + number_of_reviews,
    average_number_of_commits_per_team_member: commits_from_team / cohort_size,
    average_number_of_reviews_per_team_member: reviews_from_team / cohort_size,
  })
}

/// Daily commit-count series per person, keyed by ownership only (reviews
/// are excluded from this view). With `cumulative`, each series becomes its
/// running total in chronological order.
pub fn contribution_series(
  filtered: &[Change],
  persons: &[Person],
  window: &[NaiveDate],
  cumulative: bool,
) -> Vec<PersonSeries> {
  persons
    .iter()
    .map(|person| {
      let mut buckets: BTreeMap<NaiveDate, usize> = window.iter().map(|day| (*day, 0)).collect();
      for change in filtered {
        if change.owner.username == person.username {
          if let Some(count) = buckets.get_mut(&change.submitted.date()) {
            *count += 1;
          }
        }
      }

      let mut running = 0usize;
      let points = buckets
        .into_iter()
        .map(|(day, count)| {
          let value = if cumulative {
            running += count;
            running
          } else {
            count
          };
          SeriesPoint {
            date: util::format_day(day),
            value,
          }
        })
        .collect();

      PersonSeries {
        person: person.clone(),
        points,
      }
    })
    .collect()
}

/// The submission date carrying the most filtered changes. Ties resolve to
/// the earliest date: the ascending scan only replaces the current best on a
/// strictly greater count.
pub fn busiest_day(filtered: &[Change]) -> Option<BusiestDay> {
  let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
  for change in filtered {
    *counts.entry(change.submitted.date()).or_insert(0) += 1;
  }

  let mut best: Option<(NaiveDate, usize)> = None;
  for (day, count) in counts {
    if best.map_or(true, |(_, best_count)| count > best_count) {
      best = Some((day, count));
    }
  }

  best.map(|(day, count)| BusiestDay {
    date: util::format_day(day),
    count,
  })
}
