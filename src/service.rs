// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Own the store, current filter and subscriber list; expose the query surface every consumer reads
// role: facade/notifier
// inputs: normalized changes, validated ScopeFilter, frozen now instant, team directory
// outputs: report rows per query; filter-changed notifications
// invariants:
// - set_filter rebuilds the store before any subscriber runs
// - subscribers are notified in registration order, once per update
// - queries are pure over the current store (idempotent between updates)
// errors: only person_analytics can fail (degenerate cohort)
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};

use crate::aggregate;
use crate::directory::Directory;
use crate::model::{BusiestDay, Change, ContributorEntry, Person, PersonAnalytics, PersonSeries, ProjectEntry, Team};
use crate::scope::ScopeFilter;
use crate::store::ChangeStore;
use crate::util;

pub type FilterSubscriber = Box<dyn FnMut(&ScopeFilter)>;

/// The aggregation facade. Holds the single authoritative filter value;
/// replacing it is the only operation that mutates state. "Now" is frozen at
/// construction so every view of one process run agrees on the day window.
pub struct AnalyticsService {
  store: ChangeStore,
  filter: ScopeFilter,
  now: NaiveDateTime,
  directory: Directory,
  subscribers: Vec<FilterSubscriber>,
}

impl AnalyticsService {
  pub fn new(changes: Vec<Change>, filter: ScopeFilter, now: NaiveDateTime, directory: Directory) -> Self {
    let mut store = ChangeStore::new(changes);
    store.rebuild(&filter, now);
    tracing::debug!(total = store.all().len(), "analytics service ready");
    Self {
      store,
      filter,
      now,
      directory,
      subscribers: Vec::new(),
    }
  }

  pub fn filter(&self) -> &ScopeFilter {
    &self.filter
  }

  pub fn directory(&self) -> &Directory {
    &self.directory
  }

  /// Register for filter-change notifications. Delivery is in registration
  /// order, after the store has been rebuilt; a subscriber re-querying at
  /// that point never sees a stale list.
  pub fn subscribe(&mut self, subscriber: impl FnMut(&ScopeFilter) + 'static) {
    self.subscribers.push(Box::new(subscriber));
  }

  /// Replace the filter wholesale and recompute. Partial updates are the
  /// caller's job: read `filter()`, build a new `ScopeFilter`, pass it here.
  pub fn set_filter(&mut self, filter: ScopeFilter) {
    self.filter = filter;
    self.store.rebuild(&self.filter, self.now);
    tracing::info!(
      days = self.filter.number_of_days(),
      projects = self.filter.projects().len(),
      "filter replaced, notifying subscribers"
    );
    for subscriber in &mut self.subscribers {
      subscriber(&self.filter);
    }
  }

  fn window(&self) -> Vec<NaiveDate> {
    util::day_window(self.now.date(), self.filter.number_of_days())
  }

  /// Per-project report over the date-only scope (deliberately ignores the
  /// project allow-list).
  pub fn project_report(&self) -> Vec<ProjectEntry> {
    aggregate::project_report(self.store.date_scoped())
  }

  /// Ranked contributors with their team names joined in from the directory.
  pub fn contributor_leaderboard(&self) -> Vec<ContributorEntry> {
    let mut rows = aggregate::contributor_leaderboard(self.store.filtered());
    for row in &mut rows {
      row.team_name = self.directory.team_of(&row.person).map(|team| team.name.clone());
    }
    rows
  }

  pub fn person_analytics(&self, person: &Person, cohort: &Team) -> Result<PersonAnalytics> {
    aggregate::person_analytics(self.store.filtered(), person, cohort, &self.window())
  }

  /// Daily (or cumulative, per the filter) commit series. Without a cohort,
  /// covers all current contributors in leaderboard order.
  pub fn series(&self, cohort: Option<&Team>) -> Vec<PersonSeries> {
    let persons: Vec<Person> = match cohort {
      Some(team) => team.members.clone(),
      None => self
        .contributor_leaderboard()
        .into_iter()
        .map(|entry| entry.person)
        .collect(),
    };
    aggregate::contribution_series(
      self.store.filtered(),
      &persons,
      &self.window(),
      self.filter.summarize_cumulative(),
    )
  }

  pub fn busiest_day(&self) -> Option<BusiestDay> {
    aggregate::busiest_day(self.store.filtered())
  }

  pub fn commit_count(&self) -> usize {
    self.store.filtered().len()
  }

  pub fn contributor_count(&self) -> usize {
    aggregate::contributor_leaderboard(self.store.filtered()).len()
  }

  /// All known teams, populated with only the members currently on the
  /// leaderboard.
  pub fn contributing_teams(&self) -> Vec<Team> {
    let usernames: Vec<String> = self
      .contributor_leaderboard()
      .into_iter()
      .map(|entry| entry.person.username)
      .collect();
    self.directory.teams_with(&usernames)
  }
}
