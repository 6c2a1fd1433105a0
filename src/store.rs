// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Hold the normalized change list and the scoped subsets every view reads from
// role: state/store
// inputs: normalized Vec<Change> (static per process), ScopeFilter + now on rebuild
// outputs: all / date_scoped / filtered slices
// invariants:
// - rebuild replaces both scoped lists wholesale; no incremental diffing
// - date_scoped ignores the project allow-list (the project report reads it)
// - filtered is always a subset of date_scoped
// errors: none; rebuild is total over well-formed changes
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use chrono::NaiveDateTime;

use crate::model::Change;
use crate::scope::ScopeFilter;

/// The store behind every derived view. `all` is read-only after ingestion;
/// the scoped lists are rebuilt from it on every filter change.
#[derive(Debug)]
pub struct ChangeStore {
  all: Vec<Change>,
  date_scoped: Vec<Change>,
  filtered: Vec<Change>,
}

impl ChangeStore {
  /// Wrap a normalized change list. The scoped lists start empty; callers
  /// rebuild with the initial filter before the first query.
  pub fn new(all: Vec<Change>) -> Self {
    Self {
      all,
      date_scoped: Vec::new(),
      filtered: Vec::new(),
    }
  }

  /// Rebuild both scoped lists from the full list. O(changes), deterministic,
  /// no effect other than replacing the stored lists.
  pub fn rebuild(&mut self, filter: &ScopeFilter, now: NaiveDateTime) {
    self.date_scoped = self
      .all
      .iter()
      .filter(|change| filter.in_date_scope(change.submitted, now))
      .cloned()
      .collect();

    self.filtered = self
      .all
      .iter()
      .filter(|change| filter.is_in_scope(change, now))
      .cloned()
      .collect();

    tracing::debug!(
      total = self.all.len(),
      date_scoped = self.date_scoped.len(),
      filtered = self.filtered.len(),
      "rebuilt change store"
    );
  }

  pub fn all(&self) -> &[Change] {
    &self.all
  }

  /// Date-window-scoped changes regardless of project; the project report
  /// reads this so a project stays visible in its own report even while
  /// filtered out of the person and team views.
  pub fn date_scoped(&self) -> &[Change] {
    &self.date_scoped
  }

  /// Changes passing the full scope filter (date window and project list).
  pub fn filtered(&self) -> &[Change] {
    &self.filtered
  }
}
