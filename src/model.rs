// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Define the data model shared by ingestion, aggregation and rendering (raw change records, normalized changes, report rows)
// role: model/types
// outputs: Serializable structs with stable camelCase field names
// invariants: report rows are pure outputs, rebuilt on every query; Person identity is the username everywhere
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct Person {
  pub username: String,
  pub name: String,
  /// Present once the person has left their team; only presence is interpreted.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub end_date: Option<String>,
}

impl Person {
  pub fn is_active(&self) -> bool {
    self.end_date.is_none()
  }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Team {
  pub name: String,
  pub members: Vec<Person>,
}

/// One raw record of the change export, exactly as serialized on disk.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RawChange {
  pub owner: Person,
  pub submitter: Person,
  pub project: String,
  pub branch: String,
  pub change_id: String,
  pub status: String,
  pub created: String,
  pub updated: String,
  pub submitted: String,
  pub insertions: i64,
  pub deletions: i64,
  pub number_of_unresolved_comments: i64,
  pub id: i64,
  #[serde(default)]
  pub labels: Labels,
}

/// Only the "Code-Review" label is ever interpreted, so the label map is a
/// fixed struct rather than a string-keyed dictionary.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Labels {
  #[serde(rename = "Code-Review")]
  pub code_review: Option<CodeReviewLabel>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CodeReviewLabel {
  pub approved: Option<Person>,
}

/// A normalized change event with typed timestamps and the resolved
/// reviewer. Serializes most-recent-first alongside the reports when a
/// consumer wants the scoped list itself.
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Change {
  pub owner: Person,
  pub submitter: Person,
  /// The person who gave the approving "Code-Review" vote, if any.
  pub code_review: Option<Person>,
  pub project: String,
  pub branch: String,
  pub change_id: String,
  pub status: String,
  pub created: NaiveDateTime,
  pub updated: NaiveDateTime,
  pub submitted: NaiveDateTime,
  pub insertions: i64,
  pub deletions: i64,
  pub unresolved_comments: i64,
  pub id: i64,
}

impl Change {
  /// Reviewer credited for this change: the approving "Code-Review" voter,
  /// unless that voter is also the owner (self-reviews earn no credit).
  pub fn credited_reviewer(&self) -> Option<&Person> {
    self
      .code_review
      .as_ref()
      .filter(|reviewer| reviewer.username != self.owner.username)
  }
}

// --- Derived report rows ---

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEntry {
  pub project: String,
  pub commits: usize,
  pub contributors: usize,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContributorEntry {
  pub person: Person,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub team_name: Option<String>,
  pub commits: usize,
  pub reviews: usize,
}

impl ContributorEntry {
  pub fn contributions(&self) -> usize {
    self.commits + self.reviews
  }
}

/// One day bucket of a person's contribution calendar. `weekday` is the
/// Sunday-based 0-6 index the chart layer plots on its y axis.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DayContribution {
  pub date: String,
  pub weekday: u8,
  pub commits: usize,
  pub reviews: usize,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersonAnalytics {
  pub person: Person,
  pub contribution_data: Vec<DayContribution>,
  pub number_of_commits: usize,
  pub number_of_reviews: usize,
  pub number_of_contributions: usize,
  pub average_number_of_commits_per_team_member: usize,
  pub average_number_of_reviews_per_team_member: usize,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
  pub date: String,
  pub value: usize,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersonSeries {
  pub person: Person,
  pub points: Vec<SeriesPoint>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BusiestDay {
  pub date: String,
  pub count: usize,
}
