// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Normalize the raw change export into typed Change records with resolved reviewers
// role: ingestion/normalizer
// inputs: Path to a JSON array of raw change records
// outputs: Vec<Change> sorted descending by submitted (most-recent-first contract)
// invariants:
// - the reviewer is the "Code-Review" label's approved person, nothing else
// - one malformed timestamp rejects the whole ingestion (no silent skips)
// errors: surfaced eagerly with record index and changeId in context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::Path;

use anyhow::{Context, Result};

use crate::model::{Change, RawChange};
use crate::util;

/// Read and normalize a change export file.
pub fn load_changes(path: &Path) -> Result<Vec<Change>> {
  let text = std::fs::read_to_string(path).with_context(|| format!("reading change export {}", path.display()))?;
  let raw: Vec<RawChange> =
    serde_json::from_str(&text).with_context(|| format!("parsing change export {}", path.display()))?;
  normalize_changes(raw)
}

/// Normalize raw records and establish the most-recent-first ordering.
pub fn normalize_changes(raw: Vec<RawChange>) -> Result<Vec<Change>> {
  let mut changes = raw
    .into_iter()
    .enumerate()
    .map(|(index, record)| {
      let change_id = record.change_id.clone();
      normalize_change(record).with_context(|| format!("normalizing record #{index} (changeId {change_id})"))
    })
    .collect::<Result<Vec<Change>>>()?;

  changes.sort_by(|a, b| b.submitted.cmp(&a.submitted));
  tracing::info!(count = changes.len(), "normalized change export");

  Ok(changes)
}

fn normalize_change(record: RawChange) -> Result<Change> {
  let created = util::parse_event_timestamp(&record.created).context("created")?;
  let updated = util::parse_event_timestamp(&record.updated).context("updated")?;
  let submitted = util::parse_event_timestamp(&record.submitted).context("submitted")?;

  // The only reviewer scheme: the approving "Code-Review" vote. A missing
  // label or missing vote means the change is unreviewed.
  let code_review = record.labels.code_review.and_then(|label| label.approved);

  Ok(Change {
    owner: record.owner,
    submitter: record.submitter,
    code_review,
    project: record.project,
    branch: record.branch,
    change_id: record.change_id,
    status: record.status,
    created,
    updated,
    submitted,
    insertions: record.insertions,
    deletions: record.deletions,
    unresolved_comments: record.number_of_unresolved_comments,
    id: record.id,
  })
}
