mod common;

use common::{base_cmd, run_json};

#[test]
fn wildcard_prefix_selects_matching_projects() {
  let doc = run_json(base_cmd().args(["--days", "365", "--projects", "gerald/*", "--report", "summary"]));
  assert_eq!(doc["commitCount"], 5);
}

#[test]
fn exact_project_selection_narrows_the_scope() {
  let doc = run_json(base_cmd().args(["--days", "365", "--projects", "gerald/core", "--report", "summary"]));
  assert_eq!(doc["commitCount"], 4);
}

#[test]
fn several_exact_projects_are_a_union() {
  let doc = run_json(base_cmd().args([
    "--days", "365", "--projects", "gerald/core,tools/ci", "--report", "summary",
  ]));
  assert_eq!(doc["commitCount"], 5);
}

#[test]
fn empty_allow_list_selects_nothing() {
  let doc = run_json(base_cmd().args(["--days", "365", "--report", "summary"]));
  assert_eq!(doc["commitCount"], 0);
  assert_eq!(doc["contributorCount"], 0);
  assert!(doc["busiestDay"].is_null());
}

#[test]
fn day_window_excludes_older_changes() {
  // 2023-06-13 through 2023-06-15: only bob's change on the 14th remains.
  let doc = run_json(base_cmd().args(["--days", "3", "--projects", "gerald/*", "--report", "summary"]));
  assert_eq!(doc["commitCount"], 1);
  assert_eq!(doc["busiestDay"]["date"], "2023-06-14");
}

#[test]
fn zero_day_window_yields_empty_reports_everywhere() {
  let doc = run_json(base_cmd().args(["--days", "0", "--projects", "gerald/*", "--person", "alice"]));
  assert_eq!(doc["summary"]["commitCount"], 0);
  assert_eq!(doc["summary"]["contributorCount"], 0);
  assert!(doc["summary"]["busiestDay"].is_null());
  assert!(doc["projects"].as_array().unwrap().is_empty());
  assert!(doc["contributors"].as_array().unwrap().is_empty());
  assert!(doc["series"].as_array().unwrap().is_empty());
  assert_eq!(doc["person"]["numberOfContributions"], 0);
  assert!(doc["person"]["contributionData"].as_array().unwrap().is_empty());
}

#[test]
fn project_report_sum_matches_the_date_scope() {
  // With a wildcard-for-everything list the filtered count equals the
  // date-scoped count, so the project rows must add up to the summary.
  let doc = run_json(base_cmd().args(["--days", "365", "--projects", "*", "--person", "alice"]));
  let total: u64 = doc["projects"]
    .as_array()
    .unwrap()
    .iter()
    .map(|row| row["commits"].as_u64().unwrap())
    .sum();
  assert_eq!(total, doc["summary"]["commitCount"].as_u64().unwrap());

  let mut projects: Vec<&str> = doc["projects"]
    .as_array()
    .unwrap()
    .iter()
    .map(|row| row["project"].as_str().unwrap())
    .collect();
  projects.sort_unstable();
  projects.dedup();
  assert_eq!(projects.len(), doc["projects"].as_array().unwrap().len(), "each project appears once");
}

#[test]
fn out_of_scope_projects_still_appear_in_the_project_report() {
  let doc = run_json(base_cmd().args(["--days", "365", "--projects", "gerald/core", "--person", "alice"]));
  let projects: Vec<&str> = doc["projects"]
    .as_array()
    .unwrap()
    .iter()
    .map(|row| row["project"].as_str().unwrap())
    .collect();
  assert!(projects.contains(&"tools/ci"), "date-scoped report keeps filtered-out projects");
  assert!(projects.contains(&"gerald/ui"));

  // while the leaderboard follows the full filter
  let contributors = doc["contributors"].as_array().unwrap();
  assert!(contributors.iter().all(|row| row["person"]["username"] != "dave"));
}

#[test]
fn queries_are_stable_across_identical_runs() {
  let first = run_json(base_cmd().args(["--days", "365", "--projects", "gerald/*"]));
  let second = run_json(base_cmd().args(["--days", "365", "--projects", "gerald/*"]));
  assert_eq!(first, second);
}
