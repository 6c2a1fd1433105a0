use std::path::PathBuf;

use assert_cmd::Command;

/// The instant every CLI test anchors its day window to.
pub const FROZEN_NOW: &str = "2023-06-15T12:00:00";

#[allow(dead_code)]
pub fn fixture(name: &str) -> PathBuf {
  PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

/// A command preloaded with the standard fixtures and the frozen now.
#[allow(dead_code)]
pub fn base_cmd() -> Command {
  let mut cmd = Command::cargo_bin("gerrit-activity-report").unwrap();
  cmd
    .arg("--data")
    .arg(fixture("changes.json"))
    .arg("--teams")
    .arg(fixture("teams.json"))
    .arg("--now-override")
    .arg(FROZEN_NOW);
  cmd
}

/// Run the command and parse its stdout as JSON, asserting success.
#[allow(dead_code)]
pub fn run_json(cmd: &mut Command) -> serde_json::Value {
  let out = cmd.output().unwrap();
  assert!(
    out.status.success(),
    "command failed: {}",
    String::from_utf8_lossy(&out.stderr)
  );
  serde_json::from_slice(&out.stdout).unwrap()
}
