// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Time utilities (timestamp parsing, day windows, now overrides) and man page rendering
// role: utilities/helpers
// inputs: Raw timestamp strings; NaiveDate; optional now override; clap CommandFactory
// outputs: Parsed datetimes, dense day windows, formatted day keys, man page text
// invariants:
// - day_window returns exactly number_of_days consecutive dates ending at today, ascending
// - a zero-day window is empty, never an error
// - parse_event_timestamp accepts only the fixed export format
// errors: timestamp parse failures bubble with the offending value in context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveDateTime};
use clap::CommandFactory;

/// Fixed timestamp format of the change export ("YYYY-MM-DD HH:mm:ss.SSS").
pub const EVENT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Day-key format used for all date bucketing and report output.
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Parse a timestamp in the export's fixed format.
pub fn parse_event_timestamp(raw: &str) -> Result<NaiveDateTime> {
  NaiveDateTime::parse_from_str(raw, EVENT_TIMESTAMP_FORMAT)
    .with_context(|| format!("parsing timestamp {raw:?} (expected YYYY-MM-DD HH:mm:ss.SSS)"))
}

pub fn format_day(day: NaiveDate) -> String {
  day.format(DAY_FORMAT).to_string()
}

/// Sunday-based 0-6 weekday index, as plotted by the contribution calendar.
pub fn weekday_index(day: NaiveDate) -> u8 {
  day.weekday().num_days_from_sunday() as u8
}

/// First day of a window of `number_of_days` days ending at `today`.
/// A zero-day window has no first day.
pub fn window_start(today: NaiveDate, number_of_days: u32) -> Option<NaiveDate> {
  if number_of_days == 0 {
    return None;
  }
  Some(today - Duration::days(i64::from(number_of_days) - 1))
}

/// Dense ascending run of dates covering the window ending at `today`.
pub fn day_window(today: NaiveDate, number_of_days: u32) -> Vec<NaiveDate> {
  let Some(start) = window_start(today, number_of_days) else {
    return Vec::new();
  };
  let mut days = Vec::with_capacity(number_of_days as usize);
  let mut cursor = start;
  while cursor <= today {
    days.push(cursor);
    cursor += Duration::days(1);
  }
  days
}

/// Returns the effective "now" given an optional override.
///
/// When `override_now` is `Some`, that instant is returned; otherwise
/// the current local time is used. Centralizes our handling of test
/// determinism without sprinkling `Local::now()` throughout the code.
pub fn effective_now(override_now: Option<DateTime<Local>>) -> DateTime<Local> {
  override_now.unwrap_or_else(Local::now)
}

/// Parse a `--now-override` string into a local DateTime.
/// Accepts RFC3339 (e.g. 2023-06-15T12:00:00Z) or a naive local timestamp
/// formatted as `%Y-%m-%dT%H:%M:%S`.
pub fn parse_now_override(s: Option<&str>) -> Option<DateTime<Local>> {
  s.and_then(|raw| {
    chrono::DateTime::parse_from_rfc3339(raw)
      .ok()
      .map(|dt| dt.with_timezone(&Local))
      .or_else(|| {
        chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
          .ok()
          .and_then(|ndt| ndt.and_local_timezone(Local).single())
      })
  })
}

/// Render a section-1 man page for a clap `CommandFactory` implementor.
/// Returns the troff content as a UTF-8 string.
pub fn render_man_page<T: CommandFactory>() -> Result<String> {
  let cmd = T::command();
  let man = clap_mangen::Man::new(cmd);
  let mut buf: Vec<u8> = Vec::new();

  man.render(&mut buf)?;

  Ok(String::from_utf8_lossy(&buf).to_string())
}
