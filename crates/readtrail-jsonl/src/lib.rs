//! JSON-lines codec for readtrail.
//!
//! Converts a newline-delimited stream of Issuu-style log objects into a
//! [`readtrail_core::EventTable`]. Pure synchronous decoding; fetching the
//! bytes (file, URL) is the caller's concern, except for the two ready-made
//! [`EventSource`](readtrail_core::EventSource) implementations in
//! [`source`].
//!
//! # Quick start
//!
//! ```no_run
//! use readtrail_jsonl::{ParseMode, read_table};
//!
//! let log = "{\"visitor_uuid\":\"v1\",\"subject_doc_id\":\"d1\",\"event_type\":\"read\",\"subject_type\":\"doc\"}\n";
//! let (table, report) = read_table(log.as_bytes(), ParseMode::Strict).unwrap();
//! println!("{} rows from {} lines", table.len(), report.lines);
//! ```

pub mod error;
mod parse;
pub mod source;

use std::io::BufRead;

pub use error::{Error, Result};
pub use parse::parse_line;
use readtrail_core::{Event, EventTable, LoadReport};
pub use source::{JsonLinesFile, JsonLinesText};

// ─── Public types ────────────────────────────────────────────────────────────

/// What to do with a line that fails to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
  /// Abort the whole load on the first bad line.
  Strict,
  /// Leave the line out and count it in the [`LoadReport`].
  #[default]
  Lenient,
}

// ─── Public API ──────────────────────────────────────────────────────────────

/// Decode every line of `input` independently; a bad line yields `Err(…)` in
/// its position without aborting the rest. Blank lines produce nothing.
pub fn parse_many(input: &str) -> Vec<Result<Event>> {
  input
    .lines()
    .enumerate()
    .filter_map(|(i, text)| parse_line(i + 1, text).transpose())
    .collect()
}

/// Read a whole table from `reader`.
///
/// I/O errors always abort. Decode errors abort in [`ParseMode::Strict`] and
/// are tallied in the report in [`ParseMode::Lenient`].
pub fn read_table<R: BufRead>(
  reader: R,
  mode: ParseMode,
) -> Result<(EventTable, LoadReport)> {
  let mut events = Vec::new();
  let mut report = LoadReport::default();

  for (i, line) in reader.lines().enumerate() {
    let line = line?;
    if line.trim().is_empty() {
      continue;
    }
    report.lines += 1;

    match parse_line(i + 1, &line) {
      Ok(Some(event)) => events.push(event),
      Ok(None) => {}
      Err(e) if mode == ParseMode::Lenient => {
        report.skipped += 1;
        if report.first_skip.is_none() {
          report.first_skip = Some(e.to_string());
        }
      }
      Err(e) => return Err(e),
    }
  }

  Ok((EventTable::new(events), report))
}
