//! The `EventSource` trait: the seam between ingestion and analysis.
//!
//! Implemented by the ingestion crates (e.g. `readtrail-jsonl`). The engine
//! and the front ends depend on this abstraction, never on a file format.

use crate::table::EventTable;

/// What a load did besides producing rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
  /// Non-blank input lines seen.
  pub lines:      usize,
  /// Lines rejected and left out of the table (lenient loads only).
  pub skipped:    usize,
  /// Description of the first rejected line, if any.
  pub first_skip: Option<String>,
}

/// Something that can produce a complete [`EventTable`].
///
/// A source is read once per session (or once per explicit reload); the
/// returned table is then treated as immutable.
pub trait EventSource {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Read every event and return them as a table.
  fn load(&self) -> Result<(EventTable, LoadReport), Self::Error>;

  /// Human-readable description used in logs and the status bar.
  fn describe(&self) -> String;
}
