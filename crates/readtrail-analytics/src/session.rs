//! Versioned table holder.
//!
//! A [`Session`] owns the current table. Queries never read the session
//! directly; they take a [`Snapshot`], which keeps its table alive after the
//! session moves on to a new one. Results can then be checked against the
//! session with [`Snapshot::ensure_current`] before they are shown.

use std::{fmt, sync::Arc};

use readtrail_core::EventTable;

use crate::{Error, Result};

/// Identifies one loaded table within a session. Strictly increasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TableVersion(u64);

impl TableVersion {
  pub fn get(self) -> u64 { self.0 }

  fn next(self) -> Self { Self(self.0 + 1) }
}

impl fmt::Display for TableVersion {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "v{}", self.0) }
}

/// The current table of an analysis session.
#[derive(Debug)]
pub struct Session {
  table:   Arc<EventTable>,
  version: TableVersion,
}

impl Session {
  pub fn new(table: EventTable) -> Self {
    Self { table: Arc::new(table), version: TableVersion(1) }
  }

  pub fn version(&self) -> TableVersion { self.version }

  pub fn table(&self) -> &EventTable { &self.table }

  /// Swap in a new table. Existing snapshots keep the old one.
  pub fn replace(&mut self, table: EventTable) -> TableVersion {
    self.table = Arc::new(table);
    self.version = self.version.next();
    tracing::debug!(version = %self.version, rows = self.table.len(), "table replaced");
    self.version
  }

  pub fn snapshot(&self) -> Snapshot {
    Snapshot { table: Arc::clone(&self.table), version: self.version }
  }
}

/// An immutable view of the table at one version.
#[derive(Debug, Clone)]
pub struct Snapshot {
  table:   Arc<EventTable>,
  version: TableVersion,
}

impl Snapshot {
  pub fn table(&self) -> &EventTable { &self.table }

  pub fn version(&self) -> TableVersion { self.version }

  /// Fails with [`Error::StaleSnapshot`] if `session` has replaced the table
  /// this snapshot was taken from.
  pub fn ensure_current(&self, session: &Session) -> Result<()> {
    if self.version == session.version() {
      Ok(())
    } else {
      Err(Error::StaleSnapshot { snapshot: self.version, current: session.version() })
    }
  }
}
