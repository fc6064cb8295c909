//! Error type for `readtrail-analytics`.

use readtrail_core::{DocumentId, VisitorId};
use thiserror::Error;

use crate::session::TableVersion;

#[derive(Debug, Error)]
pub enum Error {
  /// An entry point was handed an empty id. Raised before any table scan.
  #[error("invalid argument: {0}")]
  InvalidArgument(&'static str),

  #[error("document not found: {0}")]
  DocumentNotFound(DocumentId),

  #[error("visitor not found: {0}")]
  VisitorNotFound(VisitorId),

  /// A reader of `document` has no qualifying read events of their own.
  /// The table and the reader index disagree; this is never retried.
  #[error("index inconsistency: reader {visitor} of {document} has no document reads")]
  InconsistentIndex {
    visitor:  VisitorId,
    document: DocumentId,
  },

  /// A lookup-table error from `readtrail-core`, e.g. a malformed country
  /// code.
  #[error(transparent)]
  Core(#[from] readtrail_core::Error),

  #[error("results were computed on table {snapshot}, but the session is now at {current}")]
  StaleSnapshot {
    snapshot: TableVersion,
    current:  TableVersion,
  },
}

impl Error {
  /// True for faults that indicate a bug or corrupt table rather than a bad
  /// query.
  pub fn is_fatal(&self) -> bool { matches!(self, Self::InconsistentIndex { .. }) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
