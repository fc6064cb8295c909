//! Affinity counting: how many readers of one document also read each other
//! document.

use std::collections::HashMap;

use readtrail_core::{DocumentId, EventTable, VisitorId};

use crate::{Result, readers::{ReaderSet, documents_of_reader}};

/// Vote counts per document, in order of first vote.
///
/// Every present document has at least one vote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AffinityRecord {
  votes: Vec<(DocumentId, usize)>,
  index: HashMap<DocumentId, usize>,
}

impl AffinityRecord {
  pub fn len(&self) -> usize { self.votes.len() }

  pub fn is_empty(&self) -> bool { self.votes.is_empty() }

  /// Votes for `document`, if it received any.
  pub fn get(&self, document: &str) -> Option<usize> {
    self.index.get(document).map(|&i| self.votes[i].1)
  }

  /// Entries in first-vote order.
  pub fn iter(&self) -> impl Iterator<Item = (&DocumentId, usize)> {
    self.votes.iter().map(|(doc, n)| (doc, *n))
  }

  fn vote(&mut self, document: &DocumentId) {
    match self.index.get(document) {
      Some(&i) => self.votes[i].1 += 1,
      None => {
        self.index.insert(document.clone(), self.votes.len());
        self.votes.push((document.clone(), 1));
      }
    }
  }
}

/// Count, for every reader in `readers` except `exclude`, one vote per other
/// document they read.
///
/// The excluded visitor is skipped entirely. `doc` itself never receives a
/// vote. A reader with no qualifying reads of their own means the table and
/// the reader set disagree; that surfaces as
/// [`Error::InconsistentIndex`](crate::Error::InconsistentIndex).
pub fn count(
  table: &EventTable,
  readers: &ReaderSet,
  doc: &DocumentId,
  exclude: Option<&VisitorId>,
) -> Result<AffinityRecord> {
  let mut record = AffinityRecord::default();

  for reader in readers.iter().filter(|r| Some(*r) != exclude) {
    let documents = documents_of_reader(table, reader, doc)?;

    for other in documents.iter().filter(|d| *d != doc) {
      record.vote(other);
    }
  }

  Ok(record)
}
