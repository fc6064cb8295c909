//! Reader index: who read a document, and what a visitor read.

use std::{collections::HashSet, hash::Hash};

use readtrail_core::{DocumentId, EventTable, VisitorId};

use crate::{Error, Result, filter};

// ─── Sets ────────────────────────────────────────────────────────────────────

/// Distinct items in first-seen order, empty ids removed.
fn distinct<T, I>(items: I) -> Vec<T>
where
  T: Eq + Hash + Clone + AsRef<str>,
  I: IntoIterator<Item = T>,
{
  let mut seen = HashSet::new();
  items
    .into_iter()
    .filter(|item| {
      let id: &str = (*item).as_ref();
      !id.is_empty() && seen.insert(item.clone())
    })
    .collect()
}

/// The distinct visitors who read a document, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReaderSet {
  readers: Vec<VisitorId>,
}

impl ReaderSet {
  pub fn len(&self) -> usize { self.readers.len() }

  pub fn is_empty(&self) -> bool { self.readers.is_empty() }

  pub fn iter(&self) -> std::slice::Iter<'_, VisitorId> { self.readers.iter() }

  pub fn contains(&self, visitor: &str) -> bool {
    self.readers.iter().any(|r| r.as_str() == visitor)
  }

  /// A copy of this set with `visitor` removed.
  pub fn without(&self, visitor: &VisitorId) -> Self {
    Self {
      readers: self.readers.iter().filter(|r| *r != visitor).cloned().collect(),
    }
  }
}

impl FromIterator<VisitorId> for ReaderSet {
  fn from_iter<I: IntoIterator<Item = VisitorId>>(iter: I) -> Self {
    Self { readers: distinct(iter) }
  }
}

impl<'a> IntoIterator for &'a ReaderSet {
  type Item = &'a VisitorId;
  type IntoIter = std::slice::Iter<'a, VisitorId>;

  fn into_iter(self) -> Self::IntoIter { self.readers.iter() }
}

/// The distinct documents a visitor read, in first-seen order.
///
/// Identity is the full id. Use [`DocumentSet::short_ids`] for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentSet {
  documents: Vec<DocumentId>,
}

impl DocumentSet {
  pub fn len(&self) -> usize { self.documents.len() }

  pub fn is_empty(&self) -> bool { self.documents.is_empty() }

  pub fn iter(&self) -> std::slice::Iter<'_, DocumentId> { self.documents.iter() }

  pub fn contains(&self, document: &str) -> bool {
    self.documents.iter().any(|d| d.as_str() == document)
  }

  /// Display labels, one per document. Two documents may share a label.
  pub fn short_ids(&self) -> Vec<&str> {
    self.documents.iter().map(DocumentId::short).collect()
  }
}

impl FromIterator<DocumentId> for DocumentSet {
  fn from_iter<I: IntoIterator<Item = DocumentId>>(iter: I) -> Self {
    Self { documents: distinct(iter) }
  }
}

impl<'a> IntoIterator for &'a DocumentSet {
  type Item = &'a DocumentId;
  type IntoIter = std::slice::Iter<'a, DocumentId>;

  fn into_iter(self) -> Self::IntoIter { self.documents.iter() }
}

// ─── Lookups ─────────────────────────────────────────────────────────────────

/// Visitors with a read event on `doc`.
///
/// Fails with [`Error::DocumentNotFound`] when the document has no read
/// events by a visitor with a non-empty id.
pub fn readers_of(table: &EventTable, doc: &DocumentId) -> Result<ReaderSet> {
  let readers: ReaderSet = filter::document_reads(table, doc)
    .map(|e| e.visitor_id.clone())
    .collect();
  if readers.is_empty() {
    return Err(Error::DocumentNotFound(doc.clone()));
  }
  Ok(readers)
}

/// Documents `visitor` read while in the reader.
///
/// Fails with [`Error::VisitorNotFound`] when the visitor has no qualifying
/// read events. Rows without a document id, or with an empty one, are
/// ignored, so a visitor whose reads all lack one gets an empty set.
pub fn documents_of(table: &EventTable, visitor: &VisitorId) -> Result<DocumentSet> {
  let mut rows = filter::visitor_reads(table, visitor).peekable();
  if rows.peek().is_none() {
    return Err(Error::VisitorNotFound(visitor.clone()));
  }
  Ok(rows.filter_map(|e| e.subject_document_id.clone()).collect())
}

/// [`documents_of`] for a visitor taken from the [`ReaderSet`] of `doc`.
///
/// Such a visitor must have reads of their own, so [`Error::VisitorNotFound`]
/// becomes the fatal [`Error::InconsistentIndex`].
pub(crate) fn documents_of_reader(
  table: &EventTable,
  reader: &VisitorId,
  doc: &DocumentId,
) -> Result<DocumentSet> {
  documents_of(table, reader).map_err(|e| match e {
    Error::VisitorNotFound(visitor) => Error::InconsistentIndex {
      visitor,
      document: doc.clone(),
    },
    other => other,
  })
}
