//! Row selection for a single document or visitor.
//!
//! The filters never fail; an empty iterator is a valid answer and callers
//! decide whether it is an error.

use readtrail_core::{DocumentId, Event, EventTable, VisitorId, event::VisitorContext};

/// Read events on document `doc`.
pub fn document_reads<'a>(
  table: &'a EventTable,
  doc: &'a DocumentId,
) -> impl Iterator<Item = &'a Event> {
  document_rows(table, doc).filter(|e| e.is_document_read())
}

/// Read events on documents by `visitor` while in the reader.
pub fn visitor_reads<'a>(
  table: &'a EventTable,
  visitor: &'a VisitorId,
) -> impl Iterator<Item = &'a Event> {
  table.iter().filter(move |e| {
    e.visitor_id == *visitor
      && e.is_document_read()
      && e.visitor_context == VisitorContext::Reader
  })
}

/// Every row about `doc`, whatever the event type.
pub fn document_rows<'a>(
  table: &'a EventTable,
  doc: &'a DocumentId,
) -> impl Iterator<Item = &'a Event> {
  table
    .iter()
    .filter(move |e| e.subject_document_id.as_ref() == Some(doc))
}
