//! The event row: one line of the reading log.
//!
//! Only the columns the analytics need are modelled. Any other column in the
//! source is dropped at ingestion time.

use serde::{Deserialize, Serialize};

use crate::id::{DocumentId, VisitorId};

// ─── Discriminants ───────────────────────────────────────────────────────────

/// What the event is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectType {
  #[serde(rename = "doc", alias = "document")]
  Document,
  #[default]
  #[serde(other)]
  Other,
}

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
  Read,
  #[default]
  #[serde(other)]
  Other,
}

/// The environment the visitor was in (`env_type` in the log).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisitorContext {
  Reader,
  #[default]
  #[serde(other)]
  Other,
}

// ─── Event ───────────────────────────────────────────────────────────────────

/// An immutable log row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
  pub subject_type:        SubjectType,
  pub event_type:          EventType,
  pub visitor_context:     VisitorContext,
  pub visitor_id:          VisitorId,
  pub subject_document_id: Option<DocumentId>,
  /// Milliseconds.
  pub event_readtime:      u64,
  /// ISO-3166 alpha-2 code, when the log recorded one.
  pub visitor_country:     Option<String>,
  pub visitor_useragent:   String,
}

impl Event {
  /// A `read` event on a document. Used by tests and fixtures; ingestion
  /// builds rows field by field.
  pub fn read(visitor: impl Into<VisitorId>, document: impl Into<DocumentId>) -> Self {
    Self {
      subject_type:        SubjectType::Document,
      event_type:          EventType::Read,
      visitor_context:     VisitorContext::Reader,
      visitor_id:          visitor.into(),
      subject_document_id: Some(document.into()),
      event_readtime:      0,
      visitor_country:     None,
      visitor_useragent:   String::new(),
    }
  }

  /// True for read events on a document, whatever the visitor context.
  pub fn is_document_read(&self) -> bool {
    self.subject_type == SubjectType::Document && self.event_type == EventType::Read
  }

  pub fn with_readtime(mut self, millis: u64) -> Self {
    self.event_readtime = millis;
    self
  }

  pub fn with_country(mut self, country: impl Into<String>) -> Self {
    self.visitor_country = Some(country.into());
    self
  }

  pub fn with_useragent(mut self, useragent: impl Into<String>) -> Self {
    self.visitor_useragent = useragent.into();
    self
  }

  pub fn with_context(mut self, context: VisitorContext) -> Self {
    self.visitor_context = context;
    self
  }

  pub fn with_event_type(mut self, event_type: EventType) -> Self {
    self.event_type = event_type;
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn discriminants_deserialise_from_log_strings() {
    let subject: SubjectType = serde_json::from_str("\"doc\"").unwrap();
    assert_eq!(subject, SubjectType::Document);
    let subject: SubjectType = serde_json::from_str("\"website\"").unwrap();
    assert_eq!(subject, SubjectType::Other);

    let event: EventType = serde_json::from_str("\"read\"").unwrap();
    assert_eq!(event, EventType::Read);
    let event: EventType = serde_json::from_str("\"pagereadtime\"").unwrap();
    assert_eq!(event, EventType::Other);

    let ctx: VisitorContext = serde_json::from_str("\"reader\"").unwrap();
    assert_eq!(ctx, VisitorContext::Reader);
    let ctx: VisitorContext = serde_json::from_str("\"stream\"").unwrap();
    assert_eq!(ctx, VisitorContext::Other);
  }

  #[test]
  fn read_constructor_builds_a_document_read() {
    let event = Event::read("v1", "d1").with_readtime(1500);
    assert!(event.is_document_read());
    assert_eq!(event.event_readtime, 1500);
    assert_eq!(event.subject_document_id.as_ref().map(|d| d.as_str()), Some("d1"));
  }
}
