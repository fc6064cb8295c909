//! Line-level decoding: one JSON object → one [`Event`].

use readtrail_core::{
  DocumentId, Event, VisitorId,
  event::{EventType, SubjectType, VisitorContext},
};
use serde::Deserialize;

use crate::{Error, Result};

/// The subset of log columns we read. Every field is optional on the wire;
/// requiredness is checked in [`parse_line`] so errors can name the field.
#[derive(Deserialize)]
struct RawEvent {
  #[serde(default, alias = "visitor_id")]
  visitor_uuid:      Option<String>,
  #[serde(default, alias = "subject_document_id")]
  subject_doc_id:    Option<String>,
  #[serde(default)]
  subject_type:      Option<SubjectType>,
  #[serde(default)]
  event_type:        Option<EventType>,
  #[serde(default, alias = "visitor_context")]
  env_type:          Option<VisitorContext>,
  #[serde(default)]
  event_readtime:    Option<i64>,
  #[serde(default)]
  visitor_country:   Option<String>,
  #[serde(default)]
  visitor_useragent: Option<String>,
}

/// Decode `text` (the content of 1-based line `line`).
///
/// Returns `Ok(None)` for a blank line.
pub fn parse_line(line: usize, text: &str) -> Result<Option<Event>> {
  let text = text.trim();
  if text.is_empty() {
    return Ok(None);
  }

  let raw: RawEvent =
    serde_json::from_str(text).map_err(|source| Error::Json { line, source })?;

  let visitor_id = non_empty(raw.visitor_uuid)
    .map(VisitorId::new)
    .ok_or(Error::MissingField { line, field: "visitor_uuid" })?;

  let event_readtime = match raw.event_readtime {
    None => 0,
    Some(ms) if ms < 0 => return Err(Error::InvalidReadtime { line, value: ms }),
    Some(ms) => ms as u64,
  };

  Ok(Some(Event {
    subject_type: raw.subject_type.unwrap_or_default(),
    event_type: raw.event_type.unwrap_or_default(),
    visitor_context: raw.env_type.unwrap_or_default(),
    visitor_id,
    subject_document_id: non_empty(raw.subject_doc_id).map(DocumentId::new),
    event_readtime,
    visitor_country: non_empty(raw.visitor_country),
    visitor_useragent: raw.visitor_useragent.unwrap_or_default(),
  }))
}

fn non_empty(value: Option<String>) -> Option<String> {
  value.filter(|v| !v.trim().is_empty())
}
