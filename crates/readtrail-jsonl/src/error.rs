//! Error types for the readtrail JSON-lines codec.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("line {line}: malformed JSON: {source}")]
  Json {
    line:   usize,
    #[source]
    source: serde_json::Error,
  },

  #[error("line {line}: missing required field `{field}`")]
  MissingField { line: usize, field: &'static str },

  #[error("line {line}: negative event_readtime {value}")]
  InvalidReadtime { line: usize, value: i64 },

  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),
}

impl Error {
  /// The 1-based line the error refers to, if any.
  pub fn line(&self) -> Option<usize> {
    match self {
      Self::Json { line, .. }
      | Self::MissingField { line, .. }
      | Self::InvalidReadtime { line, .. } => Some(*line),
      Self::Io(_) => None,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
