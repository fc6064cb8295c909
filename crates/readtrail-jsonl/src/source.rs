//! Ready-made [`EventSource`] implementations backed by this codec.

use std::{
  fs::File,
  io::BufReader,
  path::{Path, PathBuf},
};

use readtrail_core::{EventSource, EventTable, LoadReport};

use crate::{Error, ParseMode, read_table};

/// A JSON-lines log on disk.
#[derive(Debug, Clone)]
pub struct JsonLinesFile {
  path: PathBuf,
  mode: ParseMode,
}

impl JsonLinesFile {
  pub fn new(path: impl Into<PathBuf>, mode: ParseMode) -> Self {
    Self { path: path.into(), mode }
  }

  pub fn path(&self) -> &Path { &self.path }
}

impl EventSource for JsonLinesFile {
  type Error = Error;

  fn load(&self) -> Result<(EventTable, LoadReport), Error> {
    let file = File::open(&self.path)?;
    read_table(BufReader::new(file), self.mode)
  }

  fn describe(&self) -> String { self.path.display().to_string() }
}

/// A JSON-lines log already held in memory, e.g. a downloaded body.
#[derive(Debug, Clone)]
pub struct JsonLinesText {
  origin: String,
  body:   String,
  mode:   ParseMode,
}

impl JsonLinesText {
  /// `origin` is only used by [`EventSource::describe`].
  pub fn new(origin: impl Into<String>, body: impl Into<String>, mode: ParseMode) -> Self {
    Self { origin: origin.into(), body: body.into(), mode }
  }
}

impl EventSource for JsonLinesText {
  type Error = Error;

  fn load(&self) -> Result<(EventTable, LoadReport), Error> {
    read_table(self.body.as_bytes(), self.mode)
  }

  fn describe(&self) -> String { self.origin.clone() }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn text_source_loads_its_body() {
    let source = JsonLinesText::new(
      "memory",
      "{\"visitor_uuid\":\"v1\",\"event_readtime\":10}\n",
      ParseMode::Strict,
    );
    let (table, report) = source.load().unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(report.lines, 1);
    assert_eq!(source.describe(), "memory");
  }

  #[test]
  fn missing_file_is_an_io_error() {
    let source = JsonLinesFile::new("/nonexistent/readtrail.json", ParseMode::Lenient);
    assert!(matches!(source.load(), Err(Error::Io(_))));
  }
}
