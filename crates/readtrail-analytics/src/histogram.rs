//! Count-by-label views: countries and continents of a document's viewers,
//! browsers across the whole log.

use std::collections::HashMap;

use readtrail_core::{
  DocumentId, Error as CoreError, EventTable, browser::browser_family, continent::continent_of,
};

use crate::{Error, Result, filter};

/// `(label, count)` bins, highest count first, ties by label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Histogram {
  bins: Vec<(String, usize)>,
}

impl Histogram {
  fn from_counts(counts: HashMap<&str, usize>) -> Self {
    let mut bins: Vec<_> = counts
      .into_iter()
      .map(|(label, n)| (label.to_owned(), n))
      .collect();
    bins.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    Self { bins }
  }

  pub fn bins(&self) -> &[(String, usize)] { &self.bins }

  pub fn len(&self) -> usize { self.bins.len() }

  pub fn is_empty(&self) -> bool { self.bins.is_empty() }

  /// Sum over all bins.
  pub fn total(&self) -> usize { self.bins.iter().map(|(_, n)| n).sum() }

  pub fn get(&self, label: &str) -> Option<usize> {
    self.bins.iter().find(|(l, _)| l == label).map(|(_, n)| *n)
  }
}

/// How much of the user-agent string a browser histogram keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrowserDetail {
  /// The raw `visitor_useragent` string.
  Full,
  /// The browser family, e.g. `Chrome`.
  #[default]
  Family,
}

/// Viewer countries of every row about `doc`. Rows with no country are
/// left out.
pub fn countries_of(table: &EventTable, doc: &DocumentId) -> Result<Histogram> {
  let mut rows = filter::document_rows(table, doc).peekable();
  if rows.peek().is_none() {
    return Err(Error::DocumentNotFound(doc.clone()));
  }

  let mut counts = HashMap::new();
  for country in rows.filter_map(|e| e.visitor_country.as_deref()) {
    *counts.entry(country).or_insert(0) += 1;
  }
  Ok(Histogram::from_counts(counts))
}

/// Viewer continents of every row about `doc`. Countries missing from the
/// continent table are left out.
pub fn continents_of(table: &EventTable, doc: &DocumentId) -> Result<Histogram> {
  let countries = countries_of(table, doc)?;

  let mut counts = HashMap::new();
  let mut unmapped = Unmapped::default();
  for (country, n) in countries.bins() {
    match continent_of(country) {
      Ok(continent) => *counts.entry(continent.name()).or_insert(0) += *n,
      Err(e) => unmapped.add(&e, *n),
    }
  }
  if unmapped.total() > 0 {
    tracing::debug!(
      %doc,
      invalid = unmapped.invalid,
      unknown = unmapped.unknown,
      "rows with unmapped countries left out"
    );
  }
  Ok(Histogram::from_counts(counts))
}

/// Rows a continent view left out, by reason.
#[derive(Debug, Default, PartialEq, Eq)]
struct Unmapped {
  /// Codes that are not two ASCII letters.
  invalid: usize,
  /// Well-formed codes missing from the continent table.
  unknown: usize,
}

impl Unmapped {
  fn add(&mut self, error: &CoreError, rows: usize) {
    match error {
      CoreError::InvalidCountryCode(_) | CoreError::InvalidContinentCode(_) => {
        self.invalid += rows
      }
      CoreError::UnknownCountry(_) | CoreError::UnknownContinent(_) => self.unknown += rows,
    }
  }

  fn total(&self) -> usize { self.invalid + self.unknown }
}

/// Browsers over the whole table.
pub fn browsers(table: &EventTable, detail: BrowserDetail) -> Histogram {
  let mut counts = HashMap::new();
  for event in table {
    let label = match detail {
      BrowserDetail::Full if event.visitor_useragent.trim().is_empty() => "Unknown",
      BrowserDetail::Full => event.visitor_useragent.as_str(),
      BrowserDetail::Family => browser_family(&event.visitor_useragent),
    };
    *counts.entry(label).or_insert(0) += 1;
  }
  Histogram::from_counts(counts)
}
