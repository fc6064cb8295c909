//! `Analytics`: the query entry points used by front ends.
//!
//! Every entry point takes plain string ids, rejects empty ones before
//! touching the table, and runs synchronously against one [`Snapshot`].
//! Nothing is cached: the same call on the same snapshot recomputes and
//! returns the same value.

use std::time::Instant;

use readtrail_core::{
  DocumentId, EventTable, VisitorId,
  continent::{self, Continent},
};

use crate::{
  Error, Result,
  affinity, engagement,
  graph::{self, AffinityGraph},
  histogram::{self, BrowserDetail, Histogram},
  rank::{self, SortPolicy},
  readers::{self, DocumentSet, ReaderSet},
  session::{Session, Snapshot},
};

/// Query facade over one table snapshot.
#[derive(Debug, Clone)]
pub struct Analytics {
  snapshot: Snapshot,
}

impl Analytics {
  pub fn new(snapshot: Snapshot) -> Self { Self { snapshot } }

  /// Convenience for one-off use: wraps `table` in a fresh session.
  pub fn from_table(table: EventTable) -> Self { Self::new(Session::new(table).snapshot()) }

  pub fn snapshot(&self) -> &Snapshot { &self.snapshot }

  fn table(&self) -> &EventTable { self.snapshot.table() }

  // ── Reader index ──────────────────────────────────────────────────────

  /// Distinct visitors who read `doc_id`.
  pub fn readers_of(&self, doc_id: &str) -> Result<ReaderSet> {
    let doc = document_arg(doc_id)?;
    let started = Instant::now();
    let readers = readers::readers_of(self.table(), &doc)?;
    tracing::debug!(%doc, readers = readers.len(), elapsed = ?started.elapsed(), "readers_of");
    Ok(readers)
  }

  /// Distinct documents `visitor_id` read.
  pub fn documents_of(&self, visitor_id: &str) -> Result<DocumentSet> {
    let visitor = visitor_arg(visitor_id)?;
    let started = Instant::now();
    let documents = readers::documents_of(self.table(), &visitor)?;
    tracing::debug!(%visitor, documents = documents.len(), elapsed = ?started.elapsed(), "documents_of");
    Ok(documents)
  }

  // ── Affinity ──────────────────────────────────────────────────────────

  /// Up to ten documents most read by the readers of `doc_id`, excluding
  /// `doc_id` itself and every read by `exclude_visitor`.
  pub fn top_documents(
    &self,
    doc_id: &str,
    exclude_visitor: Option<&str>,
    policy: SortPolicy,
  ) -> Result<Vec<(DocumentId, usize)>> {
    let doc = document_arg(doc_id)?;
    let exclude = exclude_visitor.map(visitor_arg).transpose()?;
    let started = Instant::now();

    let readers = readers::readers_of(self.table(), &doc)?;
    let record = affinity::count(self.table(), &readers, &doc, exclude.as_ref())?;
    let ranked = rank::rank(&record, policy);

    tracing::debug!(
      %doc,
      %policy,
      readers = readers.len(),
      candidates = record.len(),
      elapsed = ?started.elapsed(),
      "top_documents"
    );
    Ok(ranked)
  }

  /// The also-likes graph around `doc_id`.
  pub fn also_likes_graph(
    &self,
    doc_id: &str,
    exclude_visitor: Option<&str>,
  ) -> Result<AffinityGraph> {
    let doc = document_arg(doc_id)?;
    let exclude = exclude_visitor.map(visitor_arg).transpose()?;
    let started = Instant::now();

    let readers = readers::readers_of(self.table(), &doc)?;
    let graph = graph::build(self.table(), &doc, &readers, exclude.as_ref())?;

    tracing::debug!(
      %doc,
      nodes = graph.node_count(),
      edges = graph.edge_count(),
      elapsed = ?started.elapsed(),
      "also_likes_graph"
    );
    Ok(graph)
  }

  // ── Engagement ────────────────────────────────────────────────────────

  /// Up to ten visitors with the most total read time, in seconds.
  pub fn top_readers(&self) -> Vec<(VisitorId, f64)> {
    let started = Instant::now();
    let top = engagement::top_readers(self.table());
    tracing::debug!(rows = self.table().len(), elapsed = ?started.elapsed(), "top_readers");
    top
  }

  // ── Histograms ────────────────────────────────────────────────────────

  pub fn countries_of(&self, doc_id: &str) -> Result<Histogram> {
    let doc = document_arg(doc_id)?;
    histogram::countries_of(self.table(), &doc)
  }

  pub fn continents_of(&self, doc_id: &str) -> Result<Histogram> {
    let doc = document_arg(doc_id)?;
    histogram::continents_of(self.table(), &doc)
  }

  pub fn browsers(&self, detail: BrowserDetail) -> Histogram {
    histogram::browsers(self.table(), detail)
  }

  /// The continent a country code belongs to. Surrounding whitespace is
  /// ignored and lowercase codes are accepted.
  pub fn continent_of(&self, country: &str) -> Result<Continent> {
    Ok(continent::continent_of(&country.trim().to_ascii_uppercase())?)
  }
}

fn document_arg(id: &str) -> Result<DocumentId> {
  if id.trim().is_empty() {
    return Err(Error::InvalidArgument("document id must not be empty"));
  }
  Ok(DocumentId::from(id))
}

fn visitor_arg(id: &str) -> Result<VisitorId> {
  if id.trim().is_empty() {
    return Err(Error::InvalidArgument("visitor id must not be empty"));
  }
  Ok(VisitorId::from(id))
}
