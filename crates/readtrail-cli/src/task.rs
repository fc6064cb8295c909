//! The numbered tasks, shared by the one-shot command line and the TUI.

use clap::ValueEnum;
use readtrail_analytics::{
  AffinityGraph, Analytics, BrowserDetail, Histogram, Result, SortPolicy,
};
use readtrail_core::{DocumentId, VisitorId};

// ─── Task ─────────────────────────────────────────────────────────────────────

/// One query the front ends can run. Names on the command line follow the
/// numbering of the original coursework tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Task {
  /// Viewer countries of a document.
  #[value(name = "2a")]
  Countries,
  /// Viewer continents of a document.
  #[value(name = "2b")]
  Continents,
  /// Full user-agent strings across the dataset.
  #[value(name = "3a")]
  Browsers,
  /// Browser families across the dataset.
  #[value(name = "3b")]
  BrowserFamilies,
  /// The ten visitors with the most read time.
  #[value(name = "4")]
  TopReaders,
  /// Documents also liked by the readers of a document.
  #[value(name = "5d")]
  AlsoLikes,
  /// The also-likes graph in Graphviz DOT.
  #[value(name = "6")]
  AlsoLikesGraph,
}

impl Task {
  /// TUI order; task `i` is bound to key `i + 1`.
  pub const ALL: [Task; 7] = [
    Task::Countries,
    Task::Continents,
    Task::Browsers,
    Task::BrowserFamilies,
    Task::TopReaders,
    Task::AlsoLikes,
    Task::AlsoLikesGraph,
  ];

  pub fn code(self) -> &'static str {
    match self {
      Self::Countries => "2a",
      Self::Continents => "2b",
      Self::Browsers => "3a",
      Self::BrowserFamilies => "3b",
      Self::TopReaders => "4",
      Self::AlsoLikes => "5d",
      Self::AlsoLikesGraph => "6",
    }
  }

  pub fn title(self) -> &'static str {
    match self {
      Self::Countries => "Views by country",
      Self::Continents => "Views by continent",
      Self::Browsers => "Views by browser (full)",
      Self::BrowserFamilies => "Views by browser",
      Self::TopReaders => "Top readers",
      Self::AlsoLikes => "Also likes",
      Self::AlsoLikesGraph => "Also-likes graph",
    }
  }

  /// Whether the task is about one document and needs a document id.
  pub fn needs_document(self) -> bool {
    matches!(
      self,
      Self::Countries | Self::Continents | Self::AlsoLikes | Self::AlsoLikesGraph
    )
  }

  /// The key that runs this task in the TUI.
  pub fn key(self) -> char {
    let index = Self::ALL.iter().position(|t| *t == self).unwrap_or_default();
    char::from(b'1' + index as u8)
  }

  pub fn from_key(c: char) -> Option<Self> {
    let index = c.to_digit(10)?.checked_sub(1)? as usize;
    Self::ALL.get(index).copied()
  }
}

// ─── Query and output ─────────────────────────────────────────────────────────

/// Inputs a task may read. Blank strings count as absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct Query<'a> {
  pub document: Option<&'a str>,
  pub visitor:  Option<&'a str>,
  pub sort:     SortPolicy,
}

impl Query<'_> {
  fn document(&self) -> &str { self.document.unwrap_or_default() }

  fn visitor(&self) -> Option<&str> { self.visitor.filter(|v| !v.trim().is_empty()) }
}

/// What a task produced.
#[derive(Debug, Clone)]
pub enum Output {
  Histogram(Histogram),
  TopReaders(Vec<(VisitorId, f64)>),
  TopDocuments(Vec<(DocumentId, usize)>),
  Graph(AffinityGraph),
}

/// Run `task` against `analytics`.
pub fn run(analytics: &Analytics, task: Task, query: &Query<'_>) -> Result<Output> {
  let output = match task {
    Task::Countries => Output::Histogram(analytics.countries_of(query.document())?),
    Task::Continents => Output::Histogram(analytics.continents_of(query.document())?),
    Task::Browsers => Output::Histogram(analytics.browsers(BrowserDetail::Full)),
    Task::BrowserFamilies => Output::Histogram(analytics.browsers(BrowserDetail::Family)),
    Task::TopReaders => Output::TopReaders(analytics.top_readers()),
    Task::AlsoLikes => Output::TopDocuments(analytics.top_documents(
      query.document(),
      query.visitor(),
      query.sort,
    )?),
    Task::AlsoLikesGraph => {
      Output::Graph(analytics.also_likes_graph(query.document(), query.visitor())?)
    }
  };
  Ok(output)
}
