//! Plain-text rendering of task output for the one-shot command line.

use readtrail_analytics::Histogram;
use readtrail_core::{DocumentId, VisitorId};

use crate::task::Output;

/// Width of the longest bar in a text histogram.
const BAR_WIDTH: usize = 40;

/// Render `output` for stdout. Graphs render as Graphviz DOT.
pub fn render(title: &str, output: &Output) -> String {
  match output {
    Output::Histogram(h) => histogram(title, h),
    Output::TopReaders(top) => top_readers(title, top),
    Output::TopDocuments(top) => top_documents(title, top),
    Output::Graph(graph) => graph.to_dot(),
  }
}

pub fn histogram(title: &str, histogram: &Histogram) -> String {
  let mut out = format!("{title}\n");
  if histogram.is_empty() {
    out.push_str("  (no data)\n");
    return out;
  }

  let max = histogram.bins().first().map(|(_, n)| *n).unwrap_or(1).max(1);
  let label_width = histogram
    .bins()
    .iter()
    .map(|(label, _)| label.chars().count())
    .max()
    .unwrap_or(0);

  for (label, count) in histogram.bins() {
    let bar = "█".repeat((count * BAR_WIDTH).div_ceil(max));
    out.push_str(&format!("  {label:<label_width$}  {bar} {count}\n"));
  }
  out.push_str(&format!("  total {}\n", histogram.total()));
  out
}

pub fn top_readers(title: &str, top: &[(VisitorId, f64)]) -> String {
  let mut out = format!("{title}\n");
  if top.is_empty() {
    out.push_str("  (no readers)\n");
  }
  for (rank, (visitor, seconds)) in top.iter().enumerate() {
    out.push_str(&format!("  {:>2}. {visitor}  {seconds:.3} s\n", rank + 1));
  }
  out
}

/// Documents are printed with their short id first and the full id after it.
pub fn top_documents(title: &str, top: &[(DocumentId, usize)]) -> String {
  let mut out = format!("{title}\n");
  if top.is_empty() {
    out.push_str("  (no other documents)\n");
  }
  for (rank, (doc, count)) in top.iter().enumerate() {
    out.push_str(&format!("  {:>2}. {}  {count:>4}  {doc}\n", rank + 1, doc.short()));
  }
  out
}
