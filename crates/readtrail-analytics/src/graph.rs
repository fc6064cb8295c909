//! The "also likes" graph: who read a document, and what else they read.
//!
//! Built from scratch per query into a local `petgraph` graph and returned as
//! an immutable value. Nodes keep their full ids; the four-character short
//! ids are applied only when rendering, and any short-id collisions are
//! reported by [`AffinityGraph::label_collisions`] rather than merged.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use petgraph::{
  dot::{Config, Dot},
  graph::{DiGraph, NodeIndex},
  visit::EdgeRef,
};
use readtrail_core::{DocumentId, EventTable, VisitorId};

use crate::{
  Result,
  readers::{ReaderSet, documents_of_reader},
};

// ─── Nodes ───────────────────────────────────────────────────────────────────

/// What a node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeRole {
  Document,
  Reader,
  /// The visitor the query was made on behalf of.
  SelfRoot,
}

/// A graph node. Documents and visitors live in separate namespaces, so a
/// document and a visitor with the same id are two nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphNode {
  Document(DocumentId),
  Reader(VisitorId),
  SelfRoot(VisitorId),
}

impl GraphNode {
  pub fn role(&self) -> NodeRole {
    match self {
      Self::Document(_) => NodeRole::Document,
      Self::Reader(_) => NodeRole::Reader,
      Self::SelfRoot(_) => NodeRole::SelfRoot,
    }
  }

  /// Full id.
  pub fn id(&self) -> &str {
    match self {
      Self::Document(d) => d.as_str(),
      Self::Reader(v) | Self::SelfRoot(v) => v.as_str(),
    }
  }

  /// Short display label.
  pub fn label(&self) -> &str {
    match self {
      Self::Document(d) => d.short(),
      Self::Reader(v) | Self::SelfRoot(v) => v.short(),
    }
  }

  fn is_document(&self) -> bool { matches!(self, Self::Document(_)) }
}

/// Two or more distinct ids of the same kind that render with one label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelCollision {
  pub label: String,
  pub ids:   Vec<String>,
}

// ─── Graph ───────────────────────────────────────────────────────────────────

/// Result of [`build`]. Edges are unweighted and point from a visitor to a
/// document they read.
#[derive(Debug, Clone)]
pub struct AffinityGraph {
  graph: DiGraph<GraphNode, ()>,
  root:  NodeIndex,
}

impl AffinityGraph {
  /// The queried document.
  pub fn root(&self) -> &GraphNode { &self.graph[self.root] }

  pub fn node_count(&self) -> usize { self.graph.node_count() }

  pub fn edge_count(&self) -> usize { self.graph.edge_count() }

  /// Nodes in insertion order.
  pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> { self.graph.node_weights() }

  /// `(from, to)` pairs in insertion order.
  pub fn edges(&self) -> impl Iterator<Item = (&GraphNode, &GraphNode)> {
    self
      .graph
      .edge_references()
      .map(|e| (&self.graph[e.source()], &self.graph[e.target()]))
  }

  /// True if there is an edge between the nodes with these full ids and roles.
  pub fn has_edge(&self, from: (NodeRole, &str), to: (NodeRole, &str)) -> bool {
    self.edges().any(|(a, b)| {
      (a.role(), a.id()) == from && (b.role(), b.id()) == to
    })
  }

  /// Short labels shared by distinct ids, documents and visitors checked
  /// separately.
  pub fn label_collisions(&self) -> Vec<LabelCollision> {
    let mut by_label: BTreeMap<(bool, &str), BTreeSet<&str>> = BTreeMap::new();
    for node in self.nodes() {
      by_label
        .entry((node.is_document(), node.label()))
        .or_default()
        .insert(node.id());
    }
    by_label
      .into_iter()
      .filter(|(_, ids)| ids.len() > 1)
      .map(|((_, label), ids)| LabelCollision {
        label: label.to_owned(),
        ids:   ids.into_iter().map(str::to_owned).collect(),
      })
      .collect()
  }

  /// Graphviz DOT, nodes labelled with short ids and shaped by role.
  pub fn to_dot(&self) -> String {
    let dot = Dot::with_attr_getters(
      &self.graph,
      &[Config::NodeNoLabel, Config::EdgeNoLabel],
      &|_, _| String::new(),
      &|_, (_, node)| dot_node_attributes(node),
    );
    format!("{dot:?}")
  }

  /// The underlying `petgraph` graph, for callers with their own renderer.
  pub fn inner(&self) -> &DiGraph<GraphNode, ()> { &self.graph }
}

fn dot_node_attributes(node: &GraphNode) -> String {
  let style = match node.role() {
    NodeRole::Document => "shape = ellipse",
    NodeRole::Reader => "shape = box",
    NodeRole::SelfRoot => "shape = box, style = filled, fillcolor = green",
  };
  let label = node.label().replace('\\', "\\\\").replace('"', "\\\"");
  format!("label = \"{label}\", {style} ")
}

// ─── Builder ─────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Builder {
  graph:     DiGraph<GraphNode, ()>,
  documents: HashMap<DocumentId, NodeIndex>,
  visitors:  HashMap<VisitorId, NodeIndex>,
}

impl Builder {
  fn document(&mut self, id: &DocumentId) -> NodeIndex {
    if let Some(&idx) = self.documents.get(id) {
      return idx;
    }
    let idx = self.graph.add_node(GraphNode::Document(id.clone()));
    self.documents.insert(id.clone(), idx);
    idx
  }

  fn visitor(&mut self, node: GraphNode, id: &VisitorId) -> NodeIndex {
    if let Some(&idx) = self.visitors.get(id) {
      return idx;
    }
    let idx = self.graph.add_node(node);
    self.visitors.insert(id.clone(), idx);
    idx
  }
}

/// Build the graph around `doc` from its `readers`.
///
/// With `exclude`, that visitor becomes a self-root node pointing at `doc`
/// and is not treated as a reader. Every other reader points at every
/// document they read, `doc` included.
pub fn build(
  table: &EventTable,
  doc: &DocumentId,
  readers: &ReaderSet,
  exclude: Option<&VisitorId>,
) -> Result<AffinityGraph> {
  let mut b = Builder::default();
  let root = b.document(doc);

  if let Some(me) = exclude {
    let node = b.visitor(GraphNode::SelfRoot(me.clone()), me);
    b.graph.add_edge(node, root, ());
  }

  for reader in readers.iter().filter(|r| Some(*r) != exclude) {
    let documents = documents_of_reader(table, reader, doc)?;

    let from = b.visitor(GraphNode::Reader(reader.clone()), reader);
    for read in &documents {
      let to = b.document(read);
      b.graph.add_edge(from, to, ());
    }
  }

  Ok(AffinityGraph { graph: b.graph, root })
}

#[cfg(test)]
mod tests {
  use readtrail_core::{Event, event::VisitorContext};

  use super::*;
  use crate::{Error, readers::readers_of};

  fn table() -> EventTable {
    EventTable::new(vec![
      Event::read("visitor-r1", "doc-A"),
      Event::read("visitor-r1", "doc-B"),
      Event::read("visitor-r2", "doc-A"),
      Event::read("visitor-r2", "doc-C"),
      Event::read("visitor-me", "doc-A"),
      Event::read("visitor-me", "doc-Z"),
    ])
  }

  fn graph(exclude: Option<&str>) -> AffinityGraph {
    let table = table();
    let doc = DocumentId::from("doc-A");
    let readers = readers_of(&table, &doc).unwrap();
    let exclude = exclude.map(VisitorId::from);
    build(&table, &doc, &readers, exclude.as_ref()).unwrap()
  }

  #[test]
  fn readers_point_at_everything_they_read() {
    let g = graph(None);
    assert_eq!(g.root().id(), "doc-A");
    // 3 readers + A, B, C, Z
    assert_eq!(g.node_count(), 7);
    assert_eq!(g.edge_count(), 6);
    assert!(g.has_edge((NodeRole::Reader, "visitor-r1"), (NodeRole::Document, "doc-B")));
    assert!(g.has_edge((NodeRole::Reader, "visitor-r2"), (NodeRole::Document, "doc-A")));
  }

  #[test]
  fn excluded_visitor_is_a_self_root_only() {
    let g = graph(Some("visitor-me"));
    assert!(g.has_edge((NodeRole::SelfRoot, "visitor-me"), (NodeRole::Document, "doc-A")));
    assert!(!g.nodes().any(|n| n.id() == "doc-Z"));
    assert!(!g.nodes().any(|n| n.role() == NodeRole::Reader && n.id() == "visitor-me"));
    assert_eq!(g.edge_count(), 5);
  }

  #[test]
  fn documents_and_visitors_use_separate_namespaces() {
    let table = EventTable::new(vec![
      Event::read("same", "doc"),
      Event::read("same", "same"),
    ]);
    let doc = DocumentId::from("doc");
    let readers = readers_of(&table, &doc).unwrap();
    let g = build(&table, &doc, &readers, None).unwrap();
    assert_eq!(g.node_count(), 3);
    assert!(g.has_edge((NodeRole::Reader, "same"), (NodeRole::Document, "same")));
  }

  #[test]
  fn reader_without_own_reads_is_an_inconsistency() {
    let table = EventTable::new(vec![
      Event::read("r1", "A"),
      Event::read("ghost", "A").with_context(VisitorContext::Other),
    ]);
    let doc = DocumentId::from("A");
    let readers = readers_of(&table, &doc).unwrap();
    let err = build(&table, &doc, &readers, None).unwrap_err();
    assert!(err.is_fatal());
    assert!(matches!(
      err,
      Error::InconsistentIndex { visitor, document }
        if visitor.as_str() == "ghost" && document.as_str() == "A"
    ));
  }

  #[test]
  fn short_label_collisions_are_reported() {
    let table = EventTable::new(vec![
      Event::read("r1", "111-abcd"),
      Event::read("r1", "222-abcd"),
    ]);
    let doc = DocumentId::from("111-abcd");
    let readers = readers_of(&table, &doc).unwrap();
    let g = build(&table, &doc, &readers, None).unwrap();
    assert_eq!(g.label_collisions(), vec![LabelCollision {
      label: "abcd".into(),
      ids:   vec!["111-abcd".into(), "222-abcd".into()],
    }]);
    assert!(graph(None).label_collisions().is_empty());
  }

  #[test]
  fn dot_output_uses_short_labels() {
    let dot = graph(Some("visitor-me")).to_dot();
    assert!(dot.starts_with("digraph {"));
    assert!(dot.contains("label = \"oc-A\""));
    assert!(dot.contains("fillcolor = green"));
    assert!(dot.contains("->"));
  }
}
