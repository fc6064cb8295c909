//! End-to-end checks of the `Analytics` entry points against small fixture
//! tables.

use readtrail_core::{DocumentId, Event, EventTable, VisitorId, event::EventType};

use crate::{
  Analytics, Error, Session, SortPolicy, TOP_N,
  affinity, engagement::EngagementRecord,
  graph::NodeRole,
  readers::readers_of,
};

/// R1 read {A, B}, R2 read {A, C}, R3 read {A}.
fn worked_example() -> Analytics {
  Analytics::from_table(EventTable::new(vec![
    Event::read("R1", "A"),
    Event::read("R1", "B"),
    Event::read("R2", "A"),
    Event::read("R2", "C"),
    Event::read("R3", "A"),
  ]))
}

/// A deterministic pseudo-random log: 40 visitors over 30 documents, with
/// read times and some non-read rows mixed in.
fn busy_table() -> EventTable {
  let mut state: u64 = 0x2545_f491_4f6c_dd1d;
  let mut next = move |bound: u64| {
    state ^= state << 13;
    state ^= state >> 7;
    state ^= state << 17;
    state % bound
  };

  let mut events = Vec::new();
  for v in 0..40 {
    let visitor = format!("visitor-{v:03}");
    events.push(Event::read(visitor.as_str(), "doc-000"));
    for _ in 0..(1 + next(12)) {
      let doc = format!("doc-{:03}", next(30));
      let event = Event::read(visitor.as_str(), doc).with_readtime(next(5_000));
      if next(7) == 0 {
        events.push(event.with_event_type(EventType::Other));
      } else {
        events.push(event);
      }
    }
  }
  EventTable::new(events)
}

fn ids(entries: &[(DocumentId, usize)]) -> Vec<&str> {
  entries.iter().map(|(id, _)| id.as_str()).collect()
}

// ─── Worked examples ─────────────────────────────────────────────────────────

#[test]
fn readers_of_worked_example() {
  let readers = worked_example().readers_of("A").unwrap();
  let ids: Vec<_> = readers.iter().map(VisitorId::as_str).collect();
  assert_eq!(ids, ["R1", "R2", "R3"]);
}

#[test]
fn top_documents_worked_example_uses_first_seen_tie_break() {
  let top = worked_example()
    .top_documents("A", None, SortPolicy::DescendingCount)
    .unwrap();
  assert_eq!(top, vec![(DocumentId::from("B"), 1), (DocumentId::from("C"), 1)]);
}

#[test]
fn documents_of_nobody_is_not_found() {
  let err = worked_example().documents_of("nobody").unwrap_err();
  assert!(matches!(err, Error::VisitorNotFound(v) if v.as_str() == "nobody"));
}

#[test]
fn top_readers_worked_example() {
  let analytics = Analytics::from_table(EventTable::new(vec![
    Event::read("X", "A").with_readtime(1000),
    Event::read("X", "B").with_readtime(2000),
  ]));
  assert_eq!(analytics.top_readers(), vec![(VisitorId::from("X"), 3.0)]);
}

// ─── Argument validation ─────────────────────────────────────────────────────

#[test]
fn empty_ids_are_rejected_before_scanning() {
  let analytics = worked_example();
  assert!(matches!(analytics.readers_of(""), Err(Error::InvalidArgument(_))));
  assert!(matches!(analytics.documents_of("  "), Err(Error::InvalidArgument(_))));
  assert!(matches!(
    analytics.top_documents("A", Some(""), SortPolicy::Alphabetical),
    Err(Error::InvalidArgument(_))
  ));
  assert!(matches!(analytics.also_likes_graph("", None), Err(Error::InvalidArgument(_))));
  assert!(matches!(analytics.countries_of(""), Err(Error::InvalidArgument(_))));
}

#[test]
fn unknown_document_is_not_found_everywhere() {
  let analytics = worked_example();
  for result in [
    analytics.readers_of("Z").map(|_| ()),
    analytics.top_documents("Z", None, SortPolicy::Alphabetical).map(|_| ()),
    analytics.also_likes_graph("Z", None).map(|_| ()),
    analytics.continents_of("Z").map(|_| ()),
  ] {
    assert!(matches!(result, Err(Error::DocumentNotFound(_))));
  }
}

// ─── Properties over a busier table ──────────────────────────────────────────

#[test]
fn readers_are_never_duplicated() {
  let analytics = Analytics::from_table(busy_table());
  for d in 0..30 {
    let Ok(readers) = analytics.readers_of(&format!("doc-{d:03}")) else {
      continue;
    };
    let mut ids: Vec<_> = readers.iter().collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), readers.len());
  }
}

#[test]
fn top_documents_is_bounded_and_excludes_the_query() {
  let analytics = Analytics::from_table(busy_table());
  for policy in [SortPolicy::Alphabetical, SortPolicy::DescendingCount] {
    let top = analytics.top_documents("doc-000", None, policy).unwrap();
    assert!(!top.is_empty());
    assert!(top.len() <= TOP_N);
    assert!(top.iter().all(|(d, _)| d.as_str() != "doc-000"));
  }
}

#[test]
fn policies_order_their_output() {
  let analytics = Analytics::from_table(busy_table());

  let alpha = analytics
    .top_documents("doc-000", None, SortPolicy::Alphabetical)
    .unwrap();
  assert!(alpha.windows(2).all(|w| w[0].0 <= w[1].0));

  let desc = analytics
    .top_documents("doc-000", None, SortPolicy::DescendingCount)
    .unwrap();
  assert!(desc.windows(2).all(|w| w[0].1 >= w[1].1));
}

#[test]
fn exclusion_matches_removal_from_the_reader_set() {
  let table = busy_table();
  let doc = DocumentId::from("doc-000");
  let me = VisitorId::from("visitor-007");
  let readers = readers_of(&table, &doc).unwrap();
  assert!(readers.contains(me.as_str()));

  let excluded = affinity::count(&table, &readers, &doc, Some(&me)).unwrap();
  let removed = affinity::count(&table, &readers.without(&me), &doc, None).unwrap();
  assert_eq!(excluded, removed);

  let analytics = Analytics::from_table(table);
  for policy in [SortPolicy::Alphabetical, SortPolicy::DescendingCount] {
    let with_exclusion = analytics
      .top_documents("doc-000", Some("visitor-007"), policy)
      .unwrap();
    assert_eq!(with_exclusion, crate::rank::rank(&removed, policy));
  }
}

#[test]
fn documents_read_only_by_the_excluded_visitor_get_no_votes() {
  let analytics = Analytics::from_table(EventTable::new(vec![
    Event::read("me", "A"),
    Event::read("me", "SECRET"),
    Event::read("other", "A"),
    Event::read("other", "B"),
  ]));
  let top = analytics
    .top_documents("A", Some("me"), SortPolicy::Alphabetical)
    .unwrap();
  assert_eq!(ids(&top), ["B"]);
}

#[test]
fn engagement_seconds_are_row_sums_over_one_thousand() {
  let table = busy_table();
  let record = EngagementRecord::from_table(&table);
  for (visitor, seconds) in record.iter() {
    let millis: u64 = table
      .iter()
      .filter(|e| e.visitor_id == *visitor)
      .map(|e| e.event_readtime)
      .sum();
    assert_eq!(seconds, millis as f64 / 1000.0);
  }

  let top = Analytics::from_table(table).top_readers();
  assert_eq!(top.len(), TOP_N);
  assert!(top.windows(2).all(|w| w[0].1 >= w[1].1));
}

#[test]
fn repeated_queries_are_identical() {
  let analytics = Analytics::from_table(busy_table());
  let first = analytics
    .top_documents("doc-000", Some("visitor-001"), SortPolicy::DescendingCount)
    .unwrap();
  let second = analytics
    .top_documents("doc-000", Some("visitor-001"), SortPolicy::DescendingCount)
    .unwrap();
  assert_eq!(first, second);
  assert_eq!(analytics.top_readers(), analytics.top_readers());
  assert_eq!(
    analytics.also_likes_graph("doc-000", None).unwrap().to_dot(),
    analytics.also_likes_graph("doc-000", None).unwrap().to_dot()
  );
}

// ─── Lookups ─────────────────────────────────────────────────────────────────

#[test]
fn continent_lookup_wraps_core_errors() {
  let analytics = worked_example();
  assert_eq!(analytics.continent_of(" af ").unwrap().name(), "Asia");
  assert!(matches!(
    analytics.continent_of("GBR"),
    Err(Error::Core(readtrail_core::Error::InvalidCountryCode(_)))
  ));
  assert!(matches!(
    analytics.continent_of("ZZ"),
    Err(Error::Core(readtrail_core::Error::UnknownCountry(_)))
  ));
}

#[test]
fn document_read_only_by_anonymous_rows_is_not_found() {
  let analytics = Analytics::from_table(EventTable::new(vec![
    Event::read("", "A"),
    Event::read("R1", "B"),
  ]));
  assert!(matches!(analytics.readers_of("A"), Err(Error::DocumentNotFound(_))));
  assert!(matches!(
    analytics.top_documents("A", None, SortPolicy::Alphabetical),
    Err(Error::DocumentNotFound(_))
  ));
}

// ─── Graph ───────────────────────────────────────────────────────────────────

#[test]
fn also_likes_graph_links_readers_to_their_documents() {
  let graph = worked_example().also_likes_graph("A", Some("R3")).unwrap();
  assert_eq!(graph.root().id(), "A");
  assert!(graph.has_edge((NodeRole::SelfRoot, "R3"), (NodeRole::Document, "A")));
  assert!(graph.has_edge((NodeRole::Reader, "R1"), (NodeRole::Document, "B")));
  assert!(graph.has_edge((NodeRole::Reader, "R2"), (NodeRole::Document, "C")));
  assert!(!graph.nodes().any(|n| n.role() == NodeRole::Reader && n.id() == "R3"));
}

// ─── Sessions ────────────────────────────────────────────────────────────────

#[test]
fn queries_finish_on_their_snapshot_after_a_swap() {
  let mut session = Session::new(EventTable::new(vec![Event::read("R1", "A")]));
  let analytics = Analytics::new(session.snapshot());

  session.replace(EventTable::default());

  // Still answers from the table it was created with…
  assert_eq!(analytics.readers_of("A").unwrap().len(), 1);
  // …but the caller can tell the answer is stale.
  assert!(matches!(
    analytics.snapshot().ensure_current(&session),
    Err(Error::StaleSnapshot { .. })
  ));
}
