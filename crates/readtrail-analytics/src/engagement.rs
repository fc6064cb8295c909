//! Reader engagement: total read time per visitor.

use std::collections::HashMap;

use readtrail_core::{EventTable, VisitorId};

use crate::rank::TOP_N;

/// Read times are logged in milliseconds and reported in seconds.
const MILLIS_PER_SECOND: f64 = 1000.0;

/// Total read time for every visitor in the table, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngagementRecord {
  totals: Vec<(VisitorId, u64)>,
  index:  HashMap<VisitorId, usize>,
}

impl EngagementRecord {
  /// Sum `event_readtime` per visitor over every row, whatever its type.
  /// Totals saturate at `u64::MAX` milliseconds.
  pub fn from_table(table: &EventTable) -> Self {
    let mut record = Self::default();
    for event in table {
      match record.index.get(&event.visitor_id) {
        Some(&i) => {
          let total = &mut record.totals[i].1;
          *total = total.saturating_add(event.event_readtime);
        }
        None => {
          record.index.insert(event.visitor_id.clone(), record.totals.len());
          record.totals.push((event.visitor_id.clone(), event.event_readtime));
        }
      }
    }
    record
  }

  pub fn len(&self) -> usize { self.totals.len() }

  pub fn is_empty(&self) -> bool { self.totals.is_empty() }

  /// Total seconds for `visitor`, if they appear in the table.
  pub fn seconds(&self, visitor: &str) -> Option<f64> {
    self.index.get(visitor).map(|&i| to_seconds(self.totals[i].1))
  }

  /// `(visitor, seconds)` in first-seen order.
  pub fn iter(&self) -> impl Iterator<Item = (&VisitorId, f64)> {
    self.totals.iter().map(|(v, ms)| (v, to_seconds(*ms)))
  }

  /// The [`TOP_N`] visitors by total read time, highest first. Equal totals
  /// keep first-seen order.
  pub fn top(&self) -> Vec<(VisitorId, f64)> {
    let mut ranked: Vec<&(VisitorId, u64)> = self.totals.iter().collect();
    // Sorting on integer milliseconds keeps ties exact.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
      .into_iter()
      .take(TOP_N)
      .map(|(v, ms)| (v.clone(), to_seconds(*ms)))
      .collect()
  }
}

fn to_seconds(millis: u64) -> f64 { millis as f64 / MILLIS_PER_SECOND }

/// The [`TOP_N`] most engaged visitors of `table`.
pub fn top_readers(table: &EventTable) -> Vec<(VisitorId, f64)> {
  EngagementRecord::from_table(table).top()
}

#[cfg(test)]
mod tests {
  use readtrail_core::{Event, event::EventType};

  use super::*;

  #[test]
  fn sums_every_row_and_converts_to_seconds() {
    let table = EventTable::new(vec![
      Event::read("X", "d1").with_readtime(1000),
      Event::read("X", "d2")
        .with_event_type(EventType::Other)
        .with_readtime(2000),
    ]);
    assert_eq!(top_readers(&table), vec![(VisitorId::from("X"), 3.0)]);
  }

  #[test]
  fn visitors_without_read_time_are_present_with_zero() {
    let table = EventTable::new(vec![Event::read("idle", "d1")]);
    let record = EngagementRecord::from_table(&table);
    assert_eq!(record.seconds("idle"), Some(0.0));
    assert_eq!(record.seconds("absent"), None);
  }

  #[test]
  fn ranks_descending_with_first_seen_ties() {
    let table = EventTable::new(vec![
      Event::read("a", "d").with_readtime(500),
      Event::read("b", "d").with_readtime(1500),
      Event::read("c", "d").with_readtime(500),
      Event::read("d", "d").with_readtime(250),
    ]);
    let top: Vec<_> = top_readers(&table)
      .into_iter()
      .map(|(v, s)| (v.to_string(), s))
      .collect();
    assert_eq!(
      top,
      [
        ("b".to_string(), 1.5),
        ("a".to_string(), 0.5),
        ("c".to_string(), 0.5),
        ("d".to_string(), 0.25),
      ]
    );
  }

  #[test]
  fn keeps_only_top_n() {
    let table: EventTable = (0..25u64)
      .map(|i| Event::read(format!("v{i}"), "d").with_readtime(i * 10))
      .collect();
    let top = top_readers(&table);
    assert_eq!(top.len(), TOP_N);
    assert_eq!(top[0].0.as_str(), "v24");
  }

  #[test]
  fn huge_read_times_saturate_instead_of_overflowing() {
    let huge = i64::MAX as u64;
    let table = EventTable::new(vec![
      Event::read("X", "d1").with_readtime(huge),
      Event::read("X", "d2").with_readtime(huge),
      Event::read("X", "d3").with_readtime(huge),
    ]);
    let record = EngagementRecord::from_table(&table);
    assert_eq!(record.seconds("X"), Some(u64::MAX as f64 / 1000.0));
    assert_eq!(top_readers(&table).len(), 1);
  }

  #[test]
  fn empty_table_has_no_readers() {
    assert!(top_readers(&EventTable::default()).is_empty());
  }
}
