//! Ordering and truncation of affinity counts.

use std::{fmt, str::FromStr};

use readtrail_core::DocumentId;
use serde::{Deserialize, Serialize};

use crate::{Error, affinity::AffinityRecord};

/// Length of every "top" list.
pub const TOP_N: usize = 10;

/// How [`rank`] orders an [`AffinityRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortPolicy {
  /// Document id ascending.
  #[default]
  Alphabetical,
  /// Vote count descending; equal counts keep first-vote order.
  DescendingCount,
}

impl SortPolicy {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Alphabetical => "alphabetical",
      Self::DescendingCount => "descending-count",
    }
  }

  /// The other policy.
  pub fn toggled(self) -> Self {
    match self {
      Self::Alphabetical => Self::DescendingCount,
      Self::DescendingCount => Self::Alphabetical,
    }
  }
}

impl fmt::Display for SortPolicy {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for SortPolicy {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "alphabetical" | "alpha" => Ok(Self::Alphabetical),
      "descending-count" | "desc" => Ok(Self::DescendingCount),
      _ => Err(Error::InvalidArgument(
        "sort policy must be `alphabetical` or `descending-count`",
      )),
    }
  }
}

/// The first [`TOP_N`] entries of `record` under `policy`.
pub fn rank(record: &AffinityRecord, policy: SortPolicy) -> Vec<(DocumentId, usize)> {
  let mut entries: Vec<_> = record.iter().map(|(doc, n)| (doc.clone(), n)).collect();
  match policy {
    SortPolicy::Alphabetical => entries.sort_by(|a, b| a.0.cmp(&b.0)),
    // `sort_by` is stable, so ties stay in first-vote order.
    SortPolicy::DescendingCount => entries.sort_by(|a, b| b.1.cmp(&a.1)),
  }
  entries.truncate(TOP_N);
  entries
}

#[cfg(test)]
mod tests {
  use readtrail_core::{Event, EventTable};

  use super::*;
  use crate::{affinity::count, readers::readers_of};

  /// Readers of `Q` who each also read one of `docs`, one reader per entry.
  fn record_from(docs: &[&str]) -> AffinityRecord {
    let mut events = Vec::new();
    for (i, doc) in docs.iter().enumerate() {
      let reader = format!("reader-{i}");
      events.push(Event::read(reader.as_str(), "Q"));
      events.push(Event::read(reader.as_str(), *doc));
    }
    let table = EventTable::new(events);
    let q = DocumentId::from("Q");
    let readers = readers_of(&table, &q).unwrap();
    count(&table, &readers, &q, None).unwrap()
  }

  fn ids(ranked: &[(DocumentId, usize)]) -> Vec<&str> {
    ranked.iter().map(|(d, _)| d.as_str()).collect()
  }

  #[test]
  fn alphabetical_sorts_by_id() {
    let record = record_from(&["m", "c", "x", "c", "a"]);
    let ranked = rank(&record, SortPolicy::Alphabetical);
    assert_eq!(ids(&ranked), ["a", "c", "m", "x"]);
  }

  #[test]
  fn descending_count_keeps_first_seen_order_on_ties() {
    let record = record_from(&["m", "c", "x", "c", "a"]);
    let ranked = rank(&record, SortPolicy::DescendingCount);
    assert_eq!(ids(&ranked), ["c", "m", "x", "a"]);
    assert_eq!(ranked[0].1, 2);
  }

  #[test]
  fn truncates_to_top_n() {
    let docs: Vec<String> = (0..15).map(|i| format!("doc-{i:02}")).collect();
    let refs: Vec<&str> = docs.iter().map(String::as_str).collect();
    let record = record_from(&refs);
    for policy in [SortPolicy::Alphabetical, SortPolicy::DescendingCount] {
      assert_eq!(rank(&record, policy).len(), TOP_N);
    }
    assert_eq!(rank(&record, SortPolicy::Alphabetical).last().unwrap().0.as_str(), "doc-09");
  }

  #[test]
  fn ranking_leaves_the_record_untouched() {
    let record = record_from(&["b", "a"]);
    let before = record.clone();
    let _ = rank(&record, SortPolicy::DescendingCount);
    assert_eq!(record, before);
  }

  #[test]
  fn parses_policy_names() {
    assert_eq!("desc".parse::<SortPolicy>().unwrap(), SortPolicy::DescendingCount);
    assert_eq!(
      "alphabetical".parse::<SortPolicy>().unwrap(),
      SortPolicy::Alphabetical
    );
    assert!("sideways".parse::<SortPolicy>().is_err());
    assert_eq!(SortPolicy::Alphabetical.toggled(), SortPolicy::DescendingCount);
  }
}
