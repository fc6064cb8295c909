//! The immutable, in-memory event table.

use crate::event::Event;

/// Every row loaded for one session. Rows are never mutated after load;
/// replacing the dataset means building a new table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventTable {
  events: Vec<Event>,
}

impl EventTable {
  pub fn new(events: Vec<Event>) -> Self { Self { events } }

  pub fn len(&self) -> usize { self.events.len() }

  pub fn is_empty(&self) -> bool { self.events.is_empty() }

  pub fn iter(&self) -> std::slice::Iter<'_, Event> { self.events.iter() }

  pub fn as_slice(&self) -> &[Event] { &self.events }
}

impl FromIterator<Event> for EventTable {
  fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> Self {
    Self::new(iter.into_iter().collect())
  }
}

impl<'a> IntoIterator for &'a EventTable {
  type Item = &'a Event;
  type IntoIter = std::slice::Iter<'a, Event>;

  fn into_iter(self) -> Self::IntoIter { self.events.iter() }
}
