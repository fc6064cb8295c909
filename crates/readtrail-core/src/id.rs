//! Opaque identifiers for documents and visitors.
//!
//! Full ids are canonical: every lookup, equality check and map key uses the
//! complete string. The four-character *short id* exists for labels only and
//! may collide between distinct entities.

use std::{borrow::Borrow, fmt};

use serde::{Deserialize, Serialize};

/// Number of trailing characters kept by [`short_id`].
pub const SHORT_ID_LEN: usize = 4;

/// The last [`SHORT_ID_LEN`] characters of `id`, or all of it when shorter.
pub fn short_id(id: &str) -> &str {
  let start = id
    .char_indices()
    .rev()
    .nth(SHORT_ID_LEN - 1)
    .map_or(0, |(i, _)| i);
  &id[start..]
}

macro_rules! opaque_id {
  ($(#[$meta:meta])* $name:ident) => {
    $(#[$meta])*
    #[derive(
      Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    )]
    #[serde(transparent)]
    pub struct $name(String);

    impl $name {
      pub fn new(id: impl Into<String>) -> Self { Self(id.into()) }

      pub fn as_str(&self) -> &str { &self.0 }

      /// Display label; see [`short_id`].
      pub fn short(&self) -> &str { short_id(&self.0) }

      pub fn is_empty(&self) -> bool { self.0.is_empty() }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
      }
    }

    impl From<&str> for $name {
      fn from(id: &str) -> Self { Self(id.to_owned()) }
    }

    impl From<String> for $name {
      fn from(id: String) -> Self { Self(id) }
    }

    impl AsRef<str> for $name {
      fn as_ref(&self) -> &str { &self.0 }
    }

    impl Borrow<str> for $name {
      fn borrow(&self) -> &str { &self.0 }
    }
  };
}

opaque_id!(
  /// Identifies one document (`subject_doc_id` in the log).
  DocumentId
);

opaque_id!(
  /// Identifies one person across sessions (`visitor_uuid` in the log).
  VisitorId
);

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn short_id_keeps_last_four_characters() {
    assert_eq!(short_id("130705172251-3a2a725b2bbd5aa3f2af810acf0aeabb"), "eabb");
    assert_eq!(DocumentId::from("abcdef").short(), "cdef");
  }

  #[test]
  fn short_id_of_short_input_is_the_input() {
    assert_eq!(short_id("ab"), "ab");
    assert_eq!(short_id(""), "");
  }

  #[test]
  fn short_id_respects_char_boundaries() {
    assert_eq!(short_id("xxéèàü"), "éèàü");
  }

  #[test]
  fn distinct_ids_may_share_a_short_id() {
    let a = VisitorId::from("1111abcd");
    let b = VisitorId::from("2222abcd");
    assert_ne!(a, b);
    assert_eq!(a.short(), b.short());
  }
}
