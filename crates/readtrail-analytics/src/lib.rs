//! The readtrail analytics engine.
//!
//! Deterministic, synchronous queries over an immutable
//! [`EventTable`](readtrail_core::EventTable): who read a document, what a
//! visitor read, which documents the readers of one document also read
//! (ranked, or as a graph), who spent the most time reading, and a few
//! per-document histograms.
//!
//! The free functions in each module work on a borrowed table and typed ids.
//! [`Analytics`] wraps them behind string-id entry points bound to one table
//! [`Snapshot`].

pub mod affinity;
pub mod engagement;
pub mod engine;
pub mod error;
pub mod filter;
pub mod graph;
pub mod histogram;
pub mod rank;
pub mod readers;
pub mod session;

pub use engine::Analytics;
pub use error::{Error, Result};
pub use graph::AffinityGraph;
pub use histogram::{BrowserDetail, Histogram};
pub use rank::{SortPolicy, TOP_N};
pub use readers::{DocumentSet, ReaderSet};
pub use session::{Session, Snapshot, TableVersion};

#[cfg(test)]
mod tests;
