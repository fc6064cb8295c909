//! Core types for the readtrail event-log analytics tool.
//!
//! This crate holds the event model, the immutable in-memory table and the
//! small lookup tables (continents, browser families) shared by the codec,
//! the analytics engine and the front ends. It has no I/O of its own.

pub mod browser;
pub mod continent;
pub mod error;
pub mod event;
pub mod id;
pub mod source;
pub mod table;

pub use error::{Error, Result};
pub use event::Event;
pub use id::{DocumentId, VisitorId};
pub use source::{EventSource, LoadReport};
pub use table::EventTable;
