//! JSON-file persistence for catalyst events and their ratings.

pub mod store;

pub use store::{EventStore, ExportRecord};
