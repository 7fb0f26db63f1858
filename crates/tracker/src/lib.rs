//! Catalyst event lifecycle.
//!
//! Constructs events (identity assignment, input normalization, optional
//! market-context snapshot), replays a ticker's history into an accuracy
//! signal, and applies one-way outcome resolution.

pub mod market;
pub mod tracker;

pub use market::classify_trend;
pub use tracker::{CatalystTracker, EventDraft};
