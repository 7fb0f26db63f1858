//! Composite rating engine for catalyst events.
//!
//! Deterministic end to end: the same event and inputs always produce the
//! same rating. The only wall-clock dependence is the as-of date callers
//! inject for the days-to-event figure.

pub mod comparator;
pub mod scorer;

pub use comparator::{
    aggregate, compare, BenchmarkComparison, BenchmarkMoves, BenchmarkStats, GradeBucket,
};
pub use scorer::{ScoreInputs, ScoringEngine};
