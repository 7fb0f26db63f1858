//! Shared domain types, errors, and configuration for the catalyst rater.

pub mod config;
pub mod config_loader;
pub mod error;
pub mod event;
pub mod rating;
pub mod traits;

pub use config::{AppConfig, DataConfig, ScoringConfig};
pub use config_loader::ConfigLoader;
pub use error::{RaterError, Result};
pub use event::{
    Event, EventCategory, EventOutcome, EventType, MarketSnapshot, OutcomeRecord, SentimentTag,
    TrendLabel,
};
pub use rating::{DimensionWeights, Grade, Rating, ScoreBreakdown, Strategy};
pub use traits::MarketDataProvider;
