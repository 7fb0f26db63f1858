//! Score-event CLI command.

use anyhow::{bail, Result};
use catalyst_rater_core::AppConfig;
use catalyst_rater_data::EventStore;
use catalyst_rater_engine::{ScoreInputs, ScoringEngine};
use catalyst_rater_tracker::CatalystTracker;
use chrono::{NaiveDate, Utc};
use clap::Args;

/// Arguments for the score command.
#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    /// Event id to score
    pub event_id: String,

    /// Current IV Rank (0-100)
    #[arg(long)]
    pub iv_rank: Option<f64>,

    /// Rating as-of date (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub as_of: Option<NaiveDate>,
}

pub fn run(config: &AppConfig, args: &ScoreArgs) -> Result<()> {
    let store = EventStore::new(&config.data.dir)?;
    let events = store.load_events()?;
    let Some(event) = events.iter().find(|e| e.id == args.event_id) else {
        bail!("No event with id '{}'", args.event_id);
    };

    let prior_accuracy =
        CatalystTracker::historical_accuracy(&event.ticker, event.event_type, &events);
    let inputs = ScoreInputs {
        iv_rank: args.iv_rank,
        prior_accuracy: Some(prior_accuracy),
        weights: None,
        as_of: args.as_of.unwrap_or_else(|| Utc::now().date_naive()),
    };

    let engine = ScoringEngine::new(config.scoring.clone());
    let rating = engine.score(event, &inputs)?;
    store.upsert_rating(&rating)?;

    println!(
        "{} {} ({} days out)",
        rating.ticker, event.event_type, rating.days_to_event
    );
    println!(
        "  grade {}  composite {:.1}  confidence {:.0}%",
        rating.grade, rating.composite_score, rating.confidence_pct
    );
    println!(
        "  strategy {}  target delta {:.2}  max risk {:.1}% of portfolio",
        rating.strategy, rating.suggested_delta, rating.max_risk_pct
    );
    println!("  breakdown:");
    for (name, score) in rating.breakdown.named_scores() {
        println!("    {name:<20} {score:>5.1}");
    }
    Ok(())
}
