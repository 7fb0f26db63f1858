//! List-events CLI command.

use anyhow::Result;
use catalyst_rater_core::{AppConfig, Event, EventType, Grade, Rating};
use catalyst_rater_data::EventStore;
use catalyst_rater_tracker::CatalystTracker;
use chrono::Utc;
use clap::Args;

/// Arguments for the list command.
#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Only pending events dated today or later
    #[arg(long)]
    pub upcoming: bool,

    /// Filter by ticker
    #[arg(long)]
    pub ticker: Option<String>,

    /// Filter by event type
    #[arg(long = "type")]
    pub event_type: Option<EventType>,

    /// Only events rated at this letter grade (e.g., "A+", "B")
    #[arg(long)]
    pub grade: Option<Grade>,
}

pub fn run(config: &AppConfig, args: &ListArgs) -> Result<()> {
    let store = EventStore::new(&config.data.dir)?;
    let ratings = store.load_ratings()?;
    let mut events = store.load_events()?;

    if args.upcoming {
        let types = args.event_type.map(|t| vec![t]);
        events = CatalystTracker::upcoming(&events, Utc::now().date_naive(), types.as_deref());
    } else {
        if let Some(ty) = args.event_type {
            events.retain(|e| e.event_type == ty);
        }
        events.sort_by_key(|e| e.event_date);
    }
    if let Some(ticker) = &args.ticker {
        let ticker = ticker.to_uppercase();
        events.retain(|e| e.ticker == ticker);
    }
    if let Some(grade) = args.grade {
        events.retain(|e| rated_at(e, &ratings, grade));
    }

    if events.is_empty() {
        println!("No matching events.");
        return Ok(());
    }

    println!(
        "{:<32} {:<6} {:<17} {:<11} {:<8} {:<5} {}",
        "ID", "TICKER", "TYPE", "DATE", "OUTCOME", "GRADE", "STRATEGY"
    );
    for event in &events {
        let rating = ratings.iter().find(|r| r.event_id == event.id);
        println!("{}", row(event, rating));
    }
    Ok(())
}

fn rated_at(event: &Event, ratings: &[Rating], grade: Grade) -> bool {
    ratings
        .iter()
        .any(|r| r.event_id == event.id && r.grade == grade)
}

fn row(event: &Event, rating: Option<&Rating>) -> String {
    let (grade, strategy) = rating
        .map(|r| (r.grade.to_string(), r.strategy.to_string()))
        .unwrap_or_else(|| ("-".to_string(), "-".to_string()));
    format!(
        "{:<32} {:<6} {:<17} {:<11} {:<8} {:<5} {}",
        event.id,
        event.ticker,
        event.event_type.to_string(),
        event.event_date.to_string(),
        event.outcome.tag.to_string(),
        grade,
        strategy
    )
}
