//! Add-event CLI command.

use anyhow::Result;
use async_trait::async_trait;
use catalyst_rater_core::{
    AppConfig, EventType, MarketDataProvider, MarketSnapshot, SentimentTag,
};
use catalyst_rater_data::EventStore;
use catalyst_rater_tracker::{classify_trend, CatalystTracker, EventDraft};
use chrono::NaiveDate;
use clap::Args;
use std::sync::Arc;

/// Arguments for the add command.
#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    /// Ticker symbol (e.g., "MRNA")
    #[arg(long)]
    pub ticker: String,

    /// Company name
    #[arg(long)]
    pub company: String,

    /// Event type (fda_pdufa, fda_adcom, clinical_readout, earnings, ...)
    #[arg(long = "type")]
    pub event_type: EventType,

    /// Event date (YYYY-MM-DD)
    #[arg(long)]
    pub date: NaiveDate,

    /// One-line event description
    #[arg(long)]
    pub description: String,

    /// Analyst sentiment (strong_sell, sell, hold, buy, strong_buy)
    #[arg(long, default_value = "hold")]
    pub sentiment: SentimentTag,

    /// Pipeline stage (e.g., "Phase 3", "PDUFA date")
    #[arg(long)]
    pub stage: Option<String>,

    /// Target indication
    #[arg(long)]
    pub indication: Option<String>,

    /// Primary endpoint being read out
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Comma-separated competing drugs
    #[arg(long)]
    pub competitors: Option<String>,

    /// Free-form analyst notes
    #[arg(long, default_value = "")]
    pub notes: String,

    /// Comma-separated tags
    #[arg(long)]
    pub tags: Option<String>,

    /// Benchmark index return over the lookback window, in percent
    #[arg(long)]
    pub benchmark_return: Option<f64>,

    /// Sector index return over the lookback window, in percent
    #[arg(long)]
    pub sector_return: Option<f64>,

    /// Volatility index level
    #[arg(long)]
    pub volatility: Option<f64>,

    /// Skip the market-context snapshot entirely
    #[arg(long)]
    pub no_market: bool,
}

/// Provider over operator-supplied benchmark figures. The trend label is
/// derived rather than entered by hand.
struct ManualProvider {
    benchmark_return_pct: Option<f64>,
    sector_return_pct: Option<f64>,
    volatility_level: Option<f64>,
}

#[async_trait]
impl MarketDataProvider for ManualProvider {
    async fn snapshot(&self, _as_of: NaiveDate) -> Result<MarketSnapshot> {
        Ok(MarketSnapshot {
            trend: classify_trend(
                self.benchmark_return_pct,
                self.sector_return_pct,
                self.volatility_level,
            ),
            benchmark_return_pct: self.benchmark_return_pct,
            sector_return_pct: self.sector_return_pct,
            volatility_level: self.volatility_level,
        })
    }
}

fn split_csv(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(String::from)
            .collect()
    })
    .unwrap_or_default()
}

pub async fn run(config: &AppConfig, args: AddArgs) -> Result<()> {
    let store = EventStore::new(&config.data.dir)?;

    let has_market_inputs = args.benchmark_return.is_some()
        || args.sector_return.is_some()
        || args.volatility.is_some();
    let tracker = if args.no_market || !has_market_inputs {
        CatalystTracker::new()
    } else {
        CatalystTracker::with_provider(Arc::new(ManualProvider {
            benchmark_return_pct: args.benchmark_return,
            sector_return_pct: args.sector_return,
            volatility_level: args.volatility,
        }))
    };

    let mut draft = EventDraft::new(
        args.ticker,
        args.company,
        args.event_type,
        args.date,
        args.description,
    );
    draft.sentiment = args.sentiment;
    draft.pipeline_stage = args.stage;
    draft.indication = args.indication;
    draft.primary_endpoint = args.endpoint;
    draft.competing_drugs = split_csv(args.competitors.as_deref());
    draft.analyst_notes = args.notes;
    draft.tags = split_csv(args.tags.as_deref());

    let event = tracker.create_event(draft).await?;
    store.upsert_event(&event)?;

    println!("Added event {}", event.id);
    println!(
        "  {} {} on {} ({})",
        event.ticker, event.event_type, event.event_date, event.sentiment
    );
    if let Some(snapshot) = &event.market_snapshot {
        println!("  market context: {}", snapshot.trend);
    }
    Ok(())
}
