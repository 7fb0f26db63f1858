//! Resolve-event CLI command.

use anyhow::{bail, Result};
use catalyst_rater_core::{AppConfig, EventOutcome};
use catalyst_rater_data::EventStore;
use catalyst_rater_tracker::CatalystTracker;
use clap::Args;

/// Arguments for the resolve command.
#[derive(Args, Debug, Clone)]
pub struct ResolveArgs {
    /// Event id to resolve
    pub event_id: String,

    /// Realized outcome (positive, negative, neutral, mixed)
    #[arg(long)]
    pub outcome: EventOutcome,

    /// Resolution notes
    #[arg(long, default_value = "")]
    pub notes: String,

    /// Realized underlying move over the event, signed percent
    #[arg(long = "move")]
    pub realized_move: f64,

    /// IV change through the event, signed percent
    #[arg(long)]
    pub iv_crush: f64,
}

pub fn run(config: &AppConfig, args: &ResolveArgs) -> Result<()> {
    let store = EventStore::new(&config.data.dir)?;
    let Some(event) = store.get_event(&args.event_id)? else {
        bail!("No event with id '{}'", args.event_id);
    };

    let tracker = CatalystTracker::new();
    let resolved = tracker.resolve(
        event,
        args.outcome,
        args.notes.clone(),
        args.realized_move,
        args.iv_crush,
    )?;
    store.upsert_event(&resolved)?;

    println!(
        "Resolved {} as {} (move {:+.1}%, IV {:+.1}%)",
        resolved.id, args.outcome, args.realized_move, args.iv_crush
    );
    Ok(())
}
