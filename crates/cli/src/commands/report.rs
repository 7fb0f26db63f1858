//! Benchmark-report CLI command.

use anyhow::Result;
use catalyst_rater_core::AppConfig;
use catalyst_rater_data::EventStore;
use catalyst_rater_engine::{aggregate, compare, BenchmarkComparison, BenchmarkMoves};
use clap::Args;

/// Arguments for the report command.
#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Market benchmark move over the event windows, in percent
    #[arg(long, default_value_t = 0.0)]
    pub market_move: f64,

    /// Sector benchmark move over the event windows, in percent
    #[arg(long, default_value_t = 0.0)]
    pub sector_move: f64,
}

pub fn run(config: &AppConfig, args: &ReportArgs) -> Result<()> {
    let store = EventStore::new(&config.data.dir)?;
    let ratings = store.load_ratings()?;
    let moves = BenchmarkMoves {
        market_pct: args.market_move,
        sector_pct: args.sector_move,
    };

    let mut comparisons: Vec<BenchmarkComparison> = Vec::new();
    for event in store.load_events()? {
        if !event.is_resolved() {
            continue;
        }
        let Some(rating) = ratings.iter().find(|r| r.event_id == event.id) else {
            tracing::warn!(event_id = %event.id, "Resolved event was never scored, skipping");
            continue;
        };
        comparisons.push(compare(&event, rating, moves)?);
    }

    if comparisons.is_empty() {
        println!("No resolved, scored events to report on.");
        return Ok(());
    }

    println!(
        "{:<32} {:<5} {:>8} {:>9} {:>9}  {}",
        "ID", "GRADE", "MOVE%", "ALPHA(M)", "ALPHA(S)", "OUTCOME"
    );
    for c in &comparisons {
        println!(
            "{:<32} {:<5} {:>8.1} {:>9.1} {:>9.1}  {}",
            c.event_id, c.grade.to_string(), c.realized_move_pct, c.alpha_vs_market,
            c.alpha_vs_sector, c.outcome
        );
    }

    let stats = aggregate(&comparisons);
    println!();
    println!("Events: {}", stats.n_events);
    print_stat("mean move %", stats.mean_move_pct);
    print_stat("mean alpha vs market", stats.mean_alpha_vs_market);
    print_stat("median alpha vs market", stats.median_alpha_vs_market);
    print_stat("mean alpha vs sector", stats.mean_alpha_vs_sector);
    print_stat("median alpha vs sector", stats.median_alpha_vs_sector);
    print_stat("% outperform market", stats.pct_outperform_market);
    print_stat("% outperform sector", stats.pct_outperform_sector);
    print_stat("mean IV crush %", stats.mean_iv_crush_pct);
    print_stat("positive outcome rate %", stats.positive_outcome_rate_pct);

    if !stats.by_grade.is_empty() {
        println!();
        println!("By grade:");
        for bucket in &stats.by_grade {
            println!(
                "  {:<3} n={:<3} mean alpha vs market {:>6.1}  positive {:>5.1}%",
                bucket.grade.to_string(),
                bucket.n_events,
                bucket.mean_alpha_vs_market,
                bucket.positive_rate_pct
            );
        }
    }
    Ok(())
}

fn print_stat(label: &str, value: Option<f64>) {
    match value {
        Some(v) => println!("  {label:<24} {v:>8.2}"),
        None => println!("  {label:<24} {:>8}", "n/a"),
    }
}
