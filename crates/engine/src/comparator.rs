//! Outcome reconciliation against market and sector benchmarks.
//!
//! A comparison pairs one resolved event with the benchmark moves over the
//! same window; an aggregation folds a batch of comparisons into summary
//! statistics for review.

use catalyst_rater_core::{
    Event, EventOutcome, EventType, Grade, RaterError, Rating, Result, Strategy,
};
use serde::{Deserialize, Serialize};

/// Benchmark moves over the event window, in percent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BenchmarkMoves {
    pub market_pct: f64,
    pub sector_pct: f64,
}

/// One resolved event lined up against its rating and the benchmark tape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkComparison {
    pub event_id: String,
    pub ticker: String,
    pub event_type: EventType,
    pub outcome: EventOutcome,
    pub realized_move_pct: f64,
    pub market_move_pct: f64,
    pub sector_move_pct: f64,
    /// Realized move minus the market benchmark move, signed.
    pub alpha_vs_market: f64,
    /// Realized move minus the sector benchmark move, signed.
    pub alpha_vs_sector: f64,
    pub iv_crush_pct: Option<f64>,
    pub grade: Grade,
    pub strategy: Strategy,
    pub composite_score: f64,
}

/// Aggregate statistics over a batch of comparisons. Every figure is `None`
/// when the batch carries no data for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkStats {
    pub n_events: usize,
    pub mean_move_pct: Option<f64>,
    pub mean_alpha_vs_market: Option<f64>,
    pub median_alpha_vs_market: Option<f64>,
    pub mean_alpha_vs_sector: Option<f64>,
    pub median_alpha_vs_sector: Option<f64>,
    /// Share of events with positive alpha vs the market benchmark.
    pub pct_outperform_market: Option<f64>,
    pub pct_outperform_sector: Option<f64>,
    pub mean_iv_crush_pct: Option<f64>,
    pub positive_outcome_rate_pct: Option<f64>,
    pub by_grade: Vec<GradeBucket>,
}

/// Per-grade slice of the aggregate, best grade first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeBucket {
    pub grade: Grade,
    pub n_events: usize,
    pub mean_alpha_vs_market: f64,
    pub positive_rate_pct: f64,
}

/// Reconciles a resolved event against its rating and the benchmark moves
/// over the same window.
///
/// # Errors
///
/// Fails if the rating belongs to a different event, or if the event is
/// unresolved or resolved without a realized move.
pub fn compare(event: &Event, rating: &Rating, moves: BenchmarkMoves) -> Result<BenchmarkComparison> {
    if rating.event_id != event.id {
        return Err(RaterError::validation(
            "event_id",
            format!(
                "rating is for event '{}', not '{}'",
                rating.event_id, event.id
            ),
        ));
    }
    if !event.is_resolved() {
        return Err(RaterError::invalid_state(
            &event.id,
            "event is unresolved; record an outcome before comparing",
        ));
    }
    let realized_move_pct = event.outcome.realized_move_pct.ok_or_else(|| {
        RaterError::invalid_state(&event.id, "resolved event has no realized move recorded")
    })?;

    let comparison = BenchmarkComparison {
        event_id: event.id.clone(),
        ticker: event.ticker.clone(),
        event_type: event.event_type,
        outcome: event.outcome.tag,
        realized_move_pct,
        market_move_pct: moves.market_pct,
        sector_move_pct: moves.sector_pct,
        alpha_vs_market: realized_move_pct - moves.market_pct,
        alpha_vs_sector: realized_move_pct - moves.sector_pct,
        iv_crush_pct: event.outcome.iv_crush_pct,
        grade: rating.grade,
        strategy: rating.strategy,
        composite_score: rating.composite_score,
    };

    tracing::debug!(
        event_id = %comparison.event_id,
        alpha_vs_market = comparison.alpha_vs_market,
        alpha_vs_sector = comparison.alpha_vs_sector,
        "Benchmark comparison"
    );
    Ok(comparison)
}

/// Folds a batch of comparisons into summary statistics. An empty batch
/// yields all-`None` figures rather than an error.
#[must_use]
pub fn aggregate(comparisons: &[BenchmarkComparison]) -> BenchmarkStats {
    let n_events = comparisons.len();
    if n_events == 0 {
        return BenchmarkStats {
            n_events: 0,
            mean_move_pct: None,
            mean_alpha_vs_market: None,
            median_alpha_vs_market: None,
            mean_alpha_vs_sector: None,
            median_alpha_vs_sector: None,
            pct_outperform_market: None,
            pct_outperform_sector: None,
            mean_iv_crush_pct: None,
            positive_outcome_rate_pct: None,
            by_grade: Vec::new(),
        };
    }

    let moves: Vec<f64> = comparisons.iter().map(|c| c.realized_move_pct).collect();
    let market_alphas: Vec<f64> = comparisons.iter().map(|c| c.alpha_vs_market).collect();
    let sector_alphas: Vec<f64> = comparisons.iter().map(|c| c.alpha_vs_sector).collect();
    let crushes: Vec<f64> = comparisons.iter().filter_map(|c| c.iv_crush_pct).collect();

    let positives = comparisons
        .iter()
        .filter(|c| c.outcome == EventOutcome::Positive)
        .count();

    BenchmarkStats {
        n_events,
        mean_move_pct: mean(&moves),
        mean_alpha_vs_market: mean(&market_alphas),
        median_alpha_vs_market: median(&market_alphas),
        mean_alpha_vs_sector: mean(&sector_alphas),
        median_alpha_vs_sector: median(&sector_alphas),
        pct_outperform_market: share(&market_alphas, |a| a > 0.0),
        pct_outperform_sector: share(&sector_alphas, |a| a > 0.0),
        mean_iv_crush_pct: mean(&crushes),
        positive_outcome_rate_pct: Some(percent(positives, n_events)),
        by_grade: grade_buckets(comparisons),
    }
}

fn grade_buckets(comparisons: &[BenchmarkComparison]) -> Vec<GradeBucket> {
    Grade::all()
        .iter()
        .filter_map(|&grade| {
            let slice: Vec<&BenchmarkComparison> =
                comparisons.iter().filter(|c| c.grade == grade).collect();
            if slice.is_empty() {
                return None;
            }
            let alphas: Vec<f64> = slice.iter().map(|c| c.alpha_vs_market).collect();
            let positives = slice
                .iter()
                .filter(|c| c.outcome == EventOutcome::Positive)
                .count();
            Some(GradeBucket {
                grade,
                n_events: slice.len(),
                mean_alpha_vs_market: mean(&alphas).unwrap_or(0.0),
                positive_rate_pct: percent(positives, slice.len()),
            })
        })
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

fn share(values: &[f64], pred: impl Fn(f64) -> bool) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let hits = values.iter().filter(|&&v| pred(v)).count();
    Some(percent(hits, values.len()))
}

#[allow(clippy::cast_precision_loss)]
fn percent(count: usize, total: usize) -> f64 {
    count as f64 / total as f64 * 100.0
}
