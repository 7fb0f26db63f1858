//! Scoring engine: seven dimension scorers, weighted composite, and the
//! grade/strategy/confidence derivations.
//!
//! Every scorer is pure and total over a well-formed event — it clamps to
//! [0, 100] and never fails. The engine owns its default weight set; a
//! per-call override is validated, never renormalized.

use catalyst_rater_core::{
    DimensionWeights, Event, EventCategory, EventType, Grade, Rating, Result, ScoreBreakdown,
    ScoringConfig, SentimentTag, Strategy,
};
use chrono::NaiveDate;

/// Per-call scoring inputs. `as_of` is injected so scoring never reads the
/// wall clock.
#[derive(Debug, Clone)]
pub struct ScoreInputs {
    /// Current IV Rank (0-100), if known.
    pub iv_rank: Option<f64>,
    /// Historical-accuracy signal from the tracker (0-100), if any.
    pub prior_accuracy: Option<f64>,
    /// Weight override; defaults to the engine's configured weights.
    pub weights: Option<DimensionWeights>,
    /// Date the rating is produced, for the days-to-event figure.
    pub as_of: NaiveDate,
}

impl ScoreInputs {
    /// Inputs with no IV rank, no history, and the engine's default weights.
    #[must_use]
    pub fn bare(as_of: NaiveDate) -> Self {
        Self {
            iv_rank: None,
            prior_accuracy: None,
            weights: None,
            as_of,
        }
    }
}

/// The composite-rating core.
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    #[must_use]
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Scores an event into a fully populated rating.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a supplied weight override contains a
    /// negative weight.
    pub fn score(&self, event: &Event, inputs: &ScoreInputs) -> Result<Rating> {
        let weights = inputs.weights.unwrap_or(self.config.weights);
        weights.validate()?;

        let breakdown = ScoreBreakdown {
            catalyst_quality: catalyst_quality_score(event),
            sentiment_alignment: sentiment_alignment_score(event.sentiment),
            market_context: market_context_score(event),
            iv_environment: iv_environment_score(inputs.iv_rank),
            historical_accuracy: historical_accuracy_score(inputs.prior_accuracy),
            competitive_moat: competitive_moat_score(event),
            risk_reward: risk_reward_score(event.event_type),
        };

        let composite_score = breakdown.weighted_total(&weights);
        let grade = Grade::from_score(composite_score);
        let strategy = recommend_strategy(event.event_type, breakdown.sentiment_alignment);
        let confidence_pct = confidence_from_dispersion(&breakdown);
        let days_to_event = (event.event_date - inputs.as_of).num_days().max(0);

        let rating = Rating {
            event_id: event.id.clone(),
            ticker: event.ticker.clone(),
            rated_on: inputs.as_of,
            breakdown,
            weights,
            composite_score,
            grade,
            strategy,
            confidence_pct,
            days_to_event,
            suggested_delta: suggested_delta(strategy),
            max_risk_pct: grade.max_risk_pct(),
        };

        tracing::info!(
            event_id = %rating.event_id,
            grade = %rating.grade,
            composite = rating.composite_score,
            strategy = %rating.strategy,
            max_risk_pct = rating.max_risk_pct,
            "Scored event"
        );
        Ok(rating)
    }
}

/// Base priority by event type. Higher = more binary / high-impact.
fn catalyst_priority(event_type: EventType) -> f64 {
    match event_type {
        EventType::FdaPdufa => 95.0,
        EventType::FdaAdcom => 85.0,
        EventType::ClinicalReadout => 80.0,
        EventType::Partnership => 55.0,
        EventType::Earnings => 50.0,
        EventType::CompetitorEvent => 40.0,
        EventType::MacroRelease => 35.0,
        EventType::ConferencePres => 30.0,
        EventType::SecFiling => 20.0,
        EventType::Other => 25.0,
    }
}

/// Pipeline-stage strength multiplier. Unrecognized stage text gets a
/// middling 0.70 rather than full credit.
fn stage_multiplier(stage: &str) -> f64 {
    match stage {
        "Preclinical" => 0.30,
        "Phase 1" => 0.45,
        "Phase 1/2" => 0.50,
        "Phase 2" => 0.65,
        "Phase 2/3" => 0.75,
        "Phase 3" => 0.90,
        "NDA filed" | "BLA filed" => 0.92,
        "PDUFA date" => 0.95,
        "Approved" | "Marketed" => 1.00,
        _ => 0.70,
    }
}

/// Catalyst quality (0-100): type priority scaled by pipeline stage for the
/// binary biotech types, with a small bonus for a stated primary endpoint.
#[must_use]
pub fn catalyst_quality_score(event: &Event) -> f64 {
    let base = catalyst_priority(event.event_type);

    let mult = match &event.pipeline_stage {
        Some(stage) if event.event_type.is_binary_biotech() => stage_multiplier(stage),
        _ => 1.0,
    };

    let mut raw = base * mult;
    if event
        .primary_endpoint
        .as_deref()
        .is_some_and(|e| !e.trim().is_empty())
    {
        raw += 5.0; // endpoint clarity
    }
    raw.clamp(0.0, 100.0)
}

/// Directional alignment of analyst sentiment (0-100).
#[must_use]
pub fn sentiment_alignment_score(sentiment: SentimentTag) -> f64 {
    match sentiment {
        SentimentTag::StrongSell => 10.0,
        SentimentTag::Sell => 30.0,
        SentimentTag::Hold => 50.0,
        SentimentTag::Buy => 70.0,
        SentimentTag::StrongBuy => 90.0,
    }
}

/// Market/sector environment (0-100) from the embedded snapshot. Absent
/// snapshot is neutral.
#[must_use]
pub fn market_context_score(event: &Event) -> f64 {
    let Some(snapshot) = &event.market_snapshot else {
        return 50.0;
    };

    let base = match snapshot.trend {
        catalyst_rater_core::TrendLabel::StrongRiskOn => 85.0,
        catalyst_rater_core::TrendLabel::RiskOn => 70.0,
        catalyst_rater_core::TrendLabel::Neutral => 50.0,
        catalyst_rater_core::TrendLabel::RiskOff => 30.0,
        catalyst_rater_core::TrendLabel::StrongRiskOff => 15.0,
    };

    let mut score: f64 = base;
    if let Some(ret) = snapshot.benchmark_return_pct {
        if ret > 3.0 {
            score += 10.0;
        } else if ret < -3.0 {
            score -= 10.0;
        }
    }

    // Moderate volatility is workable; a spiking index is not.
    if let Some(vol) = snapshot.volatility_level {
        if vol > 35.0 {
            score -= 15.0;
        } else if vol > 25.0 {
            score -= 5.0;
        } else if vol >= 12.0 {
            score += 5.0;
        }
    }

    score.clamp(0.0, 100.0)
}

/// IV-environment favorability (0-100). Sweet spot is a 40-70 IV rank: rich
/// enough to sell, not yet pure crush risk. Missing input is neutral.
#[must_use]
pub fn iv_environment_score(iv_rank: Option<f64>) -> f64 {
    let Some(rank) = iv_rank else {
        return 50.0;
    };
    if (40.0..=70.0).contains(&rank) {
        80.0
    } else if (20.0..40.0).contains(&rank) {
        65.0
    } else if rank > 70.0 {
        55.0 // IV crush risk post-event
    } else {
        40.0
    }
}

/// Historical-accuracy dimension: the tracker's signal verbatim, neutral
/// when absent.
#[must_use]
pub fn historical_accuracy_score(prior_accuracy: Option<f64>) -> f64 {
    prior_accuracy.unwrap_or(50.0).clamp(0.0, 100.0)
}

/// Competitive moat (0-100): fewer competing drugs, higher score.
#[must_use]
pub fn competitive_moat_score(event: &Event) -> f64 {
    match event.competing_drugs.len() {
        0 => 85.0,
        1 => 70.0,
        2..=3 => 55.0,
        4..=6 => 35.0,
        _ => 20.0,
    }
}

/// Risk/reward (0-100): expected event-day move proxy by event type.
#[must_use]
pub fn risk_reward_score(event_type: EventType) -> f64 {
    match event_type {
        EventType::FdaPdufa => 85.0,
        EventType::FdaAdcom => 75.0,
        EventType::ClinicalReadout => 70.0,
        EventType::Partnership => 50.0,
        EventType::Earnings => 45.0,
        EventType::CompetitorEvent => 35.0,
        EventType::MacroRelease => 30.0,
        EventType::ConferencePres => 25.0,
        EventType::SecFiling => 15.0,
        EventType::Other => 20.0,
    }
}

/// Deterministic strategy lookup keyed by event category and sentiment band.
#[must_use]
pub fn recommend_strategy(event_type: EventType, sentiment_score: f64) -> Strategy {
    match event_type.category() {
        EventCategory::RegulatoryClinical => {
            if sentiment_score >= 70.0 {
                Strategy::BullCallSpread
            } else if sentiment_score <= 30.0 {
                Strategy::BearPutSpread
            } else {
                Strategy::LongStraddle
            }
        }
        EventCategory::Earnings => {
            if sentiment_score >= 70.0 {
                Strategy::BullCallSpread
            } else if sentiment_score <= 30.0 {
                Strategy::BearPutSpread
            } else {
                Strategy::IronCondor
            }
        }
        EventCategory::Macro => Strategy::CalendarSpread,
        EventCategory::Partnership => {
            if sentiment_score >= 65.0 {
                Strategy::LongCall
            } else {
                Strategy::BullCallSpread
            }
        }
        // Safest default under uncertainty.
        EventCategory::Other => Strategy::LongStraddle,
    }
}

/// Confidence (0-100) from the dispersion of the seven dimension scores:
/// dimensions in close agreement score near 100, sharp disagreement lower.
fn confidence_from_dispersion(breakdown: &ScoreBreakdown) -> f64 {
    let scores = breakdown.scores();
    #[allow(clippy::cast_precision_loss)]
    let n = scores.len() as f64;
    let mean = scores.iter().sum::<f64>() / n;
    let variance = scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n;
    (100.0 - variance.sqrt()).clamp(0.0, 100.0)
}

/// Unsigned target delta for the recommended structure.
fn suggested_delta(strategy: Strategy) -> f64 {
    match strategy {
        Strategy::LongStraddle | Strategy::LongStrangle | Strategy::IronCondor => 0.35,
        Strategy::BullCallSpread | Strategy::LongCall => 0.45,
        Strategy::BearPutSpread | Strategy::LongPut => 0.45,
        Strategy::CalendarSpread => 0.40,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalyst_rater_core::{MarketSnapshot, OutcomeRecord, TrendLabel};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_event(event_type: EventType, sentiment: SentimentTag) -> Event {
        Event {
            id: "MRNA_2026-04-15_abcd1234".to_string(),
            ticker: "MRNA".to_string(),
            company_name: "Moderna".to_string(),
            event_type,
            event_date: date(2026, 4, 15),
            description: "PDUFA for mRNA-1283".to_string(),
            sentiment,
            analyst_notes: String::new(),
            pipeline_stage: None,
            indication: None,
            primary_endpoint: None,
            competing_drugs: Vec::new(),
            tags: Vec::new(),
            market_snapshot: None,
            outcome: OutcomeRecord::default(),
        }
    }

    fn engine() -> ScoringEngine {
        ScoringEngine::new(ScoringConfig::default())
    }

    #[test]
    fn pdufa_buy_scenario_lands_in_b_plus_band() {
        let event = make_event(EventType::FdaPdufa, SentimentTag::Buy);
        let inputs = ScoreInputs {
            iv_rank: Some(72.0),
            prior_accuracy: None,
            weights: None,
            as_of: date(2026, 3, 1),
        };
        let rating = engine().score(&event, &inputs).unwrap();

        // 0.25*95 + 0.15*70 + 0.15*50 + 0.15*55 + 0.10*50 + 0.10*85 + 0.10*85
        assert!((rating.composite_score - 72.0).abs() < 1e-9);
        assert_eq!(rating.grade, Grade::BPlus);
        assert_eq!(rating.strategy, Strategy::BullCallSpread);
        assert_eq!(rating.max_risk_pct, 2.0);
        assert_eq!(rating.days_to_event, 45);
    }

    #[test]
    fn composite_equals_exact_weighted_sum() {
        let event = make_event(EventType::ClinicalReadout, SentimentTag::StrongBuy);
        let inputs = ScoreInputs {
            iv_rank: Some(55.0),
            prior_accuracy: Some(66.7),
            weights: None,
            as_of: date(2026, 1, 1),
        };
        let rating = engine().score(&event, &inputs).unwrap();
        let expected = rating.breakdown.weighted_total(&rating.weights);
        assert!((rating.composite_score - expected).abs() < f64::EPSILON);
        assert!((0.0..=100.0).contains(&rating.composite_score));
    }

    #[test]
    fn scoring_is_reproducible() {
        let event = make_event(EventType::Earnings, SentimentTag::Hold);
        let inputs = ScoreInputs {
            iv_rank: Some(33.0),
            prior_accuracy: Some(40.0),
            weights: None,
            as_of: date(2026, 2, 2),
        };
        let a = engine().score(&event, &inputs).unwrap();
        let b = engine().score(&event, &inputs).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn negative_weight_override_is_rejected() {
        let event = make_event(EventType::FdaPdufa, SentimentTag::Buy);
        let weights = DimensionWeights {
            risk_reward: -0.1,
            ..DimensionWeights::default()
        };
        let inputs = ScoreInputs {
            iv_rank: None,
            prior_accuracy: None,
            weights: Some(weights),
            as_of: date(2026, 1, 1),
        };
        let err = engine().score(&event, &inputs).unwrap_err();
        assert!(err.to_string().contains("risk_reward"));
    }

    #[test]
    fn oversized_weight_sum_is_accepted_and_clamped() {
        let event = make_event(EventType::FdaPdufa, SentimentTag::StrongBuy);
        let weights = DimensionWeights {
            catalyst_quality: 1.0,
            sentiment_alignment: 1.0,
            ..DimensionWeights::default()
        };
        let inputs = ScoreInputs {
            iv_rank: Some(50.0),
            prior_accuracy: None,
            weights: Some(weights),
            as_of: date(2026, 1, 1),
        };
        let rating = engine().score(&event, &inputs).unwrap();
        assert_eq!(rating.composite_score, 100.0);
        assert_eq!(rating.grade, Grade::APlus);
    }

    #[test]
    fn days_to_event_floors_at_zero_for_past_events() {
        let event = make_event(EventType::Earnings, SentimentTag::Hold);
        let inputs = ScoreInputs::bare(date(2026, 6, 1));
        let rating = engine().score(&event, &inputs).unwrap();
        assert_eq!(rating.days_to_event, 0);
    }

    #[test]
    fn stage_multiplier_scales_binary_biotech_only() {
        let mut readout = make_event(EventType::ClinicalReadout, SentimentTag::Hold);
        readout.pipeline_stage = Some("Phase 1".to_string());
        assert!((catalyst_quality_score(&readout) - 80.0 * 0.45).abs() < 1e-9);

        let mut earnings = make_event(EventType::Earnings, SentimentTag::Hold);
        earnings.pipeline_stage = Some("Phase 1".to_string());
        assert!((catalyst_quality_score(&earnings) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_stage_gets_middling_multiplier() {
        let mut event = make_event(EventType::FdaAdcom, SentimentTag::Hold);
        event.pipeline_stage = Some("Phase 9".to_string());
        assert!((catalyst_quality_score(&event) - 85.0 * 0.70).abs() < 1e-9);
    }

    #[test]
    fn endpoint_clarity_adds_flat_bonus() {
        let mut event = make_event(EventType::FdaPdufa, SentimentTag::Hold);
        let without = catalyst_quality_score(&event);
        event.primary_endpoint = Some("OS improvement >= 3mo".to_string());
        assert!((catalyst_quality_score(&event) - without - 5.0).abs() < 1e-9);

        // Whitespace-only endpoint earns nothing.
        event.primary_endpoint = Some("   ".to_string());
        assert!((catalyst_quality_score(&event) - without).abs() < 1e-9);
    }

    #[test]
    fn sentiment_maps_linearly() {
        assert_eq!(sentiment_alignment_score(SentimentTag::StrongSell), 10.0);
        assert_eq!(sentiment_alignment_score(SentimentTag::Sell), 30.0);
        assert_eq!(sentiment_alignment_score(SentimentTag::Hold), 50.0);
        assert_eq!(sentiment_alignment_score(SentimentTag::Buy), 70.0);
        assert_eq!(sentiment_alignment_score(SentimentTag::StrongBuy), 90.0);
    }

    #[test]
    fn absent_market_snapshot_is_neutral() {
        let event = make_event(EventType::FdaPdufa, SentimentTag::Buy);
        assert_eq!(market_context_score(&event), 50.0);
    }

    #[test]
    fn bullish_snapshot_raises_market_context() {
        let mut event = make_event(EventType::FdaPdufa, SentimentTag::Buy);
        event.market_snapshot = Some(MarketSnapshot {
            trend: TrendLabel::StrongRiskOn,
            benchmark_return_pct: Some(4.0),
            sector_return_pct: Some(5.0),
            volatility_level: Some(14.0),
        });
        assert_eq!(market_context_score(&event), 100.0); // 85 + 10 + 5
    }

    #[test]
    fn vol_spike_penalizes_market_context() {
        let mut event = make_event(EventType::FdaPdufa, SentimentTag::Buy);
        event.market_snapshot = Some(MarketSnapshot {
            trend: TrendLabel::Neutral,
            benchmark_return_pct: Some(0.0),
            sector_return_pct: None,
            volatility_level: Some(40.0),
        });
        assert_eq!(market_context_score(&event), 35.0); // 50 - 15
    }

    #[test]
    fn iv_environment_peaks_in_mid_band() {
        assert_eq!(iv_environment_score(Some(55.0)), 80.0);
        assert_eq!(iv_environment_score(Some(40.0)), 80.0);
        assert_eq!(iv_environment_score(Some(70.0)), 80.0);
        assert_eq!(iv_environment_score(Some(25.0)), 65.0);
        assert_eq!(iv_environment_score(Some(85.0)), 55.0);
        assert_eq!(iv_environment_score(Some(10.0)), 40.0);
        assert_eq!(iv_environment_score(None), 50.0);
    }

    #[test]
    fn moat_decreases_with_competitor_count() {
        let mut event = make_event(EventType::ClinicalReadout, SentimentTag::Hold);
        let zero = competitive_moat_score(&event);
        event.competing_drugs = vec!["A".into(), "B".into(), "C".into()];
        let three = competitive_moat_score(&event);
        assert!(three < zero);

        event.competing_drugs = (0..10).map(|i| format!("drug-{i}")).collect();
        assert_eq!(competitive_moat_score(&event), 20.0); // floor
    }

    #[test]
    fn regulatory_strategy_follows_sentiment_bands() {
        let ty = EventType::FdaPdufa;
        assert_eq!(recommend_strategy(ty, 90.0), Strategy::BullCallSpread);
        assert_eq!(recommend_strategy(ty, 70.0), Strategy::BullCallSpread);
        assert_eq!(recommend_strategy(ty, 50.0), Strategy::LongStraddle);
        assert_eq!(recommend_strategy(ty, 30.0), Strategy::BearPutSpread);
        assert_eq!(recommend_strategy(ty, 10.0), Strategy::BearPutSpread);
    }

    #[test]
    fn macro_release_is_always_calendar_spread() {
        for sentiment in [
            SentimentTag::StrongSell,
            SentimentTag::Sell,
            SentimentTag::Hold,
            SentimentTag::Buy,
            SentimentTag::StrongBuy,
        ] {
            let score = sentiment_alignment_score(sentiment);
            assert_eq!(
                recommend_strategy(EventType::MacroRelease, score),
                Strategy::CalendarSpread
            );
        }
    }

    #[test]
    fn earnings_neutral_is_iron_condor() {
        assert_eq!(
            recommend_strategy(EventType::Earnings, 50.0),
            Strategy::IronCondor
        );
        assert_eq!(
            recommend_strategy(EventType::Earnings, 90.0),
            Strategy::BullCallSpread
        );
        assert_eq!(
            recommend_strategy(EventType::Earnings, 10.0),
            Strategy::BearPutSpread
        );
    }

    #[test]
    fn partnership_bullish_prefers_long_call() {
        assert_eq!(
            recommend_strategy(EventType::Partnership, 70.0),
            Strategy::LongCall
        );
        assert_eq!(
            recommend_strategy(EventType::Partnership, 50.0),
            Strategy::BullCallSpread
        );
    }

    #[test]
    fn agreement_yields_higher_confidence_than_disagreement() {
        let mut agreeing = make_event(EventType::Earnings, SentimentTag::Hold);
        agreeing.competing_drugs = vec!["A".into(), "B".into()]; // moat 55
        let inputs = ScoreInputs {
            iv_rank: Some(55.0), // all dims near 50-80
            prior_accuracy: Some(50.0),
            weights: None,
            as_of: date(2026, 1, 1),
        };
        let tight = engine().score(&agreeing, &inputs).unwrap();

        let disagreeing = make_event(EventType::FdaPdufa, SentimentTag::StrongSell);
        let spread_inputs = ScoreInputs {
            iv_rank: Some(5.0),
            prior_accuracy: Some(100.0),
            weights: None,
            as_of: date(2026, 1, 1),
        };
        let wide = engine().score(&disagreeing, &spread_inputs).unwrap();

        assert!(tight.confidence_pct > wide.confidence_pct);
        assert!((0.0..=100.0).contains(&tight.confidence_pct));
        assert!((0.0..=100.0).contains(&wide.confidence_pct));
    }
}
