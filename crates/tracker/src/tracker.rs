//! Event construction, historical accuracy, and outcome resolution.

use std::sync::Arc;

use catalyst_rater_core::{
    Event, EventOutcome, EventType, MarketDataProvider, OutcomeRecord, RaterError, Result,
    SentimentTag,
};
use chrono::NaiveDate;
use uuid::Uuid;

/// Inputs for creating a new event. The tracker validates and normalizes
/// these before assigning identity.
#[derive(Debug, Clone)]
pub struct EventDraft {
    pub ticker: String,
    pub company_name: String,
    pub event_type: EventType,
    pub event_date: NaiveDate,
    pub description: String,
    pub sentiment: SentimentTag,
    pub pipeline_stage: Option<String>,
    pub indication: Option<String>,
    pub primary_endpoint: Option<String>,
    pub competing_drugs: Vec<String>,
    pub analyst_notes: String,
    pub tags: Vec<String>,
}

impl EventDraft {
    /// Minimal draft with neutral sentiment and no qualitative extras.
    #[must_use]
    pub fn new(
        ticker: impl Into<String>,
        company_name: impl Into<String>,
        event_type: EventType,
        event_date: NaiveDate,
        description: impl Into<String>,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            company_name: company_name.into(),
            event_type,
            event_date,
            description: description.into(),
            sentiment: SentimentTag::Hold,
            pipeline_stage: None,
            indication: None,
            primary_endpoint: None,
            competing_drugs: Vec::new(),
            analyst_notes: String::new(),
            tags: Vec::new(),
        }
    }
}

/// Tracks catalyst events through their lifecycle. Holds an optional
/// market-data provider; everything else is stateless.
#[derive(Default)]
pub struct CatalystTracker {
    provider: Option<Arc<dyn MarketDataProvider>>,
}

impl CatalystTracker {
    /// Tracker without a market-data provider; created events carry no
    /// market snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self { provider: None }
    }

    /// Tracker that snapshots market context at event creation.
    #[must_use]
    pub fn with_provider(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// Creates a new pending event with a generated id.
    ///
    /// Ticker is uppercased. If a provider is attached, its snapshot is
    /// awaited and embedded; a provider failure degrades to an absent
    /// snapshot with a warning rather than failing the creation.
    ///
    /// # Errors
    ///
    /// Returns a validation error if ticker, company name, or description is
    /// empty.
    pub async fn create_event(&self, draft: EventDraft) -> Result<Event> {
        let ticker = draft.ticker.trim().to_uppercase();
        if ticker.is_empty() {
            return Err(RaterError::validation("ticker", "must not be empty"));
        }
        if draft.company_name.trim().is_empty() {
            return Err(RaterError::validation("company_name", "must not be empty"));
        }
        if draft.description.trim().is_empty() {
            return Err(RaterError::validation("description", "must not be empty"));
        }

        let suffix = Uuid::new_v4().simple().to_string();
        let id = format!("{}_{}_{}", ticker, draft.event_date, &suffix[..8]);

        let market_snapshot = match &self.provider {
            Some(provider) => match provider.snapshot(draft.event_date).await {
                Ok(snapshot) => Some(snapshot),
                Err(err) => {
                    tracing::warn!(
                        event_id = %id,
                        error = %err,
                        "Market context unavailable, creating event without snapshot"
                    );
                    None
                }
            },
            None => None,
        };

        let event = Event {
            id,
            ticker,
            company_name: draft.company_name,
            event_type: draft.event_type,
            event_date: draft.event_date,
            description: draft.description,
            sentiment: draft.sentiment,
            analyst_notes: draft.analyst_notes,
            pipeline_stage: draft.pipeline_stage,
            indication: draft.indication,
            primary_endpoint: draft.primary_endpoint,
            competing_drugs: draft.competing_drugs,
            tags: draft.tags,
            market_snapshot,
            outcome: OutcomeRecord::default(),
        };

        tracing::info!(
            event_id = %event.id,
            event_type = %event.event_type,
            ticker = %event.ticker,
            "Created event"
        );
        Ok(event)
    }

    /// Historical accuracy signal for a (ticker, event type) pair, 0-100.
    ///
    /// Fraction of prior resolved events of the same type for the same
    /// ticker whose outcome was positive, scaled to 0-100. Returns a neutral
    /// 50.0 when no such history exists.
    #[must_use]
    pub fn historical_accuracy(
        ticker: &str,
        event_type: EventType,
        prior_events: &[Event],
    ) -> f64 {
        let ticker = ticker.to_uppercase();
        let same_type: Vec<&Event> = prior_events
            .iter()
            .filter(|e| e.ticker == ticker && e.event_type == event_type && e.is_resolved())
            .collect();
        if same_type.is_empty() {
            return 50.0;
        }

        let positives = same_type
            .iter()
            .filter(|e| e.outcome.tag == EventOutcome::Positive)
            .count();
        #[allow(clippy::cast_precision_loss)]
        let rate = positives as f64 / same_type.len() as f64 * 100.0;
        rate
    }

    /// Resolves a pending event with its realized outcome. One-way: a
    /// resolved event can never be resolved again.
    ///
    /// # Errors
    ///
    /// Returns an invalid-state error if the event is already resolved, or a
    /// validation error if `outcome` is `pending`.
    pub fn resolve(
        &self,
        event: Event,
        outcome: EventOutcome,
        notes: impl Into<String>,
        realized_move_pct: f64,
        iv_crush_pct: f64,
    ) -> Result<Event> {
        if event.is_resolved() {
            return Err(RaterError::invalid_state(
                &event.id,
                format!("already resolved as {}", event.outcome.tag),
            ));
        }
        if outcome == EventOutcome::Pending {
            return Err(RaterError::validation(
                "outcome",
                "cannot resolve an event to pending",
            ));
        }

        let mut event = event;
        event.outcome = OutcomeRecord {
            tag: outcome,
            notes: notes.into(),
            realized_move_pct: Some(realized_move_pct),
            iv_crush_pct: Some(iv_crush_pct),
        };

        tracing::info!(
            event_id = %event.id,
            outcome = %outcome,
            move_pct = realized_move_pct,
            iv_crush_pct,
            "Resolved event"
        );
        Ok(event)
    }

    /// Pending events dated on or after `as_of`, optionally filtered by
    /// type, sorted by event date.
    #[must_use]
    pub fn upcoming(
        events: &[Event],
        as_of: NaiveDate,
        event_types: Option<&[EventType]>,
    ) -> Vec<Event> {
        let mut results: Vec<Event> = events
            .iter()
            .filter(|e| !e.is_resolved() && e.event_date >= as_of)
            .filter(|e| event_types.map_or(true, |types| types.contains(&e.event_type)))
            .cloned()
            .collect();
        results.sort_by_key(|e| e.event_date);
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use catalyst_rater_core::{MarketSnapshot, TrendLabel};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn draft() -> EventDraft {
        EventDraft::new(
            "mrna",
            "Moderna",
            EventType::FdaPdufa,
            date(2026, 4, 15),
            "PDUFA for mRNA-1283",
        )
    }

    async fn pending_event() -> Event {
        CatalystTracker::new().create_event(draft()).await.unwrap()
    }

    struct FixedProvider;

    #[async_trait]
    impl MarketDataProvider for FixedProvider {
        async fn snapshot(&self, _as_of: NaiveDate) -> anyhow::Result<MarketSnapshot> {
            Ok(MarketSnapshot {
                trend: TrendLabel::RiskOn,
                benchmark_return_pct: Some(1.2),
                sector_return_pct: Some(2.0),
                volatility_level: Some(16.0),
            })
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl MarketDataProvider for FailingProvider {
        async fn snapshot(&self, _as_of: NaiveDate) -> anyhow::Result<MarketSnapshot> {
            anyhow::bail!("feed unavailable")
        }
    }

    #[tokio::test]
    async fn create_event_assigns_identity_and_uppercases_ticker() {
        let event = pending_event().await;
        assert_eq!(event.ticker, "MRNA");
        assert!(event.id.starts_with("MRNA_2026-04-15_"));
        assert_eq!(event.id.len(), "MRNA_2026-04-15_".len() + 8);
        assert_eq!(event.outcome.tag, EventOutcome::Pending);
        assert!(event.market_snapshot.is_none());
    }

    #[tokio::test]
    async fn create_event_ids_are_unique() {
        let tracker = CatalystTracker::new();
        let a = tracker.create_event(draft()).await.unwrap();
        let b = tracker.create_event(draft()).await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn create_event_rejects_empty_ticker() {
        let mut d = draft();
        d.ticker = "  ".to_string();
        let err = CatalystTracker::new().create_event(d).await.unwrap_err();
        assert!(err.to_string().contains("ticker"));
    }

    #[tokio::test]
    async fn create_event_rejects_empty_description() {
        let mut d = draft();
        d.description = String::new();
        let err = CatalystTracker::new().create_event(d).await.unwrap_err();
        assert!(err.to_string().contains("description"));
    }

    #[tokio::test]
    async fn create_event_embeds_provider_snapshot() {
        let tracker = CatalystTracker::with_provider(Arc::new(FixedProvider));
        let event = tracker.create_event(draft()).await.unwrap();
        let snapshot = event.market_snapshot.unwrap();
        assert_eq!(snapshot.trend, TrendLabel::RiskOn);
    }

    #[tokio::test]
    async fn provider_failure_degrades_to_absent_snapshot() {
        let tracker = CatalystTracker::with_provider(Arc::new(FailingProvider));
        let event = tracker.create_event(draft()).await.unwrap();
        assert!(event.market_snapshot.is_none());
    }

    #[tokio::test]
    async fn resolve_populates_outcome_record() {
        let tracker = CatalystTracker::new();
        let event = pending_event().await;
        let resolved = tracker
            .resolve(event, EventOutcome::Positive, "approved", 42.5, 38.0)
            .unwrap();
        assert!(resolved.is_resolved());
        assert_eq!(resolved.outcome.tag, EventOutcome::Positive);
        assert_eq!(resolved.outcome.realized_move_pct, Some(42.5));
        assert_eq!(resolved.outcome.iv_crush_pct, Some(38.0));
        assert_eq!(resolved.outcome.notes, "approved");
    }

    #[tokio::test]
    async fn resolving_twice_is_a_state_error() {
        let tracker = CatalystTracker::new();
        let event = pending_event().await;
        let resolved = tracker
            .resolve(event, EventOutcome::Negative, "", -30.0, 20.0)
            .unwrap();
        let err = tracker
            .resolve(resolved.clone(), EventOutcome::Positive, "", 10.0, 5.0)
            .unwrap_err();
        assert!(matches!(err, RaterError::InvalidState { .. }));
        assert!(err.to_string().contains(&resolved.id));
    }

    #[tokio::test]
    async fn resolving_to_pending_is_rejected() {
        let tracker = CatalystTracker::new();
        let event = pending_event().await;
        let err = tracker
            .resolve(event, EventOutcome::Pending, "", 0.0, 0.0)
            .unwrap_err();
        assert!(matches!(err, RaterError::Validation { .. }));
    }

    #[tokio::test]
    async fn historical_accuracy_defaults_to_neutral_without_history() {
        assert_eq!(
            CatalystTracker::historical_accuracy("MRNA", EventType::FdaPdufa, &[]),
            50.0
        );
    }

    #[tokio::test]
    async fn historical_accuracy_counts_only_positive_resolutions() {
        let tracker = CatalystTracker::new();
        let mut events = Vec::new();
        for outcome in [
            EventOutcome::Positive,
            EventOutcome::Positive,
            EventOutcome::Negative,
            EventOutcome::Mixed,
        ] {
            let event = pending_event().await;
            events.push(tracker.resolve(event, outcome, "", 1.0, 1.0).unwrap());
        }
        // Pending events never count.
        events.push(pending_event().await);
        // Other tickers and types never count.
        let other = CatalystTracker::new()
            .create_event(EventDraft::new(
                "BEAM",
                "Beam Therapeutics",
                EventType::FdaPdufa,
                date(2026, 5, 1),
                "PDUFA",
            ))
            .await
            .unwrap();
        events.push(tracker.resolve(other, EventOutcome::Positive, "", 1.0, 1.0).unwrap());

        let accuracy = CatalystTracker::historical_accuracy("MRNA", EventType::FdaPdufa, &events);
        assert!((accuracy - 50.0).abs() < 1e-9); // 2 of 4 resolved positive
    }

    #[tokio::test]
    async fn upcoming_filters_and_sorts_pending_events() {
        let tracker = CatalystTracker::new();
        let later = tracker
            .create_event(EventDraft::new(
                "MRNA",
                "Moderna",
                EventType::Earnings,
                date(2026, 8, 1),
                "Q2 earnings",
            ))
            .await
            .unwrap();
        let sooner = pending_event().await;
        let past = tracker
            .create_event(EventDraft::new(
                "MRNA",
                "Moderna",
                EventType::Earnings,
                date(2025, 11, 1),
                "Q3 earnings",
            ))
            .await
            .unwrap();
        let resolved = tracker
            .resolve(pending_event().await, EventOutcome::Positive, "", 1.0, 1.0)
            .unwrap();

        let events = vec![later.clone(), sooner.clone(), past, resolved];
        let upcoming = CatalystTracker::upcoming(&events, date(2026, 1, 1), None);
        let ids: Vec<&str> = upcoming.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec![sooner.id.as_str(), later.id.as_str()]);

        let only_earnings =
            CatalystTracker::upcoming(&events, date(2026, 1, 1), Some(&[EventType::Earnings]));
        assert_eq!(only_earnings.len(), 1);
        assert_eq!(only_earnings[0].id, later.id);
    }
}
