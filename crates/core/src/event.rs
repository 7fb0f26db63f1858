//! Catalyst event model.
//!
//! An [`Event`] is one trackable catalyst (regulatory decision, trial readout,
//! earnings, macro release) for one ticker. Events start with a pending
//! outcome and are resolved exactly once; resolution is one-way.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::RaterError;

/// Kind of catalyst being tracked. Closed enum — strategy and priority
/// lookups match exhaustively, so adding a variant is a compile-time change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// FDA target action date for a drug application.
    FdaPdufa,
    /// FDA Advisory Committee meeting.
    FdaAdcom,
    /// Phase 2/3 trial data readout.
    ClinicalReadout,
    /// Quarterly earnings.
    Earnings,
    /// Medical or investor conference presentation.
    ConferencePres,
    /// Business development deal.
    Partnership,
    /// 10-Q, 10-K, 8-K, etc.
    SecFiling,
    /// CPI, FOMC, NFP, etc.
    MacroRelease,
    /// Rival company catalyst.
    CompetitorEvent,
    Other,
}

/// Coarse grouping used by the strategy recommender.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventCategory {
    /// Binary FDA/clinical catalysts.
    RegulatoryClinical,
    Earnings,
    Macro,
    Partnership,
    Other,
}

impl EventType {
    /// Strategy-lookup category for this event type.
    #[must_use]
    pub fn category(&self) -> EventCategory {
        match self {
            Self::FdaPdufa | Self::FdaAdcom | Self::ClinicalReadout => {
                EventCategory::RegulatoryClinical
            }
            Self::Earnings => EventCategory::Earnings,
            Self::MacroRelease => EventCategory::Macro,
            Self::Partnership => EventCategory::Partnership,
            Self::ConferencePres | Self::SecFiling | Self::CompetitorEvent | Self::Other => {
                EventCategory::Other
            }
        }
    }

    /// True for the binary FDA/clinical catalysts that pipeline stage
    /// modulates.
    #[must_use]
    pub fn is_binary_biotech(&self) -> bool {
        self.category() == EventCategory::RegulatoryClinical
    }

    /// All variants, in wire-tag order.
    #[must_use]
    pub fn all() -> &'static [EventType] {
        &[
            Self::FdaPdufa,
            Self::FdaAdcom,
            Self::ClinicalReadout,
            Self::Earnings,
            Self::ConferencePres,
            Self::Partnership,
            Self::SecFiling,
            Self::MacroRelease,
            Self::CompetitorEvent,
            Self::Other,
        ]
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::FdaPdufa => "fda_pdufa",
            Self::FdaAdcom => "fda_adcom",
            Self::ClinicalReadout => "clinical_readout",
            Self::Earnings => "earnings",
            Self::ConferencePres => "conference_pres",
            Self::Partnership => "partnership",
            Self::SecFiling => "sec_filing",
            Self::MacroRelease => "macro_release",
            Self::CompetitorEvent => "competitor_event",
            Self::Other => "other",
        };
        write!(f, "{tag}")
    }
}

impl FromStr for EventType {
    type Err = RaterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fda_pdufa" => Ok(Self::FdaPdufa),
            "fda_adcom" => Ok(Self::FdaAdcom),
            "clinical_readout" => Ok(Self::ClinicalReadout),
            "earnings" => Ok(Self::Earnings),
            "conference_pres" => Ok(Self::ConferencePres),
            "partnership" => Ok(Self::Partnership),
            "sec_filing" => Ok(Self::SecFiling),
            "macro_release" => Ok(Self::MacroRelease),
            "competitor_event" => Ok(Self::CompetitorEvent),
            "other" => Ok(Self::Other),
            _ => Err(RaterError::validation(
                "event_type",
                format!("unknown event type '{s}'"),
            )),
        }
    }
}

/// Analyst / community sentiment captured qualitatively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentTag {
    StrongSell,
    Sell,
    Hold,
    Buy,
    StrongBuy,
}

impl fmt::Display for SentimentTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::StrongSell => "strong_sell",
            Self::Sell => "sell",
            Self::Hold => "hold",
            Self::Buy => "buy",
            Self::StrongBuy => "strong_buy",
        };
        write!(f, "{tag}")
    }
}

impl FromStr for SentimentTag {
    type Err = RaterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strong_sell" => Ok(Self::StrongSell),
            "sell" => Ok(Self::Sell),
            "hold" => Ok(Self::Hold),
            "buy" => Ok(Self::Buy),
            "strong_buy" => Ok(Self::StrongBuy),
            _ => Err(RaterError::validation(
                "sentiment",
                format!("unknown sentiment tag '{s}'"),
            )),
        }
    }
}

/// Post-event outcome classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventOutcome {
    Pending,
    Positive,
    Negative,
    Neutral,
    Mixed,
}

impl fmt::Display for EventOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::Pending => "pending",
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
            Self::Mixed => "mixed",
        };
        write!(f, "{tag}")
    }
}

impl FromStr for EventOutcome {
    type Err = RaterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "positive" => Ok(Self::Positive),
            "negative" => Ok(Self::Negative),
            "neutral" => Ok(Self::Neutral),
            "mixed" => Ok(Self::Mixed),
            _ => Err(RaterError::validation(
                "outcome",
                format!("unknown outcome '{s}'"),
            )),
        }
    }
}

/// Qualitative benchmark trend bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendLabel {
    StrongRiskOn,
    RiskOn,
    Neutral,
    RiskOff,
    StrongRiskOff,
}

impl fmt::Display for TrendLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::StrongRiskOn => "strong_risk_on",
            Self::RiskOn => "risk_on",
            Self::Neutral => "neutral",
            Self::RiskOff => "risk_off",
            Self::StrongRiskOff => "strong_risk_off",
        };
        write!(f, "{tag}")
    }
}

/// Point-in-time benchmark snapshot taken before the event.
///
/// Shaped by an external [`crate::traits::MarketDataProvider`]; the core only
/// reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// Qualitative trend bucket for the broad benchmark.
    pub trend: TrendLabel,
    /// Benchmark 5-period return before the event (%).
    pub benchmark_return_pct: Option<f64>,
    /// Sector benchmark 5-period return before the event (%).
    pub sector_return_pct: Option<f64>,
    /// Volatility index level at snapshot time.
    pub volatility_level: Option<f64>,
}

/// Outcome sub-record, populated exactly once by resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    pub tag: EventOutcome,
    #[serde(default)]
    pub notes: String,
    /// Stock % move on event day, signed.
    pub realized_move_pct: Option<f64>,
    /// IV drop post-event (%), signed; positive means volatility fell.
    pub iv_crush_pct: Option<f64>,
}

impl Default for OutcomeRecord {
    fn default() -> Self {
        Self {
            tag: EventOutcome::Pending,
            notes: String::new(),
            realized_move_pct: None,
            iv_crush_pct: None,
        }
    }
}

/// A trackable catalyst for one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Stable composite id: `TICKER_YYYY-MM-DD_xxxxxxxx`.
    pub id: String,
    pub ticker: String,
    pub company_name: String,
    pub event_type: EventType,
    pub event_date: NaiveDate,
    pub description: String,
    pub sentiment: SentimentTag,
    #[serde(default)]
    pub analyst_notes: String,
    /// E.g. "Phase 3", "NDA filed".
    pub pipeline_stage: Option<String>,
    /// Disease / therapeutic area.
    pub indication: Option<String>,
    /// E.g. "OS improvement >= 3mo".
    pub primary_endpoint: Option<String>,
    #[serde(default)]
    pub competing_drugs: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub market_snapshot: Option<MarketSnapshot>,
    #[serde(default)]
    pub outcome: OutcomeRecord,
}

impl Event {
    /// True once the outcome tag has left `pending`.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.outcome.tag != EventOutcome::Pending
    }
}
