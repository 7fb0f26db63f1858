//! Options trade rating derived from scored catalyst events.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::RaterError;

/// Recommended options structure for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    LongCall,
    LongPut,
    LongStraddle,
    LongStrangle,
    BullCallSpread,
    BearPutSpread,
    IronCondor,
    CalendarSpread,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::LongCall => "long_call",
            Self::LongPut => "long_put",
            Self::LongStraddle => "long_straddle",
            Self::LongStrangle => "long_strangle",
            Self::BullCallSpread => "bull_call_spread",
            Self::BearPutSpread => "bear_put_spread",
            Self::IronCondor => "iron_condor",
            Self::CalendarSpread => "calendar_spread",
        };
        write!(f, "{tag}")
    }
}

/// Letter grade for the options setup. Ordered best-first so sorting a
/// grade-keyed map lists A+ before F.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "F")]
    F,
}

impl Grade {
    /// Maps a 0-100 composite score to a letter grade. Step function,
    /// evaluated high-to-low; boundary values map to the higher band.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            Self::APlus
        } else if score >= 80.0 {
            Self::A
        } else if score >= 70.0 {
            Self::BPlus
        } else if score >= 60.0 {
            Self::B
        } else if score >= 50.0 {
            Self::C
        } else if score >= 30.0 {
            Self::D
        } else {
            Self::F
        }
    }

    /// Maximum % of portfolio to risk on a setup of this grade.
    #[must_use]
    pub fn max_risk_pct(&self) -> f64 {
        match self {
            Self::APlus => 3.0,
            Self::A => 2.5,
            Self::BPlus => 2.0,
            Self::B => 1.5,
            Self::C => 1.0,
            Self::D => 0.5,
            Self::F => 0.0,
        }
    }

    /// All grades, best first.
    #[must_use]
    pub fn all() -> [Self; 7] {
        [
            Self::APlus,
            Self::A,
            Self::BPlus,
            Self::B,
            Self::C,
            Self::D,
            Self::F,
        ]
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        };
        write!(f, "{tag}")
    }
}

impl FromStr for Grade {
    type Err = RaterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A+" => Ok(Self::APlus),
            "A" => Ok(Self::A),
            "B+" => Ok(Self::BPlus),
            "B" => Ok(Self::B),
            "C" => Ok(Self::C),
            "D" => Ok(Self::D),
            "F" => Ok(Self::F),
            _ => Err(RaterError::validation(
                "grade",
                format!("unknown grade '{s}'"),
            )),
        }
    }
}

/// Weight applied to each scoring dimension. The engine validates weights are
/// non-negative and never renormalizes — callers own the combination.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionWeights {
    pub catalyst_quality: f64,
    pub sentiment_alignment: f64,
    pub market_context: f64,
    pub iv_environment: f64,
    pub historical_accuracy: f64,
    pub competitive_moat: f64,
    pub risk_reward: f64,
}

impl Default for DimensionWeights {
    fn default() -> Self {
        Self {
            catalyst_quality: 0.25,
            sentiment_alignment: 0.15,
            market_context: 0.15,
            iv_environment: 0.15,
            historical_accuracy: 0.10,
            competitive_moat: 0.10,
            risk_reward: 0.10,
        }
    }
}

impl DimensionWeights {
    /// Rejects negative weights. Weights that do not sum to 1.0 are accepted;
    /// the composite is clamped after summation.
    pub fn validate(&self) -> crate::error::Result<()> {
        let named = [
            ("catalyst_quality", self.catalyst_quality),
            ("sentiment_alignment", self.sentiment_alignment),
            ("market_context", self.market_context),
            ("iv_environment", self.iv_environment),
            ("historical_accuracy", self.historical_accuracy),
            ("competitive_moat", self.competitive_moat),
            ("risk_reward", self.risk_reward),
        ];
        for (field, value) in named {
            if value < 0.0 {
                return Err(RaterError::validation(
                    field,
                    format!("weight must be non-negative, got {value}"),
                ));
            }
        }
        Ok(())
    }
}

/// Decomposed scoring components, each 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub catalyst_quality: f64,
    pub sentiment_alignment: f64,
    pub market_context: f64,
    pub iv_environment: f64,
    pub historical_accuracy: f64,
    pub competitive_moat: f64,
    pub risk_reward: f64,
}

impl ScoreBreakdown {
    /// The seven dimension scores in weight-table order.
    #[must_use]
    pub fn scores(&self) -> [f64; 7] {
        [
            self.catalyst_quality,
            self.sentiment_alignment,
            self.market_context,
            self.iv_environment,
            self.historical_accuracy,
            self.competitive_moat,
            self.risk_reward,
        ]
    }

    /// Exact weighted sum of the seven scores, clamped to [0, 100].
    #[must_use]
    pub fn weighted_total(&self, weights: &DimensionWeights) -> f64 {
        let total = self.catalyst_quality * weights.catalyst_quality
            + self.sentiment_alignment * weights.sentiment_alignment
            + self.market_context * weights.market_context
            + self.iv_environment * weights.iv_environment
            + self.historical_accuracy * weights.historical_accuracy
            + self.competitive_moat * weights.competitive_moat
            + self.risk_reward * weights.risk_reward;
        total.clamp(0.0, 100.0)
    }

    /// Named (dimension, score) pairs for report rendering.
    #[must_use]
    pub fn named_scores(&self) -> [(&'static str, f64); 7] {
        [
            ("catalyst_quality", self.catalyst_quality),
            ("sentiment_alignment", self.sentiment_alignment),
            ("market_context", self.market_context),
            ("iv_environment", self.iv_environment),
            ("historical_accuracy", self.historical_accuracy),
            ("competitive_moat", self.competitive_moat),
            ("risk_reward", self.risk_reward),
        ]
    }
}

/// Full options trade rating for one event. Immutable once created; a
/// rescoring produces a new value that supersedes the old one in storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Id of the event this rates.
    pub event_id: String,
    pub ticker: String,
    pub rated_on: NaiveDate,
    pub breakdown: ScoreBreakdown,
    /// Weight set that produced the composite.
    pub weights: DimensionWeights,
    pub composite_score: f64,
    pub grade: Grade,
    pub strategy: Strategy,
    /// Model confidence in the rating, 0-100.
    pub confidence_pct: f64,
    /// Calendar days until the event at scoring time, floored at 0.
    pub days_to_event: i64,
    /// Unsigned target delta for the recommended structure.
    pub suggested_delta: f64,
    /// Maximum % of portfolio to risk, from the grade.
    pub max_risk_pct: f64,
}
