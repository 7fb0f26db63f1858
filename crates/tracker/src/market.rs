//! Qualitative market-trend bucketing.
//!
//! Providers hand the tracker pre-shaped numeric snapshots; this module
//! gives them a shared way to collapse benchmark returns and a volatility
//! level into a [`TrendLabel`].

use catalyst_rater_core::TrendLabel;

/// Buckets benchmark/sector returns and a volatility level into a trend
/// label. An unknown benchmark return is neutral.
#[must_use]
pub fn classify_trend(
    benchmark_return_pct: Option<f64>,
    sector_return_pct: Option<f64>,
    volatility_level: Option<f64>,
) -> TrendLabel {
    let Some(benchmark) = benchmark_return_pct else {
        return TrendLabel::Neutral;
    };

    let mut bullish: i32 = 0;
    if benchmark > 1.5 {
        bullish += 2;
    } else if benchmark > 0.0 {
        bullish += 1;
    } else if benchmark < -1.5 {
        bullish -= 2;
    } else if benchmark < 0.0 {
        bullish -= 1;
    }

    if let Some(sector) = sector_return_pct {
        if sector > 2.0 {
            bullish += 1;
        } else if sector < -2.0 {
            bullish -= 1;
        }
    }

    if let Some(vol) = volatility_level {
        if vol < 15.0 {
            bullish += 1;
        } else if vol > 35.0 {
            bullish -= 2;
        } else if vol > 25.0 {
            bullish -= 1;
        }
    }

    if bullish >= 3 {
        TrendLabel::StrongRiskOn
    } else if bullish >= 1 {
        TrendLabel::RiskOn
    } else if bullish <= -3 {
        TrendLabel::StrongRiskOff
    } else if bullish <= -1 {
        TrendLabel::RiskOff
    } else {
        TrendLabel::Neutral
    }
}
