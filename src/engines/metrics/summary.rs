// src/engines/metrics/summary.rs
use crate::types::{Bar, IndicatorSet, MarketCondition, MarketSummary, SignalThresholds};

pub struct SummaryMetrics;

impl SummaryMetrics {
    /// Last-bar metrics. With fewer than `min_history` bars only the close is
    /// reported; RSI, band width and condition stay undefined.
    pub fn calculate(
        bars: &[Bar],
        indicators: &IndicatorSet,
        thresholds: &SignalThresholds,
        min_history: usize,
    ) -> MarketSummary {
        let current_close = bars.last().map(|b| b.close);

        if bars.len() < min_history {
            return MarketSummary {
                current_close,
                ..Default::default()
            };
        }

        let last = indicators.last().copied().unwrap_or_default();
        let current_rsi = last.rsi;

        MarketSummary {
            current_close,
            current_rsi,
            band_width: last.band_width(),
            condition: current_rsi.map(|rsi| Self::condition(rsi, thresholds)),
        }
    }

    /// Overbought is checked before oversold, matching the status line of the dashboard.
    pub fn condition(rsi: f64, thresholds: &SignalThresholds) -> MarketCondition {
        if rsi > thresholds.upper {
            MarketCondition::Overbought
        } else if rsi < thresholds.lower {
            MarketCondition::Oversold
        } else {
            MarketCondition::Neutral
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_bands() {
        let t = SignalThresholds::default();
        assert_eq!(SummaryMetrics::condition(80.0, &t), MarketCondition::Overbought);
        assert_eq!(SummaryMetrics::condition(20.0, &t), MarketCondition::Oversold);
        assert_eq!(SummaryMetrics::condition(75.0, &t), MarketCondition::Neutral);
        assert_eq!(SummaryMetrics::condition(25.0, &t), MarketCondition::Neutral);
    }

    #[test]
    fn test_inverted_thresholds_prefer_overbought() {
        let t = SignalThresholds { lower: 60.0, upper: 40.0 };
        assert_eq!(SummaryMetrics::condition(50.0, &t), MarketCondition::Overbought);
    }

    #[test]
    fn test_empty_scan_has_no_summary() {
        let summary = SummaryMetrics::calculate(&[], &IndicatorSet::default(), &SignalThresholds::default(), 20);
        assert_eq!(summary, MarketSummary::default());
    }
}
