use crate::{
    config::StrategyConfig,
    error::{CryptoscalpError, Result},
    functions::{
        indicators::{
            volatility::{BB_LOWER, BB_MIDDLE, BB_UPPER},
            BollingerBands, RSI,
        },
        traits::{Indicator, IndicatorArg, StatefulIndicator, VectorizedIndicator},
    },
    types::{IndicatorPoint, IndicatorSet},
};
use polars::df;
use polars::prelude::*;

type Bands = (Option<f64>, Option<f64>, Option<f64>);

/// Computes RSI and Bollinger Bands over a close series.
///
/// Every output at index `i` only looks at closes `0..=i`, so truncating the
/// input never changes the values at the indices that remain.
pub struct IndicatorEngine {
    rsi: RSI,
    bollinger: BollingerBands,
}

impl Default for IndicatorEngine {
    fn default() -> Self {
        Self::from_config(&StrategyConfig::default())
    }
}

impl IndicatorEngine {
    pub fn new(rsi_period: usize, bb_period: usize, bb_std_dev: f64) -> Self {
        Self {
            rsi: RSI::new(rsi_period),
            bollinger: BollingerBands::new(bb_period, bb_std_dev),
        }
    }

    pub fn from_config(config: &StrategyConfig) -> Self {
        Self::new(config.rsi_period, config.bb_period, config.bb_std_dev)
    }

    /// Bars needed before both indicators can carry a value at the last bar
    pub fn min_history(&self) -> usize {
        self.rsi.warmup().max(self.bollinger.warmup()) + 1
    }

    pub fn compute(&self, closes: &[f64]) -> Result<IndicatorSet> {
        log::debug!(
            "Computing {} ({}) and {} ({}, {}) over {} closes",
            self.rsi.ui_name(),
            self.rsi.period,
            self.bollinger.ui_name(),
            self.bollinger.period,
            self.bollinger.deviation,
            closes.len()
        );

        let rsi = self.compute_rsi(closes);
        let bands = self.compute_bands(closes)?;

        let points = rsi
            .into_iter()
            .zip(bands)
            .map(|(rsi, (bb_lower, bb_middle, bb_upper))| IndicatorPoint {
                rsi,
                bb_lower,
                bb_middle,
                bb_upper,
            })
            .collect();

        Ok(IndicatorSet { points })
    }

    fn compute_rsi(&self, closes: &[f64]) -> Vec<Option<f64>> {
        let mut state = self.rsi.init_state();
        closes
            .iter()
            .map(|&close| self.rsi.calculate_stateful(close, &mut state))
            .collect()
    }

    fn compute_bands(&self, closes: &[f64]) -> Result<Vec<Bands>> {
        if closes.len() < self.bollinger.period {
            return Ok(vec![(None, None, None); closes.len()]);
        }

        let exprs = self
            .bollinger
            .calculate_vectorized(&[IndicatorArg::Series(col("close"))])
            .map_err(|e| CryptoscalpError::Indicator(e.to_string()))?;

        let frame = df! { "close" => closes }?.lazy().select(exprs).collect()?;

        let lower = frame.column(BB_LOWER)?.f64()?;
        let middle = frame.column(BB_MIDDLE)?.f64()?;
        let upper = frame.column(BB_UPPER)?.f64()?;

        Ok((0..closes.len())
            .map(|i| (lower.get(i), middle.get(i), upper.get(i)))
            .collect())
    }
}
