use crate::functions::traits::{Indicator, StatefulIndicator};

/// Relative Strength Index with Wilder smoothing
pub struct RSI {
    pub period: usize,
}

impl RSI {
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

/// State for bar-by-bar RSI calculation
#[derive(Debug, Clone, Default)]
pub struct RSIState {
    prev_close: Option<f64>,
    changes_seen: usize,
    gain_sum: f64,
    loss_sum: f64,
    /// (avg_gain, avg_loss) once the first full window has been seen
    averages: Option<(f64, f64)>,
}

/// RSI from smoothed averages. A window with neither gains nor losses has no RSI.
pub fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> Option<f64> {
    if avg_loss == 0.0 {
        if avg_gain > 0.0 {
            Some(100.0)
        } else {
            None
        }
    } else {
        let rs = avg_gain / avg_loss;
        Some(100.0 - (100.0 / (1.0 + rs)))
    }
}

impl Indicator for RSI {
    fn ui_name(&self) -> &'static str { "Relative Strength Index" }
    fn value_range(&self) -> Option<(f64, f64)> { Some((0.0, 100.0)) }

    // One change per bar after the first, and `period` changes for the seed average.
    fn warmup(&self) -> usize { self.period }
}

impl StatefulIndicator for RSI {
    type State = RSIState;

    fn init_state(&self) -> RSIState {
        RSIState::default()
    }

    fn calculate_stateful(&self, close: f64, state: &mut RSIState) -> Option<f64> {
        let prev_close = state.prev_close.replace(close)?;
        let change = close - prev_close;

        let gain = if change > 0.0 { change } else { 0.0 };
        let loss = if change < 0.0 { -change } else { 0.0 };

        let period = self.period as f64;
        let (avg_gain, avg_loss) = match state.averages {
            Some((avg_gain, avg_loss)) => (
                (avg_gain * (period - 1.0) + gain) / period,
                (avg_loss * (period - 1.0) + loss) / period,
            ),
            None => {
                state.changes_seen += 1;
                state.gain_sum += gain;
                state.loss_sum += loss;
                if state.changes_seen < self.period {
                    return None;
                }
                (state.gain_sum / period, state.loss_sum / period)
            }
        };

        state.averages = Some((avg_gain, avg_loss));
        rsi_from_averages(avg_gain, avg_loss)
    }
}
