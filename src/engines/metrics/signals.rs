// src/engines/metrics/signals.rs
use crate::types::{Signal, SignalStats};

pub struct SignalMetrics;

impl SignalMetrics {
    pub fn calculate(signals: &[Signal]) -> SignalStats {
        let buy_count = signals.iter().filter(|s| s.is_buy()).count();
        let sell_count = signals.iter().filter(|s| s.is_sell()).count();
        let last_signal = signals
            .iter()
            .enumerate()
            .rev()
            .find(|(_, s)| !matches!(s, Signal::None))
            .map(|(i, s)| (i, *s));

        SignalStats {
            buy_count,
            sell_count,
            last_signal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_last_signal() {
        let signals = vec![
            Signal::None,
            Signal::Buy { price: 10.0 },
            Signal::Sell { price: 12.0 },
            Signal::Buy { price: 9.5 },
            Signal::None,
        ];
        let stats = SignalMetrics::calculate(&signals);

        assert_eq!(stats.buy_count, 2);
        assert_eq!(stats.sell_count, 1);
        assert_eq!(stats.last_signal, Some((3, Signal::Buy { price: 9.5 })));
    }

    #[test]
    fn test_no_signals() {
        let stats = SignalMetrics::calculate(&[Signal::None; 4]);
        assert_eq!(stats, SignalStats::default());
    }
}
