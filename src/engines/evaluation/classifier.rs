use crate::types::{Bar, IndicatorPoint, IndicatorSet, Signal, SignalThresholds};

/// Classify one bar from its close and the indicators of the same bar.
///
/// Buy needs the close below the lower band with RSI under the lower threshold;
/// Sell needs the close above the upper band with RSI over the upper threshold.
/// Buy is checked first. Any undefined input yields `Signal::None`.
pub fn classify_bar(close: f64, point: &IndicatorPoint, thresholds: &SignalThresholds) -> Signal {
    let (Some(rsi), Some(lower), Some(upper)) = (point.rsi, point.bb_lower, point.bb_upper) else {
        return Signal::None;
    };

    if close < lower && rsi < thresholds.lower {
        Signal::Buy { price: close }
    } else if close > upper && rsi > thresholds.upper {
        Signal::Sell { price: close }
    } else {
        Signal::None
    }
}

/// Map every bar to a signal. Bars without a matching indicator point get `None`.
pub fn classify_series(bars: &[Bar], indicators: &IndicatorSet, thresholds: &SignalThresholds) -> Vec<Signal> {
    bars.iter()
        .enumerate()
        .map(|(i, bar)| {
            indicators
                .get(i)
                .map_or(Signal::None, |point| classify_bar(bar.close, point, thresholds))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(rsi: f64, lower: f64, upper: f64) -> IndicatorPoint {
        IndicatorPoint {
            rsi: Some(rsi),
            bb_lower: Some(lower),
            bb_middle: Some((lower + upper) / 2.0),
            bb_upper: Some(upper),
        }
    }

    #[test]
    fn test_buy_below_lower_band() {
        let t = SignalThresholds::default();
        assert_eq!(classify_bar(89.0, &point(20.0, 90.0, 110.0), &t), Signal::Buy { price: 89.0 });
    }

    #[test]
    fn test_sell_above_upper_band() {
        let t = SignalThresholds::default();
        assert_eq!(classify_bar(111.0, &point(80.0, 90.0, 110.0), &t), Signal::Sell { price: 111.0 });
    }

    #[test]
    fn test_band_touch_without_rsi_confirmation() {
        let t = SignalThresholds::default();
        assert_eq!(classify_bar(89.0, &point(40.0, 90.0, 110.0), &t), Signal::None);
        assert_eq!(classify_bar(111.0, &point(60.0, 90.0, 110.0), &t), Signal::None);
    }

    #[test]
    fn test_strict_inequalities() {
        let t = SignalThresholds::default();
        assert_eq!(classify_bar(90.0, &point(10.0, 90.0, 110.0), &t), Signal::None);
        assert_eq!(classify_bar(89.0, &point(25.0, 90.0, 110.0), &t), Signal::None);
    }

    #[test]
    fn test_undefined_inputs() {
        let t = SignalThresholds::default();
        let p = IndicatorPoint {
            rsi: None,
            ..point(0.0, 90.0, 110.0)
        };
        assert_eq!(classify_bar(10.0, &p, &t), Signal::None);
        assert_eq!(classify_bar(10.0, &IndicatorPoint::default(), &t), Signal::None);
    }
}
