use cryptoscalp::engines::IndicatorEngine;
use cryptoscalp::functions::indicators::volatility::{BB_LOWER, BB_MIDDLE, BB_UPPER};
use cryptoscalp::functions::indicators::{BollingerBands, RSI};
use cryptoscalp::functions::traits::{Indicator, IndicatorArg, VectorizedIndicator};
use polars::df;
use polars::lazy::dsl;
use polars::prelude::*;

fn scenario_closes() -> Vec<f64> {
    let mut closes = vec![100.0; 19];
    closes.extend([80.0, 79.0, 78.0, 77.0, 76.0, 75.0]);
    closes
}

fn assert_close(actual: Option<f64>, expected: f64) {
    let actual = actual.expect("value should be defined");
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {}, got {}",
        expected,
        actual
    );
}

// ===== Bollinger Bands =====

#[test]
fn test_bollinger_vectorized_uses_sample_std() {
    let df = df! {
        "close" => &[1.0, 2.0, 3.0, 4.0, 5.0],
    }
    .unwrap();

    let bb = BollingerBands::new(3, 2.0);
    let exprs = bb
        .calculate_vectorized(&[IndicatorArg::Series(dsl::col("close"))])
        .unwrap();

    let result = df.lazy().select(exprs).collect().unwrap();
    let lower = result.column(BB_LOWER).unwrap().f64().unwrap();
    let middle = result.column(BB_MIDDLE).unwrap().f64().unwrap();
    let upper = result.column(BB_UPPER).unwrap().f64().unwrap();

    // First two rows have no full window
    assert_eq!(middle.get(1), None);
    // Window [1, 2, 3]: mean 2, sample sd 1
    assert_eq!(middle.get(2), Some(2.0));
    assert!((upper.get(2).unwrap() - 4.0).abs() < 1e-9);
    assert!((lower.get(2).unwrap() - 0.0).abs() < 1e-9);
}

#[test]
fn test_constant_closes_collapse_bands() {
    let engine = IndicatorEngine::default();
    let set = engine.compute(&vec![50.0; 40]).unwrap();

    for point in set.iter().skip(19) {
        assert_eq!(point.bb_middle, Some(50.0));
        assert_eq!(point.bb_upper, Some(50.0));
        assert_eq!(point.bb_lower, Some(50.0));
    }
    // No movement at all: RSI has nothing to divide
    assert!(set.iter().all(|p| p.rsi.is_none()));
}

#[test]
fn test_fewer_than_twenty_bars_has_no_bands() {
    let engine = IndicatorEngine::default();
    let closes: Vec<f64> = (0..19).map(|i| 100.0 - i as f64).collect();
    let set = engine.compute(&closes).unwrap();

    assert_eq!(set.len(), 19);
    assert!(set
        .iter()
        .all(|p| p.bb_lower.is_none() && p.bb_middle.is_none() && p.bb_upper.is_none()));
}

#[test]
fn test_scenario_band_values() {
    let set = IndicatorEngine::default().compute(&scenario_closes()).unwrap();

    for i in 0..19 {
        assert!(set.get(i).unwrap().bb_lower.is_none(), "band defined at {}", i);
    }

    let expected_lower = [
        (19, 90.05572809),
        (20, 85.32629632),
        (21, 81.44972659),
        (22, 78.02337255),
        (23, 74.89871111),
        (24, 72.00580575),
    ];
    for (i, lower) in expected_lower {
        assert_close(set.get(i).unwrap().bb_lower, lower);
    }

    assert_close(set.get(19).unwrap().bb_middle, 99.0);
    assert_close(set.get(24).unwrap().bb_upper, 114.49419425);
    assert_close(set.get(24).unwrap().band_width(), 42.48838851);
}

// ===== RSI =====

#[test]
fn test_rsi_first_value_at_period() {
    let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
    let set = IndicatorEngine::default().compute(&closes).unwrap();

    assert!(set.get(13).unwrap().rsi.is_none());
    // Only gains: RSI saturates at 100
    assert_close(set.get(14).unwrap().rsi, 100.0);
    assert_close(set.get(29).unwrap().rsi, 100.0);
}

#[test]
fn test_rsi_scenario_reaches_zero() {
    let set = IndicatorEngine::default().compute(&scenario_closes()).unwrap();

    for i in 14..19 {
        assert!(set.get(i).unwrap().rsi.is_none(), "flat window should be undefined at {}", i);
    }
    for i in 19..25 {
        assert_close(set.get(i).unwrap().rsi, 0.0);
    }
}

#[test]
fn test_rsi_stays_within_bounds() {
    let rsi = RSI::new(14);
    let (lo, hi) = rsi.value_range().unwrap();

    let closes: Vec<f64> = (0..200)
        .map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0 + (i as f64 * 0.13).cos() * 3.0)
        .collect();
    let set = IndicatorEngine::default().compute(&closes).unwrap();

    for point in set.iter() {
        if let Some(v) = point.rsi {
            assert!(v >= lo && v <= hi, "RSI out of range: {}", v);
        }
    }
}

#[test]
fn test_rsi_wilder_smoothing() {
    // 14 alternating changes of +1/-1 seed both averages at 0.5
    let mut closes = vec![100.0];
    for i in 0..14 {
        let prev = *closes.last().unwrap();
        closes.push(if i % 2 == 0 { prev + 1.0 } else { prev - 1.0 });
    }
    let seed = IndicatorEngine::default().compute(&closes).unwrap();
    assert_close(seed.get(14).unwrap().rsi, 50.0);

    // One more +2: gain = (0.5*13 + 2)/14, loss = (0.5*13)/14
    closes.push(closes[14] + 2.0);
    let set = IndicatorEngine::default().compute(&closes).unwrap();
    let avg_gain = (0.5 * 13.0 + 2.0) / 14.0;
    let avg_loss = (0.5 * 13.0) / 14.0;
    let expected = 100.0 - 100.0 / (1.0 + avg_gain / avg_loss);
    assert_close(set.get(15).unwrap().rsi, expected);
}

// ===== Look-ahead =====

#[test]
fn test_truncation_leaves_prefix_unchanged() {
    let closes: Vec<f64> = (0..120)
        .map(|i| 200.0 + (i as f64 * 0.31).sin() * 10.0 - i as f64 * 0.05)
        .collect();
    let engine = IndicatorEngine::default();

    let full = engine.compute(&closes).unwrap();
    for cut in [15, 20, 37, 80] {
        let partial = engine.compute(&closes[..cut]).unwrap();
        assert_eq!(partial.len(), cut);
        for i in 0..cut {
            let (a, b) = (partial.get(i).unwrap(), full.get(i).unwrap());
            for (x, y) in [
                (a.rsi, b.rsi),
                (a.bb_lower, b.bb_lower),
                (a.bb_middle, b.bb_middle),
                (a.bb_upper, b.bb_upper),
            ] {
                match (x, y) {
                    (Some(x), Some(y)) => assert!((x - y).abs() < 1e-9, "index {} differs", i),
                    (None, None) => {}
                    _ => panic!("definedness differs at index {} (cut {})", i, cut),
                }
            }
        }
    }
}

#[test]
fn test_min_history_follows_periods() {
    assert_eq!(IndicatorEngine::new(14, 20, 2.0).min_history(), 20);
    assert_eq!(IndicatorEngine::new(30, 20, 2.0).min_history(), 31);
}
