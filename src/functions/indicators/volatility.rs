use anyhow::{bail, Result};
use polars::lazy::dsl;
use polars::prelude::RollingOptionsFixedWindow;
use crate::functions::traits::{Indicator, IndicatorArg, VectorizedIndicator};

pub const BB_LOWER: &str = "bb_lower";
pub const BB_MIDDLE: &str = "bb_middle";
pub const BB_UPPER: &str = "bb_upper";

/// Standard deviations below this fraction of the mean count as a flat window
const FLAT_WINDOW_TOLERANCE: f64 = 1e-8;

// --- Bollinger Bands ---
pub struct BollingerBands {
    pub period: usize,
    pub deviation: f64,
}

impl BollingerBands {
    pub fn new(period: usize, deviation: f64) -> Self {
        Self { period, deviation }
    }
}

impl Indicator for BollingerBands {
    fn ui_name(&self) -> &'static str {
        "Bollinger Bands"
    }
    fn value_range(&self) -> Option<(f64, f64)> {
        None
    }
    fn warmup(&self) -> usize {
        self.period.saturating_sub(1)
    }
}

impl VectorizedIndicator for BollingerBands {
    /// Lower, middle and upper band, aliased `bb_lower`, `bb_middle`, `bb_upper`.
    /// The deviation is the sample standard deviation of the window.
    fn calculate_vectorized(&self, args: &[IndicatorArg]) -> Result<Vec<dsl::Expr>> {
        let series = match args.first() {
            Some(IndicatorArg::Series(expr)) => expr.clone(),
            _ => bail!("BB: first arg must be series"),
        };
        if self.period < 2 {
            bail!("BB: period must be at least 2, got {}", self.period);
        }

        let options = RollingOptionsFixedWindow {
            window_size: self.period,
            min_periods: self.period,
            ..Default::default()
        };

        let middle_band = series.clone().rolling_mean(options.clone());
        let raw_std = series.rolling_std(options);

        // Rolling variance keeps a residue after price moves; a flat window must give 0
        let tolerance = middle_band.clone() * dsl::lit(FLAT_WINDOW_TOLERANCE);
        let std_dev = dsl::when(
            (raw_std.clone() * raw_std.clone()).lt_eq(tolerance.clone() * tolerance),
        )
        .then(dsl::lit(0.0))
        .otherwise(raw_std);
        let offset = dsl::lit(self.deviation) * std_dev;

        Ok(vec![
            (middle_band.clone() - offset.clone()).alias(BB_LOWER),
            middle_band.clone().alias(BB_MIDDLE),
            (middle_band + offset).alias(BB_UPPER),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;
    use polars::prelude::*;

    #[test]
    fn test_bands_from_polars() {
        let df = df! {
            "close" => &[1.0, 2.0, 3.0, 4.0, 5.0],
        }
        .unwrap();

        let bb = BollingerBands::new(3, 2.0);
        let exprs = bb
            .calculate_vectorized(&[IndicatorArg::Series(dsl::col("close"))])
            .unwrap();
        let out = df.lazy().select(exprs).collect().unwrap();

        let middle = out.column(BB_MIDDLE).unwrap().f64().unwrap();
        let upper = out.column(BB_UPPER).unwrap().f64().unwrap();
        let lower = out.column(BB_LOWER).unwrap().f64().unwrap();

        assert_eq!(middle.get(1), None);
        assert!((middle.get(2).unwrap() - 2.0).abs() < 1e-12);
        // sample std of (1, 2, 3) is 1
        assert!((upper.get(2).unwrap() - 4.0).abs() < 1e-9);
        assert!((lower.get(2).unwrap() - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_flat_window_after_move_collapses() {
        let mut closes = vec![100.0; 20];
        closes.extend(vec![80.0; 41]);
        let df = df! { "close" => &closes }.unwrap();

        let bb = BollingerBands::new(20, 2.0);
        let exprs = bb
            .calculate_vectorized(&[IndicatorArg::Series(dsl::col("close"))])
            .unwrap();
        let out = df.lazy().select(exprs).collect().unwrap();

        let middle = out.column(BB_MIDDLE).unwrap().f64().unwrap();
        let upper = out.column(BB_UPPER).unwrap().f64().unwrap();
        let lower = out.column(BB_LOWER).unwrap().f64().unwrap();

        for i in 39..closes.len() {
            let mid = middle.get(i).unwrap();
            assert!((mid - 80.0).abs() < 1e-9, "middle at {} is {}", i, mid);
            assert_eq!(lower.get(i), Some(mid), "lower at {}", i);
            assert_eq!(upper.get(i), Some(mid), "upper at {}", i);
        }
        // The move itself still widens the bands
        assert!(upper.get(25).unwrap() > middle.get(25).unwrap());
    }

    #[test]
    fn test_rejects_scalar_input() {
        let bb = BollingerBands::new(20, 2.0);
        assert!(bb.calculate_vectorized(&[IndicatorArg::Scalar(1.0)]).is_err());
    }
}
