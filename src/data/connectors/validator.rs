use crate::error::{Result, CryptoscalpError};
use crate::types::Bar;
use polars::prelude::*;
use super::types::RequiredColumn;
use std::collections::HashMap;

pub struct DataValidator;

impl DataValidator {
    /// Validate that DataFrame has required OHLCV columns
    pub fn validate_ohlcv(df: &DataFrame) -> Result<HashMap<RequiredColumn, String>> {
        let mut column_map = HashMap::new();

        for required in RequiredColumn::all() {
            match Self::find_column(df, &required) {
                Some(col_name) => {
                    column_map.insert(required, col_name.to_string());
                }
                None => {
                    return Err(CryptoscalpError::DataLoading(format!(
                        "Missing required column: {} (tried aliases: {:?})",
                        required.as_str(),
                        required.aliases()
                    )));
                }
            }
        }

        // Validate column types are numeric
        for (req_col, actual_name) in &column_map {
            let series = df.column(actual_name)?;
            if !matches!(series.dtype(), DataType::Float64 | DataType::Float32 | DataType::Int64 | DataType::Int32 | DataType::UInt64 | DataType::UInt32) {
                return Err(CryptoscalpError::DataLoading(format!(
                    "Column '{}' ({}) must be numeric, found {:?}",
                    actual_name,
                    req_col.as_str(),
                    series.dtype()
                )));
            }
        }

        Self::validate_ohlc_relationships(df, &column_map)?;

        Ok(column_map)
    }

    /// Find column by checking aliases
    pub fn find_column<'a>(df: &'a DataFrame, required: &RequiredColumn) -> Option<&'a str> {
        df.get_column_names()
            .into_iter()
            .find(|col| required.aliases().contains(&col.as_str()))
            .map(|col| col.as_str())
    }

    /// Validate OHLC relationships (high >= low, high >= open, high >= close, etc.)
    fn validate_ohlc_relationships(
        df: &DataFrame,
        column_map: &HashMap<RequiredColumn, String>,
    ) -> Result<()> {
        let column = |required: RequiredColumn| -> Result<Column> {
            let name = column_map.get(&required).ok_or_else(|| {
                CryptoscalpError::DataLoading(format!("Missing required column: {}", required.as_str()))
            })?;
            Ok(df.column(name)?.cast(&DataType::Float64)?)
        };

        let open = column(RequiredColumn::Open)?;
        let high = column(RequiredColumn::High)?;
        let low = column(RequiredColumn::Low)?;
        let close = column(RequiredColumn::Close)?;

        let open = open.f64()?;
        let high = high.f64()?;
        let low = low.f64()?;
        let close = close.f64()?;

        for i in 0..df.height() {
            if let (Some(h), Some(l), Some(o), Some(c)) = (
                high.get(i),
                low.get(i),
                open.get(i),
                close.get(i),
            ) {
                if h < l {
                    return Err(CryptoscalpError::DataLoading(format!(
                        "Invalid data at row {}: high ({}) < low ({})",
                        i, h, l
                    )));
                }
                if h < o || h < c {
                    return Err(CryptoscalpError::DataLoading(format!(
                        "Invalid data at row {}: high ({}) < open ({}) or close ({})",
                        i, h, o, c
                    )));
                }
                if l > o || l > c {
                    return Err(CryptoscalpError::DataLoading(format!(
                        "Invalid data at row {}: low ({}) > open ({}) or close ({})",
                        i, l, o, c
                    )));
                }
            }
        }

        Ok(())
    }

    /// Check for null values in critical columns
    pub fn check_nulls(df: &DataFrame) -> Result<Vec<(String, usize)>> {
        let mut null_report = Vec::new();

        for col_name in df.get_column_names() {
            let series = df.column(col_name)?;
            let null_count = series.null_count();
            if null_count > 0 {
                null_report.push((col_name.to_string(), null_count));
            }
        }

        Ok(null_report)
    }

    /// Keep only bars whose timestamp is strictly later than the previous kept bar
    pub fn enforce_increasing(bars: Vec<Bar>) -> Vec<Bar> {
        let total = bars.len();
        let mut kept: Vec<Bar> = Vec::with_capacity(total);

        for bar in bars {
            match kept.last() {
                Some(prev) if bar.timestamp <= prev.timestamp => {}
                _ => kept.push(bar),
            }
        }

        if kept.len() < total {
            log::warn!(
                "Dropped {} bars with non-increasing timestamps",
                total - kept.len()
            );
        }

        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use polars::df;

    fn bar(ts: i64, close: f64) -> Bar {
        Bar {
            timestamp: DateTime::<Utc>::from_timestamp(ts, 0).unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            volume: 1.0,
        }
    }

    #[test]
    fn test_validate_good_data() {
        let df = df! {
            "open" => &[100.0, 101.0, 102.0],
            "high" => &[101.0, 103.0, 104.0],
            "low" => &[99.0, 100.0, 101.0],
            "close" => &[100.5, 102.0, 103.0],
            "volume" => &[1000.0, 1500.0, 1200.0],
        }
        .unwrap();

        let result = DataValidator::validate_ohlcv(&df);
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_missing_column() {
        let df = df! {
            "open" => &[100.0, 101.0],
            "high" => &[101.0, 103.0],
            "low" => &[99.0, 100.0],
            // Missing 'close'
            "volume" => &[1000.0, 1500.0],
        }
        .unwrap();

        let result = DataValidator::validate_ohlcv(&df);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_invalid_ohlc() {
        let df = df! {
            "open" => &[100.0, 101.0],
            "high" => &[99.0, 103.0], // High < Open at row 0
            "low" => &[99.0, 100.0],
            "close" => &[100.5, 102.0],
            "volume" => &[1000.0, 1500.0],
        }
        .unwrap();

        let result = DataValidator::validate_ohlcv(&df);
        assert!(result.is_err());
    }

    #[test]
    fn test_column_aliases() {
        let df = df! {
            "Open" => &[100.0, 101.0],
            "HIGH" => &[101.0, 103.0],
            "low" => &[99.0, 100.0],
            "Close" => &[100.5, 102.0],
            "Vol" => &[1000.0, 1500.0],
        }
        .unwrap();

        let map = DataValidator::validate_ohlcv(&df).unwrap();
        assert_eq!(map[&RequiredColumn::Volume], "Vol");
        assert_eq!(map[&RequiredColumn::High], "HIGH");
    }

    #[test]
    fn test_enforce_increasing_drops_duplicates_and_rewinds() {
        let bars = vec![bar(10, 1.0), bar(20, 2.0), bar(20, 2.5), bar(15, 3.0), bar(30, 4.0)];
        let kept = DataValidator::enforce_increasing(bars);

        let closes: Vec<f64> = kept.iter().map(|b| b.close).collect();
        assert_eq!(closes, vec![1.0, 2.0, 4.0]);
    }
}
