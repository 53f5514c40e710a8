use crate::error::{Result, CryptoscalpError};
use crate::types::{Bar, Interval, LookbackPeriod};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use super::{
    source::MarketDataSource,
    types::{DataPreview, RequiredColumn, DATETIME_ALIASES},
    validator::DataValidator,
};

/// Replays OHLCV rows from a CSV file. The whole file is one scan; symbol,
/// interval and period of the request are not used to filter it.
pub struct CsvConnector {
    path: PathBuf,
}

impl CsvConnector {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load CSV file into DataFrame
    pub fn load<P: AsRef<Path>>(path: P) -> Result<DataFrame> {
        let df = CsvReadOptions::default()
            .try_into_reader_with_file_path(Some(path.as_ref().to_path_buf()))?
            .finish()
            .map_err(|e| CryptoscalpError::DataLoading(format!("Failed to read CSV: {}", e)))?;

        Ok(df)
    }

    /// Load, validate and convert a CSV file into bars plus a sidebar preview
    pub fn load_bars<P: AsRef<Path>>(path: P) -> Result<(Vec<Bar>, DataPreview)> {
        let df = Self::load(&path)?;
        let columns: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();

        // Warn about nulls but don't fail
        let null_report = DataValidator::check_nulls(&df)?;
        if !null_report.is_empty() {
            log::warn!("Null values detected: {:?}", null_report);
        }

        let df = Self::normalize_columns(df)?;
        let bars = DataValidator::enforce_increasing(Self::to_bars(&df)?);

        let file_name = path
            .as_ref()
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let preview = DataPreview::from_bars(file_name, columns, &bars);

        log::info!("Loaded {} bars from {}", bars.len(), path.as_ref().display());
        Ok((bars, preview))
    }

    /// Normalize column names to lowercase standard names
    pub fn normalize_columns(mut df: DataFrame) -> Result<DataFrame> {
        let column_map = DataValidator::validate_ohlcv(&df)?;

        for (required, actual_name) in column_map {
            let standard_name = required.as_str();
            if actual_name != standard_name {
                df.rename(&actual_name, standard_name.into())
                    .map_err(|e| CryptoscalpError::DataLoading(format!("Failed to rename column: {}", e)))?;
            }
        }

        Ok(df)
    }

    /// Convert a normalized frame into bars. Rows with a null price or volume are skipped.
    pub fn to_bars(df: &DataFrame) -> Result<Vec<Bar>> {
        let timestamps = Self::timestamp_column(df)?;

        let numeric = |required: RequiredColumn| -> Result<Column> {
            Ok(df.column(required.as_str())?.cast(&DataType::Float64)?)
        };
        let open = numeric(RequiredColumn::Open)?;
        let high = numeric(RequiredColumn::High)?;
        let low = numeric(RequiredColumn::Low)?;
        let close = numeric(RequiredColumn::Close)?;
        let volume = numeric(RequiredColumn::Volume)?;

        let (open, high, low, close, volume) =
            (open.f64()?, high.f64()?, low.f64()?, close.f64()?, volume.f64()?);

        let mut bars = Vec::with_capacity(df.height());
        for (i, timestamp) in timestamps.into_iter().enumerate() {
            if let (Some(open), Some(high), Some(low), Some(close), Some(volume)) =
                (open.get(i), high.get(i), low.get(i), close.get(i), volume.get(i))
            {
                bars.push(Bar {
                    timestamp,
                    open,
                    high,
                    low,
                    close,
                    volume,
                });
            }
        }

        Ok(bars)
    }

    fn timestamp_column(df: &DataFrame) -> Result<Vec<DateTime<Utc>>> {
        let name = Self::detect_datetime_column(df).ok_or_else(|| {
            CryptoscalpError::DataLoading(format!(
                "Missing timestamp column (tried aliases: {:?})",
                DATETIME_ALIASES
            ))
        })?;
        let column = df.column(&name)?;

        let parsed: Vec<Option<DateTime<Utc>>> = match column.dtype() {
            DataType::String => column
                .str()?
                .into_iter()
                .map(|v| v.and_then(parse_timestamp))
                .collect(),
            DataType::Datetime(unit, _) => {
                let unit = *unit;
                let raw = column.cast(&DataType::Int64)?;
                raw.i64()?
                    .into_iter()
                    .map(|v| {
                        v.and_then(|v| match unit {
                            TimeUnit::Milliseconds => DateTime::from_timestamp_millis(v),
                            TimeUnit::Microseconds => DateTime::from_timestamp_micros(v),
                            TimeUnit::Nanoseconds => Some(DateTime::from_timestamp_nanos(v)),
                        })
                    })
                    .collect()
            }
            dtype if dtype.is_integer() || dtype.is_float() => {
                let raw = column.cast(&DataType::Int64)?;
                raw.i64()?.into_iter().map(|v| v.and_then(from_epoch)).collect()
            }
            other => {
                return Err(CryptoscalpError::DataLoading(format!(
                    "Timestamp column '{}' has unsupported type {:?}",
                    name, other
                )));
            }
        };

        parsed
            .into_iter()
            .enumerate()
            .map(|(i, ts)| {
                ts.ok_or_else(|| {
                    CryptoscalpError::DataLoading(format!("Unparseable timestamp at row {}", i))
                })
            })
            .collect()
    }

    fn detect_datetime_column(df: &DataFrame) -> Option<String> {
        let columns = df.get_column_names();
        DATETIME_ALIASES
            .iter()
            .find(|&&alias| columns.iter().any(|col| col.as_str() == alias))
            .map(|alias| alias.to_string())
    }
}

impl MarketDataSource for CsvConnector {
    fn name(&self) -> &str {
        "CSV file"
    }

    fn fetch(&self, symbol: &str, interval: Interval, period: LookbackPeriod) -> Result<Vec<Bar>> {
        log::debug!(
            "Replaying {} for {} ({} / {})",
            self.path.display(),
            symbol,
            interval,
            period
        );
        let (bars, _) = Self::load_bars(&self.path)?;
        Ok(bars)
    }
}

/// Epoch seconds, or milliseconds when the value is too large to be seconds
fn from_epoch(value: i64) -> Option<DateTime<Utc>> {
    if value.abs() >= 100_000_000_000 {
        DateTime::from_timestamp_millis(value)
    } else {
        DateTime::from_timestamp(value, 0)
    }
}

pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    raw.parse::<i64>().ok().and_then(from_epoch)
}
