use crate::types::Bar;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Required OHLCV columns for market data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequiredColumn {
    Open,
    High,
    Low,
    Close,
    Volume,
}

impl RequiredColumn {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::High => "high",
            Self::Low => "low",
            Self::Close => "close",
            Self::Volume => "volume",
        }
    }

    pub fn all() -> Vec<Self> {
        vec![
            Self::Open,
            Self::High,
            Self::Low,
            Self::Close,
            Self::Volume,
        ]
    }

    /// Common alternative column names
    pub fn aliases(&self) -> Vec<&'static str> {
        match self {
            Self::Open => vec!["open", "Open", "OPEN", "o"],
            Self::High => vec!["high", "High", "HIGH", "h"],
            Self::Low => vec!["low", "Low", "LOW", "l"],
            Self::Close => vec!["close", "Close", "CLOSE", "c"],
            Self::Volume => vec!["volume", "Volume", "VOLUME", "vol", "Vol", "v"],
        }
    }
}

/// Names accepted for the timestamp column
pub const DATETIME_ALIASES: [&str; 8] = [
    "timestamp", "Timestamp", "datetime", "Datetime", "DateTime", "date", "Date", "time",
];

/// Summary of a loaded data file for the sidebar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPreview {
    pub file_name: String,
    pub num_rows: usize,
    pub columns: Vec<String>,
    pub date_range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    pub price_range: Option<(f64, f64)>, // (min low, max high)
}

impl DataPreview {
    pub fn from_bars(file_name: impl Into<String>, columns: Vec<String>, bars: &[Bar]) -> Self {
        let date_range = match (bars.first(), bars.last()) {
            (Some(first), Some(last)) => Some((first.timestamp, last.timestamp)),
            _ => None,
        };
        let price_range = bars.iter().fold(None, |acc: Option<(f64, f64)>, bar| {
            Some(match acc {
                Some((lo, hi)) => (lo.min(bar.low), hi.max(bar.high)),
                None => (bar.low, bar.high),
            })
        });

        Self {
            file_name: file_name.into(),
            num_rows: bars.len(),
            columns,
            date_range,
            price_range,
        }
    }
}
