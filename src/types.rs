use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One sampled OHLCV interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Bar interval offered by the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    #[serde(rename = "1m")]
    OneMinute,
    #[serde(rename = "5m")]
    FiveMinutes,
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[serde(rename = "1h")]
    OneHour,
}

impl Interval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneMinute => "1m",
            Self::FiveMinutes => "5m",
            Self::FifteenMinutes => "15m",
            Self::OneHour => "1h",
        }
    }

    pub fn all() -> Vec<Self> {
        vec![
            Self::OneMinute,
            Self::FiveMinutes,
            Self::FifteenMinutes,
            Self::OneHour,
        ]
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|i| i.as_str() == s)
            .ok_or_else(|| format!("Unsupported interval '{}'", s))
    }
}

/// How far back the provider is asked to look
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LookbackPeriod {
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "5d")]
    FiveDays,
    #[serde(rename = "1mo")]
    OneMonth,
}

impl LookbackPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneDay => "1d",
            Self::FiveDays => "5d",
            Self::OneMonth => "1mo",
        }
    }

    pub fn all() -> Vec<Self> {
        vec![Self::OneDay, Self::FiveDays, Self::OneMonth]
    }
}

impl fmt::Display for LookbackPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LookbackPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("Unsupported lookback period '{}'", s))
    }
}

/// Derived indicator values for a single bar. `None` means "not enough history yet".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorPoint {
    pub rsi: Option<f64>,
    pub bb_lower: Option<f64>,
    pub bb_middle: Option<f64>,
    pub bb_upper: Option<f64>,
}

impl IndicatorPoint {
    pub fn band_width(&self) -> Option<f64> {
        Some(self.bb_upper? - self.bb_lower?)
    }
}

/// Indicator values aligned by index with the bars they were computed from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    pub points: Vec<IndicatorPoint>,
}

impl IndicatorSet {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&IndicatorPoint> {
        self.points.get(idx)
    }

    pub fn last(&self) -> Option<&IndicatorPoint> {
        self.points.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IndicatorPoint> {
        self.points.iter()
    }
}

/// Per-bar classification. Buy/Sell carry the close that triggered them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum Signal {
    Buy { price: f64 },
    Sell { price: f64 },
    #[default]
    None,
}

impl Signal {
    pub fn price(&self) -> Option<f64> {
        match self {
            Signal::Buy { price } | Signal::Sell { price } => Some(*price),
            Signal::None => None,
        }
    }

    pub fn is_buy(&self) -> bool {
        matches!(self, Signal::Buy { .. })
    }

    pub fn is_sell(&self) -> bool {
        matches!(self, Signal::Sell { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            Signal::Buy { .. } => "BUY",
            Signal::Sell { .. } => "SELL",
            Signal::None => "",
        }
    }
}

/// RSI levels the classifier compares against. No ordering between them is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalThresholds {
    pub lower: f64,
    pub upper: f64,
}

impl SignalThresholds {
    pub fn new(lower: f64, upper: f64) -> Result<Self, String> {
        for (name, value) in [("lower", lower), ("upper", upper)] {
            if !(0.0..=100.0).contains(&value) {
                return Err(format!(
                    "RSI {} threshold must be within [0, 100], got {}",
                    name, value
                ));
            }
        }
        Ok(Self { lower, upper })
    }
}

impl Default for SignalThresholds {
    fn default() -> Self {
        Self {
            lower: 25.0,
            upper: 75.0,
        }
    }
}

/// Overall state of the market at the last bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketCondition {
    Overbought,
    Oversold,
    Neutral,
}

impl MarketCondition {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Overbought => "OVERBOUGHT (Sell Zone)",
            Self::Oversold => "OVERSOLD (Buy Zone)",
            Self::Neutral => "NEUTRAL",
        }
    }
}

/// Last-bar metrics shown above the chart
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketSummary {
    pub current_close: Option<f64>,
    pub current_rsi: Option<f64>,
    pub band_width: Option<f64>,
    pub condition: Option<MarketCondition>,
}

/// Counts of the signals in one scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalStats {
    pub buy_count: usize,
    pub sell_count: usize,
    /// Index and value of the most recent Buy/Sell
    pub last_signal: Option<(usize, Signal)>,
}

/// Parameters of one scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRequest {
    pub symbol: String,
    pub interval: Interval,
    pub period: LookbackPeriod,
    pub thresholds: SignalThresholds,
}

/// Everything one scan produced. Replaced wholesale by the next scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    pub request: ScanRequest,
    pub bars: Vec<Bar>,
    pub indicators: IndicatorSet,
    pub signals: Vec<Signal>,
    pub summary: MarketSummary,
    pub stats: SignalStats,
    /// Number of bars needed before every indicator can be defined
    pub min_history: usize,
}

impl ScanResult {
    pub fn insufficient_history(&self) -> bool {
        self.bars.len() < self.min_history
    }
}
