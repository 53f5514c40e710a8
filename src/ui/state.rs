use crate::config::strategy::{RSI_LOWER_RANGE, RSI_UPPER_RANGE};
use crate::config::{AppConfig, ConfigSection};
use crate::data::DataPreview;
use crate::types::{Interval, LookbackPeriod, ScanResult};
use std::path::PathBuf;

/// Where the next scan reads its bars from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Yahoo,
    CsvFile,
}

impl SourceKind {
    pub fn label(&self) -> &'static str {
        match self {
            SourceKind::Yahoo => "Yahoo Finance",
            SourceKind::CsvFile => "CSV File",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// Central application state for the UI
pub struct AppState {
    // Data Source
    pub source_kind: SourceKind,
    pub csv_path: Option<PathBuf>,
    pub csv_preview: Option<DataPreview>,
    pub symbol: String,
    pub interval: Interval,
    pub period: LookbackPeriod,

    // Signal Sensitivity
    pub rsi_upper: u32,
    pub rsi_lower: u32,
    pub rsi_upper_range: (u32, u32),
    pub rsi_lower_range: (u32, u32),

    // Execution State
    pub is_running: bool,
    pub status_message: String,
    pub status_level: StatusLevel,

    // Results
    pub last_result: Option<ScanResult>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the sidebar from the loaded configuration. Slider bounds come
    /// from the strategy manifest so the two cannot drift apart.
    pub fn from_config(config: &AppConfig) -> Self {
        let manifest = config.strategy.to_manifest();
        let range = |name: &str, fallback: (u32, u32)| {
            manifest
                .field_range(name)
                .map(|(lo, hi)| (lo as u32, hi as u32))
                .unwrap_or(fallback)
        };

        Self {
            source_kind: SourceKind::Yahoo,
            csv_path: None,
            csv_preview: None,
            symbol: config.data_source.symbol.clone(),
            interval: config.data_source.interval,
            period: config.data_source.period,

            rsi_upper: config.strategy.rsi_upper_threshold,
            rsi_lower: config.strategy.rsi_lower_threshold,
            rsi_upper_range: range("rsi_upper_threshold", RSI_UPPER_RANGE),
            rsi_lower_range: range("rsi_lower_threshold", RSI_LOWER_RANGE),

            is_running: false,
            status_message: String::new(),
            status_level: StatusLevel::Info,

            last_result: None,
        }
    }

    pub fn set_status(&mut self, level: StatusLevel, message: impl Into<String>) {
        self.status_message = message.into();
        self.status_level = level;
    }
}
