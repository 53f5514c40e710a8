use crate::config::{DataSourceConfig, StrategyConfig};
use crate::data::{CsvConnector, MarketDataSource, YahooConnector};
use crate::types::{ScanRequest, SignalThresholds};
use crate::ui::state::{AppState, SourceKind};

pub struct ConfigBridge;

impl ConfigBridge {
    /// Convert AppState to the parameters of one scan
    pub fn to_scan_request(state: &AppState) -> Result<ScanRequest, String> {
        let symbol = state.symbol.trim();
        if symbol.is_empty() {
            return Err("Enter an asset ticker".to_string());
        }

        let thresholds = SignalThresholds::new(state.rsi_lower as f64, state.rsi_upper as f64)?;

        Ok(ScanRequest {
            symbol: symbol.to_uppercase(),
            interval: state.interval,
            period: state.period,
            thresholds,
        })
    }

    /// Convert AppState to StrategyConfig, keeping the parts the sidebar does not edit
    pub fn to_strategy_config(state: &AppState, base: &StrategyConfig) -> StrategyConfig {
        StrategyConfig {
            rsi_upper_threshold: state.rsi_upper,
            rsi_lower_threshold: state.rsi_lower,
            ..base.clone()
        }
    }

    /// Convert AppState to DataSourceConfig, keeping endpoint and client settings
    pub fn to_data_source_config(state: &AppState, base: &DataSourceConfig) -> DataSourceConfig {
        DataSourceConfig {
            symbol: state.symbol.trim().to_string(),
            interval: state.interval,
            period: state.period,
            ..base.clone()
        }
    }

    /// Build the connector the next scan will read from
    pub fn to_data_source(
        state: &AppState,
        config: &DataSourceConfig,
    ) -> Result<Box<dyn MarketDataSource>, String> {
        match state.source_kind {
            SourceKind::Yahoo => YahooConnector::new(config)
                .map(|c| Box::new(c) as Box<dyn MarketDataSource>)
                .map_err(|e| e.to_string()),
            SourceKind::CsvFile => match &state.csv_path {
                Some(path) => Ok(Box::new(CsvConnector::new(path))),
                None => Err("No CSV file selected".to_string()),
            },
        }
    }

    /// Everything that must hold before the Scan button is enabled
    pub fn validate(state: &AppState) -> Result<(), String> {
        Self::to_scan_request(state)?;
        if state.source_kind == SourceKind::CsvFile && state.csv_path.is_none() {
            return Err("No CSV file selected".to_string());
        }
        Ok(())
    }
}
