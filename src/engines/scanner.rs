use crate::{
    data::MarketDataSource,
    engines::{
        evaluation::{classify_series, IndicatorEngine},
        metrics::{SignalMetrics, SummaryMetrics},
    },
    error::{CryptoscalpError, Result},
    types::{ScanRequest, ScanResult},
};

/// One fetch -> indicators -> signals -> summary pass.
///
/// Holds no state between scans; every call builds a fresh `ScanResult`.
pub struct Scanner {
    source: Box<dyn MarketDataSource>,
    engine: IndicatorEngine,
}

impl Scanner {
    pub fn new(source: Box<dyn MarketDataSource>, engine: IndicatorEngine) -> Self {
        Self { source, engine }
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Fails with `Fetch` when the provider cannot be reached and with
    /// `EmptyData` when it answers with zero bars. Short histories still
    /// produce a result, with undefined indicators.
    pub fn scan(&self, request: &ScanRequest) -> Result<ScanResult> {
        log::info!(
            "Scanning {} ({} / {}) via {}, RSI thresholds {}/{}",
            request.symbol,
            request.interval,
            request.period,
            self.source.name(),
            request.thresholds.lower,
            request.thresholds.upper
        );

        let bars = self
            .source
            .fetch(&request.symbol, request.interval, request.period)?;

        if bars.is_empty() {
            log::warn!("No data returned for {}", request.symbol);
            return Err(CryptoscalpError::EmptyData {
                symbol: request.symbol.clone(),
            });
        }

        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let indicators = self.engine.compute(&closes)?;
        let signals = classify_series(&bars, &indicators, &request.thresholds);

        let min_history = self.engine.min_history();
        let summary = SummaryMetrics::calculate(&bars, &indicators, &request.thresholds, min_history);
        let stats = SignalMetrics::calculate(&signals);

        if bars.len() < min_history {
            log::warn!(
                "Insufficient history for {}: {} bars, {} needed for indicators",
                request.symbol,
                bars.len(),
                min_history
            );
        }

        log::info!(
            "Scan of {} complete: {} bars, {} buy / {} sell signals",
            request.symbol,
            bars.len(),
            stats.buy_count,
            stats.sell_count
        );

        Ok(ScanResult {
            request: request.clone(),
            bars,
            indicators,
            signals,
            summary,
            stats,
            min_history,
        })
    }
}
