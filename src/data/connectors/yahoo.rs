//! Yahoo Finance chart API connector.

use super::{source::MarketDataSource, validator::DataValidator};
use crate::config::DataSourceConfig;
use crate::error::{CryptoscalpError, Result};
use crate::types::{Bar, Interval, LookbackPeriod};
use chrono::DateTime;
use serde::Deserialize;
use std::time::Duration;

/// Yahoo Finance API response
#[derive(Debug, Deserialize)]
struct YahooResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
struct YahooError {
    code: String,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct QuoteData {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<f64>>,
}

/// Yahoo Finance client
pub struct YahooConnector {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl YahooConnector {
    pub fn new(config: &DataSourceConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Chart endpoint for `symbol`. The symbol is percent-encoded as a single path segment.
    pub fn chart_url(
        &self,
        symbol: &str,
        interval: Interval,
        period: LookbackPeriod,
    ) -> Result<reqwest::Url> {
        let mut url = reqwest::Url::parse(&self.base_url).map_err(|e| {
            CryptoscalpError::Fetch(format!("Invalid base URL '{}': {}", self.base_url, e))
        })?;

        url.path_segments_mut()
            .map_err(|_| {
                CryptoscalpError::Fetch(format!("Base URL '{}' cannot take a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(["v8", "finance", "chart", symbol.trim()]);
        url.query_pairs_mut()
            .append_pair("interval", interval.as_str())
            .append_pair("range", period.as_str());

        Ok(url)
    }

    /// Turn a chart response body into bars.
    ///
    /// Rows with any missing OHLCV field are skipped. An unknown symbol
    /// ("Not Found") is reported as an empty series rather than a failure.
    pub fn parse_chart(body: &str) -> Result<Vec<Bar>> {
        let response: YahooResponse = serde_json::from_str(body)
            .map_err(|e| CryptoscalpError::Fetch(format!("Failed to parse response: {}", e)))?;

        if let Some(error) = response.chart.error {
            if error.code == "Not Found" {
                log::warn!("Yahoo reports unknown symbol: {:?}", error.description);
                return Ok(Vec::new());
            }
            return Err(CryptoscalpError::Fetch(format!(
                "Yahoo API error: {} - {}",
                error.code,
                error.description.unwrap_or_default()
            )));
        }

        let Some(result) = response.chart.result.and_then(|r| r.into_iter().next()) else {
            return Ok(Vec::new());
        };
        let quote = result.indicators.quote.into_iter().next().unwrap_or_default();

        let mut bars = Vec::with_capacity(result.timestamp.len());
        let mut skipped = 0usize;

        for (i, &ts) in result.timestamp.iter().enumerate() {
            let field = |column: &Vec<Option<f64>>| column.get(i).copied().flatten();

            match (
                DateTime::from_timestamp(ts, 0),
                field(&quote.open),
                field(&quote.high),
                field(&quote.low),
                field(&quote.close),
                field(&quote.volume),
            ) {
                (Some(timestamp), Some(open), Some(high), Some(low), Some(close), Some(volume)) => {
                    bars.push(Bar {
                        timestamp,
                        open,
                        high,
                        low,
                        close,
                        volume,
                    });
                }
                _ => skipped += 1,
            }
        }

        if skipped > 0 {
            log::debug!("Skipped {} incomplete rows", skipped);
        }

        Ok(DataValidator::enforce_increasing(bars))
    }
}

impl MarketDataSource for YahooConnector {
    fn name(&self) -> &str {
        "Yahoo Finance"
    }

    fn fetch(&self, symbol: &str, interval: Interval, period: LookbackPeriod) -> Result<Vec<Bar>> {
        let url = self.chart_url(symbol, interval, period)?;
        log::info!("Fetching Yahoo data from: {}", url);

        let response = self.client.get(url).send()?;
        let status = response.status();
        let body = response.text()?;

        let bars = match Self::parse_chart(&body) {
            Ok(bars) => bars,
            Err(e) if !status.is_success() => {
                return Err(CryptoscalpError::Fetch(format!("HTTP {} ({})", status, e)));
            }
            Err(e) => return Err(e),
        };

        log::info!("Fetched {} bars for {}", bars.len(), symbol);
        Ok(bars)
    }
}
