use super::traits::{ConfigManifest, ConfigSection, FieldManifest};
use crate::error::CryptoscalpError;
use crate::types::{Interval, LookbackPeriod};
use serde::{Deserialize, Serialize};

pub const YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSourceConfig {
    pub symbol: String,
    pub interval: Interval,
    pub period: LookbackPeriod,
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for DataSourceConfig {
    fn default() -> Self {
        Self {
            symbol: "BTC-USD".to_string(),
            interval: Interval::FifteenMinutes,
            period: LookbackPeriod::FiveDays,
            base_url: YAHOO_BASE_URL.to_string(),
            timeout_secs: 30,
            user_agent: "Mozilla/5.0".to_string(),
        }
    }
}

impl ConfigSection for DataSourceConfig {
    fn section_name() -> &'static str {
        "data_source"
    }

    fn validate(&self) -> Result<(), CryptoscalpError> {
        if self.symbol.trim().is_empty() {
            return Err(CryptoscalpError::Configuration(
                "Asset ticker must not be empty".to_string()
            ));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(CryptoscalpError::Configuration(format!(
                "Base URL must be http(s), got '{}'",
                self.base_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(CryptoscalpError::Configuration(
                "Request timeout must be at least one second".to_string()
            ));
        }
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        let defaults = Self::default();
        ConfigManifest {
            section: "Data Source".to_string(),
            fields: vec![
                FieldManifest {
                    name: "symbol".to_string(),
                    field_type: "string".to_string(),
                    default: serde_json::json!(defaults.symbol),
                    min: None,
                    max: None,
                    description: "Asset Ticker".to_string(),
                },
                FieldManifest {
                    name: "interval".to_string(),
                    field_type: "enum".to_string(),
                    default: serde_json::json!(defaults.interval.as_str()),
                    min: None,
                    max: None,
                    description: "Time Interval".to_string(),
                },
                FieldManifest {
                    name: "period".to_string(),
                    field_type: "enum".to_string(),
                    default: serde_json::json!(defaults.period.as_str()),
                    min: None,
                    max: None,
                    description: "Lookback Period".to_string(),
                },
                FieldManifest {
                    name: "timeout_secs".to_string(),
                    field_type: "integer".to_string(),
                    default: serde_json::json!(defaults.timeout_secs),
                    min: Some(1.0),
                    max: None,
                    description: "HTTP timeout for one chart request".to_string(),
                },
            ],
        }
    }
}
