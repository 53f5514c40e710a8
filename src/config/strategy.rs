use super::traits::{ConfigManifest, ConfigSection, FieldManifest};
use crate::error::CryptoscalpError;
use crate::types::SignalThresholds;
use serde::{Deserialize, Serialize};

/// Sidebar slider bounds for the RSI thresholds
pub const RSI_UPPER_RANGE: (u32, u32) = (70, 90);
pub const RSI_LOWER_RANGE: (u32, u32) = (10, 30);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    pub rsi_period: usize,
    pub bb_period: usize,
    pub bb_std_dev: f64,
    pub rsi_upper_threshold: u32,
    pub rsi_lower_threshold: u32,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            bb_period: 20,
            bb_std_dev: 2.0,
            rsi_upper_threshold: 75,
            rsi_lower_threshold: 25,
        }
    }
}

impl StrategyConfig {
    pub fn thresholds(&self) -> SignalThresholds {
        SignalThresholds {
            lower: self.rsi_lower_threshold as f64,
            upper: self.rsi_upper_threshold as f64,
        }
    }
}

impl ConfigSection for StrategyConfig {
    fn section_name() -> &'static str {
        "strategy"
    }

    fn validate(&self) -> Result<(), CryptoscalpError> {
        if self.rsi_period < 2 {
            return Err(CryptoscalpError::Configuration(
                "RSI period must be at least 2".to_string()
            ));
        }
        if self.bb_period < 2 {
            return Err(CryptoscalpError::Configuration(
                "Bollinger period must be at least 2".to_string()
            ));
        }
        if !self.bb_std_dev.is_finite() || self.bb_std_dev <= 0.0 {
            return Err(CryptoscalpError::Configuration(
                "Bollinger deviation multiplier must be positive".to_string()
            ));
        }
        let (lo, hi) = RSI_UPPER_RANGE;
        if !(lo..=hi).contains(&self.rsi_upper_threshold) {
            return Err(CryptoscalpError::Configuration(format!(
                "Overbought threshold must be between {} and {}, got {}",
                lo, hi, self.rsi_upper_threshold
            )));
        }
        let (lo, hi) = RSI_LOWER_RANGE;
        if !(lo..=hi).contains(&self.rsi_lower_threshold) {
            return Err(CryptoscalpError::Configuration(format!(
                "Oversold threshold must be between {} and {}, got {}",
                lo, hi, self.rsi_lower_threshold
            )));
        }
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        let defaults = Self::default();
        ConfigManifest {
            section: "Strategy".to_string(),
            fields: vec![
                FieldManifest {
                    name: "rsi_period".to_string(),
                    field_type: "integer".to_string(),
                    default: serde_json::json!(defaults.rsi_period),
                    min: Some(2.0),
                    max: None,
                    description: "Wilder smoothing length of the RSI".to_string(),
                },
                FieldManifest {
                    name: "bb_period".to_string(),
                    field_type: "integer".to_string(),
                    default: serde_json::json!(defaults.bb_period),
                    min: Some(2.0),
                    max: None,
                    description: "Moving average window of the Bollinger Bands".to_string(),
                },
                FieldManifest {
                    name: "bb_std_dev".to_string(),
                    field_type: "float".to_string(),
                    default: serde_json::json!(defaults.bb_std_dev),
                    min: Some(0.0),
                    max: None,
                    description: "Standard deviations between the middle and outer bands".to_string(),
                },
                FieldManifest {
                    name: "rsi_upper_threshold".to_string(),
                    field_type: "integer".to_string(),
                    default: serde_json::json!(defaults.rsi_upper_threshold),
                    min: Some(RSI_UPPER_RANGE.0 as f64),
                    max: Some(RSI_UPPER_RANGE.1 as f64),
                    description: "Overbought Threshold (RSI)".to_string(),
                },
                FieldManifest {
                    name: "rsi_lower_threshold".to_string(),
                    field_type: "integer".to_string(),
                    default: serde_json::json!(defaults.rsi_lower_threshold),
                    min: Some(RSI_LOWER_RANGE.0 as f64),
                    max: Some(RSI_LOWER_RANGE.1 as f64),
                    description: "Oversold Threshold (RSI)".to_string(),
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(StrategyConfig::default().validate().is_ok());
    }

    #[test]
    fn test_threshold_out_of_slider_range() {
        let config = StrategyConfig {
            rsi_upper_threshold: 95,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = StrategyConfig {
            rsi_lower_threshold: 5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_manifest_exposes_slider_ranges() {
        let manifest = StrategyConfig::default().to_manifest();
        assert_eq!(manifest.field_range("rsi_upper_threshold"), Some((70.0, 90.0)));
        assert_eq!(manifest.field_range("rsi_lower_threshold"), Some((10.0, 30.0)));
        assert_eq!(manifest.field_range("rsi_period"), None);
    }
}
