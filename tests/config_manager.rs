use cryptoscalp::config::{ConfigManager, ConfigSection, StrategyConfig};
use cryptoscalp::types::{Interval, LookbackPeriod};
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("cryptoscalp_{}_{}.toml", name, std::process::id()))
}

#[test]
fn test_missing_file_yields_defaults() {
    let path = temp_path("missing");
    let manager = ConfigManager::load(Some(&path), "CRYPTOSCALP_TEST_MISSING").unwrap();
    let config = manager.get();

    assert_eq!(config.data_source.symbol, "BTC-USD");
    assert_eq!(config.data_source.interval, Interval::FifteenMinutes);
    assert_eq!(config.data_source.period, LookbackPeriod::FiveDays);
    assert_eq!(config.strategy, StrategyConfig::default());
    assert_eq!(manager.path(), Some(path.as_path()));
}

#[test]
fn test_partial_toml_file() {
    let path = temp_path("partial");
    std::fs::write(
        &path,
        r#"
[strategy]
rsi_upper_threshold = 80

[data_source]
symbol = "ETH-USD"
interval = "5m"
period = "1mo"
"#,
    )
    .unwrap();

    let manager = ConfigManager::load(Some(&path), "CRYPTOSCALP_TEST_PARTIAL");
    std::fs::remove_file(&path).ok();
    let config = manager.unwrap().get();

    assert_eq!(config.strategy.rsi_upper_threshold, 80);
    assert_eq!(config.strategy.rsi_lower_threshold, 25);
    assert_eq!(config.strategy.rsi_period, 14);
    assert_eq!(config.data_source.symbol, "ETH-USD");
    assert_eq!(config.data_source.interval, Interval::FiveMinutes);
    assert_eq!(config.data_source.period, LookbackPeriod::OneMonth);
}

#[test]
fn test_environment_overrides_file() {
    let prefix = "CRYPTOSCALP_TEST_ENV";
    let path = temp_path("env");
    std::fs::write(&path, "[strategy]\nrsi_lower_threshold = 15\n").unwrap();

    std::env::set_var(format!("{}__STRATEGY__RSI_LOWER_THRESHOLD", prefix), "20");
    std::env::set_var(format!("{}__DATA_SOURCE__SYMBOL", prefix), "SOL-USD");
    let manager = ConfigManager::load(Some(&path), prefix);
    std::env::remove_var(format!("{}__STRATEGY__RSI_LOWER_THRESHOLD", prefix));
    std::env::remove_var(format!("{}__DATA_SOURCE__SYMBOL", prefix));
    std::fs::remove_file(&path).ok();

    let config = manager.unwrap().get();
    assert_eq!(config.strategy.rsi_lower_threshold, 20);
    assert_eq!(config.data_source.symbol, "SOL-USD");
}

#[test]
fn test_out_of_range_threshold_rejected() {
    let path = temp_path("invalid");
    std::fs::write(&path, "[strategy]\nrsi_upper_threshold = 95\n").unwrap();

    let result = ConfigManager::load(Some(&path), "CRYPTOSCALP_TEST_INVALID");
    std::fs::remove_file(&path).ok();

    let err = result.unwrap_err();
    assert!(err.to_string().contains("Overbought threshold"));
}

#[test]
fn test_strategy_validation() {
    let mut config = StrategyConfig::default();
    assert!(config.validate().is_ok());

    config.bb_period = 1;
    assert!(config.validate().is_err());

    let config = StrategyConfig {
        bb_std_dev: 0.0,
        ..StrategyConfig::default()
    };
    assert!(config.validate().is_err());

    let config = StrategyConfig {
        rsi_lower_threshold: 5,
        ..StrategyConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_update_and_save_roundtrip() {
    let path = temp_path("save");
    let mut manager = ConfigManager::with_path(&path);

    manager
        .update(|config| {
            config.strategy.rsi_upper_threshold = 85;
            config.data_source.interval = Interval::OneHour;
        })
        .unwrap();
    let saved_to = manager.save().unwrap();
    assert_eq!(saved_to, path);

    let reloaded = ConfigManager::load(Some(&path), "CRYPTOSCALP_TEST_SAVE");
    std::fs::remove_file(&path).ok();
    let config = reloaded.unwrap().get();

    assert_eq!(config.strategy.rsi_upper_threshold, 85);
    assert_eq!(config.data_source.interval, Interval::OneHour);
}

#[test]
fn test_invalid_update_is_not_applied() {
    let mut manager = ConfigManager::new();
    let result = manager.update(|config| config.strategy.rsi_upper_threshold = 50);

    assert!(result.is_err());
    assert_eq!(manager.get().strategy.rsi_upper_threshold, 75);
    assert!(manager.save().is_err());
}
