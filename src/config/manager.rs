use super::{
    data_source::DataSourceConfig,
    strategy::StrategyConfig,
    traits::ConfigSection,
};
use crate::error::CryptoscalpError;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Prefix of environment overrides, e.g. `CRYPTOSCALP__STRATEGY__RSI_UPPER_THRESHOLD=80`
pub const ENV_PREFIX: &str = "CRYPTOSCALP";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub strategy: StrategyConfig,
    pub data_source: DataSourceConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), CryptoscalpError> {
        self.strategy.validate()?;
        self.data_source.validate()?;
        Ok(())
    }
}

#[derive(Debug)]
pub struct ConfigManager {
    config: AppConfig,
    path: Option<PathBuf>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            path: None,
        }
    }

    /// Defaults that will be saved to `path`
    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            config: AppConfig::default(),
            path: Some(path.as_ref().to_path_buf()),
        }
    }

    /// Layer defaults, an optional TOML file and `{env_prefix}__SECTION__KEY` variables.
    /// A missing file is not an error.
    pub fn load<P: AsRef<Path>>(path: Option<P>, env_prefix: &str) -> Result<Self, CryptoscalpError> {
        let mut builder = Config::builder().add_source(Config::try_from(&AppConfig::default())?);

        if let Some(path) = &path {
            builder = builder.add_source(
                File::from(path.as_ref())
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        builder = builder.add_source(
            Environment::with_prefix(env_prefix)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;

        log::info!(
            "Loaded configuration ({} {} {}, RSI {}/{})",
            config.data_source.symbol,
            config.data_source.interval,
            config.data_source.period,
            config.strategy.rsi_lower_threshold,
            config.strategy.rsi_upper_threshold
        );

        Ok(Self {
            config,
            path: path.map(|p| p.as_ref().to_path_buf()),
        })
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), CryptoscalpError> {
        let toml_str = toml::to_string_pretty(&self.config)
            .map_err(|e| CryptoscalpError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)
            .map_err(|e| CryptoscalpError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Write back to the file this configuration was loaded from
    pub fn save(&self) -> Result<PathBuf, CryptoscalpError> {
        let path = self.path.clone().ok_or_else(|| {
            CryptoscalpError::Configuration("No configuration file path set".to_string())
        })?;
        self.save_to_file(&path)?;
        Ok(path)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get(&self) -> AppConfig {
        self.config.clone()
    }

    /// Apply `f` to a copy; the stored config only changes if the result validates.
    pub fn update<F>(&mut self, f: F) -> Result<(), CryptoscalpError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut candidate = self.config.clone();
        f(&mut candidate);
        candidate.validate()?;
        self.config = candidate;
        Ok(())
    }
}
