pub mod traits;
pub mod strategy;
pub mod data_source;
pub mod manager;

pub use manager::{ConfigManager, AppConfig, ENV_PREFIX};
pub use strategy::StrategyConfig;
pub use data_source::DataSourceConfig;
pub use traits::{ConfigSection, ConfigManifest, FieldManifest};
