pub mod connectors;

pub use connectors::{CsvConnector, DataPreview, DataValidator, MarketDataSource, YahooConnector};
