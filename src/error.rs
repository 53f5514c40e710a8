use thiserror::Error;

#[derive(Error, Debug)]
pub enum CryptoscalpError {
    #[error("Error fetching data: {0}")]
    Fetch(String),

    #[error("Data not found for '{symbol}'. Please verify the ticker symbol.")]
    EmptyData { symbol: String },

    #[error("Data loading error: {0}")]
    DataLoading(String),

    #[error("Indicator error: {0}")]
    Indicator(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Scan worker failed: {0}")]
    Worker(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl From<reqwest::Error> for CryptoscalpError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CryptoscalpError::Fetch(format!("request timed out: {}", err))
        } else {
            CryptoscalpError::Fetch(err.to_string())
        }
    }
}

impl From<config::ConfigError> for CryptoscalpError {
    fn from(err: config::ConfigError) -> Self {
        CryptoscalpError::Configuration(err.to_string())
    }
}

impl CryptoscalpError {
    /// True for errors that mean "the provider answered, but with nothing usable".
    pub fn is_empty_data(&self) -> bool {
        matches!(self, CryptoscalpError::EmptyData { .. })
    }
}

pub type Result<T> = std::result::Result<T, CryptoscalpError>;
