mod csv;
mod source;
mod types;
mod validator;
mod yahoo;

pub use csv::CsvConnector;
pub use source::MarketDataSource;
pub use types::{
    DataPreview,
    RequiredColumn,
    DATETIME_ALIASES,
};
pub use validator::DataValidator;
pub use yahoo::YahooConnector;
