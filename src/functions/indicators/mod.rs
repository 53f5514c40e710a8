pub mod momentum;
pub mod volatility;

pub use momentum::RSI;
pub use volatility::BollingerBands;
