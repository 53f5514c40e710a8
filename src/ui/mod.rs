mod app;
mod panels;
mod state;
mod widgets;
mod services;

pub use app::CryptoScalpApp;
pub use state::{AppState, SourceKind, StatusLevel};
pub use services::{ConfigBridge, ScanOutcome, ScanRunner};
pub use widgets::metric_cards::{format_optional, format_price};
