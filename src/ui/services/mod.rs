mod config_bridge;
mod scan_runner;

pub use config_bridge::ConfigBridge;
pub use scan_runner::{ScanOutcome, ScanRunner};
