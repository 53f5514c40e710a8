pub mod signals;
pub mod summary;

pub use signals::SignalMetrics;
pub use summary::SummaryMetrics;
