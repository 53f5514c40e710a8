pub mod evaluation;
pub mod metrics;
pub mod scanner;

pub use evaluation::{classify_bar, classify_series, IndicatorEngine};
pub use metrics::{SignalMetrics, SummaryMetrics};
pub use scanner::Scanner;
