use crate::error::Result;
use crate::types::{Bar, Interval, LookbackPeriod};

/// Anything that can hand the scanner an ordered series of bars.
///
/// An empty `Vec` is a valid answer ("no data"); errors are reserved for
/// failures to reach or understand the provider. Retry policy, if any, belongs
/// to the implementation.
pub trait MarketDataSource: Send {
    /// Human-readable provider name for status messages
    fn name(&self) -> &str;

    fn fetch(&self, symbol: &str, interval: Interval, period: LookbackPeriod) -> Result<Vec<Bar>>;
}
