use anyhow::Result;
use polars::lazy::dsl;

/// Base trait for all indicators
pub trait Indicator: Send + Sync {
    /// Display name
    fn ui_name(&self) -> &'static str;

    /// Expected value range
    fn value_range(&self) -> Option<(f64, f64)>;

    /// Index of the first bar that can carry a value
    fn warmup(&self) -> usize;
}

/// Indicators computed over a whole column with Polars expressions
pub trait VectorizedIndicator: Indicator {
    /// One aliased expression per output line
    fn calculate_vectorized(&self, args: &[IndicatorArg]) -> Result<Vec<dsl::Expr>>;
}

/// Indicators computed bar by bar, carrying their own state
pub trait StatefulIndicator: Indicator {
    type State;

    fn init_state(&self) -> Self::State;

    /// Feed one value; `None` while the indicator is still warming up
    fn calculate_stateful(&self, value: f64, state: &mut Self::State) -> Option<f64>;
}

/// Flexible argument for indicator calls
#[derive(Debug, Clone)]
pub enum IndicatorArg {
    Series(dsl::Expr),
    Scalar(f64),
}
