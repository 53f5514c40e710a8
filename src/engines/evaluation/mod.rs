pub mod classifier;
pub mod indicator_engine;

pub use classifier::{classify_bar, classify_series};
pub use indicator_engine::IndicatorEngine;
