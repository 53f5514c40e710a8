pub mod data_selector;
pub mod data_table;
pub mod metric_cards;
pub mod price_chart;

pub use data_selector::DataSelector;
pub use data_table::DataTable;
pub use metric_cards::MetricCards;
pub use price_chart::PriceChart;
