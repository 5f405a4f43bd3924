/// Element aggregator implementation
pub mod element_aggregator;

pub use element_aggregator::{aggregate, ElementAggregator};
