//! Quote domain - cross-DEX swap quote aggregation

mod quote_aggregator;

pub use quote_aggregator::QuoteAggregator;
