//! Icpools - multi-DEX liquidity aggregation and swap quoting
//! Built with Domain-Driven Design principles

pub mod domain;
pub mod infrastructure;
pub mod shared;

// Re-export main types for convenience
pub use domain::dex::{DexRegistry, DexType, Pool, Quote, TokenRegistry, TokenStandard};
pub use domain::pool::PoolCache;
pub use domain::quote::QuoteAggregator;
pub use infrastructure::agent::{CanisterClient, RetryPolicy};
pub use infrastructure::dex_adapters::{DexAdapterFactory, DexAdapters};
pub use shared::types::{AggregatorConfig, Amount};
