//! Pool domain - cached liquidity pool state

mod pool_cache;

pub use pool_cache::PoolCache;
