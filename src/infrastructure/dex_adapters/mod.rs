pub mod factory;
pub mod icpswap;
pub mod kongswap;
pub mod sonic;
pub mod traits;

pub use factory::{DexAdapterFactory, DexAdapters};
pub use traits::{PoolDiscovery, PoolQuoter};
