use async_trait::async_trait;

use crate::domain::dex::{DexType, Pool};
use crate::shared::errors::ProviderError;
use crate::shared::types::Amount;

/// Pool discovery capability of a DEX adapter.
///
/// Discovery and quoting are split on purpose: ICPSwap discovers pools
/// through a factory canister but quotes against each pool's own canister,
/// so one exchange may be served by two different types.
#[async_trait]
pub trait PoolDiscovery: Send + Sync {
    /// Get the DEX this adapter handles
    fn dex_type(&self) -> DexType;

    /// List the pools currently tradable on this DEX.
    ///
    /// Pools holding a token the wallet cannot transfer are dropped
    /// silently, not reported as errors.
    async fn list_pools(&self) -> Result<Vec<Pool>, ProviderError>;
}

/// Swap quoting capability of a DEX adapter
#[async_trait]
pub trait PoolQuoter: Send + Sync {
    /// Get the DEX this adapter handles
    fn dex_type(&self) -> DexType;

    /// Quote `amount_in` of `token_in` against `pool`, returning the output
    /// amount in `token_out`'s smallest unit.
    async fn quote(
        &self,
        pool: &Pool,
        token_in: &str,
        token_out: &str,
        amount_in: &Amount,
    ) -> Result<Amount, ProviderError>;
}
