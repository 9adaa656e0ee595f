//! ICPSwap adapters
//!
//! ICPSwap splits its surface across canisters: a factory canister indexes
//! every deployed pool, and each pool runs in its own canister that answers
//! quotes. That maps onto two adapter types here, one per capability.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::traits::{PoolDiscovery, PoolQuoter};
use crate::domain::dex::{DexType, Pool, TokenStandard};
use crate::infrastructure::agent::CanisterClient;
use crate::shared::errors::{CallError, ProviderError};
use crate::shared::types::Amount;

/// Token side of an ICPSwap pool as reported by the factory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IcpSwapTokenMeta {
    pub address: String,
    pub standard: String,
}

/// One pool entry from the factory index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IcpSwapPoolData {
    pub canister_id: String,
    pub token0: IcpSwapTokenMeta,
    pub token1: IcpSwapTokenMeta,
    pub fee: u64,
}

/// Arguments for a pool-level quote call
#[derive(Debug, Clone)]
pub struct IcpSwapQuoteArgs {
    pub amount_in: Amount,
    pub zero_for_one: bool,
}

/// Remote operations of the ICPSwap factory canister
#[async_trait]
pub trait IcpSwapFactoryActor: Send + Sync {
    async fn get_pools(&self) -> Result<Vec<IcpSwapPoolData>, CallError>;
}

/// Remote operations of an ICPSwap pool canister
#[async_trait]
pub trait IcpSwapPoolActor: Send + Sync {
    async fn quote(
        &self,
        pool_canister: &str,
        args: IcpSwapQuoteArgs,
    ) -> Result<Amount, CallError>;
}

fn is_transferable_standard(label: &str) -> bool {
    matches!(
        TokenStandard::parse(label),
        Some(TokenStandard::Icp | TokenStandard::Icrc1 | TokenStandard::Icrc2)
    )
}

/// ICPSwap pool index adapter (discovery)
pub struct IcpSwapIndexAdapter {
    factory: Arc<dyn IcpSwapFactoryActor>,
    client: CanisterClient,
}

impl IcpSwapIndexAdapter {
    pub fn new(factory: Arc<dyn IcpSwapFactoryActor>, client: CanisterClient) -> Self {
        Self { factory, client }
    }
}

#[async_trait]
impl PoolDiscovery for IcpSwapIndexAdapter {
    fn dex_type(&self) -> DexType {
        DexType::IcpSwap
    }

    async fn list_pools(&self) -> Result<Vec<Pool>, ProviderError> {
        let entries = self
            .client
            .query(|| self.factory.get_pools(), None)
            .await?;

        let mut pools = Vec::with_capacity(entries.len());
        for entry in entries {
            if !is_transferable_standard(&entry.token0.standard)
                || !is_transferable_standard(&entry.token1.standard)
            {
                debug!(
                    "Skipping ICPSwap pool {}: unsupported standard {}/{}",
                    entry.canister_id, entry.token0.standard, entry.token1.standard
                );
                continue;
            }
            // Token order from the factory is preserved; quoting derives the
            // swap direction from it.
            match Pool::new(
                entry.canister_id,
                DexType::IcpSwap,
                entry.token0.address,
                entry.token1.address,
            ) {
                Some(pool) => pools.push(pool),
                None => debug!("Skipping degenerate ICPSwap pool entry"),
            }
        }
        Ok(pools)
    }
}

/// ICPSwap pool-level quoting adapter
pub struct IcpSwapPoolAdapter {
    pool_actor: Arc<dyn IcpSwapPoolActor>,
    client: CanisterClient,
}

impl IcpSwapPoolAdapter {
    pub fn new(pool_actor: Arc<dyn IcpSwapPoolActor>, client: CanisterClient) -> Self {
        Self { pool_actor, client }
    }
}

#[async_trait]
impl PoolQuoter for IcpSwapPoolAdapter {
    fn dex_type(&self) -> DexType {
        DexType::IcpSwap
    }

    async fn quote(
        &self,
        pool: &Pool,
        token_in: &str,
        token_out: &str,
        amount_in: &Amount,
    ) -> Result<Amount, ProviderError> {
        // Direction comes from the pool's own token order. Neither order
        // matching means the caller quoted a pair this pool does not hold.
        let zero_for_one = if pool.token_a == token_in && pool.token_b == token_out {
            true
        } else if pool.token_a == token_out && pool.token_b == token_in {
            false
        } else {
            return Err(ProviderError::pair_mismatch(&pool.id, token_in, token_out));
        };

        let args = IcpSwapQuoteArgs {
            amount_in: amount_in.clone(),
            zero_for_one,
        };
        let amount_out = self
            .client
            .query(|| self.pool_actor.quote(&pool.id, args.clone()), None)
            .await?;
        Ok(amount_out)
    }
}
