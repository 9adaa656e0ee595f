//! KongSwap adapter
//!
//! KongSwap routes every swap through one backend canister, so there are no
//! per-pair pool canisters to discover. Pools are synthesized from Kong's
//! token list instead: any two tokens the wallet can move via ICRC-2 form a
//! tradable pair.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::traits::{PoolDiscovery, PoolQuoter};
use crate::domain::dex::{DexType, Pool, TokenRegistry, TokenStandard};
use crate::infrastructure::agent::CanisterClient;
use crate::shared::errors::{CallError, ProviderError};
use crate::shared::types::Amount;

/// One token from Kong's listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KongSwapToken {
    pub ledger: String,
    pub symbol: String,
}

/// Remote operations of the KongSwap backend canister
#[async_trait]
pub trait KongSwapActor: Send + Sync {
    async fn tokens(&self) -> Result<Vec<KongSwapToken>, CallError>;

    async fn swap_amounts(
        &self,
        token_in: &str,
        token_out: &str,
        amount_in: &Amount,
    ) -> Result<Amount, CallError>;
}

/// KongSwap DEX adapter
pub struct KongSwapAdapter {
    actor: Arc<dyn KongSwapActor>,
    client: CanisterClient,
    registry: Arc<dyn TokenRegistry>,
}

impl KongSwapAdapter {
    pub fn new(
        actor: Arc<dyn KongSwapActor>,
        client: CanisterClient,
        registry: Arc<dyn TokenRegistry>,
    ) -> Self {
        Self {
            actor,
            client,
            registry,
        }
    }
}

fn kong_pool_id(token_a: &str, token_b: &str) -> String {
    format!("kong:{}:{}", token_a, token_b)
}

#[async_trait]
impl PoolDiscovery for KongSwapAdapter {
    fn dex_type(&self) -> DexType {
        DexType::KongSwap
    }

    /// Build the pair list from Kong's tokens.
    ///
    /// Quadratic in the token list: every unordered pair is tested for
    /// ICRC-2 support on both sides. Kong lists a few hundred tokens at
    /// most, but a much larger registry would need pre-filtering before
    /// the pairing step.
    async fn list_pools(&self) -> Result<Vec<Pool>, ProviderError> {
        let tokens = self.client.query(|| self.actor.tokens(), None).await?;

        let qualified: Vec<&KongSwapToken> = tokens
            .iter()
            .filter(|token| {
                let ok = self.registry.supports(&token.ledger, TokenStandard::Icrc2);
                if !ok {
                    debug!("Skipping KongSwap token {}: no ICRC-2 support", token.ledger);
                }
                ok
            })
            .collect();

        let mut pools = Vec::new();
        for (i, token_a) in qualified.iter().enumerate() {
            for token_b in &qualified[i + 1..] {
                if let Some(pool) = Pool::new(
                    kong_pool_id(&token_a.ledger, &token_b.ledger),
                    DexType::KongSwap,
                    token_a.ledger.clone(),
                    token_b.ledger.clone(),
                ) {
                    pools.push(pool);
                }
            }
        }
        Ok(pools)
    }
}

#[async_trait]
impl PoolQuoter for KongSwapAdapter {
    fn dex_type(&self) -> DexType {
        DexType::KongSwap
    }

    async fn quote(
        &self,
        pool: &Pool,
        token_in: &str,
        token_out: &str,
        amount_in: &Amount,
    ) -> Result<Amount, ProviderError> {
        if !(pool.contains(token_in) && pool.contains(token_out)) {
            return Err(ProviderError::pair_mismatch(&pool.id, token_in, token_out));
        }

        let amount_out = self
            .client
            .query(
                || self.actor.swap_amounts(token_in, token_out, amount_in),
                None,
            )
            .await?;
        Ok(amount_out)
    }
}
