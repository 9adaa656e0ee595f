//! Sonic adapter
//!
//! Sonic exposes raw pair reserves instead of a quote endpoint, so the
//! output amount is computed client-side with the constant-product formula
//! (0.3% fee). All math runs on arbitrary-precision integers: mainnet
//! reserves multiplied through the formula overflow u128.

use std::sync::Arc;

use async_trait::async_trait;
use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::traits::{PoolDiscovery, PoolQuoter};
use crate::domain::dex::{DexType, Pool, TokenRegistry, TokenStandard};
use crate::infrastructure::agent::CanisterClient;
use crate::shared::errors::{CallError, ProviderError};
use crate::shared::types::Amount;

/// One trading pair as reported by Sonic
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SonicPairData {
    pub id: String,
    pub token0: String,
    pub token1: String,
    pub reserve0: Amount,
    pub reserve1: Amount,
}

/// Remote operations of the Sonic swap canister
#[async_trait]
pub trait SonicActor: Send + Sync {
    async fn get_all_pairs(&self) -> Result<Vec<SonicPairData>, CallError>;

    async fn get_pair(
        &self,
        token_a: &str,
        token_b: &str,
    ) -> Result<Option<SonicPairData>, CallError>;
}

/// Constant-product output for a swap against `reserve_in`/`reserve_out`,
/// with Sonic's 0.3% fee taken from the input side. Truncating division.
pub fn constant_product_out(
    amount_in: &BigUint,
    reserve_in: &BigUint,
    reserve_out: &BigUint,
) -> BigUint {
    let amount_in_with_fee = amount_in * 997u32;
    let numerator = &amount_in_with_fee * reserve_out;
    let denominator = reserve_in * 1000u32 + &amount_in_with_fee;
    if denominator.is_zero() {
        return BigUint::zero();
    }
    numerator / denominator
}

/// Sonic DEX adapter
pub struct SonicAdapter {
    actor: Arc<dyn SonicActor>,
    client: CanisterClient,
    registry: Arc<dyn TokenRegistry>,
}

impl SonicAdapter {
    pub fn new(
        actor: Arc<dyn SonicActor>,
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

#[async_trait]
impl PoolDiscovery for SonicAdapter {
    fn dex_type(&self) -> DexType {
        DexType::Sonic
    }

    async fn list_pools(&self) -> Result<Vec<Pool>, ProviderError> {
        let pairs = self.client.query(|| self.actor.get_all_pairs(), None).await?;

        let mut pools = Vec::with_capacity(pairs.len());
        for pair in pairs {
            if !self.registry.supports(&pair.token0, TokenStandard::Icrc1)
                || !self.registry.supports(&pair.token1, TokenStandard::Icrc1)
            {
                debug!(
                    "Skipping Sonic pair {}: token without ICRC-1 support",
                    pair.id
                );
                continue;
            }
            match Pool::new(pair.id, DexType::Sonic, pair.token0, pair.token1) {
                Some(pool) => pools.push(pool),
                None => debug!("Skipping degenerate Sonic pair entry"),
            }
        }
        Ok(pools)
    }
}

#[async_trait]
impl PoolQuoter for SonicAdapter {
    fn dex_type(&self) -> DexType {
        DexType::Sonic
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

        let pair = self
            .client
            .query(|| self.actor.get_pair(token_in, token_out), None)
            .await?;

        let Some(pair) = pair else {
            // No liquidity for the pair is a valid zero-value outcome on
            // Sonic, not an error.
            return Ok(Amount::zero());
        };

        let (reserve_in, reserve_out) = if pair.token0 == token_in && pair.token1 == token_out {
            (&pair.reserve0, &pair.reserve1)
        } else if pair.token1 == token_in && pair.token0 == token_out {
            (&pair.reserve1, &pair.reserve0)
        } else {
            return Err(ProviderError::pair_mismatch(&pair.id, token_in, token_out));
        };

        let amount_out = constant_product_out(
            amount_in.as_biguint(),
            reserve_in.as_biguint(),
            reserve_out.as_biguint(),
        );
        Ok(Amount::new(amount_out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticActor {
        pairs: Vec<SonicPairData>,
    }

    #[async_trait]
    impl SonicActor for StaticActor {
        async fn get_all_pairs(&self) -> Result<Vec<SonicPairData>, CallError> {
            Ok(self.pairs.clone())
        }

        async fn get_pair(
            &self,
            token_a: &str,
            token_b: &str,
        ) -> Result<Option<SonicPairData>, CallError> {
            Ok(self.pairs.iter().find(|p| {
                (p.token0 == token_a && p.token1 == token_b)
                    || (p.token0 == token_b && p.token1 == token_a)
            })
            .cloned())
        }
    }

    fn pair(id: &str, t0: &str, r0: u64, t1: &str, r1: u64) -> SonicPairData {
        SonicPairData {
            id: id.to_string(),
            token0: t0.to_string(),
            token1: t1.to_string(),
            reserve0: Amount::from_u64(r0),
            reserve1: Amount::from_u64(r1),
        }
    }

    fn adapter_with(pairs: Vec<SonicPairData>) -> SonicAdapter {
        use crate::domain::dex::{InMemoryTokenRegistry, TokenInfo};

        let ledgers: Vec<TokenInfo> = ["icp", "ckbtc", "cketh"]
            .iter()
            .map(|ledger| TokenInfo {
                ledger: ledger.to_string(),
                symbol: ledger.to_uppercase(),
                decimals: 8,
                standards: vec![TokenStandard::Icrc1, TokenStandard::Icrc2],
            })
            .collect();
        SonicAdapter::new(
            Arc::new(StaticActor { pairs }),
            CanisterClient::default(),
            Arc::new(InMemoryTokenRegistry::new(ledgers)),
        )
    }

    fn sonic_pool(t0: &str, t1: &str) -> Pool {
        Pool::new("s1".to_string(), DexType::Sonic, t0.to_string(), t1.to_string()).unwrap()
    }

    #[test]
    fn test_constant_product_exact_value() {
        let out = constant_product_out(
            &BigUint::from(1_000u32),
            &BigUint::from(1_000_000u32),
            &BigUint::from(2_000_000u32),
        );
        // floor(1000 * 997 * 2_000_000 / (1_000_000 * 1000 + 1000 * 997))
        assert_eq!(out, BigUint::from(1_992u32));
    }

    #[test]
    fn test_constant_product_monotonic_in_amount_in() {
        let reserve_in = BigUint::from(1_000_000u32);
        let reserve_out = BigUint::from(2_000_000u32);
        let mut previous = BigUint::zero();
        for amount_in in [1u64, 10, 100, 1_000, 10_000, 100_000, 1_000_000] {
            let out = constant_product_out(&BigUint::from(amount_in), &reserve_in, &reserve_out);
            assert!(out >= previous, "output decreased at amount_in={}", amount_in);
            previous = out;
        }
    }

    #[test]
    fn test_constant_product_survives_huge_reserves() {
        // Reserves past u128: fixed-width math would overflow here.
        let reserve_in = BigUint::from(10u8).pow(40);
        let reserve_out = BigUint::from(10u8).pow(40);
        let amount_in = BigUint::from(10u8).pow(30);
        let out = constant_product_out(&amount_in, &reserve_in, &reserve_out);
        assert!(out > BigUint::zero());
        assert!(out < amount_in);
    }

    #[test]
    fn test_constant_product_empty_pool_yields_zero() {
        let out = constant_product_out(&BigUint::zero(), &BigUint::zero(), &BigUint::zero());
        assert_eq!(out, BigUint::zero());
    }

    #[tokio::test]
    async fn test_quote_missing_pair_is_benign_zero() {
        let adapter = adapter_with(vec![]);
        let pool = sonic_pool("icp", "ckbtc");
        let out = adapter
            .quote(&pool, "icp", "ckbtc", &Amount::from_u64(1_000))
            .await
            .unwrap();
        assert!(out.is_zero());
    }

    #[tokio::test]
    async fn test_quote_orients_reserves_by_token_order() {
        let adapter = adapter_with(vec![pair("s1", "icp", 1_000_000, "ckbtc", 2_000_000)]);
        let pool = sonic_pool("icp", "ckbtc");

        let forward = adapter
            .quote(&pool, "icp", "ckbtc", &Amount::from_u64(1_000))
            .await
            .unwrap();
        assert_eq!(forward, Amount::from_u64(1_992));

        // Reverse direction swaps the reserves: in=2M, out=1M.
        let reverse = adapter
            .quote(&pool, "ckbtc", "icp", &Amount::from_u64(1_000))
            .await
            .unwrap();
        assert_eq!(reverse, Amount::from_u64(498));
    }

    #[tokio::test]
    async fn test_quote_rejects_foreign_pair() {
        let adapter = adapter_with(vec![pair("s1", "icp", 1_000_000, "ckbtc", 2_000_000)]);
        let pool = sonic_pool("icp", "ckbtc");
        let result = adapter
            .quote(&pool, "icp", "cketh", &Amount::from_u64(1_000))
            .await;
        assert!(matches!(result, Err(ProviderError::PairMismatch { .. })));
    }

    #[tokio::test]
    async fn test_list_pools_filters_unsupported_tokens() {
        let adapter = adapter_with(vec![
            pair("s1", "icp", 1, "ckbtc", 1),
            pair("s2", "icp", 1, "xtc-dip20", 1),
        ]);
        let pools = adapter.list_pools().await.unwrap();
        assert_eq!(pools.len(), 1);
        assert_eq!(pools[0].id, "s1");
    }
}
