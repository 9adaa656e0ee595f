//! Cross-DEX quote aggregation
//!
//! Best-effort by design: a DEX that fails to quote simply contributes
//! nothing, and the caller gets whatever quotes could be collected. Only
//! authentication failures escape this layer, via the call client.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use futures::future::join_all;
use tracing::debug;

use crate::domain::dex::{DexType, Pool, Quote};
use crate::domain::pool::PoolCache;
use crate::infrastructure::dex_adapters::{DexAdapters, PoolQuoter};
use crate::shared::types::{AggregatorConfig, Amount};

/// Aggregates pools and swap quotes across every enabled DEX
pub struct QuoteAggregator {
    cache: Arc<PoolCache>,
    quoters: HashMap<DexType, Arc<dyn PoolQuoter>>,
}

impl QuoteAggregator {
    pub fn new(cache: Arc<PoolCache>, quoters: HashMap<DexType, Arc<dyn PoolQuoter>>) -> Self {
        Self { cache, quoters }
    }

    /// Wire a full aggregator from factory-built adapters.
    pub fn from_adapters(config: &AggregatorConfig, adapters: DexAdapters) -> Self {
        let cache = Arc::new(PoolCache::new(config.cache_ttl(), adapters.discovery));
        Self::new(cache, adapters.quoters)
    }

    /// Union of every enabled DEX's cached pools, fetched concurrently.
    async fn all_pools(&self) -> Vec<Pool> {
        let dexes = self.cache.enabled_dexes();
        let snapshots = join_all(dexes.into_iter().map(|dex| self.cache.get_pools(dex))).await;
        snapshots
            .into_iter()
            .flat_map(|pools| pools.iter().cloned().collect::<Vec<_>>())
            .collect()
    }

    /// Pools where one side is `input` and the other side is one of
    /// `outputs`. Matching is symmetric over the pair.
    pub async fn list_candidate_pools(
        &self,
        input: &str,
        outputs: &HashSet<String>,
    ) -> Vec<Pool> {
        self.all_pools()
            .await
            .into_iter()
            .filter(|pool| pool.matches(input, outputs))
            .collect()
    }

    /// The subset of `tokens` swappable to another member of `tokens`
    /// through a direct pool on any DEX. Single-hop only; no routing
    /// through intermediate tokens is attempted.
    pub async fn can_swap(&self, tokens: &HashSet<String>) -> HashSet<String> {
        let pools = self.all_pools().await;
        tokens
            .iter()
            .filter(|token| {
                pools.iter().any(|pool| {
                    pool.other_token(token)
                        .map(|other| tokens.contains(other))
                        .unwrap_or(false)
                })
            })
            .cloned()
            .collect()
    }

    /// Quote `amount_in` of `input` into `output` on every matching pool,
    /// concurrently. Pools whose quote call fails are dropped from the
    /// result; an empty list is a valid outcome. Result order follows
    /// completion, not discovery - treat it as a set keyed by DEX and pool.
    pub async fn quote_swap(&self, input: &str, output: &str, amount_in: &Amount) -> Vec<Quote> {
        let outputs: HashSet<String> = [output.to_string()].into();
        let pools = self.list_candidate_pools(input, &outputs).await;

        let quotes = pools.iter().map(|pool| async move {
            let Some(quoter) = self.quoters.get(&pool.dex_type) else {
                return None;
            };
            match quoter.quote(pool, input, output, amount_in).await {
                Ok(amount_out) => Some(Quote {
                    dex_type: pool.dex_type,
                    pool_id: pool.id.clone(),
                    amount_out,
                }),
                Err(e) => {
                    debug!(
                        "Dropping quote from {} pool {}: {}",
                        pool.dex_type.as_str(),
                        pool.id,
                        e
                    );
                    None
                }
            }
        });

        join_all(quotes).await.into_iter().flatten().collect()
    }
}
