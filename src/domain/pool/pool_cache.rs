//! Freshness-bounded pool cache
//!
//! One snapshot per DEX, replaced wholesale on a successful refresh so
//! readers never observe a half-updated entry. A failed refresh keeps the
//! previous snapshot and its timestamp: stale-but-present data beats an
//! empty answer for a pricing aggregator.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use crate::domain::dex::{DexType, Pool};
use crate::infrastructure::dex_adapters::PoolDiscovery;

#[derive(Clone)]
struct PoolSnapshot {
    pools: Arc<Vec<Pool>>,
    fetched_at: Instant,
}

struct DexEntry {
    adapter: Arc<dyn PoolDiscovery>,
    // Serializes refreshes per DEX: a caller arriving during an in-flight
    // refresh awaits it instead of starting its own.
    refresh_lock: Mutex<()>,
}

/// Per-DEX pool cache with a freshness window
pub struct PoolCache {
    ttl: Duration,
    dexes: HashMap<DexType, DexEntry>,
    entries: RwLock<HashMap<DexType, PoolSnapshot>>,
}

impl PoolCache {
    pub fn new(ttl: Duration, discovery: HashMap<DexType, Arc<dyn PoolDiscovery>>) -> Self {
        let dexes = discovery
            .into_iter()
            .map(|(dex_type, adapter)| {
                (
                    dex_type,
                    DexEntry {
                        adapter,
                        refresh_lock: Mutex::new(()),
                    },
                )
            })
            .collect();
        Self {
            ttl,
            dexes,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// DEXes this cache can serve (the enabled ones).
    pub fn enabled_dexes(&self) -> Vec<DexType> {
        self.dexes.keys().copied().collect()
    }

    async fn fresh_pools(&self, dex_type: DexType) -> Option<Arc<Vec<Pool>>> {
        let entries = self.entries.read().await;
        entries
            .get(&dex_type)
            .filter(|snapshot| snapshot.fetched_at.elapsed() < self.ttl)
            .map(|snapshot| Arc::clone(&snapshot.pools))
    }

    async fn cached_pools(&self, dex_type: DexType) -> Option<Arc<Vec<Pool>>> {
        let entries = self.entries.read().await;
        entries
            .get(&dex_type)
            .map(|snapshot| Arc::clone(&snapshot.pools))
    }

    /// Get the pools of one DEX. Always succeeds: a disabled DEX yields an
    /// empty list, and a failed refresh yields whatever was cached before.
    pub async fn get_pools(&self, dex_type: DexType) -> Arc<Vec<Pool>> {
        let Some(entry) = self.dexes.get(&dex_type) else {
            return Arc::new(Vec::new());
        };

        if let Some(pools) = self.fresh_pools(dex_type).await {
            return pools;
        }

        let _guard = entry.refresh_lock.lock().await;
        // Someone else may have refreshed while we waited on the lock.
        if let Some(pools) = self.fresh_pools(dex_type).await {
            return pools;
        }

        match entry.adapter.list_pools().await {
            Ok(pools) => {
                let pools = Arc::new(pools);
                let snapshot = PoolSnapshot {
                    pools: Arc::clone(&pools),
                    fetched_at: Instant::now(),
                };
                self.entries.write().await.insert(dex_type, snapshot);
                info!(
                    "✅ Refreshed {} pools for {}",
                    pools.len(),
                    dex_type.as_str()
                );
                pools
            }
            Err(e) => {
                warn!(
                    "⚠️  Pool refresh failed for {}: {}; serving cached data",
                    dex_type.as_str(),
                    e
                );
                self.cached_pools(dex_type)
                    .await
                    .unwrap_or_else(|| Arc::new(Vec::new()))
            }
        }
    }
}
