use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use super::icpswap::{IcpSwapFactoryActor, IcpSwapIndexAdapter, IcpSwapPoolActor, IcpSwapPoolAdapter};
use super::kongswap::{KongSwapActor, KongSwapAdapter};
use super::sonic::{SonicActor, SonicAdapter};
use super::traits::{PoolDiscovery, PoolQuoter};
use crate::domain::dex::{DexType, TokenRegistry};
use crate::infrastructure::agent::CanisterClient;
use crate::shared::types::AggregatorConfig;

/// Adapters for every enabled DEX, keyed by capability
pub struct DexAdapters {
    pub discovery: HashMap<DexType, Arc<dyn PoolDiscovery>>,
    pub quoters: HashMap<DexType, Arc<dyn PoolQuoter>>,
}

/// Factory for creating DEX adapters
pub struct DexAdapterFactory {
    client: CanisterClient,
    registry: Arc<dyn TokenRegistry>,
    icpswap_factory: Arc<dyn IcpSwapFactoryActor>,
    icpswap_pool: Arc<dyn IcpSwapPoolActor>,
    kongswap: Arc<dyn KongSwapActor>,
    sonic: Arc<dyn SonicActor>,
}

impl DexAdapterFactory {
    pub fn new(
        client: CanisterClient,
        registry: Arc<dyn TokenRegistry>,
        icpswap_factory: Arc<dyn IcpSwapFactoryActor>,
        icpswap_pool: Arc<dyn IcpSwapPoolActor>,
        kongswap: Arc<dyn KongSwapActor>,
        sonic: Arc<dyn SonicActor>,
    ) -> Self {
        Self {
            client,
            registry,
            icpswap_factory,
            icpswap_pool,
            kongswap,
            sonic,
        }
    }

    /// Build adapters for every DEX enabled in `config`.
    ///
    /// A disabled DEX gets no adapter at all; the cache and aggregator treat
    /// its absence as "no pools" without issuing remote calls.
    pub fn build(&self, config: &AggregatorConfig) -> DexAdapters {
        let mut discovery: HashMap<DexType, Arc<dyn PoolDiscovery>> = HashMap::new();
        let mut quoters: HashMap<DexType, Arc<dyn PoolQuoter>> = HashMap::new();

        if config.dexes.icpswap.enabled {
            info!("🔧 Creating ICPSwap adapters");
            discovery.insert(
                DexType::IcpSwap,
                Arc::new(IcpSwapIndexAdapter::new(
                    Arc::clone(&self.icpswap_factory),
                    self.client.clone(),
                )),
            );
            quoters.insert(
                DexType::IcpSwap,
                Arc::new(IcpSwapPoolAdapter::new(
                    Arc::clone(&self.icpswap_pool),
                    self.client.clone(),
                )),
            );
        }

        if config.dexes.kongswap.enabled {
            info!("🔧 Creating KongSwap adapter");
            let adapter = Arc::new(KongSwapAdapter::new(
                Arc::clone(&self.kongswap),
                self.client.clone(),
                Arc::clone(&self.registry),
            ));
            discovery.insert(DexType::KongSwap, adapter.clone());
            quoters.insert(DexType::KongSwap, adapter);
        }

        if config.dexes.sonic.enabled {
            info!("🔧 Creating Sonic adapter");
            let adapter = Arc::new(SonicAdapter::new(
                Arc::clone(&self.sonic),
                self.client.clone(),
                Arc::clone(&self.registry),
            ));
            discovery.insert(DexType::Sonic, adapter.clone());
            quoters.insert(DexType::Sonic, adapter);
        }

        DexAdapters { discovery, quoters }
    }
}
