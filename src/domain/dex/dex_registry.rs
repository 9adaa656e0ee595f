//! DEX registry for the Internet Computer mainnet

use serde::{Deserialize, Serialize};

/// Supported DEX integrations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DexType {
    IcpSwap,
    KongSwap,
    Sonic,
}

impl DexType {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            DexType::IcpSwap => "icpswap",
            DexType::KongSwap => "kongswap",
            DexType::Sonic => "sonic",
        }
    }
}

/// DEX information
#[derive(Debug, Clone)]
pub struct DexInfo {
    pub name: String,
    pub canister_id: String,
    pub dex_type: DexType,
    pub description: String,
    pub is_active: bool,
}

/// DEX registry for the Internet Computer mainnet
pub struct DexRegistry;

impl DexRegistry {
    /// Get all supported DEXes
    pub fn get_all_dexes() -> Vec<DexInfo> {
        vec![
            DexInfo {
                name: "icpswap".to_string(),
                canister_id: "4mmnk-kiaaa-aaaag-qbllq-cai".to_string(),
                dex_type: DexType::IcpSwap,
                description: "ICPSwap - per-pool canisters behind a factory index".to_string(),
                is_active: true,
            },
            DexInfo {
                name: "kongswap".to_string(),
                canister_id: "2ipq2-uqaaa-aaaar-qailq-cai".to_string(),
                dex_type: DexType::KongSwap,
                description: "KongSwap - single backend canister routing any ICRC-2 pair"
                    .to_string(),
                is_active: true,
            },
            DexInfo {
                name: "sonic".to_string(),
                canister_id: "3xwpq-ziaaa-aaaah-qcn4a-cai".to_string(),
                dex_type: DexType::Sonic,
                description: "Sonic - constant-product AMM, quotes computed client-side"
                    .to_string(),
                is_active: true,
            },
        ]
    }

    /// Get DEX by type
    pub fn get_dex_by_type(dex_type: &DexType) -> Option<DexInfo> {
        Self::get_all_dexes()
            .into_iter()
            .find(|dex| dex.dex_type == *dex_type)
    }

    /// Get active DEXes only
    pub fn get_active_dexes() -> Vec<DexInfo> {
        Self::get_all_dexes()
            .into_iter()
            .filter(|dex| dex.is_active)
            .collect()
    }
}
