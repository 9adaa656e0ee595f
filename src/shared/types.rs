//! Common types used across the application

use std::fmt;
use std::time::Duration;

use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

/// Token amount in the token's smallest unit.
///
/// Backed by an arbitrary-precision integer: pool reserves on mainnet exceed
/// what fits safely into fixed-width math once multiplied through the swap
/// formula.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Amount(BigUint);

impl Amount {
    pub fn new(value: BigUint) -> Self {
        Self(value)
    }

    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    pub fn from_u64(value: u64) -> Self {
        Self(BigUint::from(value))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    pub fn into_inner(self) -> BigUint {
        self.0
    }
}

impl From<BigUint> for Amount {
    fn from(value: BigUint) -> Self {
        Self(value)
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl TryFrom<String> for Amount {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value
            .parse::<BigUint>()
            .map(Self)
            .map_err(|e| format!("invalid amount '{}': {}", value, e))
    }
}

impl From<Amount> for String {
    fn from(value: Amount) -> Self {
        value.0.to_string()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-DEX configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DexConfig {
    pub enabled: bool,
    pub canister_id: String,
}

/// Configuration for all supported DEXes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DexesConfig {
    pub icpswap: DexConfig,
    pub kongswap: DexConfig,
    pub sonic: DexConfig,
}

/// Aggregator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatorConfig {
    pub dexes: DexesConfig,
    pub cache_ttl_ms: u64,
    pub retry_attempts: u32,
    pub retry_base_delay_ms: u64,
}

impl AggregatorConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_millis(self.cache_ttl_ms)
    }

    pub fn retry_base_delay(&self) -> Duration {
        Duration::from_millis(self.retry_base_delay_ms)
    }
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            dexes: DexesConfig {
                icpswap: DexConfig {
                    enabled: true,
                    canister_id: "4mmnk-kiaaa-aaaag-qbllq-cai".to_string(), // ICPSwap factory
                },
                kongswap: DexConfig {
                    enabled: true,
                    canister_id: "2ipq2-uqaaa-aaaar-qailq-cai".to_string(), // KongSwap backend
                },
                sonic: DexConfig {
                    enabled: true,
                    canister_id: "3xwpq-ziaaa-aaaah-qcn4a-cai".to_string(), // Sonic swap
                },
            },
            cache_ttl_ms: 600_000,
            retry_attempts: 3,
            retry_base_delay_ms: 100,
        }
    }
}
