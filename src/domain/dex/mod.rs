//! DEX domain - decentralized exchange integrations

mod dex_registry;
mod token_registry;

pub use dex_registry::{DexInfo, DexRegistry, DexType};
pub use token_registry::{InMemoryTokenRegistry, TokenInfo, TokenRegistry, TokenStandard};

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::shared::types::Amount;

/// One tradable pair on one DEX.
///
/// `token_a`/`token_b` keep the order the provider reported them in; ICPSwap
/// quoting relies on that order to derive swap direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    pub id: String,
    pub dex_type: DexType,
    pub token_a: String,
    pub token_b: String,
}

impl Pool {
    /// Build a pool, rejecting degenerate same-token pairs.
    pub fn new(id: String, dex_type: DexType, token_a: String, token_b: String) -> Option<Self> {
        if token_a == token_b {
            return None;
        }
        Some(Self {
            id,
            dex_type,
            token_a,
            token_b,
        })
    }

    pub fn contains(&self, token: &str) -> bool {
        self.token_a == token || self.token_b == token
    }

    /// The opposite side of the pair, if `token` is in the pool.
    pub fn other_token(&self, token: &str) -> Option<&str> {
        if self.token_a == token {
            Some(&self.token_b)
        } else if self.token_b == token {
            Some(&self.token_a)
        } else {
            None
        }
    }

    /// Symmetric pair match: one side is `input`, the other is in `outputs`.
    pub fn matches(&self, input: &str, outputs: &HashSet<String>) -> bool {
        self.other_token(input)
            .map(|other| outputs.contains(other))
            .unwrap_or(false)
    }
}

/// A swap quote from one pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub dex_type: DexType,
    pub pool_id: String,
    pub amount_out: Amount,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(a: &str, b: &str) -> Pool {
        Pool::new("p1".to_string(), DexType::Sonic, a.to_string(), b.to_string()).unwrap()
    }

    #[test]
    fn test_rejects_same_token_pair() {
        assert!(Pool::new(
            "p".to_string(),
            DexType::IcpSwap,
            "x".to_string(),
            "x".to_string()
        )
        .is_none());
    }

    #[test]
    fn test_matches_is_symmetric() {
        let p = pool("icp", "ckbtc");
        let outputs: HashSet<String> = ["ckbtc".to_string()].into();
        assert!(p.matches("icp", &outputs));

        let outputs: HashSet<String> = ["icp".to_string()].into();
        assert!(p.matches("ckbtc", &outputs));

        let outputs: HashSet<String> = ["cketh".to_string()].into();
        assert!(!p.matches("icp", &outputs));
        assert!(!p.matches("cketh", &outputs));
    }

    #[test]
    fn test_other_token() {
        let p = pool("icp", "ckbtc");
        assert_eq!(p.other_token("icp"), Some("ckbtc"));
        assert_eq!(p.other_token("ckbtc"), Some("icp"));
        assert_eq!(p.other_token("cketh"), None);
    }
}
