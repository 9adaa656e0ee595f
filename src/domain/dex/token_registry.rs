//! Token metadata registry
//!
//! The aggregator does not own token metadata; it is supplied by the wallet's
//! token catalogue. Adapters consult the registry to exclude tokens whose
//! ledger standard the wallet cannot transfer through.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Ledger standards a token may implement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenStandard {
    Icp,
    Icrc1,
    Icrc2,
    Dip20,
    Ext,
}

impl TokenStandard {
    /// Parse a provider-reported standard label, e.g. "ICRC2" or "ICRC-2".
    pub fn parse(label: &str) -> Option<Self> {
        match label.to_ascii_uppercase().replace('-', "").as_str() {
            "ICP" => Some(TokenStandard::Icp),
            "ICRC1" => Some(TokenStandard::Icrc1),
            "ICRC2" => Some(TokenStandard::Icrc2),
            "DIP20" => Some(TokenStandard::Dip20),
            "EXT" => Some(TokenStandard::Ext),
            _ => None,
        }
    }
}

/// Token metadata as supplied by the registry collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenInfo {
    pub ledger: String,
    pub symbol: String,
    pub decimals: u8,
    pub standards: Vec<TokenStandard>,
}

/// Read access to the wallet's token catalogue
pub trait TokenRegistry: Send + Sync {
    fn token_info(&self, ledger: &str) -> Option<TokenInfo>;

    fn supports(&self, ledger: &str, standard: TokenStandard) -> bool {
        self.token_info(ledger)
            .map(|info| info.standards.contains(&standard))
            .unwrap_or(false)
    }
}

/// In-memory registry implementation
#[derive(Debug, Default)]
pub struct InMemoryTokenRegistry {
    tokens: HashMap<String, TokenInfo>,
}

impl InMemoryTokenRegistry {
    pub fn new(tokens: impl IntoIterator<Item = TokenInfo>) -> Self {
        Self {
            tokens: tokens
                .into_iter()
                .map(|info| (info.ledger.clone(), info))
                .collect(),
        }
    }
}

impl TokenRegistry for InMemoryTokenRegistry {
    fn token_info(&self, ledger: &str) -> Option<TokenInfo> {
        self.tokens.get(ledger).cloned()
    }
}
