//! Error handling for the application

use thiserror::Error;

use crate::domain::dex::DexType;

/// Errors raised by a single remote canister call.
///
/// The variants double as the retry classification: only transient network
/// conditions are ever retried. Identity and session failures must bubble up
/// untouched so the caller can re-authenticate.
#[derive(Error, Debug, Clone)]
pub enum CallError {
    #[error("network error: {0}")]
    Network(String),

    #[error("call timed out: {0}")]
    Timeout(String),

    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("session expired")]
    SessionExpired,

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("call rejected: {0}")]
    Rejected(String),
}

impl CallError {
    /// Whether a retry can plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CallError::Network(_) | CallError::Timeout(_))
    }
}

/// DEX adapter errors
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("remote call failed: {0}")]
    Call(#[from] CallError),

    #[error("pool {pool} does not hold pair {token_in}/{token_out}")]
    PairMismatch {
        pool: String,
        token_in: String,
        token_out: String,
    },

    #[error("unexpected reply from {dex_type:?}: {detail}")]
    UnexpectedReply { dex_type: DexType, detail: String },
}

impl ProviderError {
    pub fn pair_mismatch(pool: &str, token_in: &str, token_out: &str) -> Self {
        ProviderError::PairMismatch {
            pool: pool.to_string(),
            token_in: token_in.to_string(),
            token_out: token_out.to_string(),
        }
    }
}

/// General application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        AppError::ProviderError(err.to_string())
    }
}

impl From<CallError> for AppError {
    fn from(err: CallError) -> Self {
        AppError::ProviderError(err.to_string())
    }
}
