//! Canister query client with bounded retry
//!
//! Wraps one authenticated agent connection. The wire codec and identity
//! layer live outside this crate: callers hand over the remote operation as
//! an opaque async closure that already encodes its arguments and decodes
//! the reply.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::shared::errors::CallError;
use crate::shared::types::AggregatorConfig;

/// Caller-supplied predicate over the attempt count. Returning `true` stops
/// retrying and surfaces the last error even though attempts remain.
pub type Interrupt = Arc<dyn Fn(u32) -> bool + Send + Sync>;

/// Retry policy for query calls
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total executions, first attempt included.
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    pub fn from_config(config: &AggregatorConfig) -> Self {
        Self::new(config.retry_attempts, config.retry_base_delay())
    }

    /// Exponential backoff: `base_delay * 2^attempt`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(100),
        }
    }
}

/// Canister query client
#[derive(Debug, Clone, Default)]
pub struct CanisterClient {
    policy: RetryPolicy,
}

impl CanisterClient {
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    /// Execute a read-only query call.
    ///
    /// Transient failures (network, timeout) are retried with exponential
    /// backoff up to the policy ceiling. Authentication and session-expiry
    /// failures are surfaced immediately: retrying cannot fix them, and the
    /// caller must react by re-authenticating. Protocol-level failures are
    /// likewise never retried.
    ///
    /// The interrupt predicate is consulted between attempts only; an
    /// in-flight call runs to completion or its native timeout.
    pub async fn query<T, F, Fut>(
        &self,
        op: F,
        interrupt: Option<&Interrupt>,
    ) -> Result<T, CallError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, CallError>>,
    {
        let mut attempt: u32 = 0;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    attempt += 1;
                    if !err.is_retryable() {
                        return Err(err);
                    }
                    if attempt >= self.policy.max_attempts {
                        return Err(err);
                    }
                    if let Some(interrupt) = interrupt {
                        if interrupt(attempt) {
                            return Err(err);
                        }
                    }
                    let delay = self.policy.delay_for(attempt - 1);
                    warn!(
                        "⚠️  Query attempt {}/{} failed: {}; retrying in {:?}",
                        attempt, self.policy.max_attempts, err, delay
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Instant;

    fn client(max_attempts: u32, base_delay_ms: u64) -> CanisterClient {
        CanisterClient::new(RetryPolicy::new(
            max_attempts,
            Duration::from_millis(base_delay_ms),
        ))
    }

    #[tokio::test]
    async fn test_success_needs_single_attempt() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, CallError> = client(3, 10)
            .query(
                || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(42)
                },
                None,
            )
            .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_transient_failure_hits_retry_ceiling() {
        let calls = AtomicU32::new(0);
        let started = Instant::now();
        let result: Result<u32, CallError> = client(3, 10)
            .query(
                || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err(CallError::Network("connection refused".to_string()))
                },
                None,
            )
            .await;

        assert!(matches!(result, Err(CallError::Network(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // Two inter-attempt delays: 10ms + 20ms.
        assert!(started.elapsed() >= Duration::from_millis(30));
    }

    #[tokio::test]
    async fn test_auth_failure_never_retried() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, CallError> = client(5, 10)
            .query(
                || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err(CallError::AuthenticationFailed("bad delegation".to_string()))
                },
                None,
            )
            .await;

        assert!(matches!(result, Err(CallError::AuthenticationFailed(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_session_expiry_never_retried() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, CallError> = client(5, 10)
            .query(
                || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err(CallError::SessionExpired)
                },
                None,
            )
            .await;

        assert!(matches!(result, Err(CallError::SessionExpired)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_interrupt_stops_retrying_early() {
        let calls = AtomicU32::new(0);
        let interrupt: Interrupt = Arc::new(|attempt| attempt >= 2);
        let result: Result<u32, CallError> = client(7, 1)
            .query(
                || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err(CallError::Timeout("slow canister".to_string()))
                },
                Some(&interrupt),
            )
            .await;

        assert!(matches!(result, Err(CallError::Timeout(_))));
        // Attempt 1 fails, interrupt(1) = false, attempt 2 fails,
        // interrupt(2) = true: no third execution.
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_recovers_after_transient_failures() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, CallError> = client(3, 1)
            .query(
                || async {
                    let n = calls.fetch_add(1, Ordering::SeqCst);
                    if n < 2 {
                        Err(CallError::Network("flaky".to_string()))
                    } else {
                        Ok(7)
                    }
                },
                None,
            )
            .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_policy_from_config_defaults() {
        let policy = RetryPolicy::from_config(&AggregatorConfig::default());
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.base_delay, Duration::from_millis(100));
    }

    #[test]
    fn test_delay_schedule_doubles() {
        let policy = RetryPolicy::new(7, Duration::from_millis(100));
        assert_eq!(policy.delay_for(0), Duration::from_millis(100));
        assert_eq!(policy.delay_for(1), Duration::from_millis(200));
        assert_eq!(policy.delay_for(2), Duration::from_millis(400));
    }
}
