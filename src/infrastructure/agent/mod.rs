//! Remote call plumbing

mod canister_client;

pub use canister_client::{CanisterClient, Interrupt, RetryPolicy};
