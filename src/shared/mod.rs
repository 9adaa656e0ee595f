//! Shared kernel: errors, common types, configuration

pub mod config;
pub mod errors;
pub mod types;
