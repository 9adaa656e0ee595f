//! Infrastructure layer - remote call plumbing and DEX adapters

pub mod agent;
pub mod dex_adapters;
