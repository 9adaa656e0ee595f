//! Domain layer - exchanges, pools and quotes

pub mod dex;
pub mod pool;
pub mod quote;
