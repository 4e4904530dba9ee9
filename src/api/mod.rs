//! Outbound HTTP clients
//!
//! - [`helius`]: webhook-configuration management (watched-address set)
//! - [`dexscreener`]: market data lookups for notification enrichment

pub mod dexscreener;
pub mod helius;

pub use dexscreener::{DexScreenerClient, MarketData};
pub use helius::HeliusClient;
