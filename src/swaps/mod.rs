//! Inbound swap event model and parsing
//!
//! Webhook batches carry enhanced transaction events; the parser extracts a
//! [`types::ParsedSwap`] from each recognizable one. A single malformed
//! event is skipped, never fatal to its batch.

pub mod parser;
mod tests;
pub mod types;

pub use parser::{decode_batch, parse_swap_event};
pub use types::{InboundTransactionEvent, ParsedSwap, TokenTransfer, SOL_MINT};
