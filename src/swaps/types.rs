use serde::Deserialize;
use serde_json::Value;

/// Wrapped SOL mint address, the network's native side of a trade
pub const SOL_MINT: &str = "So11111111111111111111111111111111111111112";

/// One transaction event as delivered by the webhook sender
///
/// Deserialization is deliberately lenient: every field defaults, so an
/// event missing half its fields still decodes and gets a chance at the
/// parser instead of poisoning its whole batch.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InboundTransactionEvent {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub signature: String,
    pub token_transfers: Vec<TokenTransfer>,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TokenTransfer {
    pub mint: String,
    /// Amount as sent upstream; sometimes a number, sometimes a string
    pub token_amount: Value,
}

impl InboundTransactionEvent {
    /// Only swap-shaped events are worth parsing
    pub fn is_swap(&self) -> bool {
        self.kind == "SWAP" || self.kind == "DEX_TRADE"
    }
}

impl TokenTransfer {
    /// Coerce the upstream amount to f64; junk becomes 0 rather than an error
    pub fn amount(&self) -> f64 {
        match &self.token_amount {
            Value::Number(n) => n.as_f64().unwrap_or(0.0),
            Value::String(s) => crate::swaps::parser::parse_amount(s),
            _ => 0.0,
        }
    }
}

/// A swap extracted from one inbound event
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSwap {
    /// The wallet that executed the trade
    pub trader: String,
    /// Token given up (mint in structured mode, symbol in narrative mode)
    pub from_token: String,
    pub from_amount: f64,
    /// Token received
    pub to_token: String,
    pub to_amount: f64,
}

impl ParsedSwap {
    /// The mint worth enriching with market data: the non-native side,
    /// if it is mint-shaped (narrative symbols are not)
    pub fn enrichment_target(&self) -> Option<&str> {
        let candidate = if self.from_token == SOL_MINT || self.from_token == "SOL" {
            &self.to_token
        } else {
            &self.from_token
        };
        crate::swaps::parser::looks_like_address(candidate).then_some(candidate.as_str())
    }
}
