/// Swap extraction from inbound transaction events
///
/// Two strategies, tried in a fixed order; each inspects the event shape
/// and answers with Some(swap) or None, never an error:
///
/// 1. structured - the trader is the base58 run leading the description and
///    the economically relevant sides come from the first two token
///    transfers (exact mints, preferred when available)
/// 2. narrative  - the whole swap is one sentence:
///    `<address> swapped <amount> <symbol> for <amount> <symbol>`
///
/// Only when no strategy applies does the event fail, and that failure is
/// per-event: the caller skips it and keeps going.
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::errors::SwapwatchError;
use crate::logger::{self, LogTag};
use crate::swaps::types::{InboundTransactionEvent, ParsedSwap};

/// Solana addresses: base58 alphabet, 32-44 characters
static ADDRESS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[1-9A-HJ-NP-Za-km-z]{32,44}$").unwrap());

static NARRATIVE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"([1-9A-HJ-NP-Za-km-z]{32,44}) swapped ([0-9][0-9,]*\.?[0-9]*) (\S+) for ([0-9][0-9,]*\.?[0-9]*) (\S+)",
    )
    .unwrap()
});

/// Parse one event into a swap, or report it unrecognizable
pub fn parse_swap_event(event: &InboundTransactionEvent) -> Result<ParsedSwap, SwapwatchError> {
    if let Some(swap) = parse_structured(event) {
        return Ok(swap);
    }
    if let Some(swap) = parse_narrative(&event.description) {
        return Ok(swap);
    }
    Err(SwapwatchError::UnparseableDescription {
        signature: event.signature.clone(),
    })
}

/// Structured strategy: leading address + first two token transfers
fn parse_structured(event: &InboundTransactionEvent) -> Option<ParsedSwap> {
    if event.token_transfers.len() < 2 {
        return None;
    }

    let trader = leading_address(&event.description)?;
    let from = &event.token_transfers[0];
    let to = &event.token_transfers[1];
    if from.mint.is_empty() || to.mint.is_empty() {
        return None;
    }

    Some(ParsedSwap {
        trader: trader.to_string(),
        from_token: from.mint.clone(),
        from_amount: from.amount(),
        to_token: to.mint.clone(),
        to_amount: to.amount(),
    })
}

/// Narrative strategy: one free-text sentence carries the whole swap
fn parse_narrative(description: &str) -> Option<ParsedSwap> {
    let caps = NARRATIVE_RE.captures(description)?;
    Some(ParsedSwap {
        trader: caps[1].to_string(),
        from_amount: parse_amount(&caps[2]),
        from_token: caps[3].to_string(),
        to_amount: parse_amount(&caps[4]),
        to_token: caps[5].to_string(),
    })
}

/// The base58 run a structured description starts with, if long enough
fn leading_address(description: &str) -> Option<&str> {
    let run_len = description
        .bytes()
        .take_while(|b| is_base58_byte(*b))
        .count();
    if (32..=44).contains(&run_len) {
        Some(&description[..run_len])
    } else {
        None
    }
}

fn is_base58_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() && !matches!(b, b'0' | b'I' | b'O' | b'l')
}

/// Whether a token string is address-shaped rather than a display symbol
pub fn looks_like_address(token: &str) -> bool {
    ADDRESS_RE.is_match(token)
}

/// Parse an upstream amount string; tolerates thousands separators,
/// coerces anything non-numeric to 0
pub fn parse_amount(raw: &str) -> f64 {
    raw.replace(',', "").parse().unwrap_or(0.0)
}

/// Decode a raw webhook batch into the events worth notifying about
///
/// Per-event failures (undecodable JSON, non-swap type, unrecognizable
/// description) are logged and skipped; the batch always completes.
pub fn decode_batch(raw_events: &[Value]) -> Vec<(InboundTransactionEvent, ParsedSwap)> {
    let mut notifiable = Vec::new();

    for raw in raw_events {
        let event: InboundTransactionEvent = match serde_json::from_value(raw.clone()) {
            Ok(event) => event,
            Err(e) => {
                logger::debug(LogTag::Swap, &format!("Undecodable event skipped: {}", e));
                continue;
            }
        };

        if !event.is_swap() {
            continue;
        }

        match parse_swap_event(&event) {
            Ok(swap) => notifiable.push((event, swap)),
            Err(e) => {
                logger::debug(LogTag::Swap, &format!("Event skipped: {}", e));
            }
        }
    }

    notifiable
}
