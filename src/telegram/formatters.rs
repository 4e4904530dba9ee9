//! HTML message composition for swap notifications
//!
//! Builds the recipient-facing text from a parsed swap plus whatever market
//! data was available. Missing market data degrades the message, it never
//! suppresses it.

use chrono::{TimeZone, Utc};

use crate::api::MarketData;
use crate::swaps::parser::looks_like_address;
use crate::swaps::types::{ParsedSwap, SOL_MINT};

/// How a swap reads from the trader's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeAction {
    Buy,
    Sell,
    Swap,
}

/// Classify a swap against the network's native asset
///
/// Native given up means the trader bought the other asset; native received
/// means they sold it; neither side native stays a plain swap.
pub fn classify(swap: &ParsedSwap) -> TradeAction {
    if is_native(&swap.from_token) {
        TradeAction::Buy
    } else if is_native(&swap.to_token) {
        TradeAction::Sell
    } else {
        TradeAction::Swap
    }
}

fn is_native(token: &str) -> bool {
    token == SOL_MINT || token == "SOL"
}

/// Compose the notification for one swap
pub fn format_swap_message(
    swap: &ParsedSwap,
    market: Option<&MarketData>,
    signature: &str,
    timestamp: i64,
) -> String {
    let action = classify(swap);
    let header = match action {
        TradeAction::Buy => format!("🟢 <b>Buy {}</b>", display_token(&swap.to_token)),
        TradeAction::Sell => format!("🔴 <b>Sell {}</b>", display_token(&swap.from_token)),
        TradeAction::Swap => "🔄 <b>Swap</b>".to_string(),
    };

    let mut message = format!(
        "{}\n\n\
         👛 Wallet: <code>{}</code>\n\
         💱 {} {} ➡️ {} {}",
        header,
        swap.trader,
        format_amount(swap.from_amount),
        display_token(&swap.from_token),
        format_amount(swap.to_amount),
        display_token(&swap.to_token),
    );

    if let Some(market) = market {
        let mut lines = Vec::new();
        if let Some(price) = market.price_usd {
            lines.push(format!("Price: ${}", format_amount(price)));
        }
        if let Some(cap) = market.market_cap {
            lines.push(format!("MC: ${}", format_amount(cap)));
        }
        if let Some(volume) = market.volume_h24 {
            lines.push(format!("24h Vol: ${}", format_amount(volume)));
        }
        if !lines.is_empty() {
            message.push_str(&format!("\n💵 {}", lines.join(" | ")));
        }
    }

    if timestamp > 0 {
        if let Some(time) = Utc.timestamp_opt(timestamp, 0).single() {
            message.push_str(&format!("\n⏰ {}", time.format("%Y-%m-%d %H:%M:%S UTC")));
        }
    }

    message.push_str(&format!(
        "\n\n🔍 <a href=\"https://solscan.io/tx/{}\">View on Solscan</a>",
        signature
    ));

    message
}

/// Abbreviate a monetary magnitude for display
///
/// Values of a million and up get an "M" suffix, thousands a "K"; anything
/// that does not coerce to a finite number renders as "0".
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let abs = value.abs();
    if abs >= 1_000_000.0 {
        format!("{:.2}M", value / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{:.2}K", value / 1_000.0)
    } else {
        format!("{:.2}", value)
    }
}

/// Render a token for display: mints get truncated, symbols get escaped
fn display_token(token: &str) -> String {
    if looks_like_address(token) {
        truncate_address(token)
    } else {
        html_escape(token)
    }
}

/// Truncate an address for display
pub fn truncate_address(address: &str) -> String {
    if address.len() > 12 {
        format!("{}...{}", &address[..6], &address[address.len() - 4..])
    } else {
        address.to_string()
    }
}

/// Escape text interpolated into HTML-mode messages
pub fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRADER: &str = "7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU";
    const BONK_MINT: &str = "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263";

    fn sol_buy() -> ParsedSwap {
        ParsedSwap {
            trader: TRADER.to_string(),
            from_token: SOL_MINT.to_string(),
            from_amount: 2.5,
            to_token: BONK_MINT.to_string(),
            to_amount: 1_200_000.0,
        }
    }

    #[test]
    fn magnitudes_are_abbreviated() {
        assert_eq!(format_amount(2.5), "2.50");
        assert_eq!(format_amount(999.99), "999.99");
        assert_eq!(format_amount(1_000.0), "1.00K");
        assert_eq!(format_amount(12_340.0), "12.34K");
        assert_eq!(format_amount(1_000_000.0), "1.00M");
        assert_eq!(format_amount(2_340_000.0), "2.34M");
        assert_eq!(format_amount(f64::NAN), "0");
    }

    #[test]
    fn native_from_side_is_a_buy() {
        assert_eq!(classify(&sol_buy()), TradeAction::Buy);

        let mut sell = sol_buy();
        std::mem::swap(&mut sell.from_token, &mut sell.to_token);
        assert_eq!(classify(&sell), TradeAction::Sell);

        let mut plain = sol_buy();
        plain.from_token = "USDC".to_string();
        plain.to_token = "FOO".to_string();
        assert_eq!(classify(&plain), TradeAction::Swap);
    }

    #[test]
    fn symbol_form_classifies_too() {
        let swap = ParsedSwap {
            trader: TRADER.to_string(),
            from_token: "SOL".to_string(),
            from_amount: 2.5,
            to_token: "FOO".to_string(),
            to_amount: 1000.0,
        };
        assert_eq!(classify(&swap), TradeAction::Buy);
    }

    #[test]
    fn message_degrades_without_market_data() {
        let message = format_swap_message(&sol_buy(), None, "5Sig", 0);

        assert!(message.contains("2.50"));
        assert!(message.contains("1.20M"));
        assert!(message.contains(TRADER));
        assert!(message.contains("https://solscan.io/tx/5Sig"));
        assert!(!message.contains("Price:"));
        assert!(!message.contains("UTC"));
    }

    #[test]
    fn market_data_enriches_the_message() {
        let market = MarketData {
            price_usd: Some(0.02),
            market_cap: Some(1_500_000_000.0),
            volume_h24: Some(456_000.0),
        };
        let message = format_swap_message(&sol_buy(), Some(&market), "5Sig", 1_700_000_000);

        assert!(message.contains("Price: $0.02"));
        assert!(message.contains("MC: $1500.00M"));
        assert!(message.contains("24h Vol: $456.00K"));
        assert!(message.contains("2023-11-14"));
    }

    #[test]
    fn symbols_are_escaped_and_mints_truncated() {
        let swap = ParsedSwap {
            trader: TRADER.to_string(),
            from_token: "<b>".to_string(),
            from_amount: 1.0,
            to_token: BONK_MINT.to_string(),
            to_amount: 2.0,
        };
        let message = format_swap_message(&swap, None, "sig", 0);
        assert!(message.contains("&lt;b&gt;"));
        assert!(message.contains("DezXAZ...B263"));
    }
}
