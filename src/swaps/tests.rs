/// Parser test suite: both extraction strategies, amount coercion, and
/// batch-level skip behavior.

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::swaps::parser::{decode_batch, parse_amount, parse_swap_event};
    use crate::swaps::types::{InboundTransactionEvent, ParsedSwap, SOL_MINT};

    const TRADER: &str = "7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU";
    const BONK_MINT: &str = "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263";

    fn narrative_event(description: &str) -> InboundTransactionEvent {
        InboundTransactionEvent {
            kind: "SWAP".to_string(),
            description: description.to_string(),
            signature: "5Sig".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn narrative_sentence_yields_full_swap() {
        let event = narrative_event(&format!("{} swapped 2.5 SOL for 1000 FOO", TRADER));
        let swap = parse_swap_event(&event).unwrap();

        assert_eq!(
            swap,
            ParsedSwap {
                trader: TRADER.to_string(),
                from_amount: 2.5,
                from_token: "SOL".to_string(),
                to_amount: 1000.0,
                to_token: "FOO".to_string(),
            }
        );
    }

    #[test]
    fn structured_event_takes_mints_from_transfers() {
        let raw = json!({
            "type": "SWAP",
            "description": format!("{} swapped 0.5 SOL for 1,200,000 Bonk", TRADER),
            "signature": "5StructSig",
            "tokenTransfers": [
                { "mint": SOL_MINT, "tokenAmount": 0.5 },
                { "mint": BONK_MINT, "tokenAmount": 1200000.0 }
            ],
            "timestamp": 1700000000
        });
        let event: InboundTransactionEvent = serde_json::from_value(raw).unwrap();
        let swap = parse_swap_event(&event).unwrap();

        assert_eq!(swap.trader, TRADER);
        assert_eq!(swap.from_token, SOL_MINT);
        assert_eq!(swap.to_token, BONK_MINT);
        assert_eq!(swap.to_amount, 1200000.0);
        assert_eq!(swap.enrichment_target(), Some(BONK_MINT));
    }

    #[test]
    fn string_amounts_and_separators_are_tolerated() {
        assert_eq!(parse_amount("1,234.5"), 1234.5);
        assert_eq!(parse_amount("1000"), 1000.0);
        assert_eq!(parse_amount("garbage"), 0.0);
        assert_eq!(parse_amount(""), 0.0);

        let raw = json!({
            "type": "SWAP",
            "description": format!("{} swapped tokens", TRADER),
            "tokenTransfers": [
                { "mint": SOL_MINT, "tokenAmount": "2,500.75" },
                { "mint": BONK_MINT, "tokenAmount": "not-a-number" }
            ]
        });
        let event: InboundTransactionEvent = serde_json::from_value(raw).unwrap();
        let swap = parse_swap_event(&event).unwrap();
        assert_eq!(swap.from_amount, 2500.75);
        assert_eq!(swap.to_amount, 0.0);
    }

    #[test]
    fn unrecognizable_description_fails_per_event() {
        let event = narrative_event("transferred 3 NFTs to someone");
        assert!(parse_swap_event(&event).is_err());
    }

    #[test]
    fn narrative_symbols_have_no_enrichment_target() {
        let event = narrative_event(&format!("{} swapped 2.5 SOL for 1000 FOO", TRADER));
        let swap = parse_swap_event(&event).unwrap();
        assert_eq!(swap.enrichment_target(), None);
    }

    #[test]
    fn mixed_batch_keeps_only_the_parseable_swap() {
        let batch = vec![
            json!({ "type": "SWAP", "description": "???", "signature": "bad" }),
            json!({
                "type": "SWAP",
                "description": format!("{} swapped 1 SOL for 42 BONK", TRADER),
                "signature": "good"
            }),
            json!({ "type": "NFT_SALE", "description": "irrelevant" }),
            json!("not even an object"),
        ];

        let notifiable = decode_batch(&batch);
        assert_eq!(notifiable.len(), 1);
        assert_eq!(notifiable[0].0.signature, "good");
        assert_eq!(notifiable[0].1.trader, TRADER);
    }

    #[test]
    fn missing_fields_still_decode() {
        let event: InboundTransactionEvent = serde_json::from_value(json!({})).unwrap();
        assert!(!event.is_swap());
        assert!(event.description.is_empty());
    }
}
