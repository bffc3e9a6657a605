//! Symbol normalization: alias tickers mapped to tradable equity proxies.

/// Look up the tradable proxy for an alias ticker, if one exists.
///
/// Crypto tickers arrive in several variants depending on the upstream feed;
/// all of them trade here as their spot ETF or trust proxy.
fn synonym(upper: &str) -> Option<&'static str> {
    match upper {
        // Bitcoin -> spot ETF
        "BTC-USD" | "BTCUSD" | "BTC" | "XBT-USD" | "XBTUSD" => Some("IBIT"),
        // Ethereum -> trust (widely available ticker)
        "ETH-USD" | "ETHUSD" | "ETH" => Some("ETHE"),
        _ => None,
    }
}

/// Return a tradable equity symbol and a note if the symbol was mapped.
///
/// Always trims and uppercases the input. If a mapping occurs, the note
/// reads `"(mapped from X to Y)"`; otherwise the note is `None`.
pub fn normalize_symbol(symbol: &str) -> (String, Option<String>) {
    let upper = symbol.trim().to_uppercase();
    match synonym(&upper) {
        Some(mapped) if mapped != upper => {
            let note = format!("(mapped from {upper} to {mapped})");
            (mapped.to_string(), Some(note))
        }
        _ => (upper, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_symbol_uppercased() {
        let (symbol, note) = normalize_symbol("aapl");
        assert_eq!(symbol, "AAPL");
        assert!(note.is_none());
    }

    #[test]
    fn whitespace_trimmed() {
        let (symbol, note) = normalize_symbol("  msft ");
        assert_eq!(symbol, "MSFT");
        assert!(note.is_none());
    }

    #[test]
    fn bitcoin_variants_map_to_ibit() {
        for alias in ["BTC-USD", "btcusd", "btc", "XBT-USD", "xbtusd"] {
            let (symbol, note) = normalize_symbol(alias);
            assert_eq!(symbol, "IBIT", "alias {alias}");
            let note = note.expect("mapping note");
            assert!(note.starts_with("(mapped from"));
            assert!(note.ends_with("to IBIT)"));
        }
    }

    #[test]
    fn ethereum_variants_map_to_ethe() {
        for alias in ["ETH-USD", "ethusd", "ETH"] {
            let (symbol, note) = normalize_symbol(alias);
            assert_eq!(symbol, "ETHE", "alias {alias}");
            assert!(note.is_some());
        }
    }

    #[test]
    fn proxy_ticker_passes_through_unmapped() {
        let (symbol, note) = normalize_symbol("IBIT");
        assert_eq!(symbol, "IBIT");
        assert!(note.is_none());
    }

    #[test]
    fn note_spells_out_the_mapping() {
        let (_, note) = normalize_symbol("BTC-USD");
        assert_eq!(note.unwrap(), "(mapped from BTC-USD to IBIT)");
    }
}
