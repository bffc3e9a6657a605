//! Immutable record of one executed trade.

use serde::{Deserialize, Serialize};

/// Timestamp format used throughout the ledger: `YYYY-MM-DD HH:MM:SS`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local time rendered in [`TIMESTAMP_FORMAT`].
pub fn now_timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// One executed trade. Quantity is signed: positive for buys, negative for
/// sells. Price is the spread-adjusted execution price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub symbol: String,
    pub quantity: i64,
    pub price: f64,
    pub timestamp: String,
    pub rationale: String,
}

impl Transaction {
    /// Signed notional of the trade: positive for buys, negative for sells.
    pub fn total(&self) -> f64 {
        self.quantity as f64 * self.price
    }

    pub fn is_buy(&self) -> bool {
        self.quantity > 0
    }

    pub fn is_sell(&self) -> bool {
        self.quantity < 0
    }
}

impl std::fmt::Display for Transaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} shares of {} at {} each.",
            self.quantity.abs(),
            self.symbol,
            self.price
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_buy() -> Transaction {
        Transaction {
            symbol: "AAPL".into(),
            quantity: 10,
            price: 100.2,
            timestamp: "2025-06-02 14:30:00".into(),
            rationale: "momentum entry".into(),
        }
    }

    fn sample_sell() -> Transaction {
        Transaction {
            symbol: "AAPL".into(),
            quantity: -10,
            price: 99.8,
            timestamp: "2025-06-03 14:30:00".into(),
            rationale: "take profit".into(),
        }
    }

    #[test]
    fn total_is_signed_notional() {
        assert!((sample_buy().total() - 1002.0).abs() < f64::EPSILON);
        assert!((sample_sell().total() - (-998.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn buy_and_sell_classification() {
        assert!(sample_buy().is_buy());
        assert!(!sample_buy().is_sell());
        assert!(sample_sell().is_sell());
        assert!(!sample_sell().is_buy());
    }

    #[test]
    fn display_uses_absolute_quantity() {
        assert_eq!(
            sample_sell().to_string(),
            "10 shares of AAPL at 99.8 each."
        );
    }

    #[test]
    fn serde_round_trip() {
        let txn = sample_buy();
        let json = serde_json::to_string(&txn).unwrap();
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, txn);
    }

    #[test]
    fn now_timestamp_matches_format() {
        let ts = now_timestamp();
        assert!(chrono::NaiveDateTime::parse_from_str(&ts, TIMESTAMP_FORMAT).is_ok());
    }
}
