//! Error taxonomy for the account ledger and its collaborators.
//!
//! Domain failures (an invalid order) are separate variants from dependency
//! failures (the store or the price source could not be reached), so callers
//! can tell "your order is wrong" apart from "the system could not complete
//! the check".

/// Top-level error type for tradefloor.
#[derive(Debug, thiserror::Error)]
pub enum TradefloorError {
    #[error("unrecognized symbol {symbol}")]
    UnknownSymbol { symbol: String },

    #[error("insufficient funds for {action}: need ${needed:.2}, available ${available:.2}")]
    InsufficientFunds {
        action: String,
        needed: f64,
        available: f64,
    },

    #[error("cannot sell {requested} shares of {symbol}: only {held} held")]
    InsufficientHoldings {
        symbol: String,
        requested: i64,
        held: i64,
    },

    #[error("amount must be positive, got {amount}")]
    InvalidAmount { amount: f64 },

    #[error("database error: {reason}")]
    Database { reason: String },

    #[error("database query error: {reason}")]
    DatabaseQuery { reason: String },

    #[error("price unavailable for {symbol}: {reason}")]
    PriceUnavailable { symbol: String, reason: String },

    #[error("account snapshot error: {reason}")]
    Snapshot { reason: String },

    #[error("price file error in {file}: {reason}")]
    PriceFile { file: String, reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TradefloorError {
    /// Whether this error is a local order-validation failure, as opposed to
    /// a failure of an external dependency.
    pub fn is_domain(&self) -> bool {
        matches!(
            self,
            TradefloorError::UnknownSymbol { .. }
                | TradefloorError::InsufficientFunds { .. }
                | TradefloorError::InsufficientHoldings { .. }
                | TradefloorError::InvalidAmount { .. }
        )
    }
}

impl From<&TradefloorError> for std::process::ExitCode {
    fn from(err: &TradefloorError) -> Self {
        let code: u8 = match err {
            TradefloorError::Io(_) | TradefloorError::PriceFile { .. } => 1,
            TradefloorError::ConfigParse { .. } | TradefloorError::ConfigMissing { .. } => 2,
            TradefloorError::Database { .. }
            | TradefloorError::DatabaseQuery { .. }
            | TradefloorError::Snapshot { .. } => 3,
            TradefloorError::UnknownSymbol { .. }
            | TradefloorError::InsufficientFunds { .. }
            | TradefloorError::InsufficientHoldings { .. }
            | TradefloorError::InvalidAmount { .. } => 4,
            TradefloorError::PriceUnavailable { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_are_classified() {
        let err = TradefloorError::InsufficientHoldings {
            symbol: "AAPL".into(),
            requested: 10,
            held: 3,
        };
        assert!(err.is_domain());

        let err = TradefloorError::Database {
            reason: "locked".into(),
        };
        assert!(!err.is_domain());
    }

    #[test]
    fn messages_carry_context() {
        let err = TradefloorError::InsufficientFunds {
            action: "1 share of AAPL".into(),
            needed: 100.2,
            available: 50.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("AAPL"));
        assert!(msg.contains("100.20"));
        assert!(msg.contains("50.00"));
    }

    #[test]
    fn price_unavailable_is_not_domain() {
        let err = TradefloorError::PriceUnavailable {
            symbol: "AAPL".into(),
            reason: "timeout".into(),
        };
        assert!(!err.is_domain());
        assert!(err.to_string().contains("AAPL"));
    }
}
