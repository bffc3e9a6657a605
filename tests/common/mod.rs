#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use tradefloor::adapters::sqlite_store::SqliteStore;
use tradefloor::domain::error::TradefloorError;
use tradefloor::domain::ledger::Ledger;
use tradefloor::ports::price_port::PricePort;
use tradefloor::ports::store_port::StorePort;

/// Deterministic price oracle: fixed prices per symbol, injectable
/// per-symbol failures, 0 for anything unconfigured.
pub struct MockPricePort {
    pub prices: HashMap<String, f64>,
    pub errors: HashMap<String, String>,
}

impl MockPricePort {
    pub fn new() -> Self {
        Self {
            prices: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_price(mut self, symbol: &str, price: f64) -> Self {
        self.prices.insert(symbol.to_string(), price);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl PricePort for MockPricePort {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn get_price(&self, symbol: &str) -> Result<f64, TradefloorError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(TradefloorError::PriceUnavailable {
                symbol: symbol.to_string(),
                reason: reason.clone(),
            });
        }
        Ok(self.prices.get(symbol).copied().unwrap_or(0.0))
    }
}

pub fn memory_store() -> Arc<SqliteStore> {
    let store = SqliteStore::in_memory().unwrap();
    store.initialize_schema().unwrap();
    Arc::new(store)
}

pub fn make_ledger(prices: MockPricePort) -> (Ledger, Arc<SqliteStore>) {
    let store = memory_store();
    let ledger = Ledger::new(store.clone() as Arc<dyn StorePort>, Arc::new(prices));
    (ledger, store)
}

/// Parse the JSON body out of a `"Completed. Latest details:\n{...}"`
/// completion string (or a bare report).
pub fn report_json(output: &str) -> serde_json::Value {
    let json = output
        .strip_prefix("Completed. Latest details:\n")
        .unwrap_or(output);
    serde_json::from_str(json).expect("report should be valid JSON")
}
