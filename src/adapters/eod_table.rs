//! End-of-day price table adapter.
//!
//! Serves prices from the store's per-date symbol->close map. A date with
//! no snapshot at all is a provider failure (the chain may fall through);
//! a snapshot that simply lacks the symbol is a definitive "unknown",
//! reported as price 0.

use std::sync::Arc;

use crate::domain::error::TradefloorError;
use crate::ports::price_port::PricePort;
use crate::ports::store_port::StorePort;

pub struct EodTableAdapter {
    store: Arc<dyn StorePort>,
    /// Pinned trading date; `None` means the current local date.
    date: Option<String>,
}

impl EodTableAdapter {
    pub fn new(store: Arc<dyn StorePort>) -> Self {
        Self { store, date: None }
    }

    /// Serve prices for a fixed date instead of today.
    pub fn for_date(store: Arc<dyn StorePort>, date: &str) -> Self {
        Self {
            store,
            date: Some(date.to_string()),
        }
    }

    fn trading_date(&self) -> String {
        match &self.date {
            Some(date) => date.clone(),
            None => chrono::Local::now().format("%Y-%m-%d").to_string(),
        }
    }
}

impl PricePort for EodTableAdapter {
    fn name(&self) -> &'static str {
        "eod-table"
    }

    fn get_price(&self, symbol: &str) -> Result<f64, TradefloorError> {
        let date = self.trading_date();
        match self.store.read_market(&date)? {
            Some(prices) => Ok(prices.get(symbol).copied().unwrap_or(0.0)),
            None => Err(TradefloorError::PriceUnavailable {
                symbol: symbol.to_string(),
                reason: format!("no end-of-day snapshot for {date}"),
            }),
        }
    }
}
