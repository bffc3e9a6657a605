//! Ordered chain of price providers behind the single oracle interface.
//!
//! Providers are tried in order. The first `Ok` answer wins, including an
//! explicit 0 ("unknown symbol"); a provider failure is logged and the next
//! provider is asked. Only if every provider fails does the last failure
//! propagate.

use std::sync::Arc;

use super::eod_table::EodTableAdapter;
use super::random_stub::RandomPriceAdapter;
use crate::domain::error::TradefloorError;
use crate::ports::config_port::ConfigPort;
use crate::ports::price_port::PricePort;
use crate::ports::store_port::StorePort;

pub struct PriceChain {
    providers: Vec<Box<dyn PricePort>>,
}

impl PriceChain {
    pub fn new(providers: Vec<Box<dyn PricePort>>) -> Self {
        Self { providers }
    }

    /// Standard composition: end-of-day table first, random stub last
    /// unless disabled with `[market] random_fallback = false`.
    pub fn from_config(config: &dyn ConfigPort, store: Arc<dyn StorePort>) -> Self {
        let mut providers: Vec<Box<dyn PricePort>> =
            vec![Box::new(EodTableAdapter::new(store))];
        if config.get_bool("market", "random_fallback", true) {
            providers.push(Box::new(RandomPriceAdapter));
        }
        Self::new(providers)
    }
}

impl PricePort for PriceChain {
    fn name(&self) -> &'static str {
        "chain"
    }

    fn get_price(&self, symbol: &str) -> Result<f64, TradefloorError> {
        let mut last_err: Option<TradefloorError> = None;
        for provider in &self.providers {
            match provider.get_price(symbol) {
                Ok(price) => {
                    if last_err.is_some() {
                        log::warn!(
                            "price for {symbol} served by fallback provider {}",
                            provider.name()
                        );
                    }
                    return Ok(price);
                }
                Err(err) => {
                    log::warn!("price provider {} failed for {symbol}: {err}", provider.name());
                    last_err = Some(err);
                }
            }
        }
        Err(last_err.unwrap_or_else(|| TradefloorError::PriceUnavailable {
            symbol: symbol.to_string(),
            reason: "no price providers configured".into(),
        }))
    }
}
