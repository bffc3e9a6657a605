//! Last-resort synthetic price provider.
//!
//! Answers every symbol with a uniform whole-dollar price in 1..=100, so a
//! development setup with no price data still trades. Never the first
//! provider in a chain; the chain logs when it ends up here.

use rand::Rng;

use crate::domain::error::TradefloorError;
use crate::ports::price_port::PricePort;

pub struct RandomPriceAdapter;

impl PricePort for RandomPriceAdapter {
    fn name(&self) -> &'static str {
        "random-stub"
    }

    fn get_price(&self, _symbol: &str) -> Result<f64, TradefloorError> {
        Ok(rand::thread_rng().gen_range(1..=100) as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_answers_within_range() {
        let adapter = RandomPriceAdapter;
        for _ in 0..100 {
            let price = adapter.get_price("ANYTHING").unwrap();
            assert!((1.0..=100.0).contains(&price));
            assert!((price - price.trunc()).abs() < f64::EPSILON);
        }
    }
}
