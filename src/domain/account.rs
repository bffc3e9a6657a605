//! Account state, trade execution and valuation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::error::TradefloorError;
use super::symbols::normalize_symbol;
use super::transaction::{Transaction, now_timestamp};
use crate::ports::price_port::PricePort;

/// Cash balance every account starts with.
pub const INITIAL_BALANCE: f64 = 10_000.0;

/// Fractional execution cost applied against the trader: buys fill at
/// `price * (1 + SPREAD)`, sells at `price * (1 - SPREAD)`.
pub const SPREAD: f64 = 0.002;

/// One named trading account: cash, holdings, trade history and a
/// portfolio-value time series.
///
/// Invariants: `balance` never goes negative through a successful
/// operation; every value in `holdings` is strictly positive, and a
/// position closed to zero is removed from the map entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    pub balance: f64,
    pub strategy: String,
    pub holdings: HashMap<String, i64>,
    pub transactions: Vec<Transaction>,
    pub portfolio_value_time_series: Vec<(String, f64)>,
}

impl Account {
    /// Fresh account. Names are case-insensitive and held in lowercase.
    pub fn new(name: &str) -> Self {
        Account {
            name: name.trim().to_lowercase(),
            balance: INITIAL_BALANCE,
            strategy: String::new(),
            holdings: HashMap::new(),
            transactions: Vec::new(),
            portfolio_value_time_series: Vec::new(),
        }
    }

    /// Reinitialize to the empty starting state, keeping the identity.
    pub fn reset(&mut self, strategy: &str) {
        self.balance = INITIAL_BALANCE;
        self.strategy = strategy.to_string();
        self.holdings.clear();
        self.transactions.clear();
        self.portfolio_value_time_series.clear();
    }

    pub fn deposit(&mut self, amount: f64) -> Result<(), TradefloorError> {
        if amount <= 0.0 {
            return Err(TradefloorError::InvalidAmount { amount });
        }
        self.balance += amount;
        Ok(())
    }

    pub fn withdraw(&mut self, amount: f64) -> Result<(), TradefloorError> {
        if amount <= 0.0 {
            return Err(TradefloorError::InvalidAmount { amount });
        }
        if amount > self.balance {
            return Err(TradefloorError::InsufficientFunds {
                action: "withdrawal".into(),
                needed: amount,
                available: self.balance,
            });
        }
        self.balance -= amount;
        Ok(())
    }

    /// Buy shares at the current price plus spread.
    ///
    /// If the full order costs more than the available cash, the quantity is
    /// silently reduced to the maximum affordable whole number of shares and
    /// the resize is noted in the recorded rationale. The order only fails
    /// outright when not even one share is affordable. All validation runs
    /// before any state is touched.
    pub fn buy_shares(
        &mut self,
        prices: &dyn PricePort,
        symbol: &str,
        quantity: i64,
        rationale: &str,
    ) -> Result<Transaction, TradefloorError> {
        let (symbol, map_note) = normalize_symbol(symbol);
        let mut rationale = match map_note {
            Some(note) => format!("{rationale} {note}"),
            None => rationale.to_string(),
        };

        if quantity <= 0 {
            return Err(TradefloorError::InvalidAmount {
                amount: quantity as f64,
            });
        }

        let price = prices.get_price(&symbol)?;
        if price == 0.0 {
            return Err(TradefloorError::UnknownSymbol { symbol });
        }

        let buy_price = price * (1.0 + SPREAD);
        let mut quantity = quantity;
        let mut total_cost = buy_price * quantity as f64;

        // Not enough cash: auto-size down to the maximum affordable quantity
        if total_cost > self.balance {
            let max_affordable = (self.balance / buy_price).floor() as i64;
            if max_affordable < 1 {
                return Err(TradefloorError::InsufficientFunds {
                    action: format!("1 share of {symbol}"),
                    needed: buy_price,
                    available: self.balance,
                });
            }
            let original_qty = quantity;
            quantity = max_affordable;
            total_cost = buy_price * quantity as f64;
            rationale = format!(
                "{rationale} (auto-sized from {original_qty} to {quantity} due to available cash)"
            );
        }

        *self.holdings.entry(symbol.clone()).or_insert(0) += quantity;
        let transaction = Transaction {
            symbol,
            quantity,
            price: buy_price,
            timestamp: now_timestamp(),
            rationale,
        };
        self.transactions.push(transaction.clone());
        self.balance -= total_cost;

        Ok(transaction)
    }

    /// Sell held shares at the current price minus spread.
    ///
    /// Unlike buys there is no auto-sizing: asking for more shares than are
    /// held fails without touching any state. A position sold down to
    /// exactly zero disappears from `holdings`.
    pub fn sell_shares(
        &mut self,
        prices: &dyn PricePort,
        symbol: &str,
        quantity: i64,
        rationale: &str,
    ) -> Result<Transaction, TradefloorError> {
        let (symbol, map_note) = normalize_symbol(symbol);
        let rationale = match map_note {
            Some(note) => format!("{rationale} {note}"),
            None => rationale.to_string(),
        };

        if quantity <= 0 {
            return Err(TradefloorError::InvalidAmount {
                amount: quantity as f64,
            });
        }

        let held = self.holdings.get(&symbol).copied().unwrap_or(0);
        if held < quantity {
            return Err(TradefloorError::InsufficientHoldings {
                symbol,
                requested: quantity,
                held,
            });
        }

        let price = prices.get_price(&symbol)?;
        let sell_price = price * (1.0 - SPREAD);
        let proceeds = sell_price * quantity as f64;

        let remaining = held - quantity;
        if remaining == 0 {
            self.holdings.remove(&symbol);
        } else {
            self.holdings.insert(symbol.clone(), remaining);
        }

        // Negative quantity marks the sell in the ledger
        let transaction = Transaction {
            symbol,
            quantity: -quantity,
            price: sell_price,
            timestamp: now_timestamp(),
            rationale,
        };
        self.transactions.push(transaction.clone());
        self.balance += proceeds;

        Ok(transaction)
    }

    /// Cash plus the marked value of every holding, priced fresh per call.
    /// A symbol the oracle no longer recognizes contributes zero rather
    /// than failing the valuation.
    pub fn portfolio_value(&self, prices: &dyn PricePort) -> Result<f64, TradefloorError> {
        let mut total = self.balance;
        for (symbol, quantity) in &self.holdings {
            total += prices.get_price(symbol)? * *quantity as f64;
        }
        Ok(total)
    }

    /// Profit or loss relative to the cumulative signed notional of all
    /// trades. Nets cash back out of the marked value, so deposits and
    /// withdrawals of principal do not show up here.
    pub fn profit_loss(&self, portfolio_value: f64) -> f64 {
        let initial_spend: f64 = self.transactions.iter().map(Transaction::total).sum();
        portfolio_value - initial_spend - self.balance
    }

    /// Build the structured snapshot payload, appending one point to the
    /// portfolio-value time series. Deliberately not idempotent: each call
    /// grows the series by one entry. The caller persists afterwards.
    pub fn report(&mut self, prices: &dyn PricePort) -> Result<AccountReport, TradefloorError> {
        let portfolio_value = self.portfolio_value(prices)?;
        self.portfolio_value_time_series
            .push((now_timestamp(), portfolio_value));
        let total_profit_loss = self.profit_loss(portfolio_value);
        Ok(AccountReport {
            account: self.clone(),
            total_portfolio_value: portfolio_value,
            total_profit_loss,
        })
    }
}

/// Full account snapshot plus derived valuation figures, serialized as one
/// flat JSON object.
#[derive(Debug, Clone, Serialize)]
pub struct AccountReport {
    #[serde(flatten)]
    pub account: Account,
    pub total_portfolio_value: f64,
    pub total_profit_loss: f64,
}

impl AccountReport {
    pub fn to_json(&self) -> Result<String, TradefloorError> {
        serde_json::to_string(self).map_err(|e| TradefloorError::Snapshot {
            reason: e.to_string(),
        })
    }
}
