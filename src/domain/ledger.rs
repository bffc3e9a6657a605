//! Keyed account ledger: load-mutate-persist operations over the store.
//!
//! Every operation re-reads the latest persisted snapshot, mutates it, and
//! writes the full snapshot back before returning. Operations on the same
//! account name serialize through a per-name lock (two concurrent buys must
//! not both read the pre-trade balance); different names are independent.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::account::Account;
use super::error::TradefloorError;
use crate::ports::price_port::PricePort;
use crate::ports::store_port::StorePort;

/// Audit-log category for ledger operations.
const LOG_CATEGORY: &str = "account";

pub struct Ledger {
    store: Arc<dyn StorePort>,
    prices: Arc<dyn PricePort>,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

fn account_key(name: &str) -> String {
    name.trim().to_lowercase()
}

impl Ledger {
    pub fn new(store: Arc<dyn StorePort>, prices: Arc<dyn PricePort>) -> Self {
        Ledger {
            store,
            prices,
            locks: Mutex::new(HashMap::new()),
        }
    }

    fn lock_for(&self, key: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Read the latest snapshot, creating and persisting a fresh account on
    /// first access. Assumes the caller holds the per-name lock.
    fn load(&self, key: &str) -> Result<Account, TradefloorError> {
        match self.store.read_account(key)? {
            Some(account) => Ok(account),
            None => {
                let account = Account::new(key);
                self.store.write_account(key, &account)?;
                Ok(account)
            }
        }
    }

    /// Latest snapshot for `name`, created on first access.
    pub fn get(&self, name: &str) -> Result<Account, TradefloorError> {
        let key = account_key(name);
        let lock = self.lock_for(&key);
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());
        self.load(&key)
    }

    /// Render the report, persist the grown time series, audit-log the read.
    fn render_report(
        &self,
        key: &str,
        account: &mut Account,
    ) -> Result<String, TradefloorError> {
        let report = account.report(self.prices.as_ref())?;
        self.store.write_account(key, account)?;
        self.store
            .append_log(key, LOG_CATEGORY, "Retrieved account details")?;
        report.to_json()
    }

    fn completed(&self, key: &str, account: &mut Account) -> Result<String, TradefloorError> {
        let report = self.render_report(key, account)?;
        Ok(format!("Completed. Latest details:\n{report}"))
    }

    pub fn buy_shares(
        &self,
        name: &str,
        symbol: &str,
        quantity: i64,
        rationale: &str,
    ) -> Result<String, TradefloorError> {
        let key = account_key(name);
        let lock = self.lock_for(&key);
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut account = self.load(&key)?;
        let txn = account.buy_shares(self.prices.as_ref(), symbol, quantity, rationale)?;
        self.store.write_account(&key, &account)?;
        self.store.append_log(
            &key,
            LOG_CATEGORY,
            &format!("Bought {} of {}", txn.quantity, txn.symbol),
        )?;
        log::info!("{key}: bought {} of {} at {}", txn.quantity, txn.symbol, txn.price);
        self.completed(&key, &mut account)
    }

    pub fn sell_shares(
        &self,
        name: &str,
        symbol: &str,
        quantity: i64,
        rationale: &str,
    ) -> Result<String, TradefloorError> {
        let key = account_key(name);
        let lock = self.lock_for(&key);
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut account = self.load(&key)?;
        let txn = account.sell_shares(self.prices.as_ref(), symbol, quantity, rationale)?;
        self.store.write_account(&key, &account)?;
        self.store.append_log(
            &key,
            LOG_CATEGORY,
            &format!("Sold {} of {}", -txn.quantity, txn.symbol),
        )?;
        log::info!("{key}: sold {} of {} at {}", -txn.quantity, txn.symbol, txn.price);
        self.completed(&key, &mut account)
    }

    pub fn deposit(&self, name: &str, amount: f64) -> Result<String, TradefloorError> {
        let key = account_key(name);
        let lock = self.lock_for(&key);
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut account = self.load(&key)?;
        account.deposit(amount)?;
        self.store.write_account(&key, &account)?;
        self.store
            .append_log(&key, LOG_CATEGORY, &format!("Deposited ${amount:.2}"))?;
        self.completed(&key, &mut account)
    }

    pub fn withdraw(&self, name: &str, amount: f64) -> Result<String, TradefloorError> {
        let key = account_key(name);
        let lock = self.lock_for(&key);
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut account = self.load(&key)?;
        account.withdraw(amount)?;
        self.store.write_account(&key, &account)?;
        self.store
            .append_log(&key, LOG_CATEGORY, &format!("Withdrew ${amount:.2}"))?;
        self.completed(&key, &mut account)
    }

    /// JSON snapshot with valuation figures; grows the time series by one.
    pub fn report(&self, name: &str) -> Result<String, TradefloorError> {
        let key = account_key(name);
        let lock = self.lock_for(&key);
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut account = self.load(&key)?;
        self.render_report(&key, &mut account)
    }

    pub fn get_strategy(&self, name: &str) -> Result<String, TradefloorError> {
        let key = account_key(name);
        let lock = self.lock_for(&key);
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());

        let account = self.load(&key)?;
        self.store
            .append_log(&key, LOG_CATEGORY, "Retrieved strategy")?;
        Ok(account.strategy)
    }

    pub fn change_strategy(&self, name: &str, strategy: &str) -> Result<String, TradefloorError> {
        let key = account_key(name);
        let lock = self.lock_for(&key);
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut account = self.load(&key)?;
        account.strategy = strategy.to_string();
        self.store.write_account(&key, &account)?;
        self.store
            .append_log(&key, LOG_CATEGORY, "Changed strategy")?;
        Ok("Changed strategy".to_string())
    }

    /// Reinitialize the named account in place, preserving its identity.
    pub fn reset(&self, name: &str, strategy: &str) -> Result<(), TradefloorError> {
        let key = account_key(name);
        let lock = self.lock_for(&key);
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut account = self.load(&key)?;
        account.reset(strategy);
        self.store.write_account(&key, &account)?;
        self.store.append_log(&key, LOG_CATEGORY, "Reset account")?;
        log::info!("{key}: account reset");
        Ok(())
    }
}
