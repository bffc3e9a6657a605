//! Persistent store port trait.

use std::collections::HashMap;

use crate::domain::account::Account;
use crate::domain::error::TradefloorError;

/// One audit-log row, newest first when read back.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub datetime: String,
    pub category: String,
    pub message: String,
}

/// Durable, read-after-write consistent store for account snapshots, the
/// audit trail, and per-date end-of-day price maps.
pub trait StorePort: Send + Sync {
    /// Load the full snapshot for `name`, or `None` if the account has
    /// never been persisted.
    fn read_account(&self, name: &str) -> Result<Option<Account>, TradefloorError>;

    /// Persist the full snapshot for `name`, replacing any previous one.
    fn write_account(&self, name: &str, account: &Account) -> Result<(), TradefloorError>;

    /// Append one audit-trail entry for `name`.
    fn append_log(&self, name: &str, category: &str, message: &str)
    -> Result<(), TradefloorError>;

    /// Read back up to `limit` audit-trail entries for `name`, newest first.
    fn read_logs(&self, name: &str, limit: usize) -> Result<Vec<LogEntry>, TradefloorError>;

    /// Load the end-of-day symbol->close map for `date` (`YYYY-MM-DD`).
    fn read_market(&self, date: &str) -> Result<Option<HashMap<String, f64>>, TradefloorError>;

    /// Persist the end-of-day symbol->close map for `date`.
    fn write_market(
        &self,
        date: &str,
        prices: &HashMap<String, f64>,
    ) -> Result<(), TradefloorError>;
}
