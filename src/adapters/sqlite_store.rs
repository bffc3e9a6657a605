//! SQLite persistent store adapter.
//!
//! Three tables: `accounts` holds one JSON snapshot per account name,
//! `logs` is the append-only audit trail, `market` holds one JSON
//! symbol->close map per trading date.

use std::collections::HashMap;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{OptionalExtension, params};

use crate::domain::account::Account;
use crate::domain::error::TradefloorError;
use crate::domain::transaction::now_timestamp;
use crate::ports::config_port::ConfigPort;
use crate::ports::store_port::{LogEntry, StorePort};

pub struct SqliteStore {
    pool: Pool<SqliteConnectionManager>,
}

impl SqliteStore {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, TradefloorError> {
        let db_path =
            config
                .get_string("sqlite", "path")
                .ok_or_else(|| TradefloorError::ConfigMissing {
                    section: "sqlite".into(),
                    key: "path".into(),
                })?;

        let pool_size = config.get_int("sqlite", "pool_size", 4) as u32;

        let manager = SqliteConnectionManager::file(&db_path);
        let pool =
            Pool::builder()
                .max_size(pool_size)
                .build(manager)
                .map_err(|e: r2d2::Error| TradefloorError::Database {
                    reason: e.to_string(),
                })?;

        Ok(Self { pool })
    }

    pub fn in_memory() -> Result<Self, TradefloorError> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder()
            .max_size(1)
            .build(manager)
            .map_err(|e: r2d2::Error| TradefloorError::Database {
                reason: e.to_string(),
            })?;

        Ok(Self { pool })
    }

    pub fn initialize_schema(&self) -> Result<(), TradefloorError> {
        let conn = self.conn()?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS accounts (
                name TEXT PRIMARY KEY,
                account TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS logs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                datetime TEXT NOT NULL,
                type TEXT NOT NULL,
                message TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_logs_name ON logs(name);
            CREATE TABLE IF NOT EXISTS market (
                date TEXT PRIMARY KEY,
                data TEXT NOT NULL
            );",
        )
        .map_err(|e: rusqlite::Error| TradefloorError::DatabaseQuery {
            reason: e.to_string(),
        })?;

        Ok(())
    }

    fn conn(&self) -> Result<PooledConnection<SqliteConnectionManager>, TradefloorError> {
        self.pool
            .get()
            .map_err(|e: r2d2::Error| TradefloorError::Database {
                reason: e.to_string(),
            })
    }
}

fn query_err(e: rusqlite::Error) -> TradefloorError {
    TradefloorError::DatabaseQuery {
        reason: e.to_string(),
    }
}

fn snapshot_err(e: serde_json::Error) -> TradefloorError {
    TradefloorError::Snapshot {
        reason: e.to_string(),
    }
}

impl StorePort for SqliteStore {
    fn read_account(&self, name: &str) -> Result<Option<Account>, TradefloorError> {
        let conn = self.conn()?;
        let json: Option<String> = conn
            .query_row(
                "SELECT account FROM accounts WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()
            .map_err(query_err)?;

        match json {
            Some(json) => {
                let account = serde_json::from_str(&json).map_err(snapshot_err)?;
                Ok(Some(account))
            }
            None => Ok(None),
        }
    }

    fn write_account(&self, name: &str, account: &Account) -> Result<(), TradefloorError> {
        let json = serde_json::to_string(account).map_err(snapshot_err)?;
        let conn = self.conn()?;
        conn.execute(
            "INSERT OR REPLACE INTO accounts (name, account) VALUES (?1, ?2)",
            params![name, json],
        )
        .map_err(query_err)?;
        Ok(())
    }

    fn append_log(
        &self,
        name: &str,
        category: &str,
        message: &str,
    ) -> Result<(), TradefloorError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO logs (name, datetime, type, message) VALUES (?1, ?2, ?3, ?4)",
            params![name, now_timestamp(), category, message],
        )
        .map_err(query_err)?;
        Ok(())
    }

    fn read_logs(&self, name: &str, limit: usize) -> Result<Vec<LogEntry>, TradefloorError> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(
                "SELECT datetime, type, message FROM logs
                 WHERE name = ?1 ORDER BY id DESC LIMIT ?2",
            )
            .map_err(query_err)?;

        let rows = stmt
            .query_map(params![name, limit as i64], |row| {
                Ok(LogEntry {
                    datetime: row.get(0)?,
                    category: row.get(1)?,
                    message: row.get(2)?,
                })
            })
            .map_err(query_err)?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row.map_err(query_err)?);
        }
        Ok(entries)
    }

    fn read_market(&self, date: &str) -> Result<Option<HashMap<String, f64>>, TradefloorError> {
        let conn = self.conn()?;
        let json: Option<String> = conn
            .query_row(
                "SELECT data FROM market WHERE date = ?1",
                params![date],
                |row| row.get(0),
            )
            .optional()
            .map_err(query_err)?;

        match json {
            Some(json) => {
                let prices = serde_json::from_str(&json).map_err(snapshot_err)?;
                Ok(Some(prices))
            }
            None => Ok(None),
        }
    }

    fn write_market(
        &self,
        date: &str,
        prices: &HashMap<String, f64>,
    ) -> Result<(), TradefloorError> {
        let json = serde_json::to_string(prices).map_err(snapshot_err)?;
        let conn = self.conn()?;
        conn.execute(
            "INSERT OR REPLACE INTO market (date, data) VALUES (?1, ?2)",
            params![date, json],
        )
        .map_err(query_err)?;
        Ok(())
    }
}
