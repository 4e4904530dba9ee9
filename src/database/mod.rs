//! SQLite-backed persistence for swapwatch
//!
//! One table, `wallet_subscriptions`, keyed by (chat, wallet). The partial
//! unique index makes a concurrent duplicate insert fail atomically at the
//! storage layer; callers treat that failure the same as the fast-path
//! existence check.

pub mod subscriptions;

use std::path::Path;
use std::sync::Mutex;

use anyhow::Result;
use rusqlite::Connection;

use crate::logger::{self, LogTag};

/// Database handle shared across tasks
pub struct Database {
    pub(crate) conn: Mutex<Connection>,
}

impl Database {
    /// Open (or create) the database at `path` and ensure the schema exists
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS wallet_subscriptions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                chat_id INTEGER NOT NULL,
                wallet_address TEXT NOT NULL,
                is_active INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL
            );
            CREATE UNIQUE INDEX IF NOT EXISTS idx_subscriptions_active
                ON wallet_subscriptions(chat_id, wallet_address)
                WHERE is_active = 1;
            CREATE INDEX IF NOT EXISTS idx_subscriptions_wallet
                ON wallet_subscriptions(wallet_address)
                WHERE is_active = 1;",
        )?;

        logger::info(
            LogTag::Database,
            &format!("Database ready at {}", path.as_ref().display()),
        );

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (tests)
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS wallet_subscriptions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                chat_id INTEGER NOT NULL,
                wallet_address TEXT NOT NULL,
                is_active INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL
            );
            CREATE UNIQUE INDEX IF NOT EXISTS idx_subscriptions_active
                ON wallet_subscriptions(chat_id, wallet_address)
                WHERE is_active = 1;",
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}
