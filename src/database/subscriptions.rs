use anyhow::Result;
use chrono::Utc;
use rusqlite::params;

use crate::database::Database;

impl Database {
    /// Check whether an active subscription already exists for this pair
    pub fn has_active_subscription(&self, chat_id: i64, wallet: &str) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM wallet_subscriptions
             WHERE chat_id = ?1 AND wallet_address = ?2 AND is_active = 1",
            params![chat_id, wallet],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Insert an active subscription row
    ///
    /// The partial unique index rejects a second active row for the same
    /// pair, so two racing inserts cannot both succeed.
    pub fn insert_subscription(&self, chat_id: i64, wallet: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO wallet_subscriptions (chat_id, wallet_address, is_active, created_at)
             VALUES (?1, ?2, 1, ?3)",
            params![chat_id, wallet, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Deactivate the matching subscription; returns the number of rows hit
    ///
    /// Zero rows is a valid outcome, not an error.
    pub fn remove_subscription(&self, chat_id: i64, wallet: &str) -> Result<usize> {
        let conn = self.conn.lock().unwrap();
        let changed = conn.execute(
            "UPDATE wallet_subscriptions SET is_active = 0
             WHERE chat_id = ?1 AND wallet_address = ?2 AND is_active = 1",
            params![chat_id, wallet],
        )?;
        Ok(changed)
    }

    /// All wallets a chat is actively monitoring
    pub fn list_wallets(&self, chat_id: i64) -> Result<Vec<String>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT wallet_address FROM wallet_subscriptions
             WHERE chat_id = ?1 AND is_active = 1",
        )?;
        let rows = stmt.query_map(params![chat_id], |row| row.get::<_, String>(0))?;

        let mut wallets = Vec::new();
        for wallet in rows {
            wallets.push(wallet?);
        }
        Ok(wallets)
    }

    /// All chats actively subscribed to this exact wallet address
    ///
    /// Case-sensitive exact match; addresses are never normalized.
    pub fn find_users_for_wallet(&self, wallet: &str) -> Result<Vec<i64>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT chat_id FROM wallet_subscriptions
             WHERE wallet_address = ?1 AND is_active = 1",
        )?;
        let rows = stmt.query_map(params![wallet], |row| row.get::<_, i64>(0))?;

        let mut chats = Vec::new();
        for chat in rows {
            chats.push(chat?);
        }
        Ok(chats)
    }

    /// Distinct set of all actively-monitored wallet addresses
    ///
    /// This is the input to the allowlist sync.
    pub fn get_all_active_wallets(&self) -> Result<Vec<String>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT DISTINCT wallet_address FROM wallet_subscriptions WHERE is_active = 1",
        )?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut wallets = Vec::new();
        for wallet in rows {
            wallets.push(wallet?);
        }
        Ok(wallets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WALLET_A: &str = "7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU";
    const WALLET_B: &str = "9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM";

    #[test]
    fn insert_then_lookup() {
        let db = Database::open_in_memory().unwrap();
        db.insert_subscription(1, WALLET_A).unwrap();

        assert!(db.has_active_subscription(1, WALLET_A).unwrap());
        assert!(!db.has_active_subscription(2, WALLET_A).unwrap());
        assert_eq!(db.list_wallets(1).unwrap(), vec![WALLET_A.to_string()]);
    }

    #[test]
    fn duplicate_active_insert_is_rejected_by_index() {
        let db = Database::open_in_memory().unwrap();
        db.insert_subscription(1, WALLET_A).unwrap();

        let err = db.insert_subscription(1, WALLET_A).unwrap_err();
        let sqlite_err = err.downcast_ref::<rusqlite::Error>().unwrap();
        match sqlite_err {
            rusqlite::Error::SqliteFailure(e, _) => {
                assert_eq!(e.code, rusqlite::ErrorCode::ConstraintViolation);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn remove_missing_subscription_hits_zero_rows() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.remove_subscription(1, WALLET_A).unwrap(), 0);
    }

    #[test]
    fn removed_wallet_can_be_added_again() {
        let db = Database::open_in_memory().unwrap();
        db.insert_subscription(1, WALLET_A).unwrap();
        assert_eq!(db.remove_subscription(1, WALLET_A).unwrap(), 1);
        assert!(db.list_wallets(1).unwrap().is_empty());

        // the partial index only constrains active rows
        db.insert_subscription(1, WALLET_A).unwrap();
        assert!(db.has_active_subscription(1, WALLET_A).unwrap());
    }

    #[test]
    fn find_users_is_exact_match() {
        let db = Database::open_in_memory().unwrap();
        db.insert_subscription(1, WALLET_A).unwrap();
        db.insert_subscription(2, WALLET_A).unwrap();
        db.insert_subscription(3, WALLET_B).unwrap();

        let mut users = db.find_users_for_wallet(WALLET_A).unwrap();
        users.sort_unstable();
        assert_eq!(users, vec![1, 2]);

        let lowered = WALLET_A.to_lowercase();
        assert!(db.find_users_for_wallet(&lowered).unwrap().is_empty());
    }

    #[test]
    fn active_wallet_set_is_distinct() {
        let db = Database::open_in_memory().unwrap();
        db.insert_subscription(1, WALLET_A).unwrap();
        db.insert_subscription(2, WALLET_A).unwrap();
        db.insert_subscription(1, WALLET_B).unwrap();

        let mut wallets = db.get_all_active_wallets().unwrap();
        wallets.sort();
        assert_eq!(wallets.len(), 2);
    }
}
