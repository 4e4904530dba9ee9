//! Subscription management and allowlist synchronization
//!
//! Owns the invariants over the subscription rows: no duplicate active
//! (chat, wallet) pair, and the webhook provider's watched-address set
//! tracks the active subscription set. Every successful mutation triggers
//! a replace-all push of the full set; a failed push is a soft warning,
//! never a rollback, so the store and the allowlist may diverge until the
//! next successful push.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;

use crate::api::HeliusClient;
use crate::config::with_config;
use crate::database::Database;
use crate::errors::SwapwatchError;
use crate::logger::{self, LogTag};

/// Whether a mutation's allowlist push went through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Allowlist matches the store (or there is nothing to sync)
    Synced,
    /// Push failed; the mutation is committed and the allowlist will catch
    /// up on the next successful sync
    SyncDeferred,
}

/// Subscribe a chat to a wallet's swap activity
///
/// The existence check is a fast path; the storage-level unique index
/// closes the race between two concurrent adds, so a lost race surfaces as
/// the same duplicate error.
pub async fn add_wallet(
    db: &Database,
    chat_id: i64,
    wallet: &str,
) -> Result<SyncOutcome, SwapwatchError> {
    let exists = db
        .has_active_subscription(chat_id, wallet)
        .map_err(storage_error)?;
    if exists {
        return Err(SwapwatchError::DuplicateSubscription {
            wallet: wallet.to_string(),
        });
    }

    if let Err(e) = db.insert_subscription(chat_id, wallet) {
        if is_constraint_violation(&e) {
            return Err(SwapwatchError::DuplicateSubscription {
                wallet: wallet.to_string(),
            });
        }
        return Err(storage_error(e));
    }

    logger::info(
        LogTag::Database,
        &format!("Chat {} now monitoring {}", chat_id, wallet),
    );

    Ok(sync_after_mutation(db).await)
}

/// Unsubscribe a chat from a wallet
///
/// Removing a wallet that was never subscribed is a no-op: the user-visible
/// outcome is identical either way.
pub async fn remove_wallet(
    db: &Database,
    chat_id: i64,
    wallet: &str,
) -> Result<SyncOutcome, SwapwatchError> {
    let removed = db
        .remove_subscription(chat_id, wallet)
        .map_err(storage_error)?;

    if removed > 0 {
        logger::info(
            LogTag::Database,
            &format!("Chat {} stopped monitoring {}", chat_id, wallet),
        );
    }

    Ok(sync_after_mutation(db).await)
}

/// Push the full active-wallet set to the webhook provider
///
/// Replace-all: no deltas, so a single successful push fully heals any
/// earlier divergence.
pub async fn sync_allowlist(db: &Database) -> Result<(), SwapwatchError> {
    let Some(client) = HeliusClient::from_config() else {
        logger::debug(LogTag::Allowlist, "No webhook credentials; sync skipped");
        return Ok(());
    };

    let wallets = db.get_all_active_wallets().map_err(storage_error)?;

    client
        .replace_webhook_addresses(&wallets)
        .await
        .map_err(|message| SwapwatchError::SyncFailed { message })?;

    logger::info(
        LogTag::Allowlist,
        &format!("Allowlist synced ({} wallets)", wallets.len()),
    );
    Ok(())
}

/// Best-effort sync after a committed mutation
async fn sync_after_mutation(db: &Database) -> SyncOutcome {
    match sync_allowlist(db).await {
        Ok(()) => SyncOutcome::Synced,
        Err(e) => {
            logger::warning(LogTag::Allowlist, &format!("{}", e));
            SyncOutcome::SyncDeferred
        }
    }
}

/// Spawn the optional periodic full-resync loop
///
/// Disabled by default; enabled by setting a nonzero resync interval. The
/// loop heals divergence left behind by failed mutation-time pushes.
pub fn spawn_resync_task(db: Arc<Database>, shutdown: Arc<Notify>) {
    let interval_secs = with_config(|c| c.helius.resync_interval_secs);
    if interval_secs == 0 {
        return;
    }

    tokio::spawn(async move {
        logger::info(
            LogTag::Allowlist,
            &format!("Periodic allowlist resync every {}s", interval_secs),
        );
        loop {
            tokio::select! {
                _ = shutdown.notified() => break,
                _ = tokio::time::sleep(Duration::from_secs(interval_secs)) => {
                    if let Err(e) = sync_allowlist(&db).await {
                        logger::warning(LogTag::Allowlist, &format!("Resync failed: {}", e));
                    }
                }
            }
        }
        logger::info(LogTag::Allowlist, "Resync loop stopped");
    });
}

fn storage_error(e: anyhow::Error) -> SwapwatchError {
    SwapwatchError::Storage {
        message: e.to_string(),
    }
}

/// Detect the partial unique index rejecting a duplicate active row
fn is_constraint_violation(e: &anyhow::Error) -> bool {
    matches!(
        e.downcast_ref::<rusqlite::Error>(),
        Some(rusqlite::Error::SqliteFailure(inner, _))
            if inner.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config;
    use crate::database::Database;

    const WALLET: &str = "7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU";

    fn test_db() -> Database {
        // no Helius credentials in the test environment, so syncs are
        // skipped and mutations resolve as Synced
        config::utils::ensure_loaded();
        Database::open_in_memory().unwrap()
    }

    #[tokio::test]
    async fn second_add_reports_duplicate() {
        let db = test_db();
        add_wallet(&db, 7, WALLET).await.unwrap();

        let err = add_wallet(&db, 7, WALLET).await.unwrap_err();
        assert!(matches!(
            err,
            SwapwatchError::DuplicateSubscription { .. }
        ));
        assert_eq!(db.list_wallets(7).unwrap(), vec![WALLET.to_string()]);
    }

    #[tokio::test]
    async fn removing_unknown_wallet_is_a_noop() {
        let db = test_db();
        let outcome = remove_wallet(&db, 7, WALLET).await.unwrap();
        assert_eq!(outcome, SyncOutcome::Synced);
    }

    #[tokio::test]
    async fn add_remove_add_roundtrip() {
        let db = test_db();
        add_wallet(&db, 7, WALLET).await.unwrap();
        remove_wallet(&db, 7, WALLET).await.unwrap();
        add_wallet(&db, 7, WALLET).await.unwrap();
        assert_eq!(db.list_wallets(7).unwrap().len(), 1);
    }
}
