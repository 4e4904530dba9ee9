//! Per-chat conversation state
//!
//! Menu actions that need a follow-up message (add wallet, remove wallet)
//! park a pending step here. Each step is time-bounded: a timer fires once
//! per `set_state` and clears the step if the user never answered, sending
//! a timeout notice through the injected callback.
//!
//! Every entry carries a monotonically increasing version token. The timer
//! captures the version it was scheduled against and re-checks it when it
//! fires, so a stale timer that outlived a replace or clear cannot wipe a
//! newer step.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;

use crate::logger::{self, LogTag};

/// How long a pending step stays valid
pub const STATE_TTL: Duration = Duration::from_secs(5 * 60);

/// The follow-up the bot is waiting for in a chat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationStep {
    AwaitingWalletAdd,
    AwaitingWalletRemove,
}

struct PendingEntry {
    step: ConversationStep,
    version: u64,
    created_at: DateTime<Utc>,
    timer: JoinHandle<()>,
}

/// Owned store of pending conversation steps, one per chat
///
/// Constructed once in main and passed around by Arc; tests build their own
/// with a counting timeout callback.
pub struct ConversationStore {
    entries: Mutex<HashMap<i64, PendingEntry>>,
    versions: AtomicU64,
    on_timeout: Box<dyn Fn(i64) + Send + Sync>,
}

impl ConversationStore {
    /// Create a store; `on_timeout` is invoked once per expired step
    pub fn new(on_timeout: impl Fn(i64) + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Self {
            entries: Mutex::new(HashMap::new()),
            versions: AtomicU64::new(1),
            on_timeout: Box::new(on_timeout),
        })
    }

    /// Park a pending step for a chat, replacing any existing one
    ///
    /// Schedules the expiry check `ttl` from now and returns the version
    /// token the check was issued against.
    pub fn set_state(self: &Arc<Self>, chat_id: i64, step: ConversationStep, ttl: Duration) -> u64 {
        let version = self.versions.fetch_add(1, Ordering::SeqCst);

        let store = Arc::clone(self);
        let timer = tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            if store.expire_if_current(chat_id, version) {
                (store.on_timeout)(chat_id);
            }
        });

        let mut entries = self.entries.lock().unwrap();
        if let Some(previous) = entries.insert(
            chat_id,
            PendingEntry {
                step,
                version,
                created_at: Utc::now(),
                timer,
            },
        ) {
            previous.timer.abort();
        }

        version
    }

    /// The pending step for a chat, if any; never mutates
    pub fn get_state(&self, chat_id: i64) -> Option<ConversationStep> {
        self.entries.lock().unwrap().get(&chat_id).map(|e| e.step)
    }

    /// Drop the pending step and cancel its timer
    ///
    /// Cancellation is best-effort: a timer already mid-fire runs to
    /// completion and is defused by the version check instead.
    pub fn clear_state(&self, chat_id: i64) {
        if let Some(entry) = self.entries.lock().unwrap().remove(&chat_id) {
            entry.timer.abort();
        }
    }

    /// Expiry check: clear the entry only if `version` is still current
    ///
    /// Returns true when the entry was actually expired (the user never
    /// completed the step); false means the state was replaced or cleared
    /// since the check was scheduled and nothing happens.
    pub fn expire_if_current(&self, chat_id: i64, version: u64) -> bool {
        let mut entries = self.entries.lock().unwrap();
        match entries.get(&chat_id) {
            Some(entry) if entry.version == version => {
                let age = Utc::now() - entry.created_at;
                logger::debug(
                    LogTag::Telegram,
                    &format!(
                        "Chat {} step timed out after {}s",
                        chat_id,
                        age.num_seconds()
                    ),
                );
                entries.remove(&chat_id);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn counting_store() -> (Arc<ConversationStore>, Arc<AtomicUsize>) {
        let notices = Arc::new(AtomicUsize::new(0));
        let counter = notices.clone();
        let store = ConversationStore::new(move |_chat_id| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        (store, notices)
    }

    #[tokio::test]
    async fn set_then_get_then_clear() {
        let (store, _) = counting_store();

        store.set_state(1, ConversationStep::AwaitingWalletAdd, STATE_TTL);
        assert_eq!(
            store.get_state(1),
            Some(ConversationStep::AwaitingWalletAdd)
        );
        assert_eq!(store.get_state(2), None);

        store.clear_state(1);
        assert_eq!(store.get_state(1), None);
    }

    #[tokio::test(start_paused = true)]
    async fn expiry_clears_state_and_notifies_once() {
        let (store, notices) = counting_store();

        store.set_state(1, ConversationStep::AwaitingWalletAdd, Duration::from_secs(60));
        tokio::time::sleep(Duration::from_secs(120)).await;

        assert_eq!(store.get_state(1), None);
        assert_eq!(notices.load(Ordering::SeqCst), 1);

        // nothing left to fire
        tokio::time::sleep(Duration::from_secs(600)).await;
        assert_eq!(notices.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn replaced_state_survives_the_old_timer() {
        let (store, notices) = counting_store();

        store.set_state(1, ConversationStep::AwaitingWalletAdd, Duration::from_secs(60));
        store.set_state(
            1,
            ConversationStep::AwaitingWalletRemove,
            Duration::from_secs(600),
        );

        // past the first ttl, before the second
        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(
            store.get_state(1),
            Some(ConversationStep::AwaitingWalletRemove)
        );
        assert_eq!(notices.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn stale_version_check_is_a_noop() {
        let (store, notices) = counting_store();

        let old_version = store.set_state(1, ConversationStep::AwaitingWalletAdd, STATE_TTL);
        store.set_state(1, ConversationStep::AwaitingWalletRemove, STATE_TTL);

        assert!(!store.expire_if_current(1, old_version));
        assert_eq!(
            store.get_state(1),
            Some(ConversationStep::AwaitingWalletRemove)
        );
        assert_eq!(notices.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn cleared_state_cannot_be_expired() {
        let (store, _) = counting_store();

        let version = store.set_state(1, ConversationStep::AwaitingWalletAdd, STATE_TTL);
        store.clear_state(1);
        assert!(!store.expire_if_current(1, version));
    }
}
