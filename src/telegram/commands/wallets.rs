//! Wallet add/remove/list flows
//!
//! Adding or removing a wallet is a two-step conversation: a button click
//! parks a pending step (with a ttl), and the next free-text message from
//! that chat completes it.

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::{ChatId, ForceReply, ParseMode};

use super::{menu, ERROR_GENERIC, NO_WALLETS, PROMPT_ADD, PROMPT_REMOVE};
use crate::database::Database;
use crate::errors::SwapwatchError;
use crate::logger::{self, LogTag};
use crate::telegram::notifier::send_message;
use crate::telegram::state::{ConversationStep, ConversationStore, STATE_TTL};
use crate::watchlist::{self, SyncOutcome};

/// Ask for the wallet to add and park the pending step
pub async fn prompt_add(
    bot: &Bot,
    store: &Arc<ConversationStore>,
    chat_id: i64,
) -> Result<(), String> {
    store.set_state(chat_id, ConversationStep::AwaitingWalletAdd, STATE_TTL);
    send_prompt(bot, chat_id, PROMPT_ADD).await
}

/// Ask for the wallet to remove and park the pending step
pub async fn prompt_remove(
    bot: &Bot,
    store: &Arc<ConversationStore>,
    chat_id: i64,
) -> Result<(), String> {
    store.set_state(chat_id, ConversationStep::AwaitingWalletRemove, STATE_TTL);
    send_prompt(bot, chat_id, PROMPT_REMOVE).await
}

async fn send_prompt(bot: &Bot, chat_id: i64, prompt: &str) -> Result<(), String> {
    bot.send_message(ChatId(chat_id), prompt)
        .reply_markup(ForceReply::new())
        .await
        .map_err(|e| format!("Failed to send prompt: {}", e))?;
    Ok(())
}

/// Complete whichever step is pending for this chat, if any
///
/// The step is cleared as soon as it is claimed, so a slow completion can
/// not be double-fired by a re-sent message or raced by its expiry timer.
pub async fn handle_pending_input(
    bot: &Bot,
    db: &Database,
    store: &Arc<ConversationStore>,
    chat_id: i64,
    text: &str,
) -> Result<(), String> {
    let Some(step) = store.get_state(chat_id) else {
        return Ok(());
    };
    store.clear_state(chat_id);

    let wallet = text.trim();
    match step {
        ConversationStep::AwaitingWalletAdd => complete_add(bot, db, chat_id, wallet).await?,
        ConversationStep::AwaitingWalletRemove => {
            complete_remove(bot, db, chat_id, wallet).await?
        }
    }

    menu::send_main_menu(bot, chat_id).await
}

async fn complete_add(bot: &Bot, db: &Database, chat_id: i64, wallet: &str) -> Result<(), String> {
    let reply = match watchlist::add_wallet(db, chat_id, wallet).await {
        Ok(outcome) => with_sync_note(
            format!("✅ Now monitoring wallet: <code>{}</code>", wallet),
            outcome,
        ),
        Err(SwapwatchError::DuplicateSubscription { .. }) => {
            format!("⚠️ Wallet <code>{}</code> is already being monitored.", wallet)
        }
        Err(e) => {
            logger::error(LogTag::Telegram, &format!("Add wallet failed: {}", e));
            ERROR_GENERIC.to_string()
        }
    };
    send_message(bot, chat_id, &reply).await
}

async fn complete_remove(
    bot: &Bot,
    db: &Database,
    chat_id: i64,
    wallet: &str,
) -> Result<(), String> {
    let reply = match watchlist::remove_wallet(db, chat_id, wallet).await {
        Ok(outcome) => with_sync_note(
            format!("❌ Stopped monitoring wallet: <code>{}</code>", wallet),
            outcome,
        ),
        Err(e) => {
            logger::error(LogTag::Telegram, &format!("Remove wallet failed: {}", e));
            ERROR_GENERIC.to_string()
        }
    };
    send_message(bot, chat_id, &reply).await
}

/// Append the soft warning when the allowlist push did not go through
fn with_sync_note(reply: String, outcome: SyncOutcome) -> String {
    match outcome {
        SyncOutcome::Synced => reply,
        SyncOutcome::SyncDeferred => format!(
            "{}\n\n⚠️ The watch service update is delayed; it will catch up on the next change.",
            reply
        ),
    }
}

/// List the chat's monitored wallets
pub async fn send_wallet_list(bot: &Bot, db: &Database, chat_id: i64) -> Result<(), String> {
    let reply = match db.list_wallets(chat_id) {
        Ok(wallets) if wallets.is_empty() => NO_WALLETS.to_string(),
        Ok(wallets) => {
            let lines = wallets
                .iter()
                .map(|w| format!("<code>{}</code>", w))
                .collect::<Vec<_>>()
                .join("\n");
            format!("📝 Monitored wallets:\n\n{}", lines)
        }
        Err(e) => {
            logger::error(LogTag::Telegram, &format!("List wallets failed: {}", e));
            ERROR_GENERIC.to_string()
        }
    };

    bot.send_message(ChatId(chat_id), reply)
        .parse_mode(ParseMode::Html)
        .await
        .map_err(|e| format!("Failed to send wallet list: {}", e))?;

    menu::send_main_menu(bot, chat_id).await
}
