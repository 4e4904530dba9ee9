//! Command and message routing
//!
//! Slash commands open the menu; free text is only consumed when a
//! conversation step is pending for that chat, otherwise it is ignored.
//! When an authorized-chat list is configured, everything here is gated on
//! it; unauthorized chats get one fixed denial notice and nothing else.

pub mod callbacks;
pub mod menu;
pub mod wallets;

use std::sync::Arc;

use teloxide::prelude::*;

use crate::config::with_config;
use crate::database::Database;
use crate::logger::{self, LogTag};
use crate::telegram::notifier::send_message;
use crate::telegram::state::ConversationStore;

// === CANNED MESSAGES ===

pub const WELCOME: &str = "👋 Welcome to the Solana Wallet Tracker!\n\n\
    🔍 Use the buttons below to manage your wallet subscriptions:";
pub const TIMEOUT: &str = "⏰ Operation timed out. Please try again.";
pub const ERROR_GENERIC: &str = "❌ Error processing request. Please try again.";
pub const NO_WALLETS: &str = "📝 You are not monitoring any wallets.";
pub const SETTINGS_STUB: &str = "⚙️ Settings feature coming soon!";
pub const ACCESS_DENIED: &str = "🚫 You are not authorized to use this bot.";
pub const PROMPT_ADD: &str = "👛 Enter the wallet address you want to monitor:";
pub const PROMPT_REMOVE: &str = "👛 Enter the wallet address you want to stop monitoring:";

/// Check whether a chat may use the bot
///
/// An empty authorized list means the bot is open to everyone.
pub fn check_auth(chat_id: i64) -> bool {
    let authorized = with_config(|c| c.telegram.authorized_chat_ids.clone());
    authorized.is_empty() || authorized.contains(&chat_id)
}

/// Best-effort generic error reply
pub async fn send_generic_error(bot: &Bot, chat_id: i64) {
    if let Err(e) = send_message(bot, chat_id, ERROR_GENERIC).await {
        logger::warning(
            LogTag::Telegram,
            &format!("Failed to send error notice: {}", e),
        );
    }
}

/// Handle one incoming message: commands first, then pending free text
pub async fn handle_message(
    bot: &Bot,
    db: &Database,
    store: &Arc<ConversationStore>,
    message: &Message,
) -> Result<(), String> {
    let chat_id = message.chat.id.0;
    let Some(text) = message.text() else {
        return Ok(());
    };

    if !check_auth(chat_id) {
        logger::debug(
            LogTag::Telegram,
            &format!("Denied unauthorized chat {}", chat_id),
        );
        return send_message(bot, chat_id, ACCESS_DENIED).await;
    }

    match text.trim() {
        "/start" | "/menu" => menu::send_main_menu(bot, chat_id).await,
        "/help" => menu::send_help(bot, chat_id).await,
        command if command.starts_with('/') => {
            // unknown commands are ignored, as is any text without a
            // pending conversation step
            Ok(())
        }
        free_text => wallets::handle_pending_input(bot, db, store, chat_id, free_text).await,
    }
}
