//! Callback query handlers for inline keyboard buttons

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::CallbackQuery;

use super::{check_auth, menu, wallets, ACCESS_DENIED, SETTINGS_STUB};
use crate::database::Database;
use crate::logger::{self, LogTag};
use crate::telegram::notifier::send_message;
use crate::telegram::state::ConversationStore;

/// Handle a button click from an inline keyboard
pub async fn handle_callback_query(
    bot: &Bot,
    db: &Database,
    store: &Arc<ConversationStore>,
    query: CallbackQuery,
) -> Result<(), String> {
    // answer first to clear the client's loading indicator
    bot.answer_callback_query(&query.id)
        .await
        .map_err(|e| format!("Failed to answer callback: {}", e))?;

    let Some(chat_id) = query.message.as_ref().map(|m| m.chat().id.0) else {
        logger::warning(LogTag::Telegram, "Callback without message context");
        return Ok(());
    };

    if !check_auth(chat_id) {
        return send_message(bot, chat_id, ACCESS_DENIED).await;
    }

    let data = query.data.as_deref().unwrap_or("");
    let parts: Vec<&str> = data.split(':').collect();

    match parts.as_slice() {
        ["wallet", "add"] => wallets::prompt_add(bot, store, chat_id).await,
        ["wallet", "remove"] => wallets::prompt_remove(bot, store, chat_id).await,
        ["wallet", "list"] => wallets::send_wallet_list(bot, db, chat_id).await,

        ["menu", "main"] => menu::send_main_menu(bot, chat_id).await,
        ["menu", "help"] => menu::send_help(bot, chat_id).await,
        ["menu", "settings"] => {
            send_message(bot, chat_id, SETTINGS_STUB).await?;
            menu::send_main_menu(bot, chat_id).await
        }

        _ => {
            logger::debug(LogTag::Telegram, &format!("Unknown callback: {}", data));
            Ok(())
        }
    }
}
