//! Bot lifecycle and update polling
//!
//! Validates the token, registers the command menu, then long-polls
//! getUpdates with offset tracking. Every update is handled behind a
//! catch-all: a failing handler logs and answers with a generic error, it
//! never takes the loop down.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::{BotCommand, UpdateKind};
use tokio::sync::Notify;

use crate::config::with_config;
use crate::database::Database;
use crate::logger::{self, LogTag};
use crate::telegram::commands;
use crate::telegram::state::ConversationStore;

/// Create and validate the bot from the configured token
pub async fn init_bot() -> Result<Bot, String> {
    let token = with_config(|c| c.telegram.bot_token.clone());
    if token.is_empty() {
        return Err("TELEGRAM_BOT_TOKEN is not configured".to_string());
    }

    let bot = Bot::new(&token);
    match bot.get_me().await {
        Ok(me) => {
            logger::info(
                LogTag::Telegram,
                &format!(
                    "Bot connected: @{} (ID: {})",
                    me.username.as_deref().unwrap_or("unknown"),
                    me.id
                ),
            );
            Ok(bot)
        }
        Err(e) => Err(format!("Invalid bot token: {}", e)),
    }
}

/// Register the command menu with Telegram
pub async fn register_commands(bot: &Bot) -> Result<(), String> {
    bot.set_my_commands(vec![
        BotCommand::new("start", "Start the bot"),
        BotCommand::new("menu", "Show main menu"),
        BotCommand::new("help", "Show help"),
    ])
    .await
    .map_err(|e| format!("Failed to register commands: {}", e))?;
    Ok(())
}

/// Long-poll updates until shutdown is signalled
pub async fn run_polling(
    bot: Bot,
    db: Arc<Database>,
    store: Arc<ConversationStore>,
    shutdown: Arc<Notify>,
) {
    logger::info(LogTag::Telegram, "Update polling started");
    let offset = AtomicI64::new(0);

    loop {
        tokio::select! {
            _ = shutdown.notified() => {
                logger::info(LogTag::Telegram, "Update polling received shutdown signal");
                break;
            }
            _ = poll_once(&bot, &db, &store, &offset) => {
                // keep polling
            }
        }
    }

    logger::info(LogTag::Telegram, "Update polling stopped");
}

/// One getUpdates round; errors pause briefly and the loop retries
async fn poll_once(bot: &Bot, db: &Database, store: &Arc<ConversationStore>, offset: &AtomicI64) {
    let current_offset = offset.load(Ordering::SeqCst);
    let mut request = bot.get_updates().timeout(10);
    if current_offset > 0 {
        request = request.offset(current_offset as i32);
    }

    match request.await {
        Ok(updates) => {
            for update in updates {
                offset.store(update.id.0 as i64 + 1, Ordering::SeqCst);
                handle_update(bot, db, store, update.kind).await;
            }
        }
        Err(e) => {
            logger::debug(
                LogTag::Telegram,
                &format!("Poll error (will retry): {}", e),
            );
            tokio::time::sleep(std::time::Duration::from_secs(1)).await;
        }
    }
}

/// Route one update; nothing inside is allowed to escape
async fn handle_update(
    bot: &Bot,
    db: &Database,
    store: &Arc<ConversationStore>,
    kind: UpdateKind,
) {
    match kind {
        UpdateKind::Message(message) => {
            let chat_id = message.chat.id.0;
            if let Err(e) = commands::handle_message(bot, db, store, &message).await {
                logger::error(LogTag::Telegram, &format!("Message handler error: {}", e));
                commands::send_generic_error(bot, chat_id).await;
            }
        }
        UpdateKind::CallbackQuery(query) => {
            let chat_id = query.message.as_ref().map(|m| m.chat().id.0);
            if let Err(e) = commands::callbacks::handle_callback_query(bot, db, store, query).await
            {
                logger::error(LogTag::Telegram, &format!("Callback handler error: {}", e));
                if let Some(chat_id) = chat_id {
                    commands::send_generic_error(bot, chat_id).await;
                }
            }
        }
        _ => {}
    }
}
