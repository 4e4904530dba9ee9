//! Menu and help handlers

use teloxide::prelude::*;
use teloxide::types::{ChatId, ParseMode};

use super::WELCOME;
use crate::telegram::keyboards;

/// Send the welcome message with the main action keyboard
pub async fn send_main_menu(bot: &Bot, chat_id: i64) -> Result<(), String> {
    bot.send_message(ChatId(chat_id), WELCOME)
        .parse_mode(ParseMode::Html)
        .reply_markup(keyboards::main_menu())
        .await
        .map_err(|e| format!("Failed to send menu: {}", e))?;
    Ok(())
}

/// Send the command list
pub async fn send_help(bot: &Bot, chat_id: i64) -> Result<(), String> {
    let commands = [
        ("/start", "Start the bot"),
        ("/menu", "Show main menu"),
        ("/help", "Show this help message"),
    ];
    let command_list = commands
        .iter()
        .map(|(cmd, desc)| format!("<code>{}</code> - {}", cmd, desc))
        .collect::<Vec<_>>()
        .join("\n");

    bot.send_message(
        ChatId(chat_id),
        format!(
            "Available commands:\n\n{}\n\nOr use the menu buttons below:",
            command_list
        ),
    )
    .parse_mode(ParseMode::Html)
    .reply_markup(keyboards::main_menu())
    .await
    .map_err(|e| format!("Failed to send help: {}", e))?;
    Ok(())
}
